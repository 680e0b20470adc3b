//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod category;
pub mod collision;
pub mod level;
pub mod scroll;
pub mod shape;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use category::{BodyFilter, Category, CategoryMask};
pub use collision::{BodyId, Contact, collision_step};
pub use level::{GapLayout, spawn_item, spawn_wall_pair};
pub use scroll::ScrollStrip;
pub use shape::{Circle, Rect};
pub use snapshot::{BodyKind, BodySnapshot, WorldSnapshot};
pub use state::{Bird, GameEvent, GamePhase, GameWorld, Item, ScoreState, WallPair};
pub use tick::{TickInput, activate, handle_contact, restart, tick};
