//! Flappy Walls - An endless side-scrolling arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, scrolling, collisions, game state)
//! - `highscores`: Best-score tracking on top of a key-value store
//! - `persistence`: Key-value stores (memory, JSON file, LocalStorage)
//! - `hud`: Presentation facade (text labels, sound triggers)
//! - `tuning`: Data-driven game balance
//! - `game`: Frame-driven session runner tying the above together

pub mod autopilot;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{BestScores, ScoreCounter};
pub use hud::{HudLabel, HudText, Presenter, SoundEffect};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Persistence key for the obstacle best score
    pub const BEST_KEY: &str = "BEST";
    /// Persistence key for the item best score
    pub const ITEM_BEST_KEY: &str = "itemBEST";
}
