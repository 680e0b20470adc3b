//! Procedural level generation
//!
//! Wall pairs spawn on a fixed (scroll-scaled) interval with a randomized
//! gap height; items spawn at the top of the screen on every flap.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameWorld, Item, WallPair};
use crate::tuning::Tuning;

/// Vertical placement rule for wall gaps.
///
/// All values are whole points: the random range and the lower bound are
/// truncated, and the draw is an integer in `[0, random_range)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapLayout {
    pub center_y: f32,
    pub random_range: u32,
    pub lower_bound: u32,
    pub slit_length: f32,
}

impl GapLayout {
    pub fn new(screen_height: f32, wall_height: f32) -> Self {
        let center_y = screen_height / 2.0;
        let random_range = (screen_height / 4.0) as u32;
        // Negative bounds saturate to 0
        let lower_bound = (center_y - wall_height / 2.0 - random_range as f32 / 2.0) as u32;
        Self {
            center_y,
            random_range,
            lower_bound,
            slit_length: screen_height / 6.0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.screen_height(), tuning.wall_size.y)
    }

    /// Uniform integer draw in `[0, random_range)`
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.random_range == 0 {
            0
        } else {
            rng.random_range(0..self.random_range)
        }
    }

    /// Lower segment centre for a given draw
    pub fn gap_y(&self, draw: u32) -> f32 {
        self.lower_bound.saturating_add(draw) as f32
    }
}

/// Spawn a wall pair just past the right edge with a random gap
pub fn spawn_wall_pair(world: &mut GameWorld) -> u32 {
    let layout = GapLayout::from_tuning(&world.tuning);
    let draw = layout.draw(&mut world.rng);
    spawn_wall_pair_with_draw(world, draw)
}

/// Spawn a wall pair using an explicit random draw
pub fn spawn_wall_pair_with_draw(world: &mut GameWorld, draw: u32) -> u32 {
    let layout = GapLayout::from_tuning(&world.tuning);
    let id = world.next_entity_id();
    let x = world.tuning.screen_width() + world.tuning.wall_size.x / 2.0;
    let pair = WallPair::new(id, x, layout.gap_y(draw), &world.tuning);

    log::debug!("wall pair {} spawned with gap_y {}", id, pair.gap_y);
    world.walls.push(pair);
    world.events.push(GameEvent::WallSpawned { wall_id: id });
    id
}

/// Count down the spawn timer by `scroll_dt` and spawn when it expires.
/// The first pair spawns immediately.
pub fn advance_spawner(world: &mut GameWorld, scroll_dt: f32) {
    world.spawn_timer -= scroll_dt;
    let interval = world.tuning.wall_spawn_interval;
    if interval <= 0.0 {
        return;
    }
    while world.spawn_timer <= 0.0 {
        spawn_wall_pair(world);
        world.spawn_timer += interval;
    }
}

/// Spawn a new item at the top centre of the screen. Earlier items stay.
pub fn spawn_item(world: &mut GameWorld) -> u32 {
    let id = world.next_entity_id();
    let pos = Vec2::new(
        world.tuning.screen_width() / 2.0,
        world.tuning.screen_height(),
    );
    world.items.push(Item {
        id,
        pos,
        vel: Vec2::ZERO,
        radius: world.tuning.item_radius(),
    });
    id
}
