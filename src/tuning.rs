//! Data-driven game balance
//!
//! Every number the simulation needs lives here so a platform layer can
//! swap screen sizes or feel without touching the sim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tuning values. Distances are in screen points, times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Visible area (origin bottom-left, y up)
    pub screen_size: Vec2,
    /// Bird sprite size; the bird collides as a circle of radius `height / 2`
    pub bird_size: Vec2,
    /// Single wall segment size
    pub wall_size: Vec2,
    /// Ground tile size
    pub ground_tile_size: Vec2,
    /// Cloud tile size
    pub cloud_tile_size: Vec2,

    /// Vertical gravity applied to dynamic bodies (points/s², negative = down)
    pub gravity: f32,
    /// Upward impulse applied on each flap
    pub flap_impulse: f32,
    /// Bird mass used to turn the flap impulse into a velocity change
    pub bird_mass: f32,

    /// Seconds between wall pair spawns
    pub wall_spawn_interval: f32,
    /// Seconds for a wall pair to cross `screen_width + wall_width`
    pub wall_travel_time: f32,
    /// Seconds for the ground to scroll one tile width
    pub ground_scroll_period: f32,
    /// Seconds for the clouds to scroll one tile width
    pub cloud_scroll_period: f32,

    /// Death roll duration after a crash
    pub death_roll_duration: f32,
    /// Death roll angle per point of bird height (multiplied by π)
    pub death_roll_factor: f32,

    /// Bird spawn point as a fraction of the screen size
    pub bird_spawn: Vec2,
    /// Item diameter relative to the bird width
    pub item_scale: f32,
    /// Seconds per wing animation frame
    pub bird_frame_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(375.0, 667.0),
            bird_size: Vec2::new(34.0, 24.0),
            wall_size: Vec2::new(52.0, 320.0),
            ground_tile_size: Vec2::new(336.0, 112.0),
            cloud_tile_size: Vec2::new(350.0, 100.0),

            // -2 m/s² at 150 points per meter
            gravity: -300.0,
            // Mass approximates SpriteKit's area-derived mass for the bird's
            // circle body. One flap: 200 pt/s, ~67 pt rise.
            flap_impulse: 8.0,
            bird_mass: 0.04,

            wall_spawn_interval: 2.0,
            wall_travel_time: 4.0,
            ground_scroll_period: 5.0,
            cloud_scroll_period: 20.0,

            death_roll_duration: 1.0,
            death_roll_factor: 0.01,

            bird_spawn: Vec2::new(0.2, 0.7),
            item_scale: 1.5,
            bird_frame_time: 0.2,
        }
    }
}

impl Tuning {
    #[inline]
    pub fn screen_width(&self) -> f32 {
        self.screen_size.x
    }

    #[inline]
    pub fn screen_height(&self) -> f32 {
        self.screen_size.y
    }

    /// Vertical opening between the segments of a wall pair
    pub fn slit_length(&self) -> f32 {
        self.screen_height() / 6.0
    }

    /// Bird start position
    pub fn bird_start(&self) -> Vec2 {
        self.screen_size * self.bird_spawn
    }

    /// Bird collision radius
    pub fn bird_radius(&self) -> f32 {
        self.bird_size.y / 2.0
    }

    /// Item collision radius
    pub fn item_radius(&self) -> f32 {
        self.bird_size.x * self.item_scale / 2.0
    }

    /// Velocity change produced by one flap
    pub fn flap_velocity(&self) -> f32 {
        if self.bird_mass > 0.0 {
            self.flap_impulse / self.bird_mass
        } else {
            0.0
        }
    }

    /// Horizontal wall speed (points/s)
    pub fn wall_speed(&self) -> f32 {
        (self.screen_width() + self.wall_size.x) / self.wall_travel_time.max(f32::EPSILON)
    }
}
