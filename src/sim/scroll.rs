//! Scrolling and free-fall
//!
//! Ground and cloud strips loop forever by recycling tiles; wall pairs slide
//! left and are dropped once past the left edge. Gravity acts on the bird and
//! items every step, independent of world speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::Rect;
use super::state::GameWorld;

/// A row of identical tiles that scrolls left and wraps around
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollStrip {
    /// Tile centres
    pub tiles: Vec<Vec2>,
    pub tile_size: Vec2,
    /// Points per second
    pub speed: f32,
}

impl ScrollStrip {
    /// Enough tiles to cover `screen_width` plus two spares, scrolling one
    /// tile width every `period` seconds.
    pub fn new(screen_width: f32, tile_size: Vec2, y: f32, period: f32) -> Self {
        let count = if tile_size.x > 0.0 {
            (screen_width / tile_size.x) as usize + 2
        } else {
            0
        };
        let tiles = (0..count)
            .map(|i| Vec2::new(tile_size.x * (i as f32 + 0.5), y))
            .collect();
        let speed = if period > 0.0 {
            tile_size.x / period
        } else {
            0.0
        };
        Self {
            tiles,
            tile_size,
            speed,
        }
    }

    /// Total width covered by the strip
    pub fn span(&self) -> f32 {
        self.tiles.len() as f32 * self.tile_size.x
    }

    /// Move tiles left by `speed * dt`, recycling any tile fully off-screen
    pub fn advance(&mut self, dt: f32) {
        let dx = self.speed * dt;
        let span = self.span();
        let half_w = self.tile_size.x / 2.0;
        for tile in &mut self.tiles {
            tile.x -= dx;
            if tile.x + half_w <= 0.0 {
                tile.x += span;
            }
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.tiles.iter().map(|&c| Rect::new(c, self.tile_size))
    }
}

/// Scroll ground, clouds and walls by `dt` already scaled by world speed
pub fn advance_scroll(world: &mut GameWorld, scroll_dt: f32) {
    if scroll_dt <= 0.0 {
        return;
    }

    world.ground.advance(scroll_dt);
    world.clouds.advance(scroll_dt);

    let dx = world.tuning.wall_speed() * scroll_dt;
    for wall in &mut world.walls {
        wall.x -= dx;
    }
    // Gone once the right edge reaches the left side of the screen
    world.walls.retain(|w| w.right_edge() > 0.0);
}

/// Apply gravity and velocity to dynamic bodies
pub fn integrate(world: &mut GameWorld, dt: f32) {
    let gravity = Vec2::new(0.0, world.tuning.gravity);

    let bird = &mut world.bird;
    bird.vel += gravity * dt;
    bird.pos += bird.vel * dt;
    bird.anim_time += dt * bird.anim_speed;

    for item in &mut world.items {
        item.vel += gravity * dt;
        item.pos += item.vel * dt;
    }
    // Items never touch the ground; drop them once they fall out of view
    world.items.retain(|i| i.pos.y + i.radius >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::BestScores;
    use crate::sim::state::{Item, WallPair};
    use crate::tuning::Tuning;

    #[test]
    fn test_strip_layout() {
        let strip = ScrollStrip::new(375.0, Vec2::new(100.0, 50.0), 25.0, 5.0);
        assert_eq!(strip.tiles.len(), 5);
        assert_eq!(strip.tiles[0], Vec2::new(50.0, 25.0));
        assert_eq!(strip.tiles[4], Vec2::new(450.0, 25.0));
        assert_eq!(strip.speed, 20.0);
    }

    #[test]
    fn test_strip_recycles_to_trailing_edge() {
        let mut strip = ScrollStrip::new(150.0, Vec2::new(100.0, 50.0), 25.0, 5.0);
        assert_eq!(strip.tiles.len(), 3);
        // One full tile width: first tile's right edge reaches x = 0
        strip.advance(5.0);
        assert!((strip.tiles[0].x - 250.0).abs() < 1e-3);
        assert!((strip.tiles[1].x - 50.0).abs() < 1e-3);
        assert!((strip.tiles[2].x - 150.0).abs() < 1e-3);
        // Tiles are never removed
        assert_eq!(strip.tiles.len(), 3);
    }

    #[test]
    fn test_walls_cross_screen_in_travel_time() {
        let tuning = Tuning::default();
        let mut world = GameWorld::new(tuning.clone(), 1, BestScores::default());
        let start_x = tuning.screen_width() + tuning.wall_size.x / 2.0;
        world.walls.push(WallPair::new(1, start_x, 100.0, &tuning));

        advance_scroll(&mut world, tuning.wall_travel_time * 0.99);
        assert_eq!(world.walls.len(), 1);

        advance_scroll(&mut world, tuning.wall_travel_time * 0.02);
        assert!(world.walls.is_empty());
    }

    #[test]
    fn test_zero_world_speed_freezes_scroll() {
        let mut world = GameWorld::new(Tuning::default(), 1, BestScores::default());
        let before = world.ground.tiles.clone();
        advance_scroll(&mut world, 0.0);
        assert_eq!(world.ground.tiles, before);
    }

    #[test]
    fn test_gravity_accelerates_bird_and_items() {
        let mut world = GameWorld::new(Tuning::default(), 1, BestScores::default());
        world.items.push(Item {
            id: 9,
            pos: Vec2::new(100.0, 600.0),
            vel: Vec2::ZERO,
            radius: 10.0,
        });
        let y0 = world.bird.pos.y;
        integrate(&mut world, 0.1);
        assert!((world.bird.vel.y - (-30.0)).abs() < 1e-4);
        assert!(world.bird.pos.y < y0);
        assert!((world.items[0].vel.y - (-30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_items_culled_below_screen() {
        let mut world = GameWorld::new(Tuning::default(), 1, BestScores::default());
        world.items.push(Item {
            id: 9,
            pos: Vec2::new(100.0, -20.0),
            vel: Vec2::ZERO,
            radius: 10.0,
        });
        integrate(&mut world, 1.0 / 60.0);
        assert!(world.items.is_empty());
    }
}
