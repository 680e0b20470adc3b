//! Render-ready view of the world
//!
//! A flat, serde-serialisable list of bodies plus scores and phase. Draw
//! order follows the list: clouds, ground, walls, items, bird.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::shape::Rect;
use super::state::{GamePhase, GameWorld, ScoreState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Cloud,
    Ground,
    Wall,
    Item,
    Bird,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub kind: BodyKind,
    /// Collision category bits, 0 for scenery
    pub category: u32,
    pub center: Vec2,
    pub size: Vec2,
    pub rotation: f32,
}

impl BodySnapshot {
    fn rect(kind: BodyKind, category: u32, rect: Rect) -> Self {
        Self {
            kind,
            category,
            center: rect.center,
            size: rect.size(),
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub bodies: Vec<BodySnapshot>,
    /// Bird wing frame (0 or 1)
    pub bird_frame: u8,
    pub scores: ScoreState,
}

impl GameWorld {
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut bodies = Vec::with_capacity(
            self.clouds.tiles.len() + self.ground.tiles.len() + self.walls.len() * 2 + self.items.len() + 1,
        );

        bodies.extend(self.clouds.rects().map(|r| BodySnapshot::rect(BodyKind::Cloud, 0, r)));
        bodies.extend(
            self.ground
                .rects()
                .map(|r| BodySnapshot::rect(BodyKind::Ground, Category::Ground.bits(), r)),
        );
        for wall in &self.walls {
            for rect in [wall.lower(), wall.upper()] {
                bodies.push(BodySnapshot::rect(BodyKind::Wall, Category::Wall.bits(), rect));
            }
        }
        for item in &self.items {
            bodies.push(BodySnapshot {
                kind: BodyKind::Item,
                category: Category::Item.bits(),
                center: item.pos,
                size: Vec2::splat(item.radius * 2.0),
                rotation: 0.0,
            });
        }
        bodies.push(BodySnapshot {
            kind: BodyKind::Bird,
            category: self.bird.filter.category.bits(),
            center: self.bird.pos,
            size: self.bird.size,
            rotation: self.bird.rotation,
        });

        WorldSnapshot {
            tick: self.time_ticks,
            phase: self.phase(),
            bodies,
            bird_frame: self.bird.wing_frame(self.tuning.bird_frame_time),
            scores: self.scores,
        }
    }
}
