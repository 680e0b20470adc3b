//! Game world and core simulation types
//!
//! Everything the simulation touches lives in [`GameWorld`]; the platform
//! layer only reads it (snapshot, events) and feeds [`super::TickInput`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::BodyFilter;
use super::collision::ContactTracker;
use super::scroll::ScrollStrip;
use super::shape::{Circle, Rect};
use crate::highscores::{BestScores, ScoreCounter};
use crate::tuning::Tuning;

/// Current phase of gameplay, derived from world and bird speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World scrolling, input flaps
    Running,
    /// Crashed; bird still rolling/falling, input ignored
    Falling,
    /// Death roll finished; next input restarts
    Settled,
}

/// Death roll animation started on crash
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathRoll {
    pub elapsed: f32,
    pub duration: f32,
    pub start_rotation: f32,
    /// Total rotation to apply over `duration` (radians)
    pub angle: f32,
}

impl DeathRoll {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite size; collides as a circle of radius `size.y / 2`
    pub size: Vec2,
    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,
    pub filter: BodyFilter,
    /// Animation speed: 1 while alive or rolling, 0 once settled
    pub anim_speed: f32,
    /// Wing animation clock
    pub anim_time: f32,
    pub death_roll: Option<DeathRoll>,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.bird_start(),
            vel: Vec2::ZERO,
            size: tuning.bird_size,
            rotation: 0.0,
            filter: BodyFilter::BIRD,
            anim_speed: 1.0,
            anim_time: 0.0,
            death_roll: None,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.y / 2.0
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius())
    }

    /// Wing frame (0 or 1) alternating every `frame_time` seconds
    pub fn wing_frame(&self, frame_time: f32) -> u8 {
        if frame_time <= 0.0 {
            return 0;
        }
        ((self.anim_time / frame_time) as u64 % 2) as u8
    }
}

/// An invisible full-height zone that scores when the bird enters it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrigger {
    /// Horizontal offset from the wall pair's x
    pub offset_x: f32,
    pub size: Vec2,
}

/// Upper and lower wall segments with a gap, plus the score trigger behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallPair {
    pub id: u32,
    /// Horizontal centre of both segments
    pub x: f32,
    /// Centre height of the lower segment
    pub gap_y: f32,
    pub wall_size: Vec2,
    /// Vertical opening between the segments
    pub slit_length: f32,
    pub trigger: ScoreTrigger,
    /// Screen height, the trigger spans it vertically
    pub screen_height: f32,
}

impl WallPair {
    pub fn new(id: u32, x: f32, gap_y: f32, tuning: &Tuning) -> Self {
        let screen_height = tuning.screen_height();
        Self {
            id,
            x,
            gap_y,
            wall_size: tuning.wall_size,
            slit_length: tuning.slit_length(),
            trigger: ScoreTrigger {
                offset_x: tuning.wall_size.x + tuning.bird_size.x / 2.0,
                size: Vec2::new(tuning.wall_size.x, screen_height),
            },
            screen_height,
        }
    }

    pub fn lower(&self) -> Rect {
        Rect::new(Vec2::new(self.x, self.gap_y), self.wall_size)
    }

    pub fn upper(&self) -> Rect {
        let y = self.gap_y + self.wall_size.y + self.slit_length;
        Rect::new(Vec2::new(self.x, y), self.wall_size)
    }

    pub fn trigger_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x + self.trigger.offset_x, self.screen_height / 2.0),
            self.trigger.size,
        )
    }

    /// Passable opening as (bottom, top)
    pub fn opening(&self) -> (f32, f32) {
        let bottom = self.gap_y + self.wall_size.y / 2.0;
        (bottom, bottom + self.slit_length)
    }

    /// Right edge of the segments
    pub fn right_edge(&self) -> f32 {
        self.x + self.wall_size.x / 2.0
    }
}

/// A collectible bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Item {
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Current and best values for both counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub best: u32,
    pub item_score: u32,
    pub item_best: u32,
}

impl ScoreState {
    pub fn with_best(best: BestScores) -> Self {
        Self {
            score: 0,
            best: best.best,
            item_score: 0,
            item_best: best.item_best,
        }
    }

    pub fn current(&self, counter: ScoreCounter) -> u32 {
        match counter {
            ScoreCounter::Obstacle => self.score,
            ScoreCounter::Item => self.item_score,
        }
    }

    pub fn best(&self, counter: ScoreCounter) -> u32 {
        match counter {
            ScoreCounter::Obstacle => self.best,
            ScoreCounter::Item => self.item_best,
        }
    }

    /// Add one to `counter`. Returns the new best when it was beaten.
    pub fn increment(&mut self, counter: ScoreCounter) -> Option<u32> {
        let (current, best) = match counter {
            ScoreCounter::Obstacle => (&mut self.score, &mut self.best),
            ScoreCounter::Item => (&mut self.item_score, &mut self.item_best),
        };
        *current = current.saturating_add(1);
        if *current > *best {
            *best = *current;
            Some(*best)
        } else {
            None
        }
    }

    /// Zero both current values; bests are kept
    pub fn reset_current(&mut self) {
        self.score = 0;
        self.item_score = 0;
    }
}

/// Things the platform layer reacts to (labels, sounds, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged { counter: ScoreCounter, value: u32 },
    NewBest { counter: ScoreCounter, value: u32 },
    ItemCollected { item_id: u32 },
    WallSpawned { wall_id: u32 },
    Crashed,
    Settled,
    Restarted,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameWorld {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Scroll and spawn-timer scale; 0 freezes the level
    pub world_speed: f32,
    pub bird: Bird,
    /// Live wall pairs (sorted by id for determinism)
    pub walls: Vec<WallPair>,
    /// Live items (sorted by id)
    pub items: Vec<Item>,
    pub ground: ScrollStrip,
    pub clouds: ScrollStrip,
    pub scores: ScoreState,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Scroll-scaled seconds until the next wall pair
    pub spawn_timer: f32,
    pub(crate) contacts: ContactTracker,
    next_id: u32,
}

impl GameWorld {
    /// Create a running world with the given seed and loaded best scores
    pub fn new(tuning: Tuning, seed: u64, best: BestScores) -> Self {
        let ground = ScrollStrip::new(
            tuning.screen_width(),
            tuning.ground_tile_size,
            tuning.ground_tile_size.y / 2.0,
            tuning.ground_scroll_period,
        );
        let clouds = ScrollStrip::new(
            tuning.screen_width(),
            tuning.cloud_tile_size,
            tuning.screen_height() - tuning.cloud_tile_size.y / 2.0,
            tuning.cloud_scroll_period,
        );

        Self {
            bird: Bird::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            world_speed: 1.0,
            walls: Vec::new(),
            items: Vec::new(),
            ground,
            clouds,
            scores: ScoreState::with_best(best),
            events: Vec::new(),
            spawn_timer: 0.0,
            contacts: ContactTracker::default(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        if self.world_speed > 0.0 {
            GamePhase::Running
        } else if self.bird.anim_speed > 0.0 {
            GamePhase::Falling
        } else {
            GamePhase::Settled
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        GameWorld::new(Tuning::default(), 7, BestScores::default())
    }

    #[test]
    fn test_new_world_defaults() {
        let w = world();
        assert_eq!(w.phase(), GamePhase::Running);
        assert_eq!(w.scores, ScoreState::default());
        assert!(w.walls.is_empty());
        assert!(w.items.is_empty());
        assert_eq!(w.bird.filter, BodyFilter::BIRD);
        // 375 / 336 -> 1, plus 2
        assert_eq!(w.ground.tiles.len(), 3);
    }

    #[test]
    fn test_phase_derivation() {
        let mut w = world();
        w.world_speed = 0.0;
        assert_eq!(w.phase(), GamePhase::Falling);
        w.bird.anim_speed = 0.0;
        assert_eq!(w.phase(), GamePhase::Settled);
    }

    #[test]
    fn test_wall_pair_geometry() {
        let tuning = Tuning {
            screen_size: Vec2::new(400.0, 600.0),
            wall_size: Vec2::new(50.0, 100.0),
            bird_size: Vec2::new(30.0, 20.0),
            ..Default::default()
        };
        let pair = WallPair::new(1, 200.0, 175.0, &tuning);
        assert_eq!(pair.lower().center, Vec2::new(200.0, 175.0));
        assert_eq!(pair.upper().center, Vec2::new(200.0, 375.0));
        assert_eq!(pair.opening(), (225.0, 325.0));
        // Opening matches the space between the segments
        assert_eq!(pair.lower().max().y, pair.opening().0);
        assert_eq!(pair.upper().min().y, pair.opening().1);

        let trigger = pair.trigger_rect();
        assert_eq!(trigger.center, Vec2::new(265.0, 300.0));
        assert_eq!(trigger.size(), Vec2::new(50.0, 600.0));
    }

    #[test]
    fn test_score_increment_tracks_best() {
        let mut s = ScoreState::with_best(BestScores {
            best: 4,
            item_best: 0,
        });
        s.score = 4;
        assert_eq!(s.increment(ScoreCounter::Obstacle), Some(5));
        assert_eq!((s.score, s.best), (5, 5));

        assert_eq!(s.increment(ScoreCounter::Item), Some(1));
        s.reset_current();
        assert_eq!(s.increment(ScoreCounter::Item), None);
        assert_eq!((s.item_score, s.item_best), (1, 1));
        assert_eq!((s.score, s.best), (0, 5));
    }

    #[test]
    fn test_wing_frame_alternates() {
        let mut bird = Bird::new(&Tuning::default());
        assert_eq!(bird.wing_frame(0.2), 0);
        bird.anim_time = 0.25;
        assert_eq!(bird.wing_frame(0.2), 1);
        bird.anim_time = 0.45;
        assert_eq!(bird.wing_frame(0.2), 0);
    }
}
