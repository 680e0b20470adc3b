//! Simple bot for headless demo sessions
//!
//! Flaps whenever the bird's underside is about to sink below the bottom of
//! the next opening, and taps to restart once a run has settled.

use crate::consts::SIM_DT;
use crate::game::Game;
use crate::hud::Presenter;
use crate::persistence::KeyValueStore;
use crate::sim::{GamePhase, GameWorld};

/// Clearance kept above the opening's bottom edge
const FLAP_MARGIN: f32 = 8.0;

/// Steps of fall speed to look ahead
const LEAD_STEPS: f32 = 1.0;

/// `(bottom, top)` of the opening the bird has to pass next. With no wall
/// ahead, an opening of the same size centred on the screen.
pub fn target_opening(world: &GameWorld) -> (f32, f32) {
    let bird_left = world.bird.pos.x - world.bird.radius();
    world
        .walls
        .iter()
        .filter(|w| w.right_edge() > bird_left)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|w| w.opening())
        .unwrap_or_else(|| {
            let mid = world.tuning.screen_height() / 2.0;
            let half = world.tuning.slit_length() / 2.0;
            (mid - half, mid + half)
        })
}

/// Whether to tap on this step
pub fn should_flap(world: &GameWorld) -> bool {
    match world.phase() {
        GamePhase::Settled => true,
        GamePhase::Falling => false,
        GamePhase::Running => {
            let bird = &world.bird;
            let (bottom, _) = target_opening(world);
            let lead = bird.vel.y.min(0.0) * SIM_DT * LEAD_STEPS;
            let underside = bird.pos.y - bird.radius() + lead;
            // Still climbing from the last flap
            let rising = bird.vel.y >= world.tuning.flap_velocity() * 0.5;
            underside < bottom + FLAP_MARGIN && !rising
        }
    }
}

/// Totals for a bot session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub steps: u64,
    /// Crashes seen
    pub runs: u32,
    /// Highest obstacle score in any run
    pub top_score: u32,
    pub top_item_score: u32,
}

/// Let the bot play for `seconds` of simulated time
pub fn play<S: KeyValueStore, P: Presenter>(game: &mut Game<S, P>, seconds: f32) -> RunStats {
    let steps = (seconds.max(0.0) / SIM_DT).round() as u64;
    let mut stats = RunStats::default();
    let mut was_running = game.phase() == GamePhase::Running;

    for _ in 0..steps {
        if should_flap(game.world()) {
            game.activate();
        }
        game.step();

        let scores = game.world().scores;
        stats.top_score = stats.top_score.max(scores.score);
        stats.top_item_score = stats.top_item_score.max(scores.item_score);

        let running = game.phase() == GamePhase::Running;
        if was_running && !running {
            stats.runs += 1;
            log::debug!("run {} ended with score {}", stats.runs, scores.score);
        }
        was_running = running;
        stats.steps += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::BestScores;
    use crate::hud::HudText;
    use crate::persistence::MemoryStore;
    use crate::sim::WallPair;
    use crate::tuning::Tuning;

    fn world() -> GameWorld {
        GameWorld::new(Tuning::default(), 5, BestScores::default())
    }

    #[test]
    fn test_target_defaults_to_centred_opening() {
        let w = world();
        let (bottom, top) = target_opening(&w);
        assert!((bottom + top - w.tuning.screen_height()).abs() < 1e-3);
        assert!((top - bottom - w.tuning.slit_length()).abs() < 1e-3);
    }

    #[test]
    fn test_target_follows_nearest_wall_ahead() {
        let mut w = world();
        let tuning = w.tuning.clone();
        w.walls.push(WallPair::new(1, 300.0, 150.0, &tuning));
        w.walls.push(WallPair::new(2, 200.0, 50.0, &tuning));
        // Already behind the bird
        w.walls.push(WallPair::new(3, -10.0, 300.0, &tuning));

        assert_eq!(target_opening(&w), w.walls[1].opening());
    }

    #[test]
    fn test_flap_decision_by_phase() {
        let mut w = world();
        w.bird.pos.y = 10.0;
        w.bird.vel.y = -5.0;
        assert!(should_flap(&w));

        w.bird.pos.y = 600.0;
        assert!(!should_flap(&w));

        w.world_speed = 0.0;
        w.bird.pos.y = 10.0;
        assert!(!should_flap(&w));

        w.bird.anim_speed = 0.0;
        assert!(should_flap(&w));
    }

    #[test]
    fn test_flaps_near_opening_bottom_unless_climbing() {
        let mut w = world();
        let (bottom, _) = target_opening(&w);
        let r = w.bird.radius();

        w.bird.pos.y = bottom + r + FLAP_MARGIN + 20.0;
        w.bird.vel.y = 0.0;
        assert!(!should_flap(&w));

        // Fast fall brings the flap forward
        w.bird.pos.y = bottom + r + FLAP_MARGIN + 2.0;
        w.bird.vel.y = -300.0;
        assert!(should_flap(&w));

        w.bird.pos.y = bottom + r;
        w.bird.vel.y = w.tuning.flap_velocity();
        assert!(!should_flap(&w));
    }

    #[test]
    fn test_play_runs_requested_time() {
        let mut game = Game::new(Tuning::default(), 8, MemoryStore::new(), HudText::new());
        let stats = play(&mut game, 20.0);
        assert_eq!(stats.steps, 1200);
        assert_eq!(game.world().time_ticks, 1200);
        assert!(game.world().scores.best >= stats.top_score);
    }

    #[test]
    fn test_bot_clears_walls_over_a_minute() {
        let mut game = Game::new(Tuning::default(), 8, MemoryStore::new(), HudText::new());
        let stats = play(&mut game, 60.0);
        assert!(stats.top_score >= 3, "top score {}", stats.top_score);
    }
}
