//! Frame-driven game session
//!
//! Owns the world, the score store and the presenter. Real frame time is
//! accumulated and fed to the simulation in fixed steps; events coming out of
//! each step update labels, play sounds and persist new bests.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{BestScores, ScoreCounter};
use crate::hud::{HudLabel, Presenter, SoundEffect};
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GamePhase, GameWorld, TickInput, WorldSnapshot, tick};
use crate::tuning::Tuning;

pub struct Game<S: KeyValueStore, P: Presenter> {
    world: GameWorld,
    store: S,
    presenter: P,
    accumulator: f32,
    input: TickInput,
}

impl<S: KeyValueStore, P: Presenter> Game<S, P> {
    /// Start a session: load bests and initialise all four labels
    pub fn new(tuning: Tuning, seed: u64, store: S, presenter: P) -> Self {
        let best = BestScores::load(&store);
        let world = GameWorld::new(tuning, seed, best);
        log::info!("Session started (seed {seed})");

        let mut game = Self {
            world,
            store,
            presenter,
            accumulator: 0.0,
            input: TickInput::default(),
        };
        game.refresh_labels();
        game
    }

    /// Tap / click / key. Consumed by the next simulation step.
    pub fn activate(&mut self) {
        self.input.activate = true;
    }

    /// Advance by a real frame delta. Returns the number of steps run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one fixed step
    pub fn step(&mut self) {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.world, &input, SIM_DT);
        for event in self.world.drain_events() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreChanged { counter, value } => {
                self.presenter
                    .set_label(HudLabel::current(counter), &HudLabel::current(counter).format(value));
            }
            GameEvent::NewBest { counter, value } => {
                let label = HudLabel::best(counter);
                self.presenter.set_label(label, &label.format(value));
                BestScores::persist(&mut self.store, counter, value);
                log::info!("New {} best: {value}", counter.storage_key());
            }
            GameEvent::ItemCollected { .. } => {
                self.presenter.play_sound(SoundEffect::ItemGet);
            }
            GameEvent::WallSpawned { .. }
            | GameEvent::Crashed
            | GameEvent::Settled
            | GameEvent::Restarted => {}
        }
    }

    /// Push every label from the current scores
    pub fn refresh_labels(&mut self) {
        let scores = self.world.scores;
        for counter in ScoreCounter::ALL {
            let current = HudLabel::current(counter);
            let best = HudLabel::best(counter);
            self.presenter.set_label(current, &current.format(scores.current(counter)));
            self.presenter.set_label(best, &best.format(scores.best(counter)));
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase()
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::HudText;
    use crate::persistence::MemoryStore;
    use crate::sim::{Item, WallPair};
    use glam::Vec2;

    fn game(best: i64, item_best: i64) -> Game<MemoryStore, HudText> {
        let store = MemoryStore::with_values([("BEST", best), ("itemBEST", item_best)]);
        Game::new(Tuning::default(), 99, store, HudText::new())
    }

    fn label(game: &Game<MemoryStore, HudText>, label: HudLabel) -> &str {
        game.presenter().text(label).unwrap_or_default()
    }

    /// Put a score trigger right on top of the bird
    fn place_trigger(game: &mut Game<MemoryStore, HudText>) {
        let world = &mut game.world;
        let tuning = world.tuning.clone();
        let x = world.bird.pos.x - tuning.wall_size.x - tuning.bird_size.x / 2.0;
        let gap_y = world.bird.pos.y - tuning.wall_size.y;
        let id = world.next_entity_id();
        world.walls.push(WallPair::new(id, x, gap_y, &tuning));
        world.spawn_timer = 10.0;
    }

    #[test]
    fn test_labels_initialised_from_store() {
        let g = game(12, 4);
        assert_eq!(
            g.presenter().lines(),
            vec!["Score:0", "Best Score:12", "Item Score:0", "Item Best Score:4"]
        );
    }

    #[test]
    fn test_update_runs_fixed_steps() {
        let mut g = game(0, 0);
        assert_eq!(g.update(SIM_DT * 0.5), 0);
        assert_eq!(g.update(SIM_DT * 0.6), 1);
        assert_eq!(g.world().time_ticks, 1);

        // Long frames are clamped
        let steps = g.update(5.0);
        assert!((5..=6).contains(&steps));
        assert_eq!(g.update(0.0), 0);
        assert_eq!(g.update(-1.0), 0);
    }

    #[test]
    fn test_activate_is_one_shot() {
        let mut g = game(0, 0);
        g.activate();
        g.step();
        assert_eq!(g.world().items.len(), 1);
        g.step();
        assert_eq!(g.world().items.len(), 1);
    }

    #[test]
    fn test_score_below_best_not_persisted() {
        let mut g = game(12, 0);
        place_trigger(&mut g);
        g.step();
        assert_eq!(label(&g, HudLabel::Score), "Score:1");
        assert_eq!(label(&g, HudLabel::BestScore), "Best Score:12");
        assert_eq!(g.store().get_int("BEST").unwrap(), Some(12));
    }

    #[test]
    fn test_new_best_persisted() {
        let mut g = game(0, 0);
        place_trigger(&mut g);
        g.step();
        assert_eq!(label(&g, HudLabel::Score), "Score:1");
        assert_eq!(label(&g, HudLabel::BestScore), "Best Score:1");
        assert_eq!(g.store().get_int("BEST").unwrap(), Some(1));
    }

    #[test]
    fn test_item_collect_plays_sound_and_persists() {
        let mut g = game(0, 0);
        let pos = g.world.bird.pos;
        g.world.items.push(Item {
            id: 500,
            pos,
            vel: Vec2::ZERO,
            radius: 10.0,
        });
        g.step();
        assert_eq!(g.presenter().sounds(), &[SoundEffect::ItemGet]);
        assert_eq!(label(&g, HudLabel::ItemScore), "Item Score:1");
        assert_eq!(label(&g, HudLabel::ItemBestScore), "Item Best Score:1");
        assert_eq!(g.store().get_int("itemBEST").unwrap(), Some(1));
    }

    #[test]
    fn test_crash_settle_restart_resets_labels() {
        let mut g = game(5, 0);
        place_trigger(&mut g);
        g.step();
        assert_eq!(label(&g, HudLabel::Score), "Score:1");

        // No flaps: the bird drops onto the ground
        for _ in 0..600 {
            g.step();
            if g.phase() == GamePhase::Settled {
                break;
            }
        }
        assert_eq!(g.phase(), GamePhase::Settled);

        g.activate();
        g.step();
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(label(&g, HudLabel::Score), "Score:0");
        assert_eq!(label(&g, HudLabel::ItemScore), "Item Score:0");
        assert_eq!(label(&g, HudLabel::BestScore), "Best Score:5");
    }
}
