//! Best score tracking
//!
//! Two independent counters, each with a persisted best value. Stores are
//! read once at session start and written on every new best.

use serde::{Deserialize, Serialize};

use crate::consts::{BEST_KEY, ITEM_BEST_KEY};
use crate::persistence::KeyValueStore;

/// Which score a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCounter {
    /// Walls passed
    Obstacle,
    /// Items collected
    Item,
}

impl ScoreCounter {
    pub const ALL: [ScoreCounter; 2] = [ScoreCounter::Obstacle, ScoreCounter::Item];

    /// Persistence key for this counter's best value
    pub fn storage_key(self) -> &'static str {
        match self {
            ScoreCounter::Obstacle => BEST_KEY,
            ScoreCounter::Item => ITEM_BEST_KEY,
        }
    }
}

/// Persisted best values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    pub best: u32,
    pub item_best: u32,
}

impl BestScores {
    /// Read both bests. Missing, negative or unreadable values become 0.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let scores = Self {
            best: read_best(store, ScoreCounter::Obstacle),
            item_best: read_best(store, ScoreCounter::Item),
        };
        log::info!(
            "Loaded best scores: best {} item best {}",
            scores.best,
            scores.item_best
        );
        scores
    }

    /// Write a new best. Failures are logged and reported as `false`.
    pub fn persist<S: KeyValueStore + ?Sized>(
        store: &mut S,
        counter: ScoreCounter,
        value: u32,
    ) -> bool {
        match store.set_int(counter.storage_key(), i64::from(value)) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to save {}: {err}", counter.storage_key());
                false
            }
        }
    }
}

fn read_best<S: KeyValueStore + ?Sized>(store: &S, counter: ScoreCounter) -> u32 {
    let key = counter.storage_key();
    match store.get_int(key) {
        Ok(Some(value)) if value >= 0 => u32::try_from(value).unwrap_or(u32::MAX),
        Ok(Some(value)) => {
            log::warn!("Ignoring negative {key} ({value})");
            0
        }
        Ok(None) => {
            log::info!("No {key} stored, starting at 0");
            0
        }
        Err(err) => {
            log::warn!("Failed to read {key}: {err}");
            0
        }
    }
}
