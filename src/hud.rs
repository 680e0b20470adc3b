//! Presentation facade
//!
//! The game core only knows about four text labels and one sound. Platforms
//! implement [`Presenter`] to put them on screen / through the speakers.

use std::collections::BTreeMap;

use crate::highscores::ScoreCounter;

/// On-screen text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HudLabel {
    Score,
    BestScore,
    ItemScore,
    ItemBestScore,
}

impl HudLabel {
    pub const ALL: [HudLabel; 4] = [
        HudLabel::Score,
        HudLabel::BestScore,
        HudLabel::ItemScore,
        HudLabel::ItemBestScore,
    ];

    pub fn current(counter: ScoreCounter) -> Self {
        match counter {
            ScoreCounter::Obstacle => HudLabel::Score,
            ScoreCounter::Item => HudLabel::ItemScore,
        }
    }

    pub fn best(counter: ScoreCounter) -> Self {
        match counter {
            ScoreCounter::Obstacle => HudLabel::BestScore,
            ScoreCounter::Item => HudLabel::ItemBestScore,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            HudLabel::Score => "Score:",
            HudLabel::BestScore => "Best Score:",
            HudLabel::ItemScore => "Item Score:",
            HudLabel::ItemBestScore => "Item Best Score:",
        }
    }

    /// Label text, e.g. `Best Score:12`
    pub fn format(self, value: u32) -> String {
        format!("{}{}", self.prefix(), value)
    }

    /// DOM element id used by the web front-end
    pub fn element_id(self) -> &'static str {
        match self {
            HudLabel::Score => "score",
            HudLabel::BestScore => "best-score",
            HudLabel::ItemScore => "item-score",
            HudLabel::ItemBestScore => "item-best-score",
        }
    }
}

/// Fire-and-forget sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Item collected
    ItemGet,
}

/// Receives label and sound updates from the game
pub trait Presenter {
    fn set_label(&mut self, label: HudLabel, text: &str);

    fn play_sound(&mut self, sound: SoundEffect);
}

/// Presenter that just remembers what it was told
#[derive(Debug, Clone, Default)]
pub struct HudText {
    labels: BTreeMap<HudLabel, String>,
    sounds: Vec<SoundEffect>,
}

impl HudText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, label: HudLabel) -> Option<&str> {
        self.labels.get(&label).map(String::as_str)
    }

    /// Sounds played so far, oldest first
    pub fn sounds(&self) -> &[SoundEffect] {
        &self.sounds
    }

    /// All labels in display order
    pub fn lines(&self) -> Vec<&str> {
        HudLabel::ALL.iter().filter_map(|&l| self.text(l)).collect()
    }
}

impl Presenter for HudText {
    fn set_label(&mut self, label: HudLabel, text: &str) {
        self.labels.insert(label, text.to_string());
    }

    fn play_sound(&mut self, sound: SoundEffect) {
        self.sounds.push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_formats() {
        assert_eq!(HudLabel::Score.format(3), "Score:3");
        assert_eq!(HudLabel::BestScore.format(12), "Best Score:12");
        assert_eq!(HudLabel::ItemScore.format(0), "Item Score:0");
        assert_eq!(HudLabel::ItemBestScore.format(7), "Item Best Score:7");
    }

    #[test]
    fn test_counter_label_mapping() {
        assert_eq!(HudLabel::current(ScoreCounter::Item), HudLabel::ItemScore);
        assert_eq!(HudLabel::best(ScoreCounter::Obstacle), HudLabel::BestScore);
    }

    #[test]
    fn test_hud_text_records() {
        let mut hud = HudText::new();
        assert!(hud.lines().is_empty());
        hud.set_label(HudLabel::ItemScore, "Item Score:1");
        hud.set_label(HudLabel::Score, "Score:2");
        hud.play_sound(SoundEffect::ItemGet);

        assert_eq!(hud.lines(), vec!["Score:2", "Item Score:1"]);
        assert_eq!(hud.sounds(), &[SoundEffect::ItemGet]);
    }
}
