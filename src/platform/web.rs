//! Browser front-end
//!
//! Exposes [`WebGame`] to JavaScript. JS owns the canvas and the
//! requestAnimationFrame loop; it forwards taps, calls `frame` with the
//! elapsed seconds and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Storage};

use crate::audio::AudioManager;
use crate::game::Game;
use crate::hud::{HudLabel, Presenter, SoundEffect};
use crate::persistence::{KeyValueStore, StoreError};
use crate::settings::Settings;

/// Best scores in browser LocalStorage, one plain integer string per key
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best scores will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("no localStorage".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let raw = self
            .storage()?
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?;
        match raw {
            None => Ok(None),
            Some(text) => text
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|err| StoreError::Parse(format!("{key}: {err}"))),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, &value.to_string())
            .map_err(|err| StoreError::Unavailable(format!("{err:?}")))
    }
}

/// Writes labels into DOM elements and plays sounds through Web Audio
pub struct DomPresenter {
    document: Option<Document>,
    audio: AudioManager,
}

impl DomPresenter {
    pub fn new(audio: AudioManager) -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        Self { document, audio }
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }
}

impl Presenter for DomPresenter {
    fn set_label(&mut self, label: HudLabel, text: &str) {
        let Some(document) = &self.document else { return };
        if let Some(el) = document.get_element_by_id(label.element_id()) {
            el.set_text_content(Some(text));
        }
    }

    fn play_sound(&mut self, sound: SoundEffect) {
        self.audio.play(sound);
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flappy Walls starting...");
}

/// Game handle for JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore, DomPresenter>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = super::session_seed(settings.seed);
        let presenter = DomPresenter::new(AudioManager::from_settings(&settings));
        let game = Game::new(settings.tuning, seed, LocalStorageStore::new(), presenter);
        WebGame { game }
    }

    /// Tap / click / key press
    pub fn tap(&mut self) {
        // Browsers only allow audio after a user gesture
        self.game.presenter().audio().resume();
        self.game.activate();
    }

    /// Advance by `dt_seconds` of real time, returns steps run
    pub fn frame(&mut self, dt_seconds: f32) -> u32 {
        self.game.update(dt_seconds)
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }

    /// Current world as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.game.snapshot()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Snapshot serialization failed: {err}");
                String::from("{}")
            }
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
