//! Browser glue: LocalStorage records and a `wasm_bindgen` facade
//!
//! The page owns drawing and device input. It forwards the two logical
//! signals, calls `frame()` from `requestAnimationFrame`, and draws from
//! `snapshot_json()`.

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::error::{HopperError, Result};
use crate::persistence::{KeyValueStore, MemoryStore};
use crate::run::RunController;
use crate::tuning::Tuning;

fn js_error(e: JsValue) -> HopperError {
    HopperError::StorageUnavailable(format!("{e:?}"))
}

fn to_js(e: HopperError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| HopperError::StorageUnavailable("no window".into()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| HopperError::StorageUnavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// LocalStorage when the browser allows it, memory otherwise
pub enum BrowserStore {
    Local(LocalStore),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match LocalStore::open() {
            Ok(store) => BrowserStore::Local(store),
            Err(e) => {
                log::warn!("{e} - scores will not persist");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            BrowserStore::Local(s) => s.get(key),
            BrowserStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.set(key, value),
            BrowserStore::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.remove(key),
            BrowserStore::Memory(s) => s.remove(key),
        }
    }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    controller: RunController<BrowserStore, WebAudio>,
}

#[wasm_bindgen]
impl WebGame {
    /// `asset_count` sprites/sounds must settle before the first run can start
    #[wasm_bindgen(constructor)]
    pub fn new(asset_count: u32) -> std::result::Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised when a second game is created on the page
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = super::clock_seed();
        let mut controller =
            RunController::new(BrowserStore::open(), WebAudio::new(), Tuning::default(), seed)
                .map_err(to_js)?;
        controller.preloader_mut().expect(asset_count as usize);
        log::info!("Sky Hopper ready with seed: {}", seed);
        Ok(WebGame { controller })
    }

    pub fn asset_loaded(&mut self) {
        self.controller.preloader_mut().mark_loaded();
    }

    pub fn asset_failed(&mut self) {
        self.controller.preloader_mut().mark_failed();
    }

    pub fn assets_ready(&self) -> bool {
        self.controller.preloader().is_settled()
    }

    /// Settled fraction for the loading bar
    pub fn load_progress(&self) -> f32 {
        self.controller.preloader().progress()
    }

    /// Assets that failed; the page draws fallbacks for them
    pub fn assets_failed(&self) -> u32 {
        self.controller.preloader().failed() as u32
    }

    pub fn impulse(&mut self) {
        // Browsers only allow audio after a user gesture
        self.controller.audio().resume();
        self.controller.impulse();
    }

    pub fn toggle_pause(&mut self) {
        self.controller.toggle_pause();
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.controller.set_autopilot(on);
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Advance one frame; returns the frame's events as JSON
    pub fn frame(&mut self) -> String {
        let events = self.controller.frame();
        serde_json::to_string(&events).unwrap_or_default()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.controller.snapshot()).unwrap_or_default()
    }

    pub fn ranking_json(&self) -> String {
        serde_json::to_string(self.controller.list_ranking()).unwrap_or_default()
    }

    pub fn best_score(&self) -> u32 {
        self.controller.best_score()
    }

    /// Score of the last finished run, if any
    pub fn last_score(&self) -> Option<u32> {
        self.controller.last_result().map(|r| r.score)
    }

    /// Whether the save-score form should be enabled
    pub fn can_submit(&self) -> bool {
        self.controller.can_submit()
    }

    /// Submit the last run under `name`. Returns the rank (0 = not kept);
    /// throws when the name is rejected so the page can re-prompt, or when
    /// the run was already saved.
    pub fn submit_ranking(&mut self, name: &str) -> std::result::Result<u32, JsValue> {
        self.controller
            .submit_last_run(name)
            .map(|rank| rank.map(|r| r as u32).unwrap_or(0))
            .map_err(to_js)
    }
}
