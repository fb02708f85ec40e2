//! Browser bridge
//!
//! JavaScript owns the page, the canvas and requestAnimationFrame. It forwards
//! key and pointer events to a [`WebGame`], calls [`WebGame::frame`] once per
//! animation frame and draws from [`WebGame::snapshot_json`].

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::hud::{HudField, HudReport, HudSink};
use crate::input::InputState;
use crate::render::{RenderSnapshot, camera_ray, pick};
use crate::sim::{GameState, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Sphere Eater (WASM) starting...");
}

/// HUD sink writing into the page's text elements
struct DomHud {
    document: Option<web_sys::Document>,
}

impl DomHud {
    fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }
}

impl HudSink for DomHud {
    fn set_text(&mut self, field: HudField, text: &str) {
        let Some(document) = &self.document else {
            return;
        };
        if let Some(el) = document.get_element_by_id(field.element_id()) {
            el.set_inner_html(&text.replace('\n', "<br />"));
        }
    }
}

/// A game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: InputState,
    hud: DomHud,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game. `seed` of `None` uses the current time; `config_json`
    /// overrides any subset of the default tuning.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, config_json: Option<String>) -> Result<WebGame, JsError> {
        let config = match config_json.as_deref() {
            Some(json) => GameConfig::from_json(json).map_err(|e| {
                log::warn!("Rejected game config: {}", e);
                JsError::new(&e.to_string())
            })?,
            None => GameConfig::default(),
        };
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let state = GameState::with_config(config, seed).map_err(|e| {
            log::warn!("Rejected game config: {}", e);
            JsError::new(&e.to_string())
        })?;

        let mut game = WebGame {
            state,
            input: InputState::new(),
            hud: DomHud::new(),
        };
        game.update_hud();
        Ok(game)
    }

    /// Forward a key-down by logical name ("space", "w", ...)
    pub fn key_down(&mut self, name: &str) -> bool {
        self.input.key_down(name)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(x, y);
    }

    pub fn pointer_button(&mut self, held: bool) {
        self.input.pointer_button(held);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.input.resize(width, height);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Advance one animation frame. `dt` is in seconds.
    pub fn frame(&mut self, dt: f32) {
        let input = self.input.take_tick_input(dt);
        tick(&mut self.state, &input);
        self.update_hud();
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&RenderSnapshot::capture(&self.state)).unwrap_or_default()
    }

    /// Frame events as JSON, for the host's cosmetic effects
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.state.events).unwrap_or_default()
    }
}

impl WebGame {
    fn update_hud(&mut self) {
        let pointer = self.input.pointer();
        let hit = camera_ray(&self.state.player.pose, pointer.position, self.input.viewport())
            .and_then(|(origin, dir)| pick(&self.state, origin, dir));
        HudReport::from_state(&self.state)
            .with_selection(hit)
            .apply(&mut self.hud);
    }
}
