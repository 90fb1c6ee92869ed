//! WASM bridge for mipsi — boots the computation module in the browser.
//!
//! Compiled via `wasm-pack build --target web`. The page loads the bridge
//! and hands control to [`boot`]:
//!
//! ```js
//! import init, { boot } from "./bridge/mipsi_wasm.js";
//! await init();
//! boot(); // or boot(JSON.stringify({ surface: { unit_width: 2, unit_height: 2 } }))
//! ```

mod canvas;
mod dom;
mod logging;
mod module;

pub use canvas::CanvasSurface;
pub use dom::WebHost;
pub use module::{BrowserTimer, JsModule, JsModuleLoader};

use mipsi_core::{BootstrapConfig, BootstrapError, Controller, SurfaceSpec};
use std::cell::Cell;
use wasm_bindgen::prelude::*;

thread_local! {
    static BOOTED: Cell<bool> = const { Cell::new(false) };
}

/// Start the bootstrap sequence and return immediately.
///
/// `config_json` is an optional JSON `BootstrapConfig`; missing fields
/// take their defaults and an unparsable config falls back to the
/// defaults entirely. Only the first call does anything. Load failures
/// are logged to the console and never thrown.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) {
    let (config, rejected) = parse_config(config_json.as_deref());
    logging::init(config.log_level());
    if let Some(e) = rejected {
        log::error!("{e}; using defaults");
    }

    if BOOTED.with(|booted| booted.replace(true)) {
        log::warn!("boot() called again; ignoring");
        return;
    }

    wasm_bindgen_futures::spawn_local(run(config));
}

/// Parse the page's config, falling back to the defaults (and returning
/// the reason) when it does not parse or validate.
fn parse_config(json: Option<&str>) -> (BootstrapConfig, Option<BootstrapError>) {
    match BootstrapConfig::from_json(json.unwrap_or_default()) {
        Ok(config) => (config, None),
        Err(e) => (BootstrapConfig::default(), Some(e)),
    }
}

async fn run(config: BootstrapConfig) {
    let host = match WebHost::new() {
        Ok(host) => host,
        Err(e) => {
            log::error!("bootstrap aborted: {e}");
            return;
        }
    };
    let loader = JsModuleLoader::new(host.base_uri());
    let mut controller = Controller::new(host, config);
    // Already logged and recorded by the controller.
    let _ = controller.initialize(&loader, &BrowserTimer).await;
}

/// Size `#canvas_wasm` to `canvas_w*unit_w` × `canvas_h*unit_h` and
/// paint it black.
#[wasm_bindgen]
pub fn reset_canvas(canvas_w: u32, canvas_h: u32, unit_w: u32, unit_h: u32) -> Result<(), JsValue> {
    let host = WebHost::new().map_err(to_js)?;
    Controller::new(host, BootstrapConfig::default())
        .reset_surface(SurfaceSpec::new(canvas_w, canvas_h, unit_w, unit_h))
        .map_err(to_js)
}

fn to_js(error: BootstrapError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}
