//! Bootstrap configuration.
//!
//! Every field is optional in JSON; missing fields fall back to the values
//! the page has always used (64×64 black canvas, `run_button`/`src`/
//! `canvas_wasm` element ids, no timeout, single load attempt).

use crate::color::Color;
use crate::error::{BootstrapError, BootstrapResult};
use crate::surface::SurfaceSpec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODULE_PATH: &str = "./pkg/mipsi.js";
pub const DEFAULT_ALERT_MESSAGE: &str = "Please fill out textarea.";

/// Ids of the DOM elements the controller talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub run_button: String,
    pub input: String,
    pub canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            run_button: "run_button".into(),
            input: "src".into(),
            canvas: "canvas_wasm".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// URL of the computation module, resolved against the document base.
    pub module_path: String,
    pub elements: ElementIds,
    pub surface: SurfaceSpec,
    pub fill_color: Color,
    /// Text of the alert shown when the run trigger fires with empty input.
    pub alert_message: String,
    /// Abort a load that has not settled after this many milliseconds.
    pub load_timeout_ms: Option<u32>,
    /// Total load attempts, including the first.
    pub load_attempts: u32,
    /// Element that receives the load-failure message, if any.
    pub status_element: Option<String>,
    /// `log` level name for the console backend (`"info"`, `"debug"`, ...).
    pub log_level: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            module_path: DEFAULT_MODULE_PATH.into(),
            elements: ElementIds::default(),
            surface: SurfaceSpec::default(),
            fill_color: Color::BLACK,
            alert_message: DEFAULT_ALERT_MESSAGE.into(),
            load_timeout_ms: None,
            load_attempts: 1,
            status_element: None,
            log_level: "info".into(),
        }
    }
}

impl BootstrapConfig {
    /// Parse from JSON and validate. An empty or whitespace-only string
    /// yields the defaults.
    pub fn from_json(json: &str) -> BootstrapResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| BootstrapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BootstrapResult<()> {
        if self.module_path.trim().is_empty() {
            return Err(BootstrapError::Config("module_path is empty".into()));
        }
        if self.load_attempts == 0 {
            return Err(BootstrapError::Config("load_attempts must be at least 1".into()));
        }
        if self.load_timeout_ms == Some(0) {
            return Err(BootstrapError::Config("load_timeout_ms must be positive".into()));
        }
        self.surface.pixel_size()?;
        Ok(())
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
