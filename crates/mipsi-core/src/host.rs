//! Seams between the controller and the environment it runs in.
//!
//! The browser implementations live in `mipsi-wasm`; tests drive the
//! controller through in-memory fakes.

use crate::error::{BootstrapResult, ModuleLoadFailure};
use crate::surface::DrawingSurface;
use std::future::Future;

/// Entry points exported by the computation module.
pub const RUN_EXPORT: &str = "wasm_run";
pub const DRAW_EXPORT: &str = "draw_canvas";

/// Click callback registered on the run trigger.
pub type ClickHandler = Box<dyn FnMut()>;

/// A loaded computation module.
pub trait ModuleHandle {
    /// Invoke `wasm_run()` with no arguments.
    fn run(&self) -> BootstrapResult<()>;
}

/// Loads the computation module from a path.
pub trait ModuleLoader {
    type Module: ModuleHandle;

    /// `attempt` counts from 1. Loaders whose host caches failed or
    /// in-flight loads per URL must make retries distinct.
    fn load(
        &self,
        path: &str,
        attempt: u32,
    ) -> impl Future<Output = Result<Self::Module, ModuleLoadFailure>>;
}

/// Source of delays, used to bound module loading.
pub trait Timer {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// The UI the controller is wired into.
pub trait UiHost {
    type Surface: DrawingSurface;

    /// Look up the drawing surface by element id.
    fn surface(&self, id: &str) -> BootstrapResult<Self::Surface>;

    /// Current `value` of a text input.
    fn input_value(&self, id: &str) -> BootstrapResult<String>;

    /// Blocking user-visible alert.
    fn alert(&self, message: &str);

    /// Subscribe `handler` to clicks on the element.
    fn on_click(&self, id: &str, handler: ClickHandler) -> BootstrapResult<()>;

    /// Replace the text content of a status element.
    fn set_status(&self, id: &str, message: &str) -> BootstrapResult<()>;
}
