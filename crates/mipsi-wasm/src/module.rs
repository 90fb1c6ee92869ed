//! Loading the computation module with dynamic `import()`.

use js_sys::{Function, Promise, Reflect};
use mipsi_core::{
    BootstrapError, BootstrapResult, DRAW_EXPORT, ModuleHandle, ModuleLoadFailure, ModuleLoader,
    RUN_EXPORT, Timer,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::js_error;

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(url: &str) -> Result<Promise, JsValue>;
}

/// Entry points read off a loaded module namespace.
pub struct JsModule {
    run: Function,
    draw_canvas: Option<Function>,
}

impl JsModule {
    /// Read `wasm_run` and, if exported, `draw_canvas` off a module
    /// namespace (or any object carrying them).
    pub fn from_namespace(namespace: &JsValue) -> Result<Self, ModuleLoadFailure> {
        let run =
            export(namespace, RUN_EXPORT).ok_or(ModuleLoadFailure::MissingExport(RUN_EXPORT))?;
        let draw_canvas = export(namespace, DRAW_EXPORT);
        if draw_canvas.is_none() {
            log::warn!("module does not export `{DRAW_EXPORT}`");
        }
        Ok(Self { run, draw_canvas })
    }

    /// The module's drawing primitive. Held for the module's own use; the
    /// bootstrap never calls it.
    pub fn draw_canvas(&self) -> Option<&Function> {
        self.draw_canvas.as_ref()
    }
}

fn export(namespace: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(namespace, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

impl ModuleHandle for JsModule {
    fn run(&self) -> BootstrapResult<()> {
        self.run
            .call0(&JsValue::UNDEFINED)
            .map(|_| ())
            .map_err(|e| BootstrapError::Host(js_error(e)))
    }
}

/// Imports the module at a path resolved against the document base.
pub struct JsModuleLoader {
    base: Option<String>,
}

impl JsModuleLoader {
    pub fn new(base: Option<String>) -> Self {
        Self { base }
    }

    /// Absolute URL imported on `attempt`. The module map caches failed
    /// and in-flight imports per URL, so retries carry `attempt=N`.
    pub fn module_url(&self, path: &str, attempt: u32) -> Result<String, ModuleLoadFailure> {
        let url = match &self.base {
            Some(base) => web_sys::Url::new_with_base(path, base),
            None => web_sys::Url::new(path),
        }
        .map_err(|e| {
            ModuleLoadFailure::Rejected(format!("bad module path `{path}`: {}", js_error(e)))
        })?;
        if attempt > 1 {
            url.search_params().set("attempt", &attempt.to_string());
        }
        Ok(url.href())
    }
}

impl ModuleLoader for JsModuleLoader {
    type Module = JsModule;

    async fn load(&self, path: &str, attempt: u32) -> Result<JsModule, ModuleLoadFailure> {
        let rejected = |e: JsValue| ModuleLoadFailure::Rejected(js_error(e));
        let url = self.module_url(path, attempt)?;
        log::debug!("import({url})");

        let namespace = JsFuture::from(import_module(&url).map_err(rejected)?)
            .await
            .map_err(rejected)?;

        // `--target web` builds export their instantiation function as
        // `default`; entry points are unusable until it resolves.
        let init = Reflect::get(&namespace, &JsValue::from_str("default")).map_err(rejected)?;
        if let Some(init) = init.dyn_ref::<Function>() {
            let pending = init.call0(&JsValue::UNDEFINED).map_err(rejected)?;
            if let Ok(pending) = pending.dyn_into::<Promise>() {
                JsFuture::from(pending).await.map_err(rejected)?;
            }
        }

        JsModule::from_namespace(&namespace)
    }
}

/// `setTimeout`-backed delays.
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
