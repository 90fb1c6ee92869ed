//! In-memory host, loader and module shared by the integration tests.

#![allow(dead_code)]

use futures::channel::oneshot;
use mipsi_core::{
    BootstrapError, BootstrapResult, ClickHandler, Color, DrawingSurface, MemorySurface,
    ModuleHandle, ModuleLoadFailure, ModuleLoader, Timer, UiHost,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// ─── Surface ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SharedSurface(pub Rc<RefCell<MemorySurface>>);

impl DrawingSurface for SharedSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.0.borrow_mut().set_size(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.0.borrow().size()
    }

    fn set_fill_style(&mut self, color: Color) {
        self.0.borrow_mut().set_fill_style(color);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.0.borrow_mut().fill_rect(x, y, width, height);
    }
}

// ─── Host ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct HostState {
    pub surfaces: RefCell<HashMap<String, SharedSurface>>,
    pub inputs: RefCell<HashMap<String, String>>,
    pub alerts: RefCell<Vec<String>>,
    pub handlers: RefCell<HashMap<String, ClickHandler>>,
    pub status: RefCell<HashMap<String, String>>,
}

/// Cheap to clone; clones share the same page.
#[derive(Clone, Default)]
pub struct FakeHost(pub Rc<HostState>);

impl FakeHost {
    /// A page with the default element ids, the input left empty.
    pub fn page() -> Self {
        let host = Self::default();
        host.add_canvas("canvas_wasm");
        host.set_input("src", "");
        host
    }

    pub fn add_canvas(&self, id: &str) -> SharedSurface {
        let surface = SharedSurface::default();
        self.0
            .surfaces
            .borrow_mut()
            .insert(id.to_string(), surface.clone());
        surface
    }

    pub fn canvas(&self, id: &str) -> SharedSurface {
        self.0.surfaces.borrow()[id].clone()
    }

    pub fn set_input(&self, id: &str, value: &str) {
        self.0
            .inputs
            .borrow_mut()
            .insert(id.to_string(), value.to_string());
    }

    pub fn alerts(&self) -> Vec<String> {
        self.0.alerts.borrow().clone()
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.0.handlers.borrow().contains_key(id)
    }

    /// Dispatch a click. Returns `false` when no handler is bound.
    pub fn click(&self, id: &str) -> bool {
        let handler = self.0.handlers.borrow_mut().remove(id);
        let Some(mut handler) = handler else {
            return false;
        };
        handler();
        self.0.handlers.borrow_mut().insert(id.to_string(), handler);
        true
    }

    pub fn status(&self, id: &str) -> Option<String> {
        self.0.status.borrow().get(id).cloned()
    }
}

impl UiHost for FakeHost {
    type Surface = SharedSurface;

    fn surface(&self, id: &str) -> BootstrapResult<SharedSurface> {
        self.0
            .surfaces
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| BootstrapError::ElementNotFound { id: id.into() })
    }

    fn input_value(&self, id: &str) -> BootstrapResult<String> {
        self.0
            .inputs
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| BootstrapError::ElementNotFound { id: id.into() })
    }

    fn alert(&self, message: &str) {
        self.0.alerts.borrow_mut().push(message.to_string());
    }

    fn on_click(&self, id: &str, handler: ClickHandler) -> BootstrapResult<()> {
        self.0.handlers.borrow_mut().insert(id.to_string(), handler);
        Ok(())
    }

    fn set_status(&self, id: &str, message: &str) -> BootstrapResult<()> {
        self.0
            .status
            .borrow_mut()
            .insert(id.to_string(), message.to_string());
        Ok(())
    }
}

// ─── Module & loader ─────────────────────────────────────────────────────

pub struct FakeModule {
    pub runs: Rc<Cell<u32>>,
    pub raise: bool,
}

impl ModuleHandle for FakeModule {
    fn run(&self) -> BootstrapResult<()> {
        self.runs.set(self.runs.get() + 1);
        if self.raise {
            return Err(BootstrapError::Host("RuntimeError: unreachable".into()));
        }
        Ok(())
    }
}

/// Resolves to a [`FakeModule`], a failure, or waits on a gate first.
#[derive(Default)]
pub struct FakeLoader {
    pub runs: Rc<Cell<u32>>,
    pub loads: Cell<u32>,
    pub failure: Option<ModuleLoadFailure>,
    pub raise_on_run: bool,
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub hang: bool,
    /// Attempt numbers passed to each `load` call.
    pub attempts: RefCell<Vec<u32>>,
}

impl FakeLoader {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(failure: ModuleLoadFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn gated() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let loader = Self {
            gate: RefCell::new(Some(rx)),
            ..Self::default()
        };
        (loader, tx)
    }
}

impl ModuleLoader for FakeLoader {
    type Module = FakeModule;

    async fn load(&self, _path: &str, attempt: u32) -> Result<FakeModule, ModuleLoadFailure> {
        self.loads.set(self.loads.get() + 1);
        self.attempts.borrow_mut().push(attempt);
        if self.hang {
            futures::future::pending::<()>().await;
        }
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(FakeModule {
            runs: Rc::clone(&self.runs),
            raise: self.raise_on_run,
        })
    }
}

/// Timer whose sleeps never finish.
pub struct NeverTimer;

impl Timer for NeverTimer {
    async fn sleep(&self, _ms: u32) {
        futures::future::pending::<()>().await
    }
}

/// Timer whose sleeps finish immediately.
pub struct InstantTimer;

impl Timer for InstantTimer {
    async fn sleep(&self, _ms: u32) {}
}
