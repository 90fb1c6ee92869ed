//! The bootstrap controller.
//!
//! Sequences module load → surface reset → run-trigger binding, and owns
//! the lifecycle state. The run trigger is only bound on the way into
//! `Ready`, so clicks before the module settles do nothing.

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::host::{ModuleHandle, ModuleLoader, Timer, UiHost};
use crate::load::load_module;
use crate::state::{Lifecycle, Phase};
use crate::surface::{SurfaceSpec, reset_surface};
use std::rc::Rc;

/// What happened when the run trigger fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `wasm_run()` was called.
    Invoked,
    /// The input was empty; the user was alerted and nothing ran.
    EmptyInput,
    /// Reading the input or calling the module failed. Already logged.
    Failed(BootstrapError),
}

/// Click handler state for the run trigger.
///
/// The input text gates the call but is not forwarded: `wasm_run` takes
/// no arguments and reads the input itself.
pub struct RunTrigger<H, M> {
    host: Rc<H>,
    module: Rc<M>,
    input_id: String,
    alert_message: String,
}

impl<H: UiHost, M: ModuleHandle> RunTrigger<H, M> {
    pub fn new(host: Rc<H>, module: Rc<M>, config: &BootstrapConfig) -> Self {
        Self {
            host,
            module,
            input_id: config.elements.input.clone(),
            alert_message: config.alert_message.clone(),
        }
    }

    pub fn activate(&self) -> RunOutcome {
        let source = match self.host.input_value(&self.input_id) {
            Ok(source) => source,
            Err(e) => {
                log::error!("run: cannot read input: {e}");
                return RunOutcome::Failed(e);
            }
        };
        if source.is_empty() {
            self.host.alert(&self.alert_message);
            return RunOutcome::EmptyInput;
        }
        log::debug!("run: invoking module ({} bytes of input)", source.len());
        match self.module.run() {
            Ok(()) => RunOutcome::Invoked,
            Err(e) => {
                log::error!("run: module raised: {e}");
                RunOutcome::Failed(e)
            }
        }
    }
}

pub struct Controller<H> {
    host: Rc<H>,
    config: BootstrapConfig,
    lifecycle: Lifecycle,
}

impl<H: UiHost + 'static> Controller<H> {
    pub fn new(host: H, config: BootstrapConfig) -> Self {
        Self {
            host: Rc::new(host),
            config,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run the whole bootstrap sequence once.
    ///
    /// Any failure is logged, recorded in the lifecycle, written to the
    /// status element when one is configured, and returned. Calling this
    /// outside `Uninitialized` fails without touching the lifecycle.
    pub async fn initialize<L, T>(&mut self, loader: &L, timer: &T) -> BootstrapResult<()>
    where
        L: ModuleLoader,
        L::Module: 'static,
        T: Timer,
    {
        self.lifecycle.begin_loading()?;
        log::info!("start loading `{}`", self.config.module_path);

        let outcome = match load_module(
            loader,
            timer,
            &self.config.module_path,
            self.config.load_timeout_ms,
            self.config.load_attempts,
        )
        .await
        {
            Ok(module) => {
                log::info!("finished loading `{}`", self.config.module_path);
                self.reset_surface(self.config.surface)
                    .and_then(|()| self.bind_run_trigger(Rc::new(module)))
            }
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(()) => self.lifecycle.mark_ready(),
            Err(e) => {
                log::error!("bootstrap failed: {e}");
                self.report_failure(&e);
                self.lifecycle.mark_failed(e.clone())?;
                Err(e)
            }
        }
    }

    /// Size the configured surface to `spec` and paint it the fill color.
    pub fn reset_surface(&self, spec: SurfaceSpec) -> BootstrapResult<()> {
        let mut surface = self.host.surface(&self.config.elements.canvas)?;
        reset_surface(&mut surface, spec, self.config.fill_color)
    }

    /// Subscribe the run button to [`RunTrigger::activate`].
    pub fn bind_run_trigger<M: ModuleHandle + 'static>(&self, module: Rc<M>) -> BootstrapResult<()> {
        let trigger = RunTrigger::new(Rc::clone(&self.host), module, &self.config);
        self.host.on_click(
            &self.config.elements.run_button,
            Box::new(move || {
                trigger.activate();
            }),
        )
    }

    fn report_failure(&self, error: &BootstrapError) {
        let Some(id) = self.config.status_element.as_deref() else {
            return;
        };
        if let Err(e) = self.host.set_status(id, &error.to_string()) {
            log::warn!("cannot show failure in `#{id}`: {e}");
        }
    }
}
