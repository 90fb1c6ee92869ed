pub mod color;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod load;
pub mod state;
pub mod surface;

pub use color::Color;
pub use config::{BootstrapConfig, ElementIds};
pub use controller::{Controller, RunOutcome, RunTrigger};
pub use error::{BootstrapError, BootstrapResult, ModuleLoadFailure};
pub use host::{ClickHandler, DRAW_EXPORT, ModuleHandle, ModuleLoader, RUN_EXPORT, Timer, UiHost};
pub use state::{Lifecycle, Phase};
pub use surface::{DrawingSurface, MemorySurface, SurfaceSpec, reset_surface};
