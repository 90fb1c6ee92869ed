//! Load policy: optional timeout per attempt, bounded retries.

use crate::error::ModuleLoadFailure;
use crate::host::{ModuleLoader, Timer};
use futures::future::{Either, select};
use std::future::Future;
use std::pin::pin;

/// Race `load` against `timer`. Without a timeout the load is awaited for
/// as long as it takes.
pub async fn with_timeout<F, M, T>(
    load: F,
    timer: &T,
    timeout_ms: Option<u32>,
) -> Result<M, ModuleLoadFailure>
where
    F: Future<Output = Result<M, ModuleLoadFailure>>,
    T: Timer + ?Sized,
{
    let Some(ms) = timeout_ms else {
        return load.await;
    };
    let load = pin!(load);
    let sleep = pin!(timer.sleep(ms));
    match select(load, sleep).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ModuleLoadFailure::TimedOut { after_ms: ms }),
    }
}

/// Load `path`, retrying up to `attempts` times in total. Returns the last
/// failure when every attempt fails.
pub async fn load_module<L, T>(
    loader: &L,
    timer: &T,
    path: &str,
    timeout_ms: Option<u32>,
    attempts: u32,
) -> Result<L::Module, ModuleLoadFailure>
where
    L: ModuleLoader + ?Sized,
    T: Timer + ?Sized,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        log::debug!("loading `{path}` (attempt {attempt}/{attempts})");
        match with_timeout(loader.load(path, attempt), timer, timeout_ms).await {
            Ok(module) => return Ok(module),
            Err(e) if attempt < attempts => {
                log::warn!("attempt {attempt}/{attempts} to load `{path}` failed: {e}");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
