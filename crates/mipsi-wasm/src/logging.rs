//! Console logging backend and panic hook.

use log::Level;

/// Route `log` records and panics to the browser console. Safe to call
/// more than once; only the first call installs the logger.
pub fn init(level: Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already initialized");
    }
}
