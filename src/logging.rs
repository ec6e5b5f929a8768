//! Process-wide logger bootstrap.
//!
//! # Invariants
//! - Initialization happens at most once per process; later calls are no-ops.
//! - Initialization never panics. A failure is returned to the caller, which
//!   keeps running without logs.
//! - `RUST_LOG` overrides the configured level spec.

use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start logging to stderr with `level` (a flexi_logger spec such as `info`
/// or `warn, swimlane_board::timeline=debug`).
pub fn init_logging(level: &str) -> Result<(), String> {
    LOGGER
        .get_or_try_init(|| {
            let handle = Logger::try_with_env_or_str(level)
                .map_err(|err| format!("invalid log level `{level}`: {err}"))?
                .log_to_stderr()
                .format(flexi_logger::detailed_format)
                .start()
                .map_err(|err| format!("failed to start logger: {err}"))?;
            log::info!(
                "event=app_start platform={} version={}",
                std::env::consts::OS,
                env!("CARGO_PKG_VERSION")
            );
            Ok(handle)
        })
        .map(|_| ())
}
