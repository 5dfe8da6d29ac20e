//! Logger setup for binaries.
//!
//! The library only talks to the `log` facade. Binaries call
//! [`setup_logging`] once at startup; output goes to rotating files under
//! `logs/` because the terminal belongs to the UI.

use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Roll over to a new log file past this size.
const LOG_FILE_BYTES: u64 = 1 << 20;

/// Start file logging at `base_level` (e.g. `"info"`, `"globe_picker=debug"`).
/// `RUST_LOG` overrides the level when set. Keep the returned handle alive
/// for as long as logging is needed.
pub fn setup_logging(base_level: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(base_level)?
        .log_to_file(FileSpec::default().directory("logs").basename("globe-picker"))
        .rotate(
            flexi_logger::Criterion::Size(LOG_FILE_BYTES),
            flexi_logger::Naming::Timestamps,
            flexi_logger::Cleanup::KeepLogFiles(5),
        )
        .start()?;
    Ok(handle)
}
