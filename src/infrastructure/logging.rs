//! Logging bootstrap
//!
//! Diagnostics go through the `log` facade and are written to stderr by
//! flexi_logger. Lines follow `event=<name> module=<module> status=<status>`
//! with extra `key=value` pairs. Entry bodies and descriptions are never
//! logged.

use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use std::sync::OnceLock;

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "DAYLOG_LOG";

/// Level used when nothing is configured
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const SUPPORTED_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

struct LoggingState {
    level: &'static str,
    _logger: LoggerHandle,
}

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

/// Normalize a level name to one of the supported values
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    let lowered = level.trim().to_ascii_lowercase();
    SUPPORTED_LEVELS
        .iter()
        .copied()
        .find(|candidate| *candidate == lowered)
        .ok_or_else(|| {
            format!(
                "unsupported log level `{}`; expected one of: {}",
                level,
                SUPPORTED_LEVELS.join(", ")
            )
        })
}

/// Initialize stderr logging once per process.
///
/// Repeated calls with the same level are no-ops; a different level is
/// rejected. Never panics.
pub fn init_logging(level: &str) -> Result<(), String> {
    let level = normalize_level(level)?;

    if let Some(state) = LOGGING_STATE.get() {
        if state.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{}`",
                state.level, level
            ));
        }
        return Ok(());
    }

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{}`: {}", level, err))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {}", err))?;

    // A concurrent initializer may have won; its handle is kept and ours dropped.
    let _ = LOGGING_STATE.set(LoggingState {
        level,
        _logger: logger,
    });

    debug!(
        "event=logging_init module=logging status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

/// Level to use: explicit flag, then DAYLOG_LOG, then the default
pub fn resolve_level(flag: Option<&str>) -> String {
    flag.map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
