//! Console logging for the CLI.

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle, Record};
use std::io::Write;

/// Default log spec when `RUST_LOG` is unset.
const DEFAULT_SPEC: &str = "warn";

/// Starts stderr logging, honouring `RUST_LOG`.
///
/// The returned handle must stay alive for the duration of the program.
pub fn setup() -> Result<LoggerHandle, FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str(DEFAULT_SPEC)?
        .format(line_format)
        .start()?;
    log::debug!("logging started; adjust with RUST_LOG (default {DEFAULT_SPEC})");
    Ok(handle)
}

/// `LEVEL [hh:mm:ss.micros] [file:line] message`
fn line_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} [{}] [{}:{}] {}",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}
