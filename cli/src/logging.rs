//! Logging initialization from the resolved configuration.
//!
//! The `logLevel` slot uses the migration ecosystem's level vocabulary
//! (debug, info, warning, severe, off), mapped onto tracing's filter
//! levels. With `logFile` set, events append to that file without ANSI
//! colors; otherwise they go to stderr so command output on stdout stays
//! clean.

use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;

/// Installs the global subscriber for this invocation.
///
/// # Errors
///
/// Returns a message for an unknown level name or an unopenable log
/// file; the caller reports it as a parse-category failure.
pub fn init(level: &str, log_file: Option<&str>) -> Result<(), String> {
    let filter = match level.to_ascii_lowercase().as_str() {
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warning" => LevelFilter::WARN,
        "severe" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        other => {
            return Err(format!(
                "Unknown log level: '{other}' (expected debug, info, warning, severe, or off)"
            ));
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| format!("could not open log file '{path}': {err}"))?;
            // A second init in the same process is fine; the first
            // subscriber stays installed.
            let _ = builder.with_ansi(false).with_writer(Arc::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}
