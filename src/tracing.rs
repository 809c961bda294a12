//! Logging setup
//!
//! Diagnostics only: what handler a key resolved to, mode changes, drain
//! start and teardown, keymap loading. Handler output is a notification and
//! never passes through here.
//!
//! Two sinks:
//! - stderr, filtered by `RUST_LOG`, else `--log-level`, else `log_level`
//!   from `config.yaml` (default `warn`)
//! - `<config dir>/logs/chordline.log.YYYY-MM-DD` at debug level
//!
//! Useful targets: `chordline::binding` carries one `binding{key, handler}`
//! span per key press, `chordline::eval` the output relay, and
//! `chordline::keymap` which files were merged.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_PREFIX};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG; without it `level` (e.g. "warn",
/// "chordline=debug") is used. Console logs go to stderr so they never mix
/// with the editor's own output.
pub fn init(level: &str) {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
