//! # zagi-logging
//!
//! Tracing setup for zagi.
//!
//! Command output goes to stdout, so every log record is written to stderr.
//! The level comes from `RUST_LOG` when set, otherwise from the caller
//! (`ZAGI_LOG` or `zagi.toml`), defaulting to `warn`.
//!
//! ## Log Formats
//!
//! - `Pretty` - Human-readable output
//! - `Json` - Structured JSON lines
//! - `Compact` - Minimal text output

mod format;

pub use format::LogFormat;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LEVEL: &str = "warn";

/// Initialize tracing for the application
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
