//! Logging setup for applications built on the wayfinder router.
//!
//! The router crates only emit [`tracing`] events. Applications that want to see them call
//! [`init`] once at startup:
//!
//! ```rust
//! wayfinder_logger::init(tracing::Level::DEBUG).expect("failed to init logger");
//! tracing::info!("routes registered");
//! ```
//!
//! The `WAYFINDER_LOG` environment variable overrides the level passed in, using the usual
//! [`EnvFilter`] directive syntax, e.g. `WAYFINDER_LOG=info,wayfinder_router=trace`.
#![warn(missing_docs)]

use std::env;

use tracing::Level;
use tracing_subscriber::{
    filter::ParseError, prelude::*, util::TryInitError, EnvFilter,
};

const LOG_ENV: &str = "WAYFINDER_LOG";

/// Errors that can happen while installing the logger.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        /// The rejected directives.
        filter: String,
        /// Why they were rejected.
        #[source]
        source: ParseError,
    },

    /// A global subscriber was installed before.
    #[error("a global logger is already set")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Install a global subscriber printing events at `level` and above.
///
/// `WAYFINDER_LOG` takes precedence over `level` when it is set.
pub fn init(level: Level) -> Result<(), LoggerError> {
    init_with_filter(&level.as_str().to_ascii_lowercase())
}

/// Install a global subscriber using the given filter directives.
///
/// `WAYFINDER_LOG` takes precedence over `filter` when it is set.
pub fn init_with_filter(filter: &str) -> Result<(), LoggerError> {
    let filter = match env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => directives,
        _ => filter.to_string(),
    };

    tracing_subscriber::registry()
        .with(parse_filter(&filter)?)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(filter).map_err(|source| LoggerError::InvalidFilter {
        filter: filter.to_string(),
        source,
    })
}
