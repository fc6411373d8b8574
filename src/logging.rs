//! Logging bootstrap for applications embedding the SDK.
//!
//! Library code only emits `tracing` events; nothing is printed until a
//! subscriber is installed.

use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs a global subscriber. `RUST_LOG` takes precedence over `default_filter`.
///
/// Returns an error if a global subscriber is already set.
pub fn try_init(
    default_filter: &str,
    format: LogFormat,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = fmt().with_env_filter(env_filter).with_target(true);
    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}

/// Like [`try_init`] with text output, ignoring an already installed subscriber.
pub fn init(default_filter: &str) {
    let _ = try_init(default_filter, LogFormat::Text);
}
