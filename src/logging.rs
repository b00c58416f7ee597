//! Tracing subscriber setup for applications built on the SDK.
//!
//! Library code only emits `tracing` events; nothing is printed until the
//! application installs a subscriber, for example with [`init_tracing`].

use crate::{SdkError, SdkResult};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,neo=info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "plain" | "text" | "pretty" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(SdkError::Logging(format!("unknown log format '{}'", other))),
        }
    }
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs a plain-text subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
pub fn init_tracing() -> SdkResult<()> {
    init_tracing_with(DEFAULT_FILTER, LogFormat::Plain)
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init_tracing_with(default_filter: &str, format: LogFormat) -> SdkResult<()> {
    let builder = fmt().with_env_filter(env_filter(default_filter));
    let result = match format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| SdkError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_second_install_fails() {
        let _ = init_tracing();
        assert!(matches!(init_tracing(), Err(SdkError::Logging(_))));
    }
}
