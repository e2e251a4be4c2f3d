//! Logging setup for the `codeisland` binary
//!
//! Logs go to stderr so that stdout stays clean for reports and JSON.
//! `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default log level filter. The binary logs under the `codeisland`
    /// target, the library under `codeisland_analyzer`.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_filter: "warn,codeisland_analyzer=warn,codeisland=info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Verbose configuration used with `--verbose`
    pub fn verbose() -> Self {
        Self {
            default_filter: "info,codeisland_analyzer=debug,codeisland=debug".to_string(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Initialize the global subscriber
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = config.env_filter();

    match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?config.format, "Logging initialized");
    Ok(())
}
