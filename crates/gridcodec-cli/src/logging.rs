//! Structured logging for the gridcodec demo
//!
//! - Human-readable or compact console logging on stderr, so stdout stays
//!   clean for grid and record output
//! - JSON logging for machine consumption
//! - Daily rotated log files

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Log format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format for development
    Pretty,
    /// JSON format (structured logging)
    Json,
    /// Single-line format, the default for a CLI
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    File,
    Both,
}

impl LogOutput {
    pub fn parse(s: &str) -> Self {
        match s {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Stderr,
        }
    }
}

/// Initialize the logging system from configuration
///
/// `level` accepts anything `EnvFilter` does, e.g. "debug" or
/// "gridcodec_session=trace,warn".
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let format = LogFormat::parse(&config.format);
    let output = LogOutput::parse(&config.output);

    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("building log filter")?;

    let console_layer = if matches!(output, LogOutput::Stderr | LogOutput::Both) {
        Some(match format {
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(true)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .boxed(),
        })
    } else {
        None
    };

    let file_layer = if matches!(output, LogOutput::File | LogOutput::Both) {
        std::fs::create_dir_all(&config.directory)
            .with_context(|| format!("creating log directory {}", config.directory))?;
        let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.directory, "gridcodec.log");
        Some(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("installing log subscriber")?;

    tracing::debug!(format = ?format, output = ?output, level = %config.level, "logging initialized");
    Ok(())
}
