//! CLI entry point for `codeisland`.

mod logging;
mod render;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codeisland_analyzer::{AnalyzerConfig, QueryAdvisor, build_report, explain};

use crate::logging::{LogFormat, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "codeisland",
    version,
    about = "Explain SQL queries in plain language and suggest optimizations"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// SQL query to report on (read from stdin when omitted)
    query: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Analyzer config file (defaults to <config dir>/codeisland/analyzer.toml)
    #[arg(long, env = "CODEISLAND_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Skip optimization suggestions in reports
    #[arg(long, global = true)]
    no_suggestions: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Print verbose diagnostics
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Step-by-step explanation of the execution order
    Explain {
        /// SQL query (read from stdin when omitted)
        query: Option<String>,
    },
    /// Optimization suggestions only
    Analyze {
        /// SQL query (read from stdin when omitted)
        query: Option<String>,
    },
    /// Explanation plus suggestions
    Report {
        /// SQL query (read from stdin when omitted)
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    logging::init(&logging.with_format(cli.log_format))?;

    let mut config = AnalyzerConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load analyzer config")?;
    if cli.no_suggestions {
        config = config.with_suggestions(false);
    }

    let command = cli.command.unwrap_or(Command::Report { query: cli.query });
    let output = match command {
        Command::Explain { query } => {
            let explanation = explain(&query_text(query)?);
            match cli.format {
                OutputFormat::Text => render::render_explanation(&explanation),
                OutputFormat::Json => serde_json::to_string_pretty(&explanation)?,
            }
        }
        Command::Analyze { query } => {
            let findings = QueryAdvisor::with_config(config).analyze(&query_text(query)?);
            match cli.format {
                OutputFormat::Text => render::render_findings(&findings),
                OutputFormat::Json => serde_json::to_string_pretty(&findings)?,
            }
        }
        Command::Report { query } => {
            let report = build_report(&query_text(query)?, &config);
            match (cli.format, report) {
                (OutputFormat::Text, Some(report)) => render::render_report(&report),
                (OutputFormat::Text, None) => render::NOTHING_TO_EXPLAIN.to_string(),
                (OutputFormat::Json, report) => serde_json::to_string_pretty(&report)?,
            }
        }
    };

    println!("{output}");
    Ok(())
}

/// Query from the command line, or all of stdin
fn query_text(query: Option<String>) -> Result<String> {
    let query = match query {
        Some(query) => query,
        None => read_stdin()?,
    };
    tracing::debug!(bytes = query.len(), "Analyzing query");
    Ok(query)
}

fn read_stdin() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        tracing::info!("Reading query from stdin, finish with Ctrl-D");
    }

    let mut query = String::new();
    stdin
        .read_to_string(&mut query)
        .context("Failed to read query from stdin")?;
    Ok(query)
}
