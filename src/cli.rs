//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// MindWeave - see how clearly you think
///
/// Sends a piece of text to a MindWeave analysis service and shows the
/// main idea, clarity score, emotion, sub-ideas, logic gaps and suggested
/// improvements.
///
/// Examples:
///   mindweave "plants need sunlight to grow"
///   mindweave --file notes.txt --format markdown --output analysis.md
///   echo "my plan is..." | mindweave --format json
///   mindweave --interactive
///   mindweave --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Text to analyze
    ///
    /// When neither TEXT nor --file is given, text is read from stdin.
    #[arg(value_name = "TEXT", conflicts_with_all = ["file", "interactive"])]
    pub text: Option<String>,

    /// Read the text to analyze from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "interactive")]
    pub file: Option<PathBuf>,

    /// Interactive mode: type text, press Enter on an empty line to analyze
    #[arg(short, long)]
    pub interactive: bool,

    /// Base URL of the analysis service
    ///
    /// Can also be set via MINDWEAVE_SERVER_URL or .mindweave.toml.
    #[arg(long, value_name = "URL", env = "MINDWEAVE_SERVER_URL")]
    pub server_url: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .mindweave.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (terminal, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 2 when the clarity score is below this value
    ///
    /// Useful in CI to gate documentation or design notes.
    #[arg(long, value_name = "SCORE")]
    pub min_clarity: Option<f64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .mindweave.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text for the terminal (default)
    #[default]
    Terminal,
    /// Markdown report
    Markdown,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Server URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(min) = self.min_clarity {
            if !(0.0..=100.0).contains(&min) {
                return Err("Minimum clarity must be between 0 and 100".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref file) = self.file {
            if !file.is_file() {
                return Err(format!("Input file does not exist: {}", file.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
