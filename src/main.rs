//! MindWeave - command-line client for the MindWeave analysis service
//!
//! Sends free text to the service's analysis endpoint and renders the
//! structured feedback (main idea, clarity, emotion, sub-ideas, logic gaps,
//! improvements) to the terminal, Markdown or JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (empty input, unreachable service, server error, config, etc.)
//!   2 - Clarity score below --min-clarity

mod cli;
mod client;
mod config;
mod error;
mod handler;
mod models;
mod report;
mod view;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use client::{AnalysisClient, ClientConfig};
use config::{Config, CONFIG_FILE_NAME};
use handler::{AnalysisHandler, StatusListener, SubmitOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use models::{AnalysisReport, ReportMetadata};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;
use view::{AnalysisView, ResultPanel};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("MindWeave v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .mindweave.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to point at your analysis service.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so reports on stdout stay clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Build the handler and run one analysis or an interactive session.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let client_config = ClientConfig::from(&config.server);
    let server_url = client_config.analyze_url();
    let client = AnalysisClient::new(client_config)?;

    let handler = AnalysisHandler::new(client, AnalysisView::default())
        .with_listener(spinner_listener(!args.quiet));

    if args.interactive {
        return run_interactive(handler).await;
    }

    let text = read_input(&args).await?;
    run_once(handler, &text, server_url, &args, config.output.format).await
}

/// Analyze one text and write the report.
async fn run_once(
    mut handler: AnalysisHandler,
    text: &str,
    server_url: String,
    args: &Args,
    format: OutputFormat,
) -> Result<i32> {
    let start_time = Instant::now();

    let result = match handler.submit(text).await {
        SubmitOutcome::Rendered(result) => result,
        SubmitOutcome::Rejected => {
            eprintln!("❌ {}", handler.view().status);
            return Ok(1);
        }
        SubmitOutcome::Failed(message) => {
            debug!("Analysis failed: {}", message);
            eprintln!("❌ {}", handler.view().status);
            return Ok(1);
        }
    };

    let report = AnalysisReport {
        metadata: ReportMetadata {
            server_url,
            analysis_date: Utc::now(),
            input_chars: text.trim().chars().count(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        result,
    };

    let output = match format {
        OutputFormat::Terminal => {
            let panel = handler
                .view()
                .visible_result()
                .cloned()
                .unwrap_or_else(|| ResultPanel::render(&report.result));
            report::generate_terminal_report(&panel)
        }
        OutputFormat::Markdown => report::generate_markdown_report(&report),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                eprintln!("{} Report saved to: {}", handler.view().status, path.display());
            }
        }
        None => {
            print!("{}", output);
            if !args.quiet && format == OutputFormat::Terminal {
                eprintln!("\n{}", handler.view().status);
            }
        }
    }

    // Check --min-clarity threshold
    if let Some(min_clarity) = args.min_clarity {
        let score = report.result.clarity_score.unwrap_or(0.0);
        if score < min_clarity {
            eprintln!(
                "\n⛔ Clarity score {} is below the required {}. Failing (exit code 2).",
                score, min_clarity
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Read lines until an empty one, then analyze what was typed.
///
/// End of input analyzes any pending text and ends the session.
async fn run_interactive(mut handler: AnalysisHandler) -> Result<i32> {
    println!("✍️  Type your thoughts. Press Enter on an empty line to analyze, Ctrl+D to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = String::new();

    loop {
        let line = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?;

        match line {
            Some(line) if !line.trim().is_empty() => {
                buffer.push_str(&line);
                buffer.push('\n');
            }
            Some(_) => {
                analyze_and_print(&mut handler, &buffer).await;
                buffer.clear();
            }
            None => {
                if !buffer.trim().is_empty() {
                    analyze_and_print(&mut handler, &buffer).await;
                }
                break;
            }
        }
    }

    Ok(0)
}

async fn analyze_and_print(handler: &mut AnalysisHandler, text: &str) {
    handler.submit(text).await;
    debug!("Handler state: {:?}", handler.state());

    if let Some(panel) = handler.view().visible_result() {
        println!("\n{}", report::generate_terminal_report(panel));
    }
    println!("{}\n", handler.view().status);
}

/// Spinner shown while a request is in flight.
fn spinner_listener(enabled: bool) -> StatusListener {
    let mut spinner: Option<ProgressBar> = None;

    Box::new(move |view: &AnalysisView| {
        if view.trigger_enabled {
            if let Some(pb) = spinner.take() {
                pb.finish_and_clear();
            }
        } else if enabled {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed}]")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(view.status.clone());
            pb.enable_steady_tick(Duration::from_millis(100));
            spinner = Some(pb);
        }
    })
}

/// Get the text to analyze: argument, then file, then stdin.
async fn read_input(args: &Args) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        info!("Reading input from: {}", path.display());
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    debug!("Reading input from stdin");
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read from stdin")?;
    Ok(text)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_from_dir(Path::new("."))? {
        Some(config) => {
            info!("Loaded config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
