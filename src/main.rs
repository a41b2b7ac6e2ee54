//! subkit - LRC/SRT subtitle toolbox
//!
//! Converts subtitles between LRC and SRT and extracts the Chinese or
//! Japanese half of bilingual subtitle files.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subkit::cli::{Args, Commands};
use subkit::config::Config;
use subkit::language::classify;
use subkit::workflow::{BatchReport, Workflow};

const DEFAULT_CONFIG_FILE: &str = "subkit.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Convert { input, to, from, output_dir, default_duration_ms } => {
            if let Some(ms) = default_duration_ms {
                config.convert.default_duration_ms = ms;
            }

            let workflow = Workflow::new(config);
            let written = workflow.convert_file(&input, from, to, output_dir.as_deref()).await?;
            println!("{}", written.display());
        }
        Commands::Extract { input, keep, output_dir } => {
            let keep = keep.unwrap_or(config.extract.keep);

            let workflow = Workflow::new(config);
            let written = workflow.extract_file(&input, keep, output_dir.as_deref()).await?;
            println!("{}", written.display());
        }
        Commands::BatchConvert { input_dir, to, output_dir, recursive, json } => {
            let recursive = recursive || config.output.recursive;

            let workflow = Workflow::new(config).with_progress(!json);
            let report = workflow
                .convert_directory(&input_dir, to, output_dir.as_deref(), recursive)
                .await?;
            print_report(&report, json)?;
        }
        Commands::BatchExtract { input_dir, keep, output_dir, recursive, json } => {
            let keep = keep.unwrap_or(config.extract.keep);
            let recursive = recursive || config.output.recursive;

            let workflow = Workflow::new(config).with_progress(!json);
            let report = workflow
                .extract_directory(&input_dir, keep, output_dir.as_deref(), recursive)
                .await?;
            print_report(&report, json)?;
        }
        Commands::Classify { lines } => {
            for line in lines {
                println!("{:<8} {}", classify(&line).to_str(), line);
            }
        }
        Commands::InitConfig { output } => {
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".subkit").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "subkit.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so stdout stays usable for paths and reports
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("subkit.log").display());

    Ok(())
}

fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\n{:<8} {:<50} {:<50}", "Status", "Input", "Output");
    println!("{}", "-".repeat(108));

    for item in &report.processed {
        let status = if item.empty { "EMPTY" } else { "OK" };
        println!("{:<8} {:<50} {:<50}", status, item.input.display(), item.output.display());
    }
    for path in &report.skipped {
        println!("{:<8} {:<50}", "SKIPPED", path.display());
    }
    for item in &report.failed {
        println!("{:<8} {:<50} {}", "FAILED", item.input.display(), item.error);
    }

    println!(
        "\n{} processed, {} skipped, {} failed",
        report.processed.len(),
        report.skipped.len(),
        report.failed.len()
    );

    if report.has_failures() {
        anyhow::bail!("{} file(s) failed", report.failed.len());
    }

    Ok(())
}
