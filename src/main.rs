mod analytics;
mod engine;
mod models;
mod report;
mod validator;

use std::io::{BufWriter, Write, stderr, stdout};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::engine::{Config, Pipeline};
use crate::models::EngineError;
use crate::report::{Report, ReportStatus};

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: If this grows more flags (top-N, percentile), clap is the next step;
    //      for a positional path and a log level, hand parsing keeps it lean.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: batch-analytics-engine [input].json [log_level:optional] > [report].json");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args
        .get(2)
        .map(|level| parse_log_level(level))
        .unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let document =
        std::fs::read_to_string(path).map_err(|source| EngineError::io(path, source))?;

    let pipeline = Pipeline::new(Config::default());

    let timer = Instant::now();
    let report = pipeline.process_document(&document, path).await;
    let duration = timer.elapsed();

    info!("Processed batch [{}] in: {duration:?}", report.batch_id);

    write_report_to_stdout(&report)?;

    if report.status == ReportStatus::Failure {
        exit(1);
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout for redirection, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn write_report_to_stdout(report: &Report) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());
    let encoded = serde_json::to_string_pretty(report)?;

    writeln!(output, "{encoded}")?;
    output.flush()?;

    Ok(())
}
