/// Version injected at compile time via VPCSCAN_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("VPCSCAN_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use vpcscan::aws::{format_aws_error, AwsClient};
use vpcscan::config::Config;
use vpcscan::resource::{self, ScanContext};

/// Discover the AWS resources living inside a VPC
#[derive(Parser, Debug)]
#[command(name = "vpcscan", version, about, long_about = None)]
struct Args {
    /// VPC to scan
    #[arg(short, long)]
    vpc_id: String,

    /// AWS profile to use
    #[arg(short, long)]
    profile: Option<String>,

    /// AWS region to use
    #[arg(short, long)]
    region: Option<String>,

    /// Send all API calls to this base URL (local emulators)
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Resource types to scan (repeatable, default: all)
    #[arg(long = "resource", value_name = "TYPE")]
    resources: Vec<String>,

    /// Items each scanner works on at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("vpcscan {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("vpcscan").join("vpcscan.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".vpcscan").join("vpcscan.log");
    }
    PathBuf::from("vpcscan.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let profile = config.effective_profile(args.profile.as_deref());
    let region = config.effective_region(args.region.as_deref(), &profile);
    let concurrency = config.effective_concurrency(args.concurrency);

    tracing::info!(
        "Using profile: {}, region: {}, vpc: {}",
        profile,
        region,
        args.vpc_id
    );

    // Without a session nothing can be discovered: fail the whole run
    let mut client = AwsClient::new(&profile, &region).await?;
    if let Some(endpoint) = &args.endpoint_url {
        client = client.with_endpoint(endpoint)?;
    }

    let ctx = ScanContext::new(client, &args.vpc_id).with_concurrency(concurrency);
    let report = resource::discover(&ctx, &args.resources).await?;

    for failure in &report.failures {
        eprintln!(
            "Warning: {} skipped: {}",
            failure.resource_type,
            format_aws_error(&failure.source)
        );
    }

    for (resource_type, count) in report.graph.count_by_type() {
        eprintln!("{}: {}", resource_type, count);
    }

    println!("{}", serde_json::to_string_pretty(&report.graph)?);

    config.remember(&profile, &region, &args.vpc_id);
    if let Some(n) = args.concurrency {
        config.concurrency = Some(n);
    }
    if let Err(e) = config.save() {
        tracing::warn!("Failed to save config: {}", e);
    }

    Ok(())
}
