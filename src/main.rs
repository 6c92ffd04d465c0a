//! CLI entry point for the tide table downloader.
//!
//! Prompts for a station and date range, downloads the high/low tide
//! predictions for it and rewrites them as a headerless list of epoch
//! seconds.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tide_table_downloader::{
    download::download_tide_table,
    fetch::BasicClient,
    prompt::collect_request,
    request::{DEFAULT_APPLICATION, DEFAULT_BASE_URL},
};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "tide_table_downloader")]
#[command(about = "Download high/low tide predictions as epoch seconds", long_about = None)]
struct Cli {
    /// File to write the tide table to (overwritten on each run)
    #[arg(short, long, default_value = "./tides.txt")]
    output: PathBuf,

    /// Data getter endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Value sent in the `application` query parameter
    #[arg(long, default_value = DEFAULT_APPLICATION)]
    application: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: quiet stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/tide_table_downloader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("tide_table_downloader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr defaults to warn so log lines don't interleave with the prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let request = collect_request(&mut io::stdin().lock(), &mut io::stdout())?;
    let range = request.validate().inspect_err(|e| {
        error!(error = %e, "Rejected date range");
    })?;
    info!(station = %request.station, begin = %range.begin, end = %range.end, "Request accepted");

    let client = BasicClient::new()?;
    let summary = download_tide_table(
        &client,
        &cli.base_url,
        &cli.application,
        &request,
        &cli.output,
    )
    .await
    .inspect_err(|e| error!(error = %e, "Download failed"))?;

    println!(
        "Wrote {} tide events to {}",
        summary.rows,
        cli.output.display()
    );
    Ok(())
}
