//! PageSift CLI
//!
//! Selector-driven web data extraction pipeline.

use clap::{Parser, Subcommand};
use pagesift::collector::{self, CollectorState, DataStore};
use pagesift::control::{ControlServer, ControlService};
use pagesift::delivery::{DeliveryClient, DEFAULT_ENDPOINT};
use pagesift::extraction::ExtractionEngine;
use pagesift::scheduler;
use pagesift::settings::{PageMode, SettingsStore, DEFAULT_SETTINGS_FILE};
use pagesift::source::{DocumentSource, FileSource};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// PageSift CLI
#[derive(Parser, Debug)]
#[command(name = "pagesift")]
#[command(author)]
#[command(version)]
#[command(about = "Selector-driven web data extraction pipeline")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one extraction and deliver or print the result
    Scrape {
        /// HTML file to extract from
        #[arg(long)]
        file: PathBuf,

        /// Page URL used for metadata and relative link resolution
        #[arg(long)]
        url: Option<String>,

        /// Collector endpoint receiving the result
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Print the result to stdout instead of delivering it
        #[arg(long)]
        no_deliver: bool,

        /// Settings file path
        #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
        config: PathBuf,
    },

    /// Serve the stdio control protocol, polling dynamic pages
    Serve {
        /// HTML file to extract from, re-read on every scrape
        #[arg(long)]
        file: PathBuf,

        /// Page URL used for metadata and relative link resolution
        #[arg(long)]
        url: Option<String>,

        /// Collector endpoint receiving results
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Settings file path
        #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
        config: PathBuf,

        /// Override the persisted page mode for this run
        #[arg(long)]
        page_mode: Option<PageMode>,

        /// Override the poll interval for this run, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Run the collector HTTP service
    Collect {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Bind port
        #[arg(long, default_value_t = 5584)]
        port: u16,

        /// Mirror stored results to this JSON file
        #[arg(long)]
        archive: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Scrape {
            file,
            url,
            endpoint,
            no_deliver,
            config,
        } => run_scrape(file, url, endpoint, no_deliver, config).await,
        Command::Serve {
            file,
            url,
            endpoint,
            config,
            page_mode,
            interval_ms,
        } => run_serve(file, url, endpoint, config, page_mode, interval_ms).await,
        Command::Collect {
            host,
            port,
            archive,
        } => run_collect(host, port, archive).await,
    }
}

async fn run_scrape(
    file: PathBuf,
    url: Option<String>,
    endpoint: String,
    no_deliver: bool,
    config: PathBuf,
) -> anyhow::Result<()> {
    let settings = SettingsStore::new(config).load()?;
    let source = FileSource::new(&file, page_url(url, &file));
    let page = source.snapshot()?;

    let engine = ExtractionEngine::new();
    let result = engine.run(&settings.config, &page)?;
    info!(records = result.total_records(), "extraction finished");

    if no_deliver {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let client = DeliveryClient::with_endpoint(endpoint)?;
    let response = client.deliver(&result).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_serve(
    file: PathBuf,
    url: Option<String>,
    endpoint: String,
    config: PathBuf,
    page_mode: Option<PageMode>,
    interval_ms: Option<u64>,
) -> anyhow::Result<()> {
    let store = SettingsStore::new(config);

    let mut effective = store.load()?;
    if let Some(mode) = page_mode {
        effective.page_mode = mode;
    }
    if let Some(ms) = interval_ms {
        effective.interval_ms = ms;
    }
    effective.validate()?;

    let source = Box::new(FileSource::new(&file, page_url(url, &file)));
    let delivery = DeliveryClient::with_endpoint(endpoint)?;
    let service = Arc::new(ControlService::new(source, delivery, store)?);

    let poller = match effective.page_mode {
        PageMode::Dynamic => {
            info!(interval_ms = effective.interval_ms, "polling dynamic page");
            Some(scheduler::spawn(
                Arc::clone(&service),
                Duration::from_millis(effective.interval_ms),
            ))
        }
        PageMode::Static => None,
    };

    ControlServer::new(Arc::clone(&service)).run().await?;

    if let Some(handle) = poller {
        handle.shutdown().await;
    }
    Ok(())
}

async fn run_collect(host: IpAddr, port: u16, archive: Option<PathBuf>) -> anyhow::Result<()> {
    let store = match archive {
        Some(path) => DataStore::with_archive(path),
        None => DataStore::in_memory(),
    };
    let state = Arc::new(CollectorState::new(store));
    collector::serve(SocketAddr::from((host, port)), state).await?;
    Ok(())
}

/// Page URL for a file-backed source: the explicit override when given,
/// otherwise a file:// URL derived from the path.
fn page_url(url: Option<String>, file: &Path) -> String {
    url.unwrap_or_else(|| {
        let abs = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
        format!("file://{}", abs.display())
    })
}
