//! Hostlens main entry point
//!
//! Command-line interface for searching an asset-search service and
//! enriching the results with CDN and geolocation data.

use clap::{CommandFactory, Parser};
use hostlens::config::load_config_with_hash;
use hostlens::enrich::build_pipeline;
use hostlens::output::{ExcelSink, PersistSink, RecordSink, ReportContext, TableSink};
use hostlens::search::SearchClient;
use hostlens::storage::SqliteStorage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Hostlens: search and enrich internet-facing assets
///
/// Hostlens queries an asset-search service, infers CDN usage for every
/// returned host, resolves IP locations, and writes the enriched set to
/// the console, a SQLite database, and a spreadsheet export.
#[derive(Parser, Debug)]
#[command(name = "hostlens")]
#[command(version)]
#[command(about = "Search and enrich internet-facing assets", long_about = None)]
struct Cli {
    /// Search expression in the upstream query language
    #[arg(short = 'S', long)]
    search: Option<String>,

    /// Number of results to request
    #[arg(long, default_value_t = 100)]
    size: u32,

    /// 1-based result page index
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "hostlens.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // No query: show usage and exit cleanly
    let Some(query) = cli.search else {
        Cli::command().print_help()?;
        return Ok(());
    };

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Upstream search: any failure here is fatal to the run
    let client = SearchClient::new(&config.search)?;
    let page = client.search(&query, cli.size, cli.page).await?;
    tracing::info!(
        records = page.records.len(),
        total = page.pagination.total,
        "Search returned one page of raw records"
    );

    let pipeline = build_pipeline(&config)?;

    // Partial results are useless to the sinks, so an interrupt discards
    // everything collected so far
    let records = tokio::select! {
        records = pipeline.run(page.records) => records,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, discarding partial results");
            return Ok(());
        }
    };
    tracing::info!(records = records.len(), "Enrichment complete");

    let context = ReportContext {
        query,
        pagination: page.pagination,
    };

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    let mut sinks: Vec<Box<dyn RecordSink>> = vec![
        Box::new(TableSink::new()),
        Box::new(PersistSink::new(storage)),
        Box::new(ExcelSink::new(Path::new(&config.output.export_dir))),
    ];

    for sink in &mut sinks {
        if let Err(e) = sink.write(&context, &records) {
            tracing::error!(sink = sink.name(), error = %e, "Output sink failed");
            return Err(e.into());
        }
    }

    println!(
        "\nExported {} records (database: {}, spreadsheet in {})",
        records.len(),
        config.output.database_path,
        config.output.export_dir
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hostlens=info,warn"),
            1 => EnvFilter::new("hostlens=debug,info"),
            2 => EnvFilter::new("hostlens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
