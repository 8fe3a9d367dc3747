mod args;
mod output;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use easynews_core::{
    build_query, load_config, metrics, validate_config, EasynewsClient, SanitizedConfig, Searcher,
};

use args::{parse_args, Invocation, USAGE};
use output::select_entries;

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let json = std::env::var("EASYNEWS_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the results, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run() -> Result<()> {
    let args = match parse_args(std::env::args().skip(1)).context("Invalid arguments")? {
        Invocation::Search(args) => args,
        Invocation::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    // Determine config path
    let config_path = std::env::var("EASYNEWS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;
    info!(config = ?SanitizedConfig::from(&config), "Configuration loaded");

    let query = build_query(args.kind, &args.meta);
    let strict = args.strict || config.matching.strict;
    info!(kind = %args.kind, query = %query, strict, "Searching");

    let client =
        EasynewsClient::new(config.easynews.clone()).context("Failed to create search client")?;
    let response = client.search_all(&query).await?;

    let entries = select_entries(&response, &args.meta.name, &config.matching, strict);
    info!(
        results = response.data.len(),
        matches = entries.len(),
        "Search complete"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in &entries {
        serde_json::to_writer(&mut out, entry).context("Failed to write result")?;
        writeln!(out).context("Failed to write result")?;
    }
    out.flush().context("Failed to write result")?;

    if args.metrics {
        let text = metrics::render_metrics().context("Failed to render metrics")?;
        eprint!("{}", text);
    }

    Ok(())
}
