//! PokePedia - browse and search the first-generation Pokémon catalog
//!
//! Loads the catalog once from PokeAPI, then lists, searches or browses it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pokepedia_core::{AggregationPolicy, CatalogConfig, CatalogLoader, LoadStatus, Session};

mod browse;
mod output;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "pokepedia",
    about = "Browse and search the Pokémon catalog from PokeAPI",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Configuration file (defaults to .pokepedia/config.yaml, then the global config)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Number of entries to request from the listing endpoint
    #[clap(long, global = true)]
    limit: Option<u32>,

    /// API base URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Keep the entries that loaded when some detail requests fail
    #[clap(long, global = true)]
    partial: bool,

    /// Output results as JSON
    #[clap(long, global = true)]
    json: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// List every entry in the catalog
    List,

    /// Show entries whose name contains the query (case-insensitive)
    Search {
        /// Search query
        query: String,
    },

    /// Show a single entry by name
    Show {
        /// Entry name (e.g. "pikachu")
        name: String,
    },

    /// Interactive search: each line you type becomes the search term
    Browse,
}

/// Initialize tracing with the --log-level flag
///
/// `RUST_LOG` directives, when set, are added on top.
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(env) = std::env::var("RUST_LOG") {
        for directive in env.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout is reserved for results
        .init();
}

/// Resolve configuration files, then apply CLI overrides
fn resolve_config(cli: &Cli) -> Result<CatalogConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let mut config = CatalogConfig::load(cli.config.as_deref(), &cwd)?;

    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if cli.partial {
        config.policy = AggregationPolicy::Partial;
    }

    config.validate()?;
    debug!("Resolved config: {:?}", config);
    Ok(config)
}

/// Load the catalog into a fresh session
///
/// Ctrl-C while loading cancels the session's token, which drops every
/// in-flight request.
async fn load_session(config: CatalogConfig) -> Result<Session> {
    let loader = CatalogLoader::http(config).context("Failed to create HTTP client")?;
    let mut session = Session::new();

    let cancel = session.cancellation_token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    eprintln!("Loading catalog...");
    session.load(&loader).await;
    ctrl_c.abort();

    match session.status() {
        LoadStatus::Ready(catalog) => debug!("Catalog ready with {} entries", catalog.len()),
        LoadStatus::Failed(message) => anyhow::bail!("Failed to load catalog: {message}"),
        other => anyhow::bail!("Catalog load did not finish (status: {other:?})"),
    }

    if !session.skipped().is_empty() {
        eprintln!(
            "Warning: {} entries could not be loaded: {}",
            session.skipped().len(),
            session.skipped().join(", ")
        );
    }

    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config = resolve_config(&cli)?;
    let mut session = load_session(config).await?;

    match cli.command {
        Command::List => output::print_entries(session.items(), cli.json),
        Command::Search { query } => {
            session.set_search_term(query);
            output::print_entries(session.visible(), cli.json)
        }
        Command::Show { name } => {
            let catalog = session
                .catalog()
                .context("Catalog is not loaded")?;
            let entry = catalog
                .get(&name)
                .with_context(|| format!("'{name}' is not in the catalog"))?;
            output::print_entry(entry, cli.json)
        }
        Command::Browse => browse::run(&mut session, cli.json).await,
    }
}
