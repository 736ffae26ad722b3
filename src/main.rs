//! txboard main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use txboard_api::start_server;
use txboard_config::{Config, ConfigError, StoreKind};
use txboard_core::{
    owner_from_config, session_from_config, Dashboard, ErrorContext, LogNotifier, Notifier,
};
use txboard_store::{MemorySource, PostgrestSource, SourceRef};

#[derive(Parser, Debug)]
#[command(name = "txboard")]
#[command(author = "txboard Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight monthly transaction board with bulk delete", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured store kind (memory, postgrest)
    #[arg(long)]
    store: Option<StoreKind>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (mut config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e.into());
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    if let Some(kind) = args.store {
        config.store.kind = kind;
        config.validate()?;
    }
    log::info!("Config loaded: store={}, bind={}", config.store.kind, config.bind_addr());

    let rt = Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let source = build_source(&config).await?;
    let session = session_from_config(&config)?;
    let dashboard = Arc::new(Dashboard::new(source, session));

    let owner = owner_from_config(&config);
    let context = ErrorContext::new("initial_load").with_owner(owner.as_ref().map(|o| o.as_str()));
    if let Err(e) = dashboard.set_owner(owner).await {
        LogNotifier.report_error(&e, &context);
    }

    start_server(config, dashboard).await
}

async fn build_source(config: &Config) -> anyhow::Result<SourceRef> {
    let store = &config.store;
    let source: SourceRef = match store.kind {
        StoreKind::Memory => match &store.seed_file {
            Some(path) => {
                log::info!("Seeding in-memory store from {}", path.display());
                Arc::new(MemorySource::from_json_file(path).await?)
            }
            None => Arc::new(MemorySource::default()),
        },
        StoreKind::Postgrest => {
            let url = store
                .url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("store.url is required for postgrest"))?;
            log::info!("Using PostgREST store at {} (table {})", url, store.table);
            Arc::new(PostgrestSource::new(
                url,
                store.api_key.clone(),
                store.table.clone(),
                store.owner_column.clone(),
            ))
        }
    };
    Ok(source)
}
