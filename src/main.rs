use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bookshelf_server::catalog::Catalog;
use bookshelf_server::catalog_store::{CatalogStore, JsonFileCatalogStore, SqliteCatalogStore};
use bookshelf_server::config::FileConfig;
use bookshelf_server::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageBackend {
    /// Flat JSON file, rewritten in full on every change.
    Json,
    /// Embedded SQLite database, one row per book.
    Sqlite,
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the catalog storage: a JSON file or a SQLite database
    /// depending on --storage. May also come from the config file.
    #[clap(value_parser = parse_path)]
    pub library_path: Option<PathBuf>,

    /// The persistence backend to use.
    #[clap(long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// The port to listen on.
    #[clap(short, long)]
    pub port: Option<u16>,

    /// The level of logging to perform on each request.
    #[clap(long)]
    pub logging_level: Option<RequestsLoggingLevel>,

    /// Path to an optional TOML config file.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let library_path = match cli_args
        .library_path
        .or(file_config.library_path.map(PathBuf::from))
    {
        Some(path) => path,
        None => bail!("No library path given on the command line or in the config file"),
    };

    let storage = match cli_args.storage {
        Some(storage) => storage,
        None => match &file_config.storage {
            Some(value) => StorageBackend::from_str(value, true)
                .map_err(|err| anyhow::anyhow!("Invalid storage backend in config file: {}", err))?,
            None => StorageBackend::Json,
        },
    };

    let port = cli_args.port.or(file_config.port).unwrap_or(3001);

    let logging_level = match cli_args.logging_level {
        Some(level) => level,
        None => match &file_config.logging_level {
            Some(value) => RequestsLoggingLevel::from_str(value, true)
                .map_err(|err| anyhow::anyhow!("Invalid logging level in config file: {}", err))?,
            None => RequestsLoggingLevel::default(),
        },
    };

    info!("Opening {:?} catalog at {:?}...", storage, library_path);
    let store: Box<dyn CatalogStore> = match storage {
        StorageBackend::Json => Box::new(JsonFileCatalogStore::new(&library_path)?),
        StorageBackend::Sqlite => Box::new(SqliteCatalogStore::new(&library_path)?),
    };

    let catalog = Catalog::open(store)?;
    info!("Catalog has {} books", catalog.len());

    info!("Ready to serve at port {}!", port);
    run_server(catalog, logging_level, port).await
}
