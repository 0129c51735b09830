use crate::server;
use clap::{Args, Parser, Subcommand};
use listings::config::{AppConfig, StorageBackend};
use listings::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Silai Listings",
    about = "Serve the property listings API or prepare its database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Load the sample catalog into the configured store when it has no listings
    Seed(StorageArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) storage: StorageArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StorageArgs {
    /// Storage backend: memory or sqlite
    #[arg(long, value_parser = parse_backend)]
    pub(crate) storage: Option<StorageBackend>,
    /// Database location for the sqlite backend
    #[arg(long)]
    pub(crate) database_url: Option<String>,
    /// Load the sample catalog at startup even outside development
    #[arg(long)]
    pub(crate) seed: bool,
}

impl StorageArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(backend) = self.storage {
            config.storage.backend = backend;
        }
        if let Some(url) = self.database_url {
            config.storage.database_url = url;
        }
        if self.seed {
            config.storage.seed_sample_data = true;
        }
    }
}

fn parse_backend(value: &str) -> Result<StorageBackend, String> {
    StorageBackend::parse(value).map_err(|err| err.to_string())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seed(args) => server::seed(args).await,
    }
}
