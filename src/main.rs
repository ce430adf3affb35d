use clap::Parser;
use log::{error, info};

use peeker::api::PeekApi;
use peeker::conf::{Config, parse_registry};
use peeker::core::{CliArgs, PeekError, setup_logging};
use peeker::registry::Registry;

#[tokio::main]
async fn main() {
    setup_logging();
    let args = CliArgs::parse();
    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), PeekError> {
    let config_path = args.config.as_deref().unwrap_or("peeker.toml");
    let config = Config::from_file(config_path)?;

    let registry_body = std::fs::read_to_string(&config.tables).map_err(|e| {
        PeekError::ConfigError(format!("reading registry file {}: {}", config.tables, e))
    })?;
    let entries = parse_registry(&registry_body)?;
    let registry = Registry::from_entries(&entries)?;
    info!("loaded {} tables from {}", entries.len(), config.tables);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    PeekApi::new(registry).serve(&addr).await
}
