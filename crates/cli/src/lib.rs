mod chain;
mod collab;
mod logging;
mod probe;
mod registry;
mod route;

pub mod args;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use args::Cli;
use dashboard_sdk::chain::ChainRegistry;

use crate::args::{Commands, RegistryCommands};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(&cli.log_level, cli.log_json)?;
    let timeout = Duration::from_secs(cli.timeout);

    match cli.command {
        Commands::Chain { ref chain } => chain::render(&load_registry(&cli)?, chain.as_ref())?,
        Commands::Probe { ref chain, ref address, ref abi, names } => {
            probe::render(
                &load_registry(&cli)?,
                chain,
                address,
                &cli.client_id,
                cli.api_key.clone(),
                abi.as_deref(),
                names,
                timeout,
            )
            .await?
        },
        Commands::Route { ref path, logged_in, ref abi } => {
            let config = route::RouteConfig {
                secret_key: cli.secret_key.clone(),
                client_id: cli.client_id.clone(),
                session_token: cli.session_token.clone(),
                api_key: cli.api_key.clone(),
                abi: abi.as_deref(),
                local_chain_id: cli.local_chain_id,
                timeout,
            };
            route::render(Arc::new(load_registry(&cli)?), config, path, logged_in).await?
        },
        Commands::Registry { ref command } => {
            let dir = cli
                .registry_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(args::DEFAULT_REGISTRY_DIR));
            match command {
                RegistryCommands::Sync { source, out } => {
                    registry::sync(source, out.as_deref().unwrap_or(dir.as_path())).await?
                },
                RegistryCommands::Verify => registry::verify(&dir)?,
            }
        },
    }

    Ok(())
}

fn load_registry(cli: &Cli) -> anyhow::Result<ChainRegistry> {
    let registry = match &cli.registry_dir {
        Some(dir) => ChainRegistry::from_dir(dir)
            .with_context(|| format!("loading registry from {}", dir.display()))?,
        None => ChainRegistry::embedded().context("loading embedded registry")?,
    };
    tracing::debug!(chains = registry.len(), "registry loaded");
    Ok(registry)
}
