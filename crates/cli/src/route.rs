use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use colored::Colorize;
use dashboard_sdk::{
    chain::ChainRegistry,
    handle::HandleFactory,
    probe::{AbiNameResolver, CapabilityProbe},
    render,
    router::{PageRequest, PageRouter, RouteOutcome},
};

use crate::collab::{CliAbiResolver, CliSession};

/// Routing configuration taken from the command line.
pub(crate) struct RouteConfig<'a> {
    pub(crate) secret_key: Option<String>,
    pub(crate) client_id: String,
    pub(crate) session_token: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) abi: Option<&'a Path>,
    pub(crate) local_chain_id: u64,
    pub(crate) timeout: Duration,
}

pub(crate) async fn render(
    registry: Arc<ChainRegistry>,
    config: RouteConfig<'_>,
    path: &str,
    logged_in: bool,
) -> anyhow::Result<()> {
    let request = PageRequest::from_path(path, logged_in)
        .map_err(|err| anyhow::anyhow!("404 Not Found: {err}"))?;

    let secret_key = config
        .secret_key
        .context("a server secret key is required, see `--secret-key`")?;
    let resolver = Arc::new(CliAbiResolver::new(config.api_key, config.abi)?);
    let router = PageRouter::new(
        registry,
        HandleFactory::new(secret_key, config.client_id, CliSession::new(config.session_token)),
        CapabilityProbe::new(Arc::clone(&resolver)),
        AbiNameResolver::new(resolver),
    )
    .with_local_chain_id(config.local_chain_id);

    let outcome = tokio::time::timeout(config.timeout, router.route(&request))
        .await
        .context("routing request")?;
    match outcome {
        RouteOutcome::NotFound => {
            return Err(anyhow::anyhow!("404 Not Found: unknown chain {}", request.chain));
        },
        RouteOutcome::Redirect(location) => {
            println!("{} {}", "302 Found".yellow(), location);
        },
        RouteOutcome::Render(plan) => {
            println!("{} {}", "200 OK".green(), plan.chain.name.bold());
            println!("{}", render::render(&plan));
            if let Some(flags) = &plan.flags {
                println!("{flags}");
            }
        },
    }

    Ok(())
}
