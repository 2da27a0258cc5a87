use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use colored::Colorize;
use dashboard_sdk::{
    address::ContractAddress,
    chain::{ChainIdOrSlug, ChainRegistry},
    handle::{ContractHandle, Credential},
    probe::{AbiNameResolver, CapabilityProbe, SelectorNameResolver},
};
use tabled::{Table, Tabled, settings::Style};

use crate::collab::CliAbiResolver;

#[allow(clippy::too_many_arguments)]
pub(crate) async fn render(
    registry: &ChainRegistry,
    chain: &ChainIdOrSlug,
    address: &str,
    client_id: &str,
    api_key: Option<String>,
    abi: Option<&Path>,
    names: bool,
    timeout: Duration,
) -> anyhow::Result<()> {
    let chain = registry.resolve(chain)?;
    let contract = ContractHandle::new(
        chain.chain_id,
        ContractAddress::normalize(address),
        Credential::Anonymous { client_id: client_id.to_string() },
    );
    let resolver = Arc::new(CliAbiResolver::new(api_key, abi)?);
    let probe = CapabilityProbe::new(Arc::clone(&resolver));

    let flags = tokio::time::timeout(timeout, probe.probe(chain, &contract))
        .await
        .context("probing contract")?;
    println!(
        "{} on {} ({})",
        contract.address().to_string().blue(),
        chain.name.bold(),
        flags.supported_ercs.basic_type().map_or("no token standard".to_string(), |t| t.to_string())
    );
    println!("{flags}");

    if !names {
        return Ok(());
    }

    let names = tokio::time::timeout(timeout, AbiNameResolver::new(resolver).resolve_names(chain, &contract))
        .await
        .context("resolving selector names")?
        .context("resolving selector names")?;
    let rows: Vec<_> = names
        .write_functions
        .iter()
        .map(|(selector, name)| NameRow { kind: "function", selector: selector.clone(), name: name.clone() })
        .chain(names.events.iter().map(|(topic, name)| NameRow {
            kind: "event",
            selector: topic.clone(),
            name: name.clone(),
        }))
        .collect();
    if rows.is_empty() {
        println!("\nno named write functions or events");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("\n{table}");
    }
    Ok(())
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Selector")]
    selector: String,
    #[tabled(rename = "Name")]
    name: String,
}
