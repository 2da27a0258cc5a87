use colored::Colorize;
use dashboard_sdk::{
    chain::{ChainIdOrSlug, ChainRegistry},
    probe::INSIGHT_SERVICE,
};
use tabled::{Table, Tabled, settings::Style};

pub(crate) fn render(registry: &ChainRegistry, chain: Option<&ChainIdOrSlug>) -> anyhow::Result<()> {
    if let Some(chain) = chain {
        println!("{}", registry.resolve(chain)?);
        return Ok(());
    }

    let rows: Vec<_> = registry
        .chains()
        .map(|chain| ChainRow {
            chain_id: chain.chain_id,
            slug: chain.slug.clone(),
            name: chain.name.clone(),
            network: if chain.testnet {
                "testnet".yellow().to_string()
            } else {
                "mainnet".green().to_string()
            },
            insight: if chain.service_enabled(INSIGHT_SERVICE) {
                "yes".green().to_string()
            } else {
                "no".dimmed().to_string()
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

#[derive(Tabled)]
struct ChainRow {
    #[tabled(rename = "Chain ID")]
    chain_id: u64,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Insight")]
    insight: String,
}
