use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use dashboard_sdk::chain::sync;

/// Fetches the upstream chain list and rewrites the registry directory.
pub(crate) async fn sync(source: &str, dir: &Path) -> anyhow::Result<()> {
    let json = if source.starts_with("http://") || source.starts_with("https://") {
        tracing::info!(%source, "fetching upstream chain list");
        reqwest::get(source)
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("fetching {source}"))?
            .text()
            .await
            .with_context(|| format!("reading {source}"))?
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {source}"))?
    };

    let records = sync::parse_upstream(&json).context("parsing upstream chain list")?;
    let records = sync::normalize(records).context("validating upstream chain list")?;
    let report = sync::write_dir(dir, &records)
        .with_context(|| format!("writing registry to {}", dir.display()))?;

    println!("{} {} chains written to {}", "synced".green(), report.written, dir.display());
    for path in &report.removed {
        println!("    {} {}", "removed".red(), path.display());
    }
    Ok(())
}

/// Parses every registry file back and checks it against its file name.
pub(crate) fn verify(dir: &Path) -> anyhow::Result<()> {
    let count =
        sync::verify_dir(dir).with_context(|| format!("verifying registry in {}", dir.display()))?;
    println!("{} {count} chains in {}", "ok".green(), dir.display());
    Ok(())
}
