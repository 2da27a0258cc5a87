//! Registry directory generator.
//!
//! Rewrites a registry directory from the upstream chain list: one
//! `{chain_id}.json` file per chain, object keys sorted alphabetically, stale
//! files removed. Records are passed through as-is apart from key ordering.
//! Slug collisions abort the sync before anything is written.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use super::{ChainMetadata, ChainRegistry, registry::parse_record};
use crate::error::RegistryError;

/// Outcome of [`write_dir`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: usize,
    pub removed: Vec<PathBuf>,
}

/// Parses the upstream payload: a bare array of chain records or an object
/// wrapping it under `data`.
pub fn parse_upstream(json: &str) -> Result<Vec<Value>, RegistryError> {
    let value: Value = serde_json::from_str(json)?;
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(RegistryError::Parse(serde::de::Error::custom(
                    "expected an array of chain records under `data`",
                )));
            },
        },
        _ => {
            return Err(RegistryError::Parse(serde::de::Error::custom(
                "expected an array of chain records",
            )));
        },
    };
    Ok(records)
}

/// Recursively sorts object keys.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<_> = obj.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect::<Map<_, _>>())
        },
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Validates upstream records and returns them keyed by chain id, keys
/// sorted.
///
/// Fails on malformed records, duplicate chain ids and duplicate slugs,
/// including collisions with [`ChainRegistry::default_overrides`].
pub fn normalize(records: Vec<Value>) -> Result<Vec<(u64, Value)>, RegistryError> {
    let mut parsed = Vec::with_capacity(records.len());
    let mut chains = Vec::with_capacity(records.len());
    for record in records {
        let chain: ChainMetadata = serde_json::from_value(record.clone())?;
        parsed.push((chain.chain_id, sort_keys(record)));
        chains.push(chain);
    }
    // Validate against the same index the loaders build.
    ChainRegistry::with_default_overrides(chains)?;
    parsed.sort_by_key(|(chain_id, _)| *chain_id);
    Ok(parsed)
}

/// Writes normalized records into `dir`, removing `*.json` files for chains
/// no longer present upstream.
pub fn write_dir(dir: &Path, records: &[(u64, Value)]) -> Result<SyncReport, RegistryError> {
    fs::create_dir_all(dir)?;

    let mut keep = BTreeSet::new();
    for (chain_id, record) in records {
        let file_name = format!("{chain_id}.json");
        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');
        fs::write(dir.join(&file_name), json)?;
        keep.insert(file_name);
    }

    let mut removed = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let stale = path.extension().is_some_and(|ext| ext == "json")
            && path.file_name().and_then(|n| n.to_str()).is_some_and(|n| !keep.contains(n));
        if stale {
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }
    removed.sort();

    tracing::info!(dir = %dir.display(), written = records.len(), removed = removed.len(), "registry synced");
    Ok(SyncReport { written: records.len(), removed })
}

/// Reads every `{chain_id}.json` file of a registry directory, checking that
/// each record holds the chain id it is named after.
pub fn read_dir(dir: &Path) -> Result<Vec<ChainMetadata>, RegistryError> {
    let mut chains = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let file = path.display().to_string();
        let expected = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| RegistryError::InvalidFileName(file.clone()))?;
        chains.push(parse_record(&file, expected, &fs::read_to_string(&path)?)?);
    }
    chains.sort_by_key(|c| c.chain_id);
    Ok(chains)
}

/// Checks a registry directory: file names match chain ids and the records
/// form a valid index. Returns the number of chains.
pub fn verify_dir(dir: &Path) -> Result<usize, RegistryError> {
    let chains = read_dir(dir)?;
    let count = chains.len();
    ChainRegistry::with_default_overrides(chains)?;
    Ok(count)
}
