use std::path::Path;

use dashboard_sdk::{
    chain::{ChainIdOrSlug, ChainMetadata, ChainRegistry, LOCAL_CHAIN_ID, sync},
    error::RegistryError,
};

fn chains_dir() -> &'static Path { Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/chains")) }

#[test]
fn test_resolve_every_id_and_slug() {
    let registry = ChainRegistry::embedded().unwrap();
    assert!(!registry.is_empty());

    for chain in registry.chains() {
        let by_id = registry.resolve(&ChainIdOrSlug::Id(chain.chain_id)).unwrap();
        assert_eq!(by_id.chain_id, chain.chain_id);

        let by_slug = registry.resolve(&chain.slug.parse::<ChainIdOrSlug>().unwrap()).unwrap();
        assert_eq!(by_slug.slug, chain.slug);
    }
}

#[test]
fn test_resolve_unknown() {
    let registry = ChainRegistry::embedded().unwrap();
    for chain in ["424242424242", "no-such-chain"] {
        assert!(matches!(
            registry.resolve(&chain.parse::<ChainIdOrSlug>().unwrap()),
            Err(RegistryError::NotFound(name)) if name == chain
        ));
    }
}

#[test]
fn test_local_override_present() {
    let registry = ChainRegistry::embedded().unwrap();
    let local = registry.by_id(LOCAL_CHAIN_ID).unwrap();
    assert_eq!(local.as_ref(), &ChainMetadata::localhost());
    assert_eq!(local.rpc_url(None).as_deref(), Some("http://127.0.0.1:8545"));
}

/// Every shipped file parses back to the chain id it is named after.
#[test]
fn test_shipped_registry_round_trip() {
    let count = sync::verify_dir(chains_dir()).unwrap();
    let registry = ChainRegistry::from_dir(chains_dir()).unwrap();
    // Plus the localhost override.
    assert_eq!(registry.len(), count + 1);

    for entry in std::fs::read_dir(chains_dir()).unwrap() {
        let path = entry.unwrap().path();
        let stem: u64 = path.file_stem().unwrap().to_str().unwrap().parse().unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        let chain: ChainMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(chain.chain_id, stem, "{}", path.display());

        // Files are stored normalized.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut normalized = serde_json::to_string_pretty(&sync::sort_keys(value)).unwrap();
        normalized.push('\n');
        assert_eq!(json, normalized, "{}", path.display());
    }
}

#[test]
fn test_embedded_matches_directory() {
    let embedded = ChainRegistry::embedded().unwrap();
    let from_dir = ChainRegistry::from_dir(chains_dir()).unwrap();
    assert_eq!(
        embedded.chains().map(|c| c.as_ref().clone()).collect::<Vec<_>>(),
        from_dir.chains().map(|c| c.as_ref().clone()).collect::<Vec<_>>()
    );
}
