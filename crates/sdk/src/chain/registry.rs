use std::{collections::HashMap, path::Path, sync::Arc};

use itertools::Itertools;

use super::{ChainIdOrSlug, ChainMetadata};
use crate::error::RegistryError;

include!(concat!(env!("OUT_DIR"), "/embedded_chains.rs"));

/// Immutable chain index keyed by chain id and by slug.
///
/// Built once, explicitly, and shared behind an [`Arc`]. Records sharing a
/// slug are rejected at build time, so every slug maps to exactly one chain.
#[derive(Clone, Debug)]
pub struct ChainRegistry {
    chains: Vec<Arc<ChainMetadata>>,
    by_id: HashMap<u64, usize>,
    by_slug: HashMap<String, usize>,
}

impl ChainRegistry {
    /// Builds the index from registry records and local overrides.
    ///
    /// An override replaces the registry record with the same chain id, or
    /// is added when no such record exists.
    pub fn new(
        chains: impl IntoIterator<Item = ChainMetadata>,
        overrides: impl IntoIterator<Item = ChainMetadata>,
    ) -> Result<Self, RegistryError> {
        let mut merged: HashMap<u64, ChainMetadata> = HashMap::new();
        for chain in chains {
            let chain_id = chain.chain_id;
            if merged.insert(chain_id, chain).is_some() {
                return Err(RegistryError::DuplicateChainId(chain_id));
            }
        }
        for chain in overrides {
            merged.insert(chain.chain_id, chain);
        }

        let chains: Vec<_> =
            merged.into_values().sorted_by_key(|c| c.chain_id).map(Arc::new).collect();

        let mut by_id = HashMap::with_capacity(chains.len());
        let mut by_slug: HashMap<String, usize> = HashMap::with_capacity(chains.len());
        for (idx, chain) in chains.iter().enumerate() {
            by_id.insert(chain.chain_id, idx);
            if let Some(&first) = by_slug.get(&chain.slug) {
                return Err(RegistryError::DuplicateSlug {
                    slug: chain.slug.clone(),
                    first: chains[first].chain_id,
                    second: chain.chain_id,
                });
            }
            by_slug.insert(chain.slug.clone(), idx);
        }

        Ok(Self { chains, by_id, by_slug })
    }

    /// Overrides merged over every loaded registry.
    pub fn default_overrides() -> [ChainMetadata; 1] { [ChainMetadata::localhost()] }

    /// Registry records plus [`Self::default_overrides`].
    pub fn with_default_overrides(
        chains: impl IntoIterator<Item = ChainMetadata>,
    ) -> Result<Self, RegistryError> {
        Self::new(chains, Self::default_overrides())
    }

    /// Registry compiled into the crate, with the `localhost` override.
    pub fn embedded() -> Result<Self, RegistryError> {
        let chains = EMBEDDED_CHAINS
            .iter()
            .map(|(chain_id, json)| parse_record(&format!("{chain_id}.json"), *chain_id, json))
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_default_overrides(chains)
    }

    /// Loads a registry directory of `{chain_id}.json` files, with the
    /// `localhost` override.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        Self::with_default_overrides(super::sync::read_dir(dir.as_ref())?)
    }

    /// Resolves a chain by id, then by slug.
    pub fn resolve(&self, chain: &ChainIdOrSlug) -> Result<&Arc<ChainMetadata>, RegistryError> {
        let idx = match chain {
            ChainIdOrSlug::Id(id) => {
                self.by_id.get(id).or_else(|| self.by_slug.get(&id.to_string()))
            },
            ChainIdOrSlug::Slug(slug) => self.by_slug.get(slug),
        };
        idx.map(|&idx| &self.chains[idx]).ok_or_else(|| RegistryError::NotFound(chain.to_string()))
    }

    /// Resolves a raw path segment: by id when it is numeric, then by the
    /// segment itself as a slug.
    pub fn resolve_segment(&self, segment: &str) -> Result<&Arc<ChainMetadata>, RegistryError> {
        segment
            .parse::<u64>()
            .ok()
            .and_then(|id| self.by_id.get(&id))
            .or_else(|| self.by_slug.get(segment))
            .map(|&idx| &self.chains[idx])
            .ok_or_else(|| RegistryError::NotFound(segment.to_string()))
    }

    pub fn by_id(&self, chain_id: u64) -> Option<&Arc<ChainMetadata>> {
        self.by_id.get(&chain_id).map(|&idx| &self.chains[idx])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Arc<ChainMetadata>> {
        self.by_slug.get(slug).map(|&idx| &self.chains[idx])
    }

    /// All chains ordered by chain id.
    pub fn chains(&self) -> impl Iterator<Item = &Arc<ChainMetadata>> { self.chains.iter() }

    pub fn len(&self) -> usize { self.chains.len() }

    pub fn is_empty(&self) -> bool { self.chains.is_empty() }
}

/// Parses one registry record and checks it against the id it is filed under.
pub(crate) fn parse_record(
    file: &str,
    expected: u64,
    json: &str,
) -> Result<ChainMetadata, RegistryError> {
    let chain: ChainMetadata = serde_json::from_str(json)?;
    if chain.chain_id != expected {
        return Err(RegistryError::FileMismatch {
            file: file.to_string(),
            expected,
            actual: chain.chain_id,
        });
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::LOCAL_CHAIN_ID;

    fn chain(chain_id: u64, slug: &str) -> ChainMetadata {
        ChainMetadata {
            chain_id,
            slug: slug.to_string(),
            name: slug.to_string(),
            ..ChainMetadata::localhost()
        }
    }

    #[test]
    fn test_embedded_registry_ids_match() {
        let registry = ChainRegistry::embedded().unwrap();
        assert!(registry.len() > 1);
        for chain in registry.chains() {
            let resolved = registry.resolve(&ChainIdOrSlug::Id(chain.chain_id)).unwrap();
            assert_eq!(resolved.chain_id, chain.chain_id);
            let resolved = registry.resolve(&ChainIdOrSlug::Slug(chain.slug.clone())).unwrap();
            assert_eq!(resolved.slug, chain.slug);
        }
    }

    #[test]
    fn test_embedded_registry_has_localhost() {
        let registry = ChainRegistry::embedded().unwrap();
        let local = registry.resolve(&"localhost".parse().unwrap()).unwrap();
        assert_eq!(local.chain_id, LOCAL_CHAIN_ID);
    }

    #[test]
    fn test_unknown_chain_not_found() {
        let registry = ChainRegistry::new([chain(1, "ethereum")], []).unwrap();
        assert!(matches!(
            registry.resolve(&ChainIdOrSlug::Id(999_999)),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.resolve(&ChainIdOrSlug::Slug("nope".to_string())),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = ChainRegistry::new(
            [chain(2_000_001, "jambon-s-testnet"), chain(2_000_002, "jambon-s-testnet")],
            [],
        )
        .unwrap_err();
        match err {
            RegistryError::DuplicateSlug { slug, first, second } => {
                assert_eq!(slug, "jambon-s-testnet");
                assert_eq!((first, second), (2_000_001, 2_000_002));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_chain_id_rejected() {
        let err = ChainRegistry::new([chain(5, "a"), chain(5, "b")], []).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateChainId(5)));
    }

    #[test]
    fn test_override_replaces_record() {
        let registry = ChainRegistry::new(
            [chain(1337, "geth-dev"), chain(1, "ethereum")],
            [ChainMetadata::localhost()],
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_id(1337).unwrap().slug, "localhost");
        assert!(registry.by_slug("geth-dev").is_none());
    }

    #[test]
    fn test_numeric_slug_fallback() {
        let registry = ChainRegistry::new([chain(7, "1000")], []).unwrap();
        assert_eq!(registry.resolve(&ChainIdOrSlug::Id(1000)).unwrap().chain_id, 7);
    }

    #[test]
    fn test_resolve_segment_uses_raw_slug() {
        let registry = ChainRegistry::new([chain(7, "0100"), chain(137, "polygon")], []).unwrap();
        assert_eq!(registry.resolve_segment("0137").unwrap().chain_id, 137);
        assert_eq!(registry.resolve_segment("0100").unwrap().chain_id, 7);
        assert_eq!(registry.resolve_segment("polygon").unwrap().chain_id, 137);
        assert!(matches!(
            registry.resolve_segment("100"),
            Err(RegistryError::NotFound(segment)) if segment == "100"
        ));
    }

    #[test]
    fn test_default_overrides_collide_with_localhost_slug() {
        let err = ChainRegistry::with_default_overrides([chain(31337, "localhost")]).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateSlug { first: LOCAL_CHAIN_ID, second: 31337, .. }
        ));
    }

    #[test]
    fn test_parse_record_mismatch() {
        let json = serde_json::to_string(&chain(10, "op")).unwrap();
        assert!(matches!(
            parse_record("11.json", 11, &json),
            Err(RegistryError::FileMismatch { expected: 11, actual: 10, .. })
        ));
    }
}
