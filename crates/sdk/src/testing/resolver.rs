use std::sync::atomic::{AtomicUsize, Ordering};

use alloy::transports::TransportErrorKind;
use dashmap::DashMap;

use crate::{
    chain::ChainMetadata,
    error::ProbeError,
    handle::ContractHandle,
    probe::{AbiResolver, ResolvedAbi},
};

/// Serves fixed interfaces by contract address.
#[derive(Debug, Default)]
pub struct StaticAbiResolver {
    abis: DashMap<String, ResolvedAbi>,
    fallback: Option<ResolvedAbi>,
}

impl StaticAbiResolver {
    pub fn new() -> Self { Self::default() }

    /// Serves `abi` for `address`, matched case-insensitively.
    pub fn with_abi(self, address: &str, abi: ResolvedAbi) -> Self {
        self.abis.insert(address.to_lowercase(), abi);
        self
    }

    /// Serves `abi` for every address without its own entry.
    pub fn with_fallback(mut self, abi: ResolvedAbi) -> Self {
        self.fallback = Some(abi);
        self
    }
}

impl AbiResolver for StaticAbiResolver {
    async fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Result<ResolvedAbi, ProbeError> {
        let address = contract.address().as_str().to_lowercase();
        match self.abis.get(&address) {
            Some(abi) => Ok(abi.clone()),
            None => self
                .fallback
                .clone()
                .ok_or(ProbeError::NoCode { chain_id: chain.chain_id, address }),
        }
    }
}

/// Counts resolutions passing through to the wrapped resolver.
#[derive(Debug)]
pub struct CountingAbiResolver<A> {
    inner: A,
    total: AtomicUsize,
    per_chain: DashMap<u64, usize>,
}

impl<A: AbiResolver> CountingAbiResolver<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, total: AtomicUsize::new(0), per_chain: DashMap::new() }
    }

    pub fn calls(&self) -> usize { self.total.load(Ordering::SeqCst) }

    pub fn calls_on(&self, chain_id: u64) -> usize {
        self.per_chain.get(&chain_id).map_or(0, |count| *count)
    }
}

impl<A: AbiResolver + Sync> AbiResolver for CountingAbiResolver<A> {
    async fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Result<ResolvedAbi, ProbeError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.per_chain.entry(chain.chain_id).or_default() += 1;
        self.inner.resolve(chain, contract).await
    }
}

/// Fails every resolution with a transport error, as an unreachable RPC would.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingAbiResolver;

impl AbiResolver for FailingAbiResolver {
    async fn resolve(
        &self,
        _chain: &ChainMetadata,
        _contract: &ContractHandle,
    ) -> Result<ResolvedAbi, ProbeError> {
        Err(ProbeError::Transport(TransportErrorKind::custom_str("simulated network failure")))
    }
}
