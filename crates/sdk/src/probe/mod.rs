//! Contract capability probing.
//!
//! A probe resolves the contract interface once through an [`AbiResolver`]
//! and derives [`CapabilityFlags`] from the presence of characteristic
//! selectors. Resolution failures never surface: they yield all-false flags.

mod bytecode;
mod flags;
mod names;

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use alloy::{
    json_abi::{JsonAbi, StateMutability},
    primitives::{B256, Selector},
};
pub use bytecode::{BytecodeAbiResolver, minimal_proxy_target, scan_bytecode};
pub use flags::{BasicContractType, CapabilityFlags, INSIGHT_SERVICE, SupportedErcs};
pub use names::{AbiNameResolver, SelectorNameResolver, SelectorNames, SignatureBook};

use crate::{chain::ChainMetadata, error::ProbeError, handle::ContractHandle};

/// What is known about a single function of a resolved interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub read_only: bool,
}

/// Resolved contract interface: function selectors and event topics, with
/// names where the source provided them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedAbi {
    functions: BTreeMap<Selector, Option<FunctionInfo>>,
    events: BTreeMap<B256, Option<String>>,
}

impl ResolvedAbi {
    /// Interface known only by its selectors, e.g. extracted from bytecode.
    pub fn from_selectors(
        functions: impl IntoIterator<Item = Selector>,
        events: impl IntoIterator<Item = B256>,
    ) -> Self {
        Self {
            functions: functions.into_iter().map(|s| (s, None)).collect(),
            events: events.into_iter().map(|t| (t, None)).collect(),
        }
    }

    /// Interface from a JSON ABI document.
    pub fn from_json_abi(json: &str) -> Result<Self, ProbeError> {
        let abi: JsonAbi =
            serde_json::from_str(json).map_err(|e| ProbeError::InvalidAbi(e.to_string()))?;
        Ok(Self {
            functions: abi
                .functions()
                .map(|f| {
                    let read_only =
                        matches!(f.state_mutability, StateMutability::View | StateMutability::Pure);
                    (f.selector(), Some(FunctionInfo { name: f.name.clone(), read_only }))
                })
                .collect(),
            events: abi.events().map(|e| (e.selector(), Some(e.name.clone()))).collect(),
        })
    }

    pub fn has_function(&self, selector: &Selector) -> bool { self.functions.contains_key(selector) }

    /// Whether every one of `selectors` is present.
    pub fn has_all(&self, selectors: &[[u8; 4]]) -> bool {
        selectors.iter().all(|s| self.has_function(&Selector::from(*s)))
    }

    /// Whether at least one of `selectors` is present.
    pub fn has_any(&self, selectors: &[[u8; 4]]) -> bool {
        selectors.iter().any(|s| self.has_function(&Selector::from(*s)))
    }

    pub fn function_selectors(&self) -> BTreeSet<Selector> { self.functions.keys().copied().collect() }

    pub fn function_info(&self, selector: &Selector) -> Option<&FunctionInfo> {
        self.functions.get(selector).and_then(Option::as_ref)
    }

    pub fn event_topics(&self) -> BTreeSet<B256> { self.events.keys().copied().collect() }

    pub fn event_name(&self, topic: &B256) -> Option<&str> {
        self.events.get(topic).and_then(Option::as_deref)
    }

    pub fn is_empty(&self) -> bool { self.functions.is_empty() && self.events.is_empty() }
}

/// Source of contract interfaces (bytecode, explorer, metadata, ...).
pub trait AbiResolver {
    fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> impl Future<Output = Result<ResolvedAbi, ProbeError>> + Send;
}

impl<R: AbiResolver + Send + Sync> AbiResolver for Arc<R> {
    fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> impl Future<Output = Result<ResolvedAbi, ProbeError>> + Send {
        (**self).resolve(chain, contract)
    }
}

/// Derives capability flags for contracts.
#[derive(Clone, Debug)]
pub struct CapabilityProbe<A> {
    resolver: A,
}

impl<A: AbiResolver> CapabilityProbe<A> {
    pub fn new(resolver: A) -> Self { Self { resolver } }

    pub fn resolver(&self) -> &A { &self.resolver }

    /// Probes the contract. Never fails: an unresolvable interface yields
    /// [`CapabilityFlags::default`], i.e. everything unsupported.
    pub async fn probe(&self, chain: &ChainMetadata, contract: &ContractHandle) -> CapabilityFlags {
        match self.resolver.resolve(chain, contract).await {
            Ok(abi) => {
                let flags = CapabilityFlags::from_abi(&abi, chain);
                tracing::debug!(
                    chain_id = chain.chain_id,
                    address = %contract.address(),
                    selectors = abi.function_selectors().len(),
                    "contract probed"
                );
                flags
            },
            Err(err) => {
                tracing::warn!(
                    chain_id = chain.chain_id,
                    address = %contract.address(),
                    %err,
                    "ABI resolution failed, treating contract as unsupported"
                );
                CapabilityFlags::default()
            },
        }
    }

    /// Token standard of the contract, if it implements one.
    pub async fn probe_basic_type(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Option<BasicContractType> {
        self.probe(chain, contract).await.supported_ercs.basic_type()
    }
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{SolCall, SolEvent};

    use super::*;
    use crate::abi::{IERC20, IERC721};

    const ERC20_ABI: &str = r#"[
        {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
        {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
        {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}],"anonymous":false}
    ]"#;

    #[test]
    fn test_from_json_abi() {
        let abi = ResolvedAbi::from_json_abi(ERC20_ABI).unwrap();
        let transfer = Selector::from(IERC20::transferCall::SELECTOR);
        assert!(abi.has_function(&transfer));
        assert_eq!(
            abi.function_info(&transfer),
            Some(&FunctionInfo { name: "transfer".to_string(), read_only: false })
        );
        assert!(abi.function_info(&Selector::from(IERC20::decimalsCall::SELECTOR)).unwrap().read_only);
        assert_eq!(abi.event_name(&IERC20::Transfer::SIGNATURE_HASH), Some("Transfer"));
    }

    #[test]
    fn test_invalid_json_abi() {
        assert!(matches!(ResolvedAbi::from_json_abi("not an abi"), Err(ProbeError::InvalidAbi(_))));
    }

    #[test]
    fn test_has_all_and_any() {
        let abi = ResolvedAbi::from_selectors([Selector::from(IERC721::tokenURICall::SELECTOR)], []);
        assert!(abi.has_all(&[IERC721::tokenURICall::SELECTOR]));
        assert!(!abi.has_all(&[IERC721::tokenURICall::SELECTOR, IERC721::ownerOfCall::SELECTOR]));
        assert!(abi.has_any(&[IERC721::tokenURICall::SELECTOR, IERC721::ownerOfCall::SELECTOR]));
        assert!(abi.function_info(&Selector::from(IERC721::tokenURICall::SELECTOR)).is_none());
    }
}
