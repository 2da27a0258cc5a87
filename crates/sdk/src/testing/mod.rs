//! In-memory collaborators for exercising routing without an RPC endpoint.

mod resolver;

use std::sync::Arc;

use alloy::primitives::Selector;
use alloy_sol_types::SolCall;
pub use resolver::{CountingAbiResolver, FailingAbiResolver, StaticAbiResolver};

use crate::{
    abi::*,
    chain::ChainRegistry,
    error::SessionError,
    handle::{HandleFactory, SessionProvider},
    probe::{AbiNameResolver, CapabilityProbe, ResolvedAbi},
    router::{PageRequest, PageRouter},
};

/// Session provider whose backing store is down.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingSession;

impl SessionProvider for FailingSession {
    async fn session_token(&self, _request: &PageRequest) -> Result<Option<String>, SessionError> {
        Err(SessionError::Unavailable("session store offline".to_string()))
    }
}

pub const TEST_SECRET_KEY: &str = "test-secret-key";
pub const TEST_CLIENT_ID: &str = "test-client-id";

/// Interface made of exactly `selectors`.
pub fn abi_with(selectors: &[[u8; 4]]) -> ResolvedAbi {
    ResolvedAbi::from_selectors(selectors.iter().map(|s| Selector::from(*s)), [])
}

pub fn erc20_abi() -> ResolvedAbi {
    abi_with(&[
        IERC20::decimalsCall::SELECTOR,
        IERC20::totalSupplyCall::SELECTOR,
        IERC20::balanceOfCall::SELECTOR,
        IERC20::transferCall::SELECTOR,
        IERC20::approveCall::SELECTOR,
    ])
}

pub fn erc721_abi() -> ResolvedAbi {
    abi_with(&[
        IERC721::tokenURICall::SELECTOR,
        IERC721::ownerOfCall::SELECTOR,
        IERC721::setApprovalForAllCall::SELECTOR,
    ])
}

/// Marketplace with direct listings but no English auctions.
pub fn marketplace_abi() -> ResolvedAbi {
    abi_with(&[
        IDirectListings::totalListingsCall::SELECTOR,
        IDirectListings::cancelListingCall::SELECTOR,
        IDirectListings::approveBuyerForListingCall::SELECTOR,
    ])
}

/// Embedded registry with the `localhost` override.
pub fn registry() -> Arc<ChainRegistry> {
    Arc::new(ChainRegistry::embedded().expect("embedded registry is valid"))
}

/// Router over `registry()` whose probe and name lookups both go through
/// `resolver`.
pub fn router<A, S>(
    resolver: Arc<A>,
    sessions: S,
) -> PageRouter<Arc<A>, AbiNameResolver<Arc<A>>, S>
where
    A: crate::probe::AbiResolver + Send + Sync,
    S: SessionProvider + Sync,
{
    PageRouter::new(
        registry(),
        HandleFactory::new(TEST_SECRET_KEY, TEST_CLIENT_ID, sessions),
        CapabilityProbe::new(Arc::clone(&resolver)),
        AbiNameResolver::new(resolver),
    )
}
