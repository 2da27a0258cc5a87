//! Contract page routing.
//!
//! A [`PageRouter`] takes a [`PageRequest`] through chain resolution, the
//! local-chain shortcut, capability probing and the sub-page gate, and ends
//! in exactly one [`RouteOutcome`]. Both URL trees share the router; only the
//! [`PathBuilder`] used for landing paths differs.

mod page;
mod paths;

use std::sync::Arc;

pub use page::{PageRequest, ProjectMeta, SubPage};
pub use paths::{DirectPaths, PathBuilder, ProjectPaths};
use serde::Serialize;

use crate::{
    chain::{ChainMetadata, ChainRegistry, LOCAL_CHAIN_ID},
    handle::{ContractHandle, HandleFactory, SessionProvider},
    probe::{AbiResolver, CapabilityFlags, CapabilityProbe, SelectorNameResolver, SelectorNames},
};

/// Result of checking a sub-page against the contract's capabilities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Requirement unmet; send the caller here instead.
    Redirect(String),
    Continue,
}

/// Checks the requested sub-page against `flags`.
pub fn gate(request: &PageRequest, flags: &CapabilityFlags) -> Gate {
    if request.sub_page.is_supported(flags) {
        Gate::Continue
    } else {
        Gate::Redirect(request.landing_path())
    }
}

/// Which page component renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageVariant {
    /// Local/dev chain: rendered client-side only, nothing probed.
    LocalClientOnly,
    Full,
}

/// Everything a page renderer needs.
#[derive(Clone, Debug)]
pub struct RenderPlan {
    pub page: SubPage,
    pub variant: PageVariant,
    pub chain: Arc<ChainMetadata>,
    /// Caller-credentialed handle; the server handle never leaves the router.
    pub contract: ContractHandle,
    /// `None` for the local variant.
    pub flags: Option<CapabilityFlags>,
    /// Only set on the analytics page.
    pub selector_names: Option<SelectorNames>,
    pub landing_path: String,
}

/// Terminal state of a routed request.
#[derive(Clone, Debug)]
pub enum RouteOutcome {
    NotFound,
    Redirect(String),
    Render(Box<RenderPlan>),
}

/// Data loaded for the analytics page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsContext {
    pub flags: CapabilityFlags,
    pub names: SelectorNames,
}

pub struct PageRouter<A, N, S> {
    registry: Arc<ChainRegistry>,
    handles: HandleFactory<S>,
    probe: CapabilityProbe<A>,
    names: N,
    local_chain_id: u64,
}

impl<A, N, S> PageRouter<A, N, S>
where
    A: AbiResolver + Sync,
    N: SelectorNameResolver + Sync,
    S: SessionProvider + Sync,
{
    pub fn new(
        registry: Arc<ChainRegistry>,
        handles: HandleFactory<S>,
        probe: CapabilityProbe<A>,
        names: N,
    ) -> Self {
        Self { registry, handles, probe, names, local_chain_id: LOCAL_CHAIN_ID }
    }

    /// Chain id treated as the local/dev chain.
    pub fn with_local_chain_id(mut self, chain_id: u64) -> Self {
        self.local_chain_id = chain_id;
        self
    }

    pub fn registry(&self) -> &Arc<ChainRegistry> { &self.registry }

    pub fn probe(&self) -> &CapabilityProbe<A> { &self.probe }

    pub fn names(&self) -> &N { &self.names }

    pub fn local_chain_id(&self) -> u64 { self.local_chain_id }

    /// Routes one request to its terminal outcome.
    pub async fn route(&self, request: &PageRequest) -> RouteOutcome {
        let chain = match self.registry.resolve_segment(&request.chain) {
            Ok(chain) => Arc::clone(chain),
            Err(err) => {
                tracing::debug!(chain = %request.chain, %err, "chain not found");
                return RouteOutcome::NotFound;
            },
        };
        let landing_path = request.landing_path();

        if chain.chain_id == self.local_chain_id {
            let contract =
                self.handles.build_client(&chain, &request.contract_address, request).await;
            tracing::debug!(page = %request.sub_page, "local chain, rendering client-only variant");
            return RouteOutcome::Render(Box::new(RenderPlan {
                page: request.sub_page,
                variant: PageVariant::LocalClientOnly,
                chain,
                contract,
                flags: None,
                selector_names: None,
                landing_path,
            }));
        }

        let handles = self.handles.build(&chain, &request.contract_address, request).await;
        let (flags, selector_names) = match request.sub_page {
            SubPage::Analytics => {
                let AnalyticsContext { flags, names } =
                    self.load_analytics(&chain, &handles.server).await;
                (flags, Some(names))
            },
            _ => (self.probe.probe(&chain, &handles.server).await, None),
        };

        match gate(request, &flags) {
            Gate::Redirect(path) => {
                tracing::debug!(page = %request.sub_page, %path, "sub-page unsupported, redirecting");
                return RouteOutcome::Redirect(path);
            },
            Gate::Continue => (),
        }

        RouteOutcome::Render(Box::new(RenderPlan {
            page: request.sub_page,
            variant: PageVariant::Full,
            chain,
            contract: handles.client,
            flags: Some(flags),
            selector_names,
            landing_path,
        }))
    }

    /// Probes the contract and resolves selector names concurrently. A failed
    /// name lookup yields empty maps.
    pub async fn load_analytics(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> AnalyticsContext {
        let (flags, names) =
            futures::join!(self.probe.probe(chain, contract), self.names.resolve_names(chain, contract));
        let names = names.unwrap_or_else(|err| {
            tracing::warn!(
                chain_id = chain.chain_id,
                address = %contract.address(),
                %err,
                "selector name lookup failed"
            );
            SelectorNames::default()
        });
        AnalyticsContext { flags, names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate() {
        let request = PageRequest::from_path("/team/acme/web/contract/8453/0xabc/split", false).unwrap();
        assert_eq!(
            gate(&request, &CapabilityFlags::default()),
            Gate::Redirect("/team/acme/web/contract/8453/0xabc".to_string())
        );

        let flags = CapabilityFlags { is_split_supported: true, ..Default::default() };
        assert_eq!(gate(&request, &flags), Gate::Continue);
    }
}
