use std::collections::{BTreeMap, HashMap};

use alloy::primitives::{B256, Selector};
use alloy_sol_types::{SolCall, SolEvent};
use serde::Serialize;

use super::{AbiResolver, ResolvedAbi};
use crate::{abi::*, chain::ChainMetadata, error::ProbeError, handle::ContractHandle};

/// Human-readable names of a contract's write functions and events, keyed by
/// `0x`-prefixed selector / topic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorNames {
    pub write_functions: BTreeMap<String, String>,
    pub events: BTreeMap<String, String>,
}

impl SelectorNames {
    pub fn is_empty(&self) -> bool { self.write_functions.is_empty() && self.events.is_empty() }
}

/// Resolves selector names for the analytics page.
pub trait SelectorNameResolver {
    fn resolve_names(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> impl Future<Output = Result<SelectorNames, ProbeError>> + Send;
}

struct FunctionEntry {
    signature: &'static str,
    read_only: bool,
}

/// Known function and event signatures, for interfaces resolved without
/// names (e.g. from bytecode).
pub struct SignatureBook {
    functions: HashMap<Selector, FunctionEntry>,
    events: HashMap<B256, &'static str>,
}

impl SignatureBook {
    /// Signatures of the contract extensions the dashboard knows about.
    pub fn known() -> Self {
        let mut book = Self { functions: HashMap::new(), events: HashMap::new() };

        book.read::<IERC20::decimalsCall>();
        book.read::<IERC20::totalSupplyCall>();
        book.read::<IERC20::balanceOfCall>();
        book.write::<IERC20::transferCall>();
        book.write::<IERC20::approveCall>();
        book.write::<IERC20::transferFromCall>();
        book.read::<IERC721::tokenURICall>();
        book.read::<IERC721::ownerOfCall>();
        book.write::<IERC721::safeTransferFromCall>();
        book.write::<IERC721::setApprovalForAllCall>();
        book.read::<IERC1155::uriCall>();
        book.read::<IERC1155::balanceOfCall>();
        book.write::<IERC1155::safeTransferFromCall>();
        book.read::<IContractMetadata::contractURICall>();
        book.write::<IContractMetadata::setContractURICall>();
        book.read::<IPrimarySale::primarySaleRecipientCall>();
        book.write::<IPrimarySale::setPrimarySaleRecipientCall>();
        book.read::<IRoyalty::royaltyInfoCall>();
        book.read::<IRoyalty::getDefaultRoyaltyInfoCall>();
        book.write::<IRoyalty::setDefaultRoyaltyInfoCall>();
        book.read::<IPlatformFee::getPlatformFeeInfoCall>();
        book.write::<IPlatformFee::setPlatformFeeInfoCall>();
        book.read::<IPermissions::hasRoleCall>();
        book.write::<IPermissions::grantRoleCall>();
        book.write::<IPermissions::revokeRoleCall>();
        book.read::<IPermissionsEnumerable::getRoleMemberCall>();
        book.read::<IPermissionsEnumerable::getRoleMemberCountCall>();
        book.write::<IMintableERC20::mintToCall>();
        book.write::<IMintableERC721::mintToCall>();
        book.write::<IMintableERC1155::mintToCall>();
        book.write::<IDirectListings::cancelListingCall>();
        book.write::<IDirectListings::approveBuyerForListingCall>();
        book.write::<IEnglishAuctions::cancelAuctionCall>();
        book.write::<IEnglishAuctions::bidInAuctionCall>();
        book.write::<IEnglishAuctions::collectAuctionPayoutCall>();
        book.write::<IVote::proposeCall>();
        book.write::<IVote::castVoteCall>();
        book.write::<ISplit::distributeCall>();
        book.write::<IAccountFactory::createAccountCall>();
        book.write::<IAccount::executeCall>();
        book.write::<IAccount::executeBatchCall>();
        book.write::<IModularCore::installModuleCall>();
        book.write::<IModularCore::uninstallModuleCall>();

        book.event::<IERC20::Transfer>();
        book.event::<IERC20::Approval>();
        book.event::<IERC721::ApprovalForAll>();
        book.event::<IERC1155::TransferSingle>();
        book.event::<IERC1155::TransferBatch>();
        book.event::<IPermissions::RoleGranted>();

        book
    }

    fn read<C: SolCall>(&mut self) {
        self.functions
            .insert(Selector::from(C::SELECTOR), FunctionEntry { signature: C::SIGNATURE, read_only: true });
    }

    fn write<C: SolCall>(&mut self) {
        self.functions
            .insert(Selector::from(C::SELECTOR), FunctionEntry { signature: C::SIGNATURE, read_only: false });
    }

    fn event<E: SolEvent>(&mut self) { self.events.insert(E::SIGNATURE_HASH, E::SIGNATURE); }

    /// Full signature of a known function, e.g. `transfer(address,uint256)`.
    pub fn function_signature(&self, selector: &Selector) -> Option<&'static str> {
        self.functions.get(selector).map(|e| e.signature)
    }

    pub fn event_signature(&self, topic: &B256) -> Option<&'static str> {
        self.events.get(topic).copied()
    }

    /// Names of the write functions and events of `abi`.
    ///
    /// Names the interface itself carries win over the book; read-only
    /// functions are left out.
    pub fn names_for(&self, abi: &ResolvedAbi) -> SelectorNames {
        let write_functions = abi
            .function_selectors()
            .into_iter()
            .filter_map(|selector| {
                let name = match abi.function_info(&selector) {
                    Some(info) => (!info.read_only).then(|| info.name.clone()),
                    None => self
                        .functions
                        .get(&selector)
                        .filter(|e| !e.read_only)
                        .map(|e| signature_name(e.signature).to_string()),
                }?;
                Some((selector.to_string(), name))
            })
            .collect();

        let events = abi
            .event_topics()
            .into_iter()
            .filter_map(|topic| {
                let name = abi
                    .event_name(&topic)
                    .map(str::to_string)
                    .or_else(|| self.event_signature(&topic).map(|s| signature_name(s).to_string()))?;
                Some((topic.to_string(), name))
            })
            .collect();

        SelectorNames { write_functions, events }
    }
}

fn signature_name(signature: &str) -> &str { signature.split('(').next().unwrap_or(signature) }

/// Name resolver backed by an [`AbiResolver`] and a [`SignatureBook`].
pub struct AbiNameResolver<A> {
    resolver: A,
    book: SignatureBook,
}

impl<A: AbiResolver> AbiNameResolver<A> {
    pub fn new(resolver: A) -> Self { Self { resolver, book: SignatureBook::known() } }
}

impl<A: AbiResolver + Sync> SelectorNameResolver for AbiNameResolver<A> {
    async fn resolve_names(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Result<SelectorNames, ProbeError> {
        let abi = self.resolver.resolve(chain, contract).await?;
        Ok(self.book.names_for(&abi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_names_bytecode_abi() {
        let abi = ResolvedAbi::from_selectors(
            [
                Selector::from(IERC20::transferCall::SELECTOR),
                Selector::from(IERC20::decimalsCall::SELECTOR),
                Selector::from([0xde, 0xad, 0xbe, 0xef]),
            ],
            [IERC20::Transfer::SIGNATURE_HASH, B256::repeat_byte(0x11)],
        );
        let names = SignatureBook::known().names_for(&abi);

        assert_eq!(
            names.write_functions,
            BTreeMap::from([("0xa9059cbb".to_string(), "transfer".to_string())])
        );
        assert_eq!(
            names.events,
            BTreeMap::from([(IERC20::Transfer::SIGNATURE_HASH.to_string(), "Transfer".to_string())])
        );
    }

    #[test]
    fn test_abi_names_win() {
        let abi = ResolvedAbi::from_json_abi(
            r#"[{"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
                {"type":"function","name":"peek","inputs":[],"outputs":[],"stateMutability":"view"}]"#,
        )
        .unwrap();
        let names = SignatureBook::known().names_for(&abi);
        assert_eq!(names.write_functions.len(), 1);
        assert_eq!(names.write_functions.get("0xa9059cbb").map(String::as_str), Some("transfer"));
        assert!(names.events.is_empty());
    }

    #[test]
    fn test_signature_lookup() {
        let book = SignatureBook::known();
        assert_eq!(
            book.function_signature(&Selector::from(IERC20::transferCall::SELECTOR)),
            Some("transfer(address,uint256)")
        );
        assert_eq!(book.event_signature(&B256::ZERO), None);
    }
}
