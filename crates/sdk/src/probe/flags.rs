use alloy::primitives::Selector;
use alloy_sol_types::SolCall;
use serde::Serialize;

use super::ResolvedAbi;
use crate::{abi::*, chain::ChainMetadata};

/// Hosted indexing service backing the analytics page.
pub const INSIGHT_SERVICE: &str = "insight";

/// Token standards detected on a contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedErcs {
    #[serde(rename = "isERC20")]
    pub erc20: bool,
    #[serde(rename = "isERC721")]
    pub erc721: bool,
    #[serde(rename = "isERC1155")]
    pub erc1155: bool,
}

impl SupportedErcs {
    /// Classifies by selector presence. ERC-1155 takes precedence over
    /// ERC-721, and ERC-20 is only reported for contracts that are neither.
    pub fn detect(abi: &ResolvedAbi) -> Self {
        let erc1155 = abi.has_all(&[IERC1155::uriCall::SELECTOR, IERC1155::balanceOfCall::SELECTOR]);
        let erc721 = !erc1155
            && abi.has_all(&[IERC721::tokenURICall::SELECTOR, IERC721::ownerOfCall::SELECTOR]);
        let erc20 = !erc1155
            && !erc721
            && abi.has_all(&[
                IERC20::decimalsCall::SELECTOR,
                IERC20::totalSupplyCall::SELECTOR,
                IERC20::balanceOfCall::SELECTOR,
                IERC20::transferCall::SELECTOR,
            ]);
        Self { erc20, erc721, erc1155 }
    }

    pub fn basic_type(&self) -> Option<BasicContractType> {
        if self.erc1155 {
            Some(BasicContractType::Erc1155)
        } else if self.erc721 {
            Some(BasicContractType::Erc721)
        } else if self.erc20 {
            Some(BasicContractType::Erc20)
        } else {
            None
        }
    }

    pub fn is_nft(&self) -> bool { self.erc721 || self.erc1155 }
}

/// Token standard of a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum BasicContractType {
    #[display("ERC20")]
    Erc20,
    #[display("ERC721")]
    Erc721,
    #[display("ERC1155")]
    Erc1155,
}

/// Capabilities of a contract, derived from its resolved selector set.
///
/// [`Default`] is the "nothing supported" value a failed probe produces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityFlags {
    pub supported_ercs: SupportedErcs,
    pub is_contract_metadata_supported: bool,
    pub is_primary_sale_supported: bool,
    pub is_royalties_supported: bool,
    pub is_platform_fees_supported: bool,
    pub is_permissions_supported: bool,
    pub is_permissions_enumerable_supported: bool,
    pub is_claim_conditions_supported: bool,
    pub is_mint_supported: bool,
    pub is_direct_listing_supported: bool,
    pub is_english_auction_supported: bool,
    pub is_vote_contract: bool,
    pub is_split_supported: bool,
    pub is_account_factory: bool,
    pub is_account: bool,
    pub is_account_permissions_supported: bool,
    pub is_modular_core: bool,
    pub is_insight_supported: bool,
    /// Resolved function selectors, `0x`-prefixed hex.
    pub function_selectors: Vec<String>,
}

impl CapabilityFlags {
    pub fn from_abi(abi: &ResolvedAbi, chain: &ChainMetadata) -> Self {
        let supported_ercs = SupportedErcs::detect(abi);
        let is_permissions_supported = abi.has_all(&[
            IPermissions::hasRoleCall::SELECTOR,
            IPermissions::grantRoleCall::SELECTOR,
            IPermissions::revokeRoleCall::SELECTOR,
        ]);

        Self {
            supported_ercs,
            is_contract_metadata_supported: abi.has_all(&[
                IContractMetadata::contractURICall::SELECTOR,
                IContractMetadata::setContractURICall::SELECTOR,
            ]),
            is_primary_sale_supported: abi.has_all(&[
                IPrimarySale::primarySaleRecipientCall::SELECTOR,
                IPrimarySale::setPrimarySaleRecipientCall::SELECTOR,
            ]),
            is_royalties_supported: abi.has_all(&[
                IRoyalty::royaltyInfoCall::SELECTOR,
                IRoyalty::getDefaultRoyaltyInfoCall::SELECTOR,
                IRoyalty::setDefaultRoyaltyInfoCall::SELECTOR,
            ]),
            is_platform_fees_supported: abi.has_all(&[
                IPlatformFee::getPlatformFeeInfoCall::SELECTOR,
                IPlatformFee::setPlatformFeeInfoCall::SELECTOR,
            ]),
            is_permissions_supported,
            is_permissions_enumerable_supported: is_permissions_supported
                && abi.has_all(&[
                    IPermissionsEnumerable::getRoleMemberCall::SELECTOR,
                    IPermissionsEnumerable::getRoleMemberCountCall::SELECTOR,
                ]),
            is_claim_conditions_supported: (supported_ercs.is_nft() || supported_ercs.erc20)
                && abi.has_all(&[
                    IClaimConditions::getActiveClaimConditionIdCall::SELECTOR,
                    IClaimConditions::claimConditionCall::SELECTOR,
                ]),
            is_mint_supported: mint_supported(abi, &supported_ercs),
            is_direct_listing_supported: abi.has_all(&[
                IDirectListings::totalListingsCall::SELECTOR,
                IDirectListings::cancelListingCall::SELECTOR,
                IDirectListings::approveBuyerForListingCall::SELECTOR,
            ]),
            is_english_auction_supported: abi.has_all(&[
                IEnglishAuctions::totalAuctionsCall::SELECTOR,
                IEnglishAuctions::cancelAuctionCall::SELECTOR,
                IEnglishAuctions::bidInAuctionCall::SELECTOR,
                IEnglishAuctions::collectAuctionPayoutCall::SELECTOR,
            ]),
            is_vote_contract: abi.has_all(&[
                IVote::proposalThresholdCall::SELECTOR,
                IVote::proposeCall::SELECTOR,
                IVote::castVoteCall::SELECTOR,
            ]),
            is_split_supported: abi.has_all(&[
                ISplit::distributeCall::SELECTOR,
                ISplit::payeeCountCall::SELECTOR,
                ISplit::payeeCall::SELECTOR,
                ISplit::sharesCall::SELECTOR,
            ]),
            is_account_factory: abi.has_all(&[
                IAccountFactory::createAccountCall::SELECTOR,
                IAccountFactory::getAddressCall::SELECTOR,
            ]) && abi.has_any(&[
                IAccountFactory::accountImplementationCall::SELECTOR,
                IAccountFactory::getAllAccountsCall::SELECTOR,
            ]),
            is_account: abi.has_all(&[
                IAccount::entryPointCall::SELECTOR,
                IAccount::executeCall::SELECTOR,
            ]) && abi.has_any(&[
                IAccount::getNonceCall::SELECTOR,
                IAccount::executeBatchCall::SELECTOR,
            ]),
            is_account_permissions_supported: abi.has_all(&[
                IAccountPermissions::getAllAdminsCall::SELECTOR,
                IAccountPermissions::isAdminCall::SELECTOR,
                IAccountPermissions::isActiveSignerCall::SELECTOR,
            ]),
            is_modular_core: abi.has_all(&[
                IModularCore::installModuleCall::SELECTOR,
                IModularCore::uninstallModuleCall::SELECTOR,
            ]),
            is_insight_supported: chain.service_enabled(INSIGHT_SERVICE),
            function_selectors: abi
                .function_selectors()
                .iter()
                .map(|s: &Selector| s.to_string())
                .collect(),
        }
    }
}

fn mint_supported(abi: &ResolvedAbi, ercs: &SupportedErcs) -> bool {
    if ercs.erc1155 {
        abi.has_all(&[IMintableERC1155::mintToCall::SELECTOR])
    } else if ercs.erc721 {
        abi.has_all(&[IMintableERC721::mintToCall::SELECTOR])
    } else if ercs.erc20 {
        abi.has_all(&[IMintableERC20::mintToCall::SELECTOR])
    } else {
        false
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for CapabilityFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;

        let flag = |name: &str, value: bool| {
            format!("{name:<36} {}", if value { "yes".green() } else { "no".dimmed() })
        };
        let rows = [
            ("ERC20", self.supported_ercs.erc20),
            ("ERC721", self.supported_ercs.erc721),
            ("ERC1155", self.supported_ercs.erc1155),
            ("contract metadata", self.is_contract_metadata_supported),
            ("primary sale", self.is_primary_sale_supported),
            ("royalties", self.is_royalties_supported),
            ("platform fees", self.is_platform_fees_supported),
            ("permissions", self.is_permissions_supported),
            ("permissions enumerable", self.is_permissions_enumerable_supported),
            ("claim conditions", self.is_claim_conditions_supported),
            ("mint", self.is_mint_supported),
            ("direct listings", self.is_direct_listing_supported),
            ("english auctions", self.is_english_auction_supported),
            ("vote", self.is_vote_contract),
            ("split", self.is_split_supported),
            ("account factory", self.is_account_factory),
            ("account", self.is_account),
            ("account permissions", self.is_account_permissions_supported),
            ("modular core", self.is_modular_core),
            ("insight", self.is_insight_supported),
        ];
        for (name, value) in rows {
            writeln!(f, "    {}", flag(name, value))?;
        }
        write!(f, "    {:<36} {}", "function selectors", self.function_selectors.len())
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Selector;

    use super::*;
    use crate::chain::ChainService;

    fn abi(selectors: &[[u8; 4]]) -> ResolvedAbi {
        ResolvedAbi::from_selectors(selectors.iter().map(|s| Selector::from(*s)), [])
    }

    fn insight_chain() -> ChainMetadata {
        ChainMetadata {
            chain_id: 1,
            services: vec![ChainService { service: INSIGHT_SERVICE.to_string(), enabled: true }],
            ..ChainMetadata::localhost()
        }
    }

    #[test]
    fn test_erc721_without_erc1155() {
        let flags = CapabilityFlags::from_abi(
            &abi(&[
                IERC721::tokenURICall::SELECTOR,
                IERC721::ownerOfCall::SELECTOR,
                IERC20::balanceOfCall::SELECTOR,
                IMintableERC721::mintToCall::SELECTOR,
            ]),
            &insight_chain(),
        );
        assert!(flags.supported_ercs.erc721);
        assert!(!flags.supported_ercs.erc1155);
        assert!(!flags.supported_ercs.erc20);
        assert!(flags.is_mint_supported);
        assert_eq!(flags.supported_ercs.basic_type(), Some(BasicContractType::Erc721));
        assert_eq!(flags.function_selectors.len(), 4);
    }

    #[test]
    fn test_erc1155_wins_over_erc721() {
        let ercs = SupportedErcs::detect(&abi(&[
            IERC721::tokenURICall::SELECTOR,
            IERC721::ownerOfCall::SELECTOR,
            IERC1155::uriCall::SELECTOR,
            IERC1155::balanceOfCall::SELECTOR,
        ]));
        assert_eq!(ercs, SupportedErcs { erc20: false, erc721: false, erc1155: true });
    }

    #[test]
    fn test_erc20_detection() {
        let ercs = SupportedErcs::detect(&abi(&[
            IERC20::decimalsCall::SELECTOR,
            IERC20::totalSupplyCall::SELECTOR,
            IERC20::balanceOfCall::SELECTOR,
            IERC20::transferCall::SELECTOR,
        ]));
        assert_eq!(ercs.basic_type(), Some(BasicContractType::Erc20));
    }

    #[test]
    fn test_marketplace_flags() {
        let flags = CapabilityFlags::from_abi(
            &abi(&[
                IDirectListings::totalListingsCall::SELECTOR,
                IDirectListings::cancelListingCall::SELECTOR,
                IDirectListings::approveBuyerForListingCall::SELECTOR,
                IEnglishAuctions::totalAuctionsCall::SELECTOR,
            ]),
            &insight_chain(),
        );
        assert!(flags.is_direct_listing_supported);
        assert!(!flags.is_english_auction_supported);
        assert_eq!(flags.supported_ercs.basic_type(), None);
    }

    #[test]
    fn test_permissions_enumerable_requires_permissions() {
        let enumerable_only = [
            IPermissionsEnumerable::getRoleMemberCall::SELECTOR,
            IPermissionsEnumerable::getRoleMemberCountCall::SELECTOR,
        ];
        let flags = CapabilityFlags::from_abi(&abi(&enumerable_only), &insight_chain());
        assert!(!flags.is_permissions_enumerable_supported);

        let mut full = enumerable_only.to_vec();
        full.extend([
            IPermissions::hasRoleCall::SELECTOR,
            IPermissions::grantRoleCall::SELECTOR,
            IPermissions::revokeRoleCall::SELECTOR,
        ]);
        let flags = CapabilityFlags::from_abi(&abi(&full), &insight_chain());
        assert!(flags.is_permissions_supported);
        assert!(flags.is_permissions_enumerable_supported);
    }

    #[test]
    fn test_account_shapes() {
        let flags = CapabilityFlags::from_abi(
            &abi(&[
                IAccountFactory::createAccountCall::SELECTOR,
                IAccountFactory::getAddressCall::SELECTOR,
                IAccountFactory::accountImplementationCall::SELECTOR,
            ]),
            &insight_chain(),
        );
        assert!(flags.is_account_factory);
        assert!(!flags.is_account);

        let flags = CapabilityFlags::from_abi(
            &abi(&[
                IAccount::entryPointCall::SELECTOR,
                IAccount::executeCall::SELECTOR,
                IAccount::getNonceCall::SELECTOR,
            ]),
            &insight_chain(),
        );
        assert!(flags.is_account);
        assert!(!flags.is_account_factory);
    }

    #[test]
    fn test_insight_follows_chain_services() {
        let flags = CapabilityFlags::from_abi(&ResolvedAbi::default(), &insight_chain());
        assert!(flags.is_insight_supported);
        let flags = CapabilityFlags::from_abi(&ResolvedAbi::default(), &ChainMetadata::localhost());
        assert!(!flags.is_insight_supported);
    }

    #[test]
    fn test_default_is_all_unsupported() {
        let flags = CapabilityFlags::default();
        assert_eq!(flags.supported_ercs, SupportedErcs::default());
        assert!(!flags.is_insight_supported);
        assert!(flags.function_selectors.is_empty());
    }
}
