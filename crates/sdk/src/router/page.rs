use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use super::paths::{DirectPaths, PathBuilder, ProjectPaths};
use crate::{chain::ChainIdOrSlug, error::DashboardError, probe::CapabilityFlags};

/// Contract sub-page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubPage {
    Overview,
    Explorer,
    Events,
    Code,
    Sources,
    Settings,
    Analytics,
    Nfts,
    Tokens,
    ClaimConditions,
    Permissions,
    Accounts,
    Account,
    AccountPermissions,
    Proposals,
    DirectListings,
    EnglishAuctions,
    Split,
    Modules,
}

impl SubPage {
    pub const ALL: [SubPage; 19] = [
        SubPage::Overview,
        SubPage::Explorer,
        SubPage::Events,
        SubPage::Code,
        SubPage::Sources,
        SubPage::Settings,
        SubPage::Analytics,
        SubPage::Nfts,
        SubPage::Tokens,
        SubPage::ClaimConditions,
        SubPage::Permissions,
        SubPage::Accounts,
        SubPage::Account,
        SubPage::AccountPermissions,
        SubPage::Proposals,
        SubPage::DirectListings,
        SubPage::EnglishAuctions,
        SubPage::Split,
        SubPage::Modules,
    ];

    /// Path segment of the sub-page; empty for the overview.
    pub fn slug(&self) -> &'static str {
        match self {
            SubPage::Overview => "",
            SubPage::Explorer => "explorer",
            SubPage::Events => "events",
            SubPage::Code => "code",
            SubPage::Sources => "sources",
            SubPage::Settings => "settings",
            SubPage::Analytics => "analytics",
            SubPage::Nfts => "nfts",
            SubPage::Tokens => "tokens",
            SubPage::ClaimConditions => "claim-conditions",
            SubPage::Permissions => "permissions",
            SubPage::Accounts => "accounts",
            SubPage::Account => "account",
            SubPage::AccountPermissions => "account-permissions",
            SubPage::Proposals => "proposals",
            SubPage::DirectListings => "direct-listings",
            SubPage::EnglishAuctions => "english-auctions",
            SubPage::Split => "split",
            SubPage::Modules => "modules",
        }
    }

    /// Whether the contract has what this page needs.
    pub fn is_supported(&self, flags: &CapabilityFlags) -> bool {
        match self {
            SubPage::Overview
            | SubPage::Explorer
            | SubPage::Events
            | SubPage::Code
            | SubPage::Sources => true,
            SubPage::Settings => {
                flags.is_contract_metadata_supported
                    || flags.is_primary_sale_supported
                    || flags.is_royalties_supported
                    || flags.is_platform_fees_supported
            },
            SubPage::Analytics => flags.is_insight_supported,
            SubPage::Nfts => flags.supported_ercs.is_nft(),
            SubPage::Tokens => flags.supported_ercs.erc20,
            SubPage::ClaimConditions => flags.is_claim_conditions_supported,
            SubPage::Permissions => flags.is_permissions_enumerable_supported,
            SubPage::Accounts => flags.is_account_factory,
            SubPage::Account => flags.is_account,
            SubPage::AccountPermissions => flags.is_account_permissions_supported,
            SubPage::Proposals => flags.is_vote_contract,
            SubPage::DirectListings => flags.is_direct_listing_supported,
            SubPage::EnglishAuctions => flags.is_english_auction_supported,
            SubPage::Split => flags.is_split_supported,
            SubPage::Modules => flags.is_modular_core,
        }
    }
}

impl FromStr for SubPage {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubPage::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| DashboardError::InvalidArgument(format!("unknown sub-page: {s}")))
    }
}

impl Display for SubPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubPage::Overview => write!(f, "overview"),
            page => write!(f, "{}", page.slug()),
        }
    }
}

/// Team and project a request is scoped to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectMeta {
    pub team_slug: String,
    pub project_slug: String,
}

/// One contract page request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Chain segment as requested, id or slug.
    pub chain: String,
    /// Contract segment as requested, not normalized.
    pub contract_address: String,
    pub sub_page: SubPage,
    pub project: Option<ProjectMeta>,
    pub is_logged_in: bool,
}

impl PageRequest {
    /// Parses either URL shape:
    ///
    /// * `/{chain}/{address}[/{sub-page}]`
    /// * `/team/{team}/{project}/contract/{chain}/{address}[/{sub-page}]`
    pub fn from_path(path: &str, is_logged_in: bool) -> Result<Self, DashboardError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let (project, rest) = match segments.as_slice() {
            ["team", team, project, "contract", rest @ ..] => (
                Some(ProjectMeta { team_slug: team.to_string(), project_slug: project.to_string() }),
                rest,
            ),
            ["team", ..] => {
                return Err(DashboardError::InvalidArgument(format!(
                    "not a project contract path: {path}"
                )));
            },
            rest => (None, rest),
        };

        let (chain, contract_address, sub_page) = match rest {
            [chain, address] => (chain, address, SubPage::Overview),
            [chain, address, sub_page] => (chain, address, sub_page.parse()?),
            _ => {
                return Err(DashboardError::InvalidArgument(format!(
                    "not a contract path: {path}"
                )));
            },
        };

        Ok(Self {
            chain: chain.to_string(),
            contract_address: contract_address.to_string(),
            sub_page,
            project,
            is_logged_in,
        })
    }

    /// Chain segment parsed as an id or a slug.
    pub fn chain_ref(&self) -> ChainIdOrSlug {
        self.chain.parse().unwrap_or_else(|never| match never {})
    }

    /// Path builder for the route tree this request came through.
    pub fn paths(&self) -> Box<dyn PathBuilder + '_> {
        match &self.project {
            Some(project) => Box::new(ProjectPaths::new(&project.team_slug, &project.project_slug)),
            None => Box::new(DirectPaths),
        }
    }

    /// Contract landing page in this request's route tree.
    pub fn landing_path(&self) -> String {
        self.paths().landing(&self.chain, &self.contract_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() {
        for page in SubPage::ALL {
            assert_eq!(page.slug().parse::<SubPage>().unwrap(), page);
        }
        assert!("nope".parse::<SubPage>().is_err());
    }

    #[test]
    fn test_parse_direct_path() {
        let request = PageRequest::from_path("/polygon/0xabc/direct-listings", false).unwrap();
        assert_eq!(request.chain_ref(), ChainIdOrSlug::Slug("polygon".to_string()));
        assert_eq!(request.contract_address, "0xabc");
        assert_eq!(request.sub_page, SubPage::DirectListings);
        assert_eq!(request.project, None);
        assert_eq!(request.landing_path(), "/polygon/0xabc");
    }

    #[test]
    fn test_parse_project_path() {
        let request =
            PageRequest::from_path("/team/acme/web/contract/137/0xabc/nfts?tab=1", true).unwrap();
        assert_eq!(request.chain_ref(), ChainIdOrSlug::Id(137));
        assert_eq!(request.sub_page, SubPage::Nfts);
        assert!(request.is_logged_in);
        assert_eq!(
            request.project,
            Some(ProjectMeta { team_slug: "acme".to_string(), project_slug: "web".to_string() })
        );
        assert_eq!(request.landing_path(), "/team/acme/web/contract/137/0xabc");
    }

    #[test]
    fn test_landing_keeps_raw_chain_segment() {
        let request = PageRequest::from_path("/0137/0xabc/tokens", false).unwrap();
        assert_eq!(request.chain, "0137");
        assert_eq!(request.chain_ref(), ChainIdOrSlug::Id(137));
        assert_eq!(request.landing_path(), "/0137/0xabc");
    }

    #[test]
    fn test_parse_overview() {
        let request = PageRequest::from_path("/1/0xabc/", false).unwrap();
        assert_eq!(request.sub_page, SubPage::Overview);
    }

    #[test]
    fn test_parse_invalid_paths() {
        for path in ["/", "/1", "/1/0xabc/nfts/7", "/1/0xabc/unknown", "/team/acme/web/0xabc"] {
            assert!(PageRequest::from_path(path, false).is_err(), "{path}");
        }
    }

    #[test]
    fn test_overview_always_supported() {
        let flags = CapabilityFlags::default();
        let supported: Vec<_> = SubPage::ALL.into_iter().filter(|p| p.is_supported(&flags)).collect();
        assert_eq!(
            supported,
            vec![SubPage::Overview, SubPage::Explorer, SubPage::Events, SubPage::Code, SubPage::Sources]
        );
    }
}
