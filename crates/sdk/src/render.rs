//! Page view models.
//!
//! Renderers are thin: each turns a [`RenderPlan`] into a titled list of
//! rows. The local variant only carries what is known without probing.

use crate::{
    handle::Credential,
    probe::{CapabilityFlags, SelectorNames},
    router::{PageVariant, RenderPlan, SubPage},
};

/// One labelled value of a page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct ViewRow {
    #[cfg_attr(feature = "display", tabled(rename = "Field"))]
    pub label: String,
    #[cfg_attr(feature = "display", tabled(rename = "Value"))]
    pub value: String,
}

/// Rendered contract page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub page: SubPage,
    pub variant: PageVariant,
    pub rows: Vec<ViewRow>,
}

impl PageView {
    fn new(plan: &RenderPlan) -> Self {
        Self {
            title: format!("{} · {}", page_title(plan.page), plan.contract.address()),
            page: plan.page,
            variant: plan.variant,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, label: &str, value: impl ToString) {
        self.rows.push(ViewRow { label: label.to_string(), value: value.to_string() });
    }

    fn flag(&mut self, label: &str, value: bool) { self.push(label, if value { "yes" } else { "no" }); }

    /// Value of the first row labelled `label`.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|row| row.label == label).map(|row| row.value.as_str())
    }
}

pub fn page_title(page: SubPage) -> &'static str {
    match page {
        SubPage::Overview => "Overview",
        SubPage::Explorer => "Explorer",
        SubPage::Events => "Events",
        SubPage::Code => "Code",
        SubPage::Sources => "Sources",
        SubPage::Settings => "Settings",
        SubPage::Analytics => "Analytics",
        SubPage::Nfts => "NFTs",
        SubPage::Tokens => "Tokens",
        SubPage::ClaimConditions => "Claim Conditions",
        SubPage::Permissions => "Permissions",
        SubPage::Accounts => "Accounts",
        SubPage::Account => "Account",
        SubPage::AccountPermissions => "Account Permissions",
        SubPage::Proposals => "Proposals",
        SubPage::DirectListings => "Direct Listings",
        SubPage::EnglishAuctions => "English Auctions",
        SubPage::Split => "Split",
        SubPage::Modules => "Modules",
    }
}

/// Renders the page a plan describes.
pub fn render(plan: &RenderPlan) -> PageView {
    let mut view = PageView::new(plan);
    view.push("Chain", format!("{} ({})", plan.chain.name, plan.chain.chain_id));
    view.push("Contract", plan.contract.address());
    view.push(
        "Credential",
        match plan.contract.credential() {
            Credential::SecretKey(_) => "secret key",
            Credential::Session { .. } => "session",
            Credential::Anonymous { .. } => "anonymous",
        },
    );

    let flags = match (plan.variant, &plan.flags) {
        (PageVariant::Full, Some(flags)) => flags,
        _ => {
            view.push("Mode", "client-only");
            return view;
        },
    };

    match plan.page {
        SubPage::Overview => {
            view.push(
                "Standard",
                flags.supported_ercs.basic_type().map_or("-".to_string(), |t| t.to_string()),
            );
            if let Some(explorer) = plan.chain.explorers.first() {
                view.push(
                    "Explorer",
                    format!("{}/address/{}", explorer.url.trim_end_matches('/'), plan.contract.address()),
                );
            }
        },
        SubPage::Explorer | SubPage::Code | SubPage::Sources => {
            view.push("Function selectors", flags.function_selectors.len());
            for selector in &flags.function_selectors {
                view.push("Selector", selector);
            }
        },
        SubPage::Events => {
            if let Some(explorer) = plan.chain.explorers.first() {
                view.push("Explorer", &explorer.name);
            }
        },
        SubPage::Settings => render_settings(&mut view, flags),
        SubPage::Analytics => {
            render_analytics(&mut view, &plan.selector_names.clone().unwrap_or_default())
        },
        SubPage::Nfts | SubPage::Tokens => {
            view.push(
                "Standard",
                flags.supported_ercs.basic_type().map_or("-".to_string(), |t| t.to_string()),
            );
            view.flag("Mint", flags.is_mint_supported);
            view.flag("Claim conditions", flags.is_claim_conditions_supported);
        },
        SubPage::ClaimConditions => {
            view.push(
                "Standard",
                flags.supported_ercs.basic_type().map_or("-".to_string(), |t| t.to_string()),
            );
        },
        SubPage::Permissions => {
            view.flag("Permissions", flags.is_permissions_supported);
            view.flag("Enumerable", flags.is_permissions_enumerable_supported);
        },
        SubPage::Accounts => view.flag("Account factory", flags.is_account_factory),
        SubPage::Account | SubPage::AccountPermissions => {
            view.flag("Smart account", flags.is_account);
            view.flag("Account permissions", flags.is_account_permissions_supported);
        },
        SubPage::Proposals => view.flag("Vote", flags.is_vote_contract),
        SubPage::DirectListings | SubPage::EnglishAuctions => {
            view.flag("Direct listings", flags.is_direct_listing_supported);
            view.flag("English auctions", flags.is_english_auction_supported);
        },
        SubPage::Split => view.flag("Split", flags.is_split_supported),
        SubPage::Modules => view.flag("Modular core", flags.is_modular_core),
    }

    view
}

fn render_settings(view: &mut PageView, flags: &CapabilityFlags) {
    view.flag("Contract metadata", flags.is_contract_metadata_supported);
    view.flag("Primary sale", flags.is_primary_sale_supported);
    view.flag("Royalties", flags.is_royalties_supported);
    view.flag("Platform fees", flags.is_platform_fees_supported);
}

fn render_analytics(view: &mut PageView, names: &SelectorNames) {
    view.push("Write functions", names.write_functions.len());
    for (selector, name) in &names.write_functions {
        view.push(name, selector);
    }
    view.push("Events", names.events.len());
    for (topic, name) in &names.events {
        view.push(name, topic);
    }
}

#[cfg(feature = "display")]
impl std::fmt::Display for PageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;
        use tabled::{Table, settings::Style};

        writeln!(
            f,
            "{} {}",
            self.title.blue().bold(),
            match self.variant {
                PageVariant::LocalClientOnly => "(local)".yellow(),
                PageVariant::Full => Default::default(),
            }
        )?;
        let mut table = Table::new(&self.rows);
        table.with(Style::sharp());
        table.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use super::*;
    use crate::{address::ContractAddress, chain::ChainMetadata, handle::ContractHandle};

    fn plan(page: SubPage, variant: PageVariant, flags: Option<CapabilityFlags>) -> RenderPlan {
        RenderPlan {
            page,
            variant,
            chain: Arc::new(ChainMetadata::localhost()),
            contract: ContractHandle::new(
                1337,
                ContractAddress::normalize("0xabc"),
                Credential::Anonymous { client_id: "cid".to_string() },
            ),
            flags,
            selector_names: None,
            landing_path: "/localhost/0xabc".to_string(),
        }
    }

    #[test]
    fn test_local_variant() {
        let view = render(&plan(SubPage::Nfts, PageVariant::LocalClientOnly, None));
        assert_eq!(view.title, "NFTs · 0xabc");
        assert_eq!(view.value("Mode"), Some("client-only"));
        assert_eq!(view.value("Credential"), Some("anonymous"));
        assert_eq!(view.value("Mint"), None);
    }

    #[test]
    fn test_settings_page() {
        let flags = CapabilityFlags { is_royalties_supported: true, ..Default::default() };
        let view = render(&plan(SubPage::Settings, PageVariant::Full, Some(flags)));
        assert_eq!(view.value("Royalties"), Some("yes"));
        assert_eq!(view.value("Primary sale"), Some("no"));
        assert_eq!(view.value("Mode"), None);
    }

    #[test]
    fn test_analytics_page() {
        let mut plan = plan(SubPage::Analytics, PageVariant::Full, Some(CapabilityFlags::default()));
        plan.selector_names = Some(SelectorNames {
            write_functions: BTreeMap::from([("0xa9059cbb".to_string(), "transfer".to_string())]),
            events: BTreeMap::new(),
        });
        let view = render(&plan);
        assert_eq!(view.value("Write functions"), Some("1"));
        assert_eq!(view.value("transfer"), Some("0xa9059cbb"));
        assert_eq!(view.value("Events"), Some("0"));
    }
}
