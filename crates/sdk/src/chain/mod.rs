//! Static chain metadata and its lookup indices.

mod registry;
pub mod sync;

use std::{fmt::Display, str::FromStr};

pub use registry::ChainRegistry;
use serde::{Deserialize, Serialize};

/// Chain id of the designated local development chain.
pub const LOCAL_CHAIN_ID: u64 = 1337;

/// Placeholder RPC templates carry for the API key.
pub const API_KEY_PLACEHOLDER: &str = "${THIRDWEB_API_KEY}";

/// Native currency of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Block explorer of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explorer {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub standard: String,
}

/// Chain logo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIcon {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
}

/// Hosted service availability flag, e.g. `insight`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainService {
    pub service: String,
    pub enabled: bool,
}

/// Static record describing an EVM chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainMetadata {
    pub chain_id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub short_name: String,
    /// RPC URL templates, in order of preference.
    #[serde(default)]
    pub rpc: Vec<String>,
    pub native_currency: NativeCurrency,
    #[serde(default)]
    pub explorers: Vec<Explorer>,
    #[serde(default)]
    pub faucets: Vec<String>,
    #[serde(default, rename = "infoURL", skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ChainIcon>,
    #[serde(default)]
    pub services: Vec<ChainService>,
    #[serde(default)]
    pub testnet: bool,
}

impl ChainMetadata {
    /// Record of the local development chain (`localhost`, chain id 1337).
    pub fn localhost() -> Self {
        Self {
            chain_id: LOCAL_CHAIN_ID,
            name: "Localhost".to_string(),
            slug: "localhost".to_string(),
            chain: "ETH".to_string(),
            short_name: "local".to_string(),
            rpc: vec!["http://127.0.0.1:8545".to_string()],
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            explorers: Vec::new(),
            faucets: Vec::new(),
            info_url: None,
            icon: None,
            services: Vec::new(),
            testnet: true,
        }
    }

    /// First RPC endpoint usable with the given API key.
    ///
    /// The `${THIRDWEB_API_KEY}` placeholder is substituted when a key is
    /// given; templates left with any unresolved `${...}` are skipped.
    pub fn rpc_url(&self, api_key: Option<&str>) -> Option<String> {
        self.rpc.iter().find_map(|template| {
            let url = match api_key {
                Some(key) => template.replace(API_KEY_PLACEHOLDER, key),
                None => template.clone(),
            };
            (!url.contains("${")).then_some(url)
        })
    }

    /// Whether the hosted service is enabled on this chain.
    pub fn service_enabled(&self, service: &str) -> bool {
        self.services.iter().any(|s| s.enabled && s.service == service)
    }
}

/// Chain reference as it appears in a request path: numeric id or slug.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainIdOrSlug {
    Id(u64),
    Slug(String),
}

impl FromStr for ChainIdOrSlug {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => ChainIdOrSlug::Id(id),
            Err(_) => ChainIdOrSlug::Slug(s.to_string()),
        })
    }
}

impl Display for ChainIdOrSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainIdOrSlug::Id(id) => write!(f, "{id}"),
            ChainIdOrSlug::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

#[cfg(feature = "display")]
impl Display for ChainMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use colored::Colorize;

        writeln!(
            f,
            "{} ({}) #{}{}",
            self.name.bold(),
            self.slug,
            self.chain_id,
            if self.testnet { " testnet".yellow() } else { Default::default() },
        )?;
        writeln!(
            f,
            "    Currency: {} ({}, {} decimals)",
            self.native_currency.name, self.native_currency.symbol, self.native_currency.decimals
        )?;
        for rpc in &self.rpc {
            writeln!(f, "    RPC: {rpc}")?;
        }
        for explorer in &self.explorers {
            writeln!(f, "    Explorer: {} {}", explorer.name, explorer.url)?;
        }
        Ok(())
    }
}
