use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dashboard_sdk::chain::{ChainIdOrSlug, LOCAL_CHAIN_ID};

pub(crate) const DEFAULT_REGISTRY_DIR: &str = "crates/sdk/chains";
pub(crate) const DEFAULT_CLIENT_ID: &str = "dashboard-cli";

#[derive(Parser, Debug)]
#[command(name = "dashboard-cli", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Registry directory of `{chain_id}.json` files to load instead of the
    /// embedded registry
    #[arg(long, global = true)]
    pub registry_dir: Option<PathBuf>,

    /// Chain ID of the local development chain, never probed
    #[arg(long, global = true, default_value_t = LOCAL_CHAIN_ID)]
    pub local_chain_id: u64,

    /// Server secret key for privileged contract handles
    #[arg(long, global = true, env = "DASHBOARD_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Public client ID for caller contract handles
    #[arg(long, global = true, env = "DASHBOARD_CLIENT_ID", default_value_t = DEFAULT_CLIENT_ID.to_string())]
    pub client_id: String,

    /// Caller session token, used for logged-in requests
    #[arg(long, global = true, env = "DASHBOARD_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// API key substituted into the registry RPC URL templates
    #[arg(long, global = true, env = "THIRDWEB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds to wait for contract resolution
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Log filter, e.g. `info` or `dashboard_sdk=debug` [overridden by
    /// `RUST_LOG`]
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a chain, or list all chains of the registry
    Chain {
        /// Chain ID or slug [default: list all]
        chain: Option<ChainIdOrSlug>,
    },
    /// Probe a contract for supported features
    Probe {
        /// Chain ID or slug
        chain: ChainIdOrSlug,

        /// Contract address
        address: String,

        /// JSON ABI file to use instead of the deployed bytecode
        #[arg(long)]
        abi: Option<PathBuf>,

        /// Also resolve write function and event names
        #[arg(long, default_value_t = false)]
        names: bool,
    },
    /// Route a contract page path and render the outcome
    Route {
        /// Page path, e.g. `/polygon/0x.../nfts` or
        /// `/team/{team}/{project}/contract/{chain}/{address}/nfts`
        path: String,

        /// Treat the request as coming from a logged-in caller
        #[arg(long, default_value_t = false)]
        logged_in: bool,

        /// JSON ABI file to use instead of the deployed bytecode
        #[arg(long)]
        abi: Option<PathBuf>,
    },
    /// Maintain the static chain registry
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommands {
    /// Regenerate the registry directory from the upstream chain list
    Sync {
        /// Upstream chain list, URL or file
        source: String,

        /// Registry directory to write [default: `--registry-dir` or
        /// crates/sdk/chains]
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check that every registry file parses back to the chain ID it is
    /// named after
    Verify,
}
