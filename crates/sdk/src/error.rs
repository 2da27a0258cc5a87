use thiserror::Error;

/// Top-level error of the dashboard SDK.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors building, loading or synchronizing the chain registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("chain not found: {0}")]
    NotFound(String),

    #[error("duplicate chain id {0}")]
    DuplicateChainId(u64),

    #[error("slug {slug:?} is shared by chain {first} and chain {second}")]
    DuplicateSlug { slug: String, first: u64, second: u64 },

    #[error("registry file name is not a chain id: {0}")]
    InvalidFileName(String),

    #[error("file {file} holds chain {actual}, expected {expected}")]
    FileMismatch { file: String, expected: u64, actual: u64 },

    #[error("invalid chain record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors resolving a contract interface.
///
/// These never reach the router caller: a failed probe degrades to
/// all-false capability flags.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("not a contract address: {0}")]
    InvalidAddress(String),

    #[error("no usable RPC endpoint for chain {0}")]
    NoRpcEndpoint(u64),

    #[error("no bytecode at {address} on chain {chain_id}")]
    NoCode { chain_id: u64, address: String },

    #[error("transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("invalid ABI: {0}")]
    InvalidAbi(String),
}

/// Errors looking up the caller session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed session token")]
    Malformed,
}
