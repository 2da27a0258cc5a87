use std::path::Path;

use anyhow::Context;
use dashboard_sdk::{
    chain::ChainMetadata,
    error::{ProbeError, SessionError},
    handle::{ContractHandle, NoSession, SessionProvider, StaticSession},
    probe::{AbiResolver, BytecodeAbiResolver, ResolvedAbi},
    router::PageRequest,
};

/// ABI source selected on the command line.
#[derive(Debug)]
pub(crate) enum CliAbiResolver {
    Bytecode(BytecodeAbiResolver),
    File(ResolvedAbi),
}

impl CliAbiResolver {
    pub(crate) fn new(api_key: Option<String>, abi: Option<&Path>) -> anyhow::Result<Self> {
        match abi {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading ABI from {}", path.display()))?;
                let abi = ResolvedAbi::from_json_abi(&json)
                    .with_context(|| format!("parsing ABI from {}", path.display()))?;
                Ok(Self::File(abi))
            },
            None => Ok(Self::Bytecode(BytecodeAbiResolver::new(api_key))),
        }
    }
}

impl AbiResolver for CliAbiResolver {
    async fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Result<ResolvedAbi, ProbeError> {
        match self {
            Self::Bytecode(resolver) => resolver.resolve(chain, contract).await,
            Self::File(abi) => Ok(abi.clone()),
        }
    }
}

/// Session token given on the command line, if any.
#[derive(Debug)]
pub(crate) enum CliSession {
    Token(StaticSession),
    Anonymous(NoSession),
}

impl CliSession {
    pub(crate) fn new(token: Option<String>) -> Self {
        match token {
            Some(token) => Self::Token(StaticSession(token)),
            None => Self::Anonymous(NoSession),
        }
    }
}

impl SessionProvider for CliSession {
    async fn session_token(&self, request: &PageRequest) -> Result<Option<String>, SessionError> {
        match self {
            Self::Token(session) => session.session_token(request).await,
            Self::Anonymous(session) => session.session_token(request).await,
        }
    }
}
