//! Contract handles and the factory producing them per request.

use crate::{address::ContractAddress, chain::ChainMetadata, error::SessionError, router::PageRequest};

/// Credential a contract handle talks to the chain with.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub enum Credential {
    /// Privileged process-wide key.
    SecretKey(#[debug("<redacted>")] String),
    /// Caller's own authenticated session.
    Session {
        client_id: String,
        #[debug("<redacted>")]
        token: String,
    },
    /// Public client id only.
    Anonymous { client_id: String },
}

impl Credential {
    pub fn is_privileged(&self) -> bool { matches!(self, Credential::SecretKey(_)) }
}

/// `(chain, address, credential)` triple used to read or write a contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    chain_id: u64,
    address: ContractAddress,
    credential: Credential,
}

impl ContractHandle {
    pub fn new(chain_id: u64, address: ContractAddress, credential: Credential) -> Self {
        Self { chain_id, address, credential }
    }

    pub fn chain_id(&self) -> u64 { self.chain_id }

    pub fn address(&self) -> &ContractAddress { &self.address }

    pub fn credential(&self) -> &Credential { &self.credential }
}

/// Server- and caller-credentialed handles to the same contract.
#[derive(Clone, Debug)]
pub struct HandlePair {
    pub server: ContractHandle,
    pub client: ContractHandle,
}

/// Source of the caller's session token.
pub trait SessionProvider {
    /// Token of the authenticated caller, `None` for anonymous requests.
    fn session_token(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<Option<String>, SessionError>> + Send;
}

/// Session provider for callers that are never authenticated.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSession;

impl SessionProvider for NoSession {
    async fn session_token(&self, _request: &PageRequest) -> Result<Option<String>, SessionError> {
        Ok(None)
    }
}

/// Session provider holding one fixed token, handed out to logged-in
/// requests only.
#[derive(Clone, derive_more::Debug)]
pub struct StaticSession(#[debug("<redacted>")] pub String);

impl SessionProvider for StaticSession {
    async fn session_token(&self, request: &PageRequest) -> Result<Option<String>, SessionError> {
        if self.0.is_empty() {
            return Err(SessionError::Malformed);
        }
        Ok(request.is_logged_in.then(|| self.0.clone()))
    }
}

/// Builds the server/client handle pair for each request.
#[derive(Clone, derive_more::Debug)]
pub struct HandleFactory<S> {
    #[debug("<redacted>")]
    secret_key: String,
    client_id: String,
    sessions: S,
}

impl<S: SessionProvider> HandleFactory<S> {
    pub fn new(secret_key: impl Into<String>, client_id: impl Into<String>, sessions: S) -> Self {
        Self { secret_key: secret_key.into(), client_id: client_id.into(), sessions }
    }

    /// Builds both handles. A failed session lookup degrades the client
    /// handle to anonymous.
    pub async fn build(&self, chain: &ChainMetadata, address: &str, request: &PageRequest) -> HandlePair {
        let address = ContractAddress::normalize(address);
        if !address.is_valid() {
            tracing::debug!(address = %address, "contract address passed through unnormalized");
        }

        let client_credential = match self.sessions.session_token(request).await {
            Ok(Some(token)) => Credential::Session { client_id: self.client_id.clone(), token },
            Ok(None) => Credential::Anonymous { client_id: self.client_id.clone() },
            Err(err) => {
                tracing::warn!(%err, "session lookup failed, using anonymous credential");
                Credential::Anonymous { client_id: self.client_id.clone() }
            },
        };

        HandlePair {
            server: ContractHandle::new(
                chain.chain_id,
                address.clone(),
                Credential::SecretKey(self.secret_key.clone()),
            ),
            client: ContractHandle::new(chain.chain_id, address, client_credential),
        }
    }

    /// Handle for the caller only; used where no privileged path is allowed.
    pub async fn build_client(
        &self,
        chain: &ChainMetadata,
        address: &str,
        request: &PageRequest,
    ) -> ContractHandle {
        self.build(chain, address, request).await.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::SubPage;

    fn request(is_logged_in: bool) -> PageRequest {
        PageRequest {
            chain: "1".to_string(),
            contract_address: "0xdac17f958d2ee523a2206206994597c13d831ec7".to_string(),
            sub_page: SubPage::Overview,
            project: None,
            is_logged_in,
        }
    }

    #[tokio::test]
    async fn test_build_handles() {
        let factory = HandleFactory::new("sk", "cid", StaticSession("jwt".to_string()));
        let chain = ChainMetadata { chain_id: 1, ..ChainMetadata::localhost() };
        let pair = factory.build(&chain, &request(true).contract_address, &request(true)).await;

        assert_eq!(pair.server.chain_id(), 1);
        assert!(pair.server.credential().is_privileged());
        assert_eq!(pair.server.address(), pair.client.address());
        assert_eq!(pair.client.address().as_str(), "0xdAC17F958D2ee523a2206206994597C13D831ec7");
        assert_eq!(
            pair.client.credential(),
            &Credential::Session { client_id: "cid".to_string(), token: "jwt".to_string() }
        );
    }

    #[tokio::test]
    async fn test_anonymous_when_logged_out() {
        let factory = HandleFactory::new("sk", "cid", StaticSession("jwt".to_string()));
        let chain = ChainMetadata::localhost();
        let client = factory.build_client(&chain, "0xabc", &request(false)).await;
        assert_eq!(client.credential(), &Credential::Anonymous { client_id: "cid".to_string() });
        assert_eq!(client.address().as_str(), "0xabc");
    }

    #[tokio::test]
    async fn test_session_failure_degrades_to_anonymous() {
        let factory = HandleFactory::new("sk", "cid", StaticSession(String::new()));
        let chain = ChainMetadata::localhost();
        let pair = factory.build(&chain, "0xabc", &request(true)).await;
        assert!(!pair.client.credential().is_privileged());
        assert_eq!(pair.client.credential(), &Credential::Anonymous { client_id: "cid".to_string() });
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", Credential::SecretKey("super-secret".to_string()));
        assert!(!rendered.contains("super-secret"));
    }
}
