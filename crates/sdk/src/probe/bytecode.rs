use std::collections::BTreeSet;

use alloy::{
    primitives::{Address, B256, Selector},
    providers::{Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};

use super::{AbiResolver, ResolvedAbi};
use crate::{chain::ChainMetadata, error::ProbeError, handle::ContractHandle};

const PUSH1: u8 = 0x60;
const PUSH4: u8 = 0x63;
const PUSH32: u8 = 0x7f;

/// EIP-1167 minimal proxy runtime code around the 20-byte implementation.
const MINIMAL_PROXY_PREFIX: [u8; 10] = [0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d, 0x3d, 0x36, 0x3d, 0x73];
const MINIMAL_PROXY_SUFFIX: [u8; 15] =
    [0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3];

/// Resolves contract interfaces from deployed bytecode over the chain's RPC.
///
/// Every `PUSH4` operand is taken as a candidate function selector and every
/// `PUSH32` operand as a candidate event topic. This over-approximates the
/// interface, which is fine for presence checks.
#[derive(Clone, derive_more::Debug, Default)]
pub struct BytecodeAbiResolver {
    #[debug("{:?}", api_key.as_ref().map(|_| "<redacted>"))]
    api_key: Option<String>,
}

impl BytecodeAbiResolver {
    pub fn new(api_key: Option<String>) -> Self { Self { api_key } }
}

impl AbiResolver for BytecodeAbiResolver {
    async fn resolve(
        &self,
        chain: &ChainMetadata,
        contract: &ContractHandle,
    ) -> Result<ResolvedAbi, ProbeError> {
        let address = contract
            .address()
            .address()
            .ok_or_else(|| ProbeError::InvalidAddress(contract.address().to_string()))?;
        let url: Url = chain
            .rpc_url(self.api_key.as_deref())
            .and_then(|url| url.parse().ok())
            .ok_or(ProbeError::NoRpcEndpoint(chain.chain_id))?;
        let provider = ProviderBuilder::new().connect_http(url);

        let mut code = provider.get_code_at(address).await?;
        if let Some(implementation) = minimal_proxy_target(&code) {
            tracing::debug!(%address, %implementation, "following minimal proxy");
            code = provider.get_code_at(implementation).await?;
        }
        if code.is_empty() {
            return Err(ProbeError::NoCode { chain_id: chain.chain_id, address: address.to_string() });
        }

        let (functions, events) = scan_bytecode(&code);
        Ok(ResolvedAbi::from_selectors(functions, events))
    }
}

/// Implementation address of an EIP-1167 minimal proxy.
pub fn minimal_proxy_target(code: &[u8]) -> Option<Address> {
    let rest = code.strip_prefix(&MINIMAL_PROXY_PREFIX[..])?;
    let (implementation, suffix) = rest.split_at_checked(20)?;
    (suffix == MINIMAL_PROXY_SUFFIX).then(|| Address::from_slice(implementation))
}

/// Extracts candidate function selectors and event topics from bytecode.
pub fn scan_bytecode(code: &[u8]) -> (BTreeSet<Selector>, BTreeSet<B256>) {
    let mut functions = BTreeSet::new();
    let mut events = BTreeSet::new();

    let mut pc = 0;
    while pc < code.len() {
        let op = code[pc];
        if !(PUSH1..=PUSH32).contains(&op) {
            pc += 1;
            continue;
        }
        let size = (op - PUSH1 + 1) as usize;
        // Truncated push data at the end of the code (metadata) is ignored.
        if let Some(data) = code.get(pc + 1..pc + 1 + size) {
            match op {
                PUSH4 if data != [0; 4] && data != [0xff; 4] => {
                    functions.insert(Selector::from_slice(data));
                },
                PUSH32 => {
                    events.insert(B256::from_slice(data));
                },
                _ => (),
            }
        }
        pc += 1 + size;
    }

    (functions, events)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, hex};
    use alloy_sol_types::{SolCall, SolEvent};

    use super::*;
    use crate::abi::{IERC20, IERC721};

    #[test]
    fn test_scan_dispatcher() {
        let mut code = vec![0x60, 0x80, 0x60, 0x40, 0x52]; // PUSH1 0x80 PUSH1 0x40 MSTORE
        for selector in [IERC721::tokenURICall::SELECTOR, IERC721::ownerOfCall::SELECTOR] {
            code.push(0x80); // DUP1
            code.push(PUSH4);
            code.extend_from_slice(&selector);
            code.extend_from_slice(&[0x14, 0x61, 0x00, 0x10, 0x57]); // EQ PUSH2 JUMPI
        }
        code.push(PUSH4);
        code.extend_from_slice(&[0xff; 4]); // mask, not a selector
        code.push(PUSH32);
        code.extend_from_slice(IERC20::Transfer::SIGNATURE_HASH.as_slice());
        code.push(0xa3); // LOG3

        let (functions, events) = scan_bytecode(&code);
        assert_eq!(
            functions,
            BTreeSet::from([
                Selector::from(IERC721::tokenURICall::SELECTOR),
                Selector::from(IERC721::ownerOfCall::SELECTOR),
            ])
        );
        assert_eq!(events, BTreeSet::from([IERC20::Transfer::SIGNATURE_HASH]));
    }

    #[test]
    fn test_scan_skips_push_data() {
        // PUSH5 whose payload contains a PUSH4 opcode byte.
        let code = [0x64, 0x63, 0x01, 0x02, 0x03, 0x04, 0x00];
        let (functions, events) = scan_bytecode(&code);
        assert!(functions.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_scan_truncated_push() {
        let code = [PUSH4, 0x01, 0x02];
        assert!(scan_bytecode(&code).0.is_empty());
    }

    #[test]
    fn test_minimal_proxy_target() {
        let code = hex!(
            "363d3d373d3d3d363d73bebebebebebebebebebebebebebebebebebebebe5af43d82803e903d91602b57fd5bf3"
        );
        assert_eq!(
            minimal_proxy_target(&code),
            Some(address!("0xbebebebebebebebebebebebebebebebebebebebe"))
        );
        assert_eq!(minimal_proxy_target(&code[..44]), None);
        assert_eq!(minimal_proxy_target(&[0x60, 0x80]), None);
    }

    #[tokio::test]
    async fn test_resolve_rejects_non_address() {
        use crate::{address::ContractAddress, handle::Credential};

        let resolver = BytecodeAbiResolver::default();
        let contract = ContractHandle::new(
            1,
            ContractAddress::normalize("not-an-address"),
            Credential::Anonymous { client_id: String::new() },
        );
        let err = resolver.resolve(&ChainMetadata::localhost(), &contract).await.unwrap_err();
        assert!(matches!(err, ProbeError::InvalidAddress(_)));
    }
}
