use std::str::FromStr;

use alloy::primitives::Address;

/// Contract address as carried by a request.
///
/// Syntactically valid addresses are normalized to their EIP-55 checksum
/// form. Anything else, including mixed-case input with a wrong checksum,
/// is kept verbatim: some routes carry identifiers that are not addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{raw}")]
pub struct ContractAddress {
    raw: String,
    parsed: Option<Address>,
}

impl ContractAddress {
    pub fn normalize(input: &str) -> Self {
        match parse_address(input) {
            Some(address) => Self { raw: address.to_checksum(None), parsed: Some(address) },
            None => Self { raw: input.to_string(), parsed: None },
        }
    }

    /// Normalized form, or the original input when it is not an address.
    pub fn as_str(&self) -> &str { &self.raw }

    /// Parsed address, when the input was a valid one.
    pub fn address(&self) -> Option<Address> { self.parsed }

    pub fn is_valid(&self) -> bool { self.parsed.is_some() }
}

impl From<Address> for ContractAddress {
    fn from(address: Address) -> Self {
        Self { raw: address.to_checksum(None), parsed: Some(address) }
    }
}

fn parse_address(input: &str) -> Option<Address> {
    let hex = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X"))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        // Mixed case claims to be checksummed, so hold it to that.
        Address::parse_checksummed(format!("0x{hex}"), None).ok()
    } else {
        Address::from_str(hex).ok()
    }
}
