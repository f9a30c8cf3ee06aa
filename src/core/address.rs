use crate::domain::model::Ipv4Address;
use crate::utils::error::{AuthError, Result};
use std::str::FromStr;

/// Parses dotted-decimal IPv4 text.
///
/// Exactly four components, each ASCII decimal digits with a value in `0..=255`.
/// Out-of-range octets such as `256` are rejected rather than truncated.
pub fn parse_ipv4(text: &str) -> Result<Ipv4Address> {
    let mut components = text.split('.');
    let mut value: u32 = 0;

    for _ in 0..4 {
        let octet = components
            .next()
            .and_then(parse_octet)
            .ok_or_else(|| AuthError::malformed(text))?;
        value = (value << 8) | u32::from(octet);
    }

    if components.next().is_some() {
        return Err(AuthError::malformed(text));
    }

    Ok(Ipv4Address(value))
}

fn parse_octet(component: &str) -> Option<u8> {
    // u8::from_str would also take a leading '+'
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

impl FromStr for Ipv4Address {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        parse_ipv4(s)
    }
}
