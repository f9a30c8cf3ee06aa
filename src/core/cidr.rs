use crate::core::address::parse_ipv4;
use crate::domain::model::{Allowlist, CidrRange, Ipv4Address, HOST_PREFIX_LEN};
use crate::utils::error::{AuthError, Result};
use std::str::FromStr;

/// Top `prefix_len` bits set. `0` gives an empty mask, `32` and above give all ones.
pub fn prefix_mask(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        p if p >= HOST_PREFIX_LEN => u32::MAX,
        p => u32::MAX << (HOST_PREFIX_LEN - p),
    }
}

pub fn in_range(address: Ipv4Address, range: &CidrRange) -> bool {
    match range.prefix_len {
        HOST_PREFIX_LEN => address == range.base,
        0 => true,
        p => {
            let mask = prefix_mask(p);
            (address.to_bits() & mask) == (range.base.to_bits() & mask)
        }
    }
}

/// Parses `a.b.c.d/n`, or `a.b.c.d` for a single host.
pub fn parse_cidr(text: &str) -> Result<CidrRange> {
    let (base_text, prefix_text) = match text.split_once('/') {
        Some((base, prefix)) => (base, Some(prefix)),
        None => (text, None),
    };

    let base = parse_ipv4(base_text).map_err(|_| AuthError::InvalidCidr {
        input: text.to_string(),
        reason: format!("'{}' is not a dotted-decimal IPv4 address", base_text),
    })?;

    let prefix_len = prefix_text
        .map(|p| parse_prefix_len(text, p))
        .transpose()?;

    Ok(CidrRange::new(base, prefix_len))
}

fn parse_prefix_len(input: &str, prefix: &str) -> Result<u8> {
    let invalid = || AuthError::InvalidCidr {
        input: input.to_string(),
        reason: format!(
            "prefix length '{}' must be an integer between 0 and {}",
            prefix, HOST_PREFIX_LEN
        ),
    };

    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match prefix.parse::<u8>() {
        Ok(p) if p <= HOST_PREFIX_LEN => Ok(p),
        _ => Err(invalid()),
    }
}

impl FromStr for CidrRange {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        parse_cidr(s)
    }
}

impl TryFrom<String> for CidrRange {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self> {
        parse_cidr(&value)
    }
}

impl From<CidrRange> for String {
    fn from(range: CidrRange) -> Self {
        range.to_string()
    }
}

impl CidrRange {
    pub fn contains(&self, address: Ipv4Address) -> bool {
        in_range(address, self)
    }
}

impl Allowlist {
    /// Parses every entry, stopping at the first one that is not a valid range.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        entries
            .iter()
            .map(|entry| parse_cidr(entry.as_ref().trim()))
            .collect::<Result<Vec<_>>>()
            .map(Allowlist::new)
    }

    /// Scans in order and stops at the first matching range.
    pub fn contains(&self, address: Ipv4Address) -> bool {
        self.ranges().iter().any(|range| in_range(address, range))
    }

    pub fn first_match(&self, address: Ipv4Address) -> Option<&CidrRange> {
        self.ranges().iter().find(|range| in_range(address, range))
    }
}
