use serde::{Deserialize, Serialize};

/// Prefix length assumed when a range is written without `/n`.
pub const HOST_PREFIX_LEN: u8 = 32;

/// An IPv4 address as a big-endian `u32` (first dotted octet is the most significant byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Address(pub u32);

impl Ipv4Address {
    pub fn from_octets(octets: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(octets))
    }

    pub fn octets(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub fn to_bits(self) -> u32 {
        self.0
    }
}

impl From<std::net::Ipv4Addr> for Ipv4Address {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Self(u32::from(addr))
    }
}

impl From<Ipv4Address> for std::net::Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        std::net::Ipv4Addr::from(addr.0)
    }
}

impl std::fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

/// A base address plus prefix length. Host bits in `base` are kept as written;
/// matching masks them away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CidrRange {
    pub base: Ipv4Address,
    pub prefix_len: u8,
}

impl CidrRange {
    /// `prefix_len` of `None` means a single host (`/32`).
    pub fn new(base: Ipv4Address, prefix_len: Option<u8>) -> Self {
        Self {
            base,
            prefix_len: prefix_len.unwrap_or(HOST_PREFIX_LEN),
        }
    }

    pub fn host(base: Ipv4Address) -> Self {
        Self::new(base, None)
    }
}

impl std::fmt::Display for CidrRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

/// Ordered ranges fixed at configuration time. Duplicates and overlaps are harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allowlist {
    ranges: Vec<CidrRange>,
}

impl Allowlist {
    pub fn new(ranges: Vec<CidrRange>) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &[CidrRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl From<Vec<CidrRange>> for Allowlist {
    fn from(ranges: Vec<CidrRange>) -> Self {
        Self::new(ranges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthDecision {
    pub allowed: bool,
}

impl AuthDecision {
    pub const ALLOW: AuthDecision = AuthDecision { allowed: true };
    pub const DENY: AuthDecision = AuthDecision { allowed: false };
}
