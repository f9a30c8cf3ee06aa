pub mod address;
pub mod authorizer;
pub mod cidr;

pub use crate::domain::model::{Allowlist, AuthDecision, CidrRange, Ipv4Address};
pub use crate::domain::ports::AllowlistProvider;
pub use crate::utils::error::Result;
