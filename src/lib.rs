pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::gateway::{handle_request, AuthorizerRequest, AuthorizerResponse};
pub use crate::config::{toml_config::TomlConfig, AuthorizerConfig};
pub use crate::core::authorizer::{authorize, Authorizer};
pub use crate::domain::model::{Allowlist, AuthDecision, CidrRange, Ipv4Address};
pub use crate::utils::error::{AuthError, Result};
