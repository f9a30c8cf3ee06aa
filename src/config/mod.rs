#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::domain::model::Allowlist;
use crate::domain::ports::AllowlistProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_list, validate_non_empty_string, Validate};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Deployment stage that switches the address check off.
pub const DEFAULT_BYPASS_STAGE: &str = "build";

/// Ranges used when no allowlist is configured.
pub const DEFAULT_ALLOWLIST: &[&str] = &[
    "217.196.229.77/32",
    "217.196.229.79/32",
    "217.196.229.80/31",
    "51.149.8.0/25",
    "51.149.8.128/29",
    "213.86.153.211/32",
    "213.86.153.212/31",
    "213.86.153.214/32",
    "213.86.153.235/32",
    "213.86.153.236/31",
    "213.86.153.231/32",
    "3.9.227.33/32",
    "18.132.149.145/32",
    "51.142.180.30/32",
    "185.120.72.241/32",
    "185.120.72.242/31",
    "3.9.56.99/32",
    // AWS CodeBuild public egress, eu-west-2
    "35.176.92.32/29",
    "18.169.230.200/29",
];

pub fn default_allowlist() -> Result<Allowlist> {
    Allowlist::parse(DEFAULT_ALLOWLIST)
}

/// Resolved settings, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AuthorizerConfig {
    pub allowlist: Allowlist,
    /// Current deployment stage, if any.
    pub stage: Option<String>,
    pub bypass_stage: String,
}

impl AuthorizerConfig {
    pub fn new(allowlist: Allowlist) -> Self {
        Self {
            allowlist,
            stage: None,
            bypass_stage: DEFAULT_BYPASS_STAGE.to_string(),
        }
    }

    pub fn with_stage(mut self, stage: Option<String>) -> Self {
        self.stage = stage;
        self
    }
}

impl AllowlistProvider for AuthorizerConfig {
    fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    fn bypass(&self) -> bool {
        self.stage.as_deref() == Some(self.bypass_stage.as_str())
    }
}

impl Validate for AuthorizerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("allowlist", self.allowlist.ranges())?;
        validate_non_empty_string("bypass_stage", &self.bypass_stage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlist_parses() {
        let list = default_allowlist().unwrap();
        assert_eq!(list.len(), DEFAULT_ALLOWLIST.len());
    }

    #[test]
    fn test_bypass_only_for_exact_stage() {
        let config = AuthorizerConfig::new(default_allowlist().unwrap());
        assert!(!config.bypass());
        assert!(config.clone().with_stage(Some("build".into())).bypass());
        assert!(!config.clone().with_stage(Some("Build".into())).bypass());
        assert!(!config.with_stage(Some("production".into())).bypass());
    }

    #[test]
    fn test_empty_allowlist_fails_validation() {
        let config = AuthorizerConfig::new(Allowlist::default());
        assert!(config.validate().is_err());
    }
}
