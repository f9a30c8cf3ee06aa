use crate::config::toml_config::TomlConfig;
use crate::config::{default_allowlist, AuthorizerConfig, DEFAULT_BYPASS_STAGE};
use crate::domain::model::Allowlist;
use crate::utils::error::Result;
use crate::utils::validation::validate_path;
use std::env;

pub const STAGE_VAR: &str = "ENVIRONMENT";
pub const BYPASS_STAGE_VAR: &str = "BYPASS_STAGE";
pub const ALLOWLIST_VAR: &str = "ALLOWLIST";
pub const ALLOWLIST_FILE_VAR: &str = "ALLOWLIST_FILE";

impl AuthorizerConfig {
    /// Reads the process environment. Called once per cold start.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// `ALLOWLIST` wins over `ALLOWLIST_FILE`, which wins over the compiled-in list.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let stage = var(STAGE_VAR);
        let mut bypass_stage = var(BYPASS_STAGE_VAR);

        let allowlist = if let Some(list) = var(ALLOWLIST_VAR) {
            tracing::debug!("Loading allowlist from {}", ALLOWLIST_VAR);
            parse_list(&list)?
        } else if let Some(path) = var(ALLOWLIST_FILE_VAR) {
            validate_path(ALLOWLIST_FILE_VAR, &path)?;
            tracing::debug!("Loading allowlist from file {}", path);
            let file = TomlConfig::from_file(&path)?;
            if bypass_stage.is_none() {
                bypass_stage = file.bypass_stage.clone();
            }
            file.allowlist
        } else {
            default_allowlist()?
        };

        Ok(Self {
            allowlist,
            stage,
            bypass_stage: bypass_stage.unwrap_or_else(|| DEFAULT_BYPASS_STAGE.to_string()),
        })
    }
}

/// Comma-separated CIDR list; blank entries are skipped.
pub fn parse_list(list: &str) -> Result<Allowlist> {
    let entries: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();
    Allowlist::parse(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::AllowlistProvider;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AuthorizerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.allowlist, default_allowlist().unwrap());
        assert_eq!(config.bypass_stage, DEFAULT_BYPASS_STAGE);
        assert!(!config.bypass());
    }

    #[test]
    fn test_build_stage_bypasses() {
        let config = AuthorizerConfig::from_lookup(lookup(&[(STAGE_VAR, "build")])).unwrap();
        assert!(config.bypass());
    }

    #[test]
    fn test_custom_bypass_stage() {
        let config = AuthorizerConfig::from_lookup(lookup(&[
            (STAGE_VAR, "ci"),
            (BYPASS_STAGE_VAR, "ci"),
        ]))
        .unwrap();
        assert!(config.bypass());
    }

    #[test]
    fn test_allowlist_from_env() {
        let config = AuthorizerConfig::from_lookup(lookup(&[(
            ALLOWLIST_VAR,
            " 192.0.2.0/24 , ,198.51.100.1",
        )]))
        .unwrap();
        assert_eq!(config.allowlist.len(), 2);
        assert_eq!(config.allowlist.ranges()[1].to_string(), "198.51.100.1/32");
    }

    #[test]
    fn test_bad_allowlist_env_is_an_error() {
        let result = AuthorizerConfig::from_lookup(lookup(&[(ALLOWLIST_VAR, "192.0.2.0/40")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_allowlist_file_with_nul_rejected() {
        let err = AuthorizerConfig::from_lookup(lookup(&[(ALLOWLIST_FILE_VAR, "allow\0list.toml")]))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::AuthError::InvalidConfigValueError { ref field, .. }
                if field == ALLOWLIST_FILE_VAR
        ));
    }

    #[test]
    fn test_missing_allowlist_file_is_an_error() {
        let result = AuthorizerConfig::from_lookup(lookup(&[(
            ALLOWLIST_FILE_VAR,
            "/definitely/not/here.toml",
        )]));
        assert!(result.is_err());
    }
}
