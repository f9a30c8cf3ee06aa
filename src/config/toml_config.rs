use crate::config::{AuthorizerConfig, DEFAULT_BYPASS_STAGE};
use crate::domain::model::Allowlist;
use crate::utils::error::{AuthError, Result};
use crate::utils::validation::{validate_non_empty_list, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Allowlist file, e.g.
///
/// ```toml
/// bypass_stage = "build"
/// allowlist = ["51.149.8.0/25", "3.9.56.99"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub allowlist: Allowlist,
    pub bypass_stage: Option<String>,
}

impl TomlConfig {
    /// Loads and validates an allowlist file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuthError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses without validating.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuthError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AuthError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn into_config(self, stage: Option<String>) -> AuthorizerConfig {
        AuthorizerConfig {
            allowlist: self.allowlist,
            stage,
            bypass_stage: self
                .bypass_stage
                .unwrap_or_else(|| DEFAULT_BYPASS_STAGE.to_string()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("allowlist", self.allowlist.ranges())?;
        if let Some(stage) = &self.bypass_stage {
            validate_non_empty_string("bypass_stage", stage)?;
        }
        Ok(())
    }
}
