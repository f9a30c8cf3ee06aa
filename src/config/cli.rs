use crate::config::lambda::parse_list;
use crate::config::toml_config::TomlConfig;
use crate::config::{default_allowlist, AuthorizerConfig};
use crate::utils::error::Result;
use crate::utils::validation::validate_path;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ip-authorizer")]
#[command(about = "Check IPv4 addresses against a CIDR allowlist")]
pub struct CliConfig {
    /// Addresses to check
    #[arg(required_unless_present = "event")]
    pub addresses: Vec<String>,

    /// TOML allowlist file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Comma-separated CIDR ranges, used instead of the config file
    #[arg(long, conflicts_with = "config")]
    pub allow: Option<String>,

    /// Deployment stage; the bypass stage allows every address
    #[arg(long, env = "ENVIRONMENT")]
    pub stage: Option<String>,

    /// Stage name that switches the check off (default: build)
    #[arg(long, env = "BYPASS_STAGE")]
    pub bypass_stage: Option<String>,

    /// API gateway authorizer event (JSON) to evaluate
    #[arg(long)]
    pub event: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// `--allow` wins over `--config`, which wins over the compiled-in list.
    /// `--bypass-stage` wins over the file's `bypass_stage`.
    pub fn resolve(&self) -> Result<AuthorizerConfig> {
        let stage = self.stage.clone().filter(|s| !s.trim().is_empty());

        let mut config = if let Some(list) = &self.allow {
            AuthorizerConfig::new(parse_list(list)?).with_stage(stage)
        } else if let Some(path) = &self.config {
            validate_path("config", path)?;
            tracing::info!("📁 Loading allowlist from: {}", path);
            TomlConfig::from_file(path)?.into_config(stage)
        } else {
            AuthorizerConfig::new(default_allowlist()?).with_stage(stage)
        };

        if let Some(bypass_stage) = self.bypass_stage.clone().filter(|s| !s.trim().is_empty()) {
            config.bypass_stage = bypass_stage;
        }

        Ok(config)
    }
}
