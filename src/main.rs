use anyhow::Context;
use clap::Parser;
use ip_authorizer::utils::{logger, validation::Validate};
use ip_authorizer::{handle_request, Authorizer, AuthorizerRequest, CliConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ip-authorizer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let authorizer = Authorizer::from_provider(&settings);
    tracing::info!(
        "✅ Loaded {} allowlist ranges (bypass: {})",
        authorizer.allowlist().len(),
        authorizer.is_bypassed()
    );

    let mut all_allowed = true;

    if let Some(path) = &config.event {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file '{}'", path))?;
        let request = AuthorizerRequest::from_json(&payload)
            .with_context(|| format!("Failed to parse event file '{}'", path))?;
        let response = handle_request(&authorizer, &request);
        all_allowed &= response.is_authorized;
        println!("{}", serde_json::to_string(&response)?);
    }

    // 逐一檢查位址
    for address in &config.addresses {
        let decision = authorizer.authorize(address);
        all_allowed &= decision.allowed;
        println!(
            "{} {}",
            address,
            if decision.allowed { "allowed" } else { "denied" }
        );
    }

    if !all_allowed {
        std::process::exit(2);
    }

    Ok(())
}
