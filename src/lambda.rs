use ip_authorizer::utils::{logger, validation::Validate};
use ip_authorizer::{handle_request, Authorizer, AuthorizerConfig, AuthorizerRequest, AuthorizerResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    authorizer: &Authorizer,
    event: LambdaEvent<AuthorizerRequest>,
) -> Result<AuthorizerResponse, Error> {
    Ok(handle_request(authorizer, &event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時讀取一次配置
    let config = AuthorizerConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let authorizer = Authorizer::from_provider(&config);
    tracing::info!(
        ranges = authorizer.allowlist().len(),
        bypass = authorizer.is_bypassed(),
        "Authorizer ready"
    );

    let authorizer = &authorizer;
    run(service_fn(move |event: LambdaEvent<AuthorizerRequest>| async move {
        function_handler(authorizer, event).await
    }))
    .await
}
