//! API gateway HTTP API request authorizer, payload format 2.0 with simple responses.
//!
//! Only `requestContext.http.sourceIp` decides the outcome; `requestContext.requestId`
//! is logged. Every other field of the event is ignored, and a missing source address
//! is treated as an empty string.

use crate::core::authorizer::Authorizer;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpContext {
    #[serde(default)]
    pub source_ip: Option<String>,
}

impl AuthorizerRequest {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn source_ip(&self) -> &str {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.http.as_ref())
            .and_then(|http| http.source_ip.as_deref())
            .unwrap_or("")
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|ctx| ctx.request_id.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthorizerResponse {
    #[serde(rename = "isAuthorized")]
    pub is_authorized: bool,
}

pub fn handle_request(authorizer: &Authorizer, request: &AuthorizerRequest) -> AuthorizerResponse {
    let decision = authorizer.authorize(request.source_ip());

    tracing::debug!(
        request_id = request.request_id().unwrap_or("-"),
        source_ip = request.source_ip(),
        allowed = decision.allowed,
        "Authorizer decision"
    );

    AuthorizerResponse {
        is_authorized: decision.allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Allowlist;

    fn authorizer(bypass: bool) -> Authorizer {
        Authorizer::new(Allowlist::parse(&["192.0.2.0/24"]).unwrap(), bypass)
    }

    #[test]
    fn test_source_ip_extracted() {
        let request = AuthorizerRequest::from_json(
            r#"{"version":"2.0","type":"REQUEST","requestContext":{"requestId":"abc","http":{"method":"GET","sourceIp":"192.0.2.10"}}}"#,
        )
        .unwrap();
        assert_eq!(request.source_ip(), "192.0.2.10");
        assert_eq!(request.request_id(), Some("abc"));
        assert!(handle_request(&authorizer(false), &request).is_authorized);
    }

    #[test]
    fn test_missing_source_ip_denied() {
        let request = AuthorizerRequest::from_json("{}").unwrap();
        assert_eq!(request.source_ip(), "");
        assert!(!handle_request(&authorizer(false), &request).is_authorized);
        assert!(handle_request(&authorizer(true), &request).is_authorized);
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(AuthorizerResponse {
            is_authorized: false,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "isAuthorized": false }));
    }
}
