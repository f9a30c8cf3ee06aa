use crate::core::address::parse_ipv4;
use crate::domain::model::{Allowlist, AuthDecision, CidrRange};
use crate::domain::ports::AllowlistProvider;
use crate::utils::error::{AuthError, Result};

/// Admission check for a single source address against a fixed allowlist.
///
/// Holds no mutable state, so one instance can be shared by every concurrent request.
#[derive(Debug, Clone)]
pub struct Authorizer {
    allowlist: Allowlist,
    bypass: bool,
}

impl Authorizer {
    pub fn new(allowlist: Allowlist, bypass: bool) -> Self {
        Self { allowlist, bypass }
    }

    pub fn from_provider<C: AllowlistProvider>(config: &C) -> Self {
        Self::new(config.allowlist().clone(), config.bypass())
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// Like [`Authorizer::authorize`] but hands a malformed address back to the caller.
    pub fn try_authorize(&self, source_ip: &str) -> Result<AuthDecision> {
        // bypass must win before the address is even looked at
        if self.bypass {
            tracing::debug!("Build stage bypass active, allowing '{}'", source_ip);
            return Ok(AuthDecision::ALLOW);
        }

        let address = parse_ipv4(source_ip)?;

        match self.allowlist.first_match(address) {
            Some(range) => {
                tracing::debug!("Allowing {} (matched {})", address, range);
                Ok(AuthDecision::ALLOW)
            }
            None => {
                tracing::debug!("Denying {}: no allowlist range matched", address);
                Ok(AuthDecision::DENY)
            }
        }
    }

    /// Fail-closed: an address that does not parse is denied.
    pub fn authorize(&self, source_ip: &str) -> AuthDecision {
        match self.try_authorize(source_ip) {
            Ok(decision) => decision,
            Err(AuthError::MalformedAddress { input }) => {
                tracing::warn!("Denying malformed source address '{}'", input);
                AuthDecision::DENY
            }
            Err(e) => {
                tracing::warn!("Denying '{}' after unexpected error: {}", source_ip, e);
                AuthDecision::DENY
            }
        }
    }
}

/// Stateless form of [`Authorizer::authorize`] for callers holding a plain slice of ranges.
pub fn authorize(source_ip: &str, allowlist: &[CidrRange], bypass: bool) -> AuthDecision {
    if bypass {
        return AuthDecision::ALLOW;
    }

    match parse_ipv4(source_ip) {
        Ok(address) => AuthDecision {
            allowed: allowlist.iter().any(|range| range.contains(address)),
        },
        Err(e) => {
            tracing::warn!("{}", e);
            AuthDecision::DENY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorizer(entries: &[&str], bypass: bool) -> Authorizer {
        Authorizer::new(Allowlist::parse(entries).unwrap(), bypass)
    }

    #[test]
    fn test_bypass_skips_parsing() {
        let auth = authorizer(&["10.0.0.0/8"], true);
        assert!(auth.authorize("").allowed);
        assert!(auth.authorize("not-an-ip").allowed);
        assert!(auth.try_authorize("999.1.1.1").unwrap().allowed);
    }

    #[test]
    fn test_try_authorize_propagates_malformed() {
        let auth = authorizer(&["10.0.0.0/8"], false);
        assert!(matches!(
            auth.try_authorize("not-an-ip"),
            Err(AuthError::MalformedAddress { .. })
        ));
    }

    #[test]
    fn test_authorize_fails_closed() {
        let auth = authorizer(&["0.0.0.0/0"], false);
        assert!(!auth.authorize("not-an-ip").allowed);
        assert!(!auth.authorize("").allowed);
        assert!(!auth.authorize("256.0.0.1").allowed);
    }

    #[test]
    fn test_synthetic_allowlist() {
        let auth = authorizer(&["192.0.2.0/30", "198.51.100.7"], false);
        assert!(auth.authorize("192.0.2.3").allowed);
        assert!(!auth.authorize("192.0.2.4").allowed);
        assert!(auth.authorize("198.51.100.7").allowed);
        assert!(!auth.authorize("198.51.100.8").allowed);
    }

    #[test]
    fn test_free_function_matches_struct() {
        let list = Allowlist::parse(&["192.0.2.0/30"]).unwrap();
        let auth = Authorizer::new(list.clone(), false);
        for ip in ["192.0.2.1", "192.0.2.9", "junk", ""] {
            assert_eq!(authorize(ip, list.ranges(), false), auth.authorize(ip));
        }
        assert!(authorize("junk", list.ranges(), true).allowed);
    }
}
