use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Malformed IPv4 address: '{input}'")]
    MalformedAddress { input: String },

    #[error("Invalid CIDR range '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AuthError {
    pub fn malformed(input: &str) -> Self {
        AuthError::MalformedAddress {
            input: input.to_string(),
        }
    }

    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AuthError::MalformedAddress { input } => {
                format!("'{}' is not a dotted-decimal IPv4 address", input)
            }
            AuthError::InvalidCidr { input, .. } => {
                format!("Allowlist entry '{}' is not a valid CIDR range", input)
            }
            AuthError::IoError(e) => format!("Could not read a file: {}", e),
            AuthError::SerializationError(e) => format!("Could not parse JSON input: {}", e),
            AuthError::ConfigError { message } => format!("Configuration problem: {}", message),
            AuthError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AuthError::MalformedAddress { .. } => {
                "Use four dot-separated decimal octets between 0 and 255, e.g. 192.0.2.10"
            }
            AuthError::InvalidCidr { .. } => {
                "Write ranges as a.b.c.d/n with a prefix length between 0 and 32"
            }
            AuthError::IoError(_) => "Check that the file exists and is readable",
            AuthError::SerializationError(_) => {
                "Make sure the event is a valid API gateway authorizer payload"
            }
            AuthError::ConfigError { .. } => {
                "Check ALLOWLIST, ALLOWLIST_FILE and the TOML allowlist file"
            }
            AuthError::InvalidConfigValueError { .. } => {
                "Fix the named configuration field and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_input() {
        let err = AuthError::malformed("not-an-ip");
        assert_eq!(err.to_string(), "Malformed IPv4 address: 'not-an-ip'");
        assert!(err.user_friendly_message().contains("not-an-ip"));
    }

    #[test]
    fn test_invalid_cidr_display() {
        let err = AuthError::InvalidCidr {
            input: "10.0.0.0/33".to_string(),
            reason: "prefix length must be between 0 and 32".to_string(),
        };
        assert!(err.to_string().contains("10.0.0.0/33"));
        assert!(err.to_string().contains("between 0 and 32"));
    }
}
