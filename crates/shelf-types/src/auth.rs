//! Authentication-method configuration.
//!
//! Exactly one method is active per instance. The stored JSON document
//! carries a `method` discriminator field, so the active variant survives
//! the round trip through storage and new methods can be added without
//! touching the storage contract.

use serde::{Deserialize, Serialize};

/// Configuration for the active authentication method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum AuthConfig {
    /// Username/password login against stored credentials.
    Json(JsonAuthConfig),
    /// Trust a header set by an authenticating reverse proxy.
    Proxy(ProxyAuthConfig),
    /// Delegate credential checks to an external command.
    Hook(HookAuthConfig),
    /// No authentication; every visitor acts as the default user.
    None,
}

impl AuthConfig {
    /// Returns the discriminator value stored for this variant.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Proxy(_) => "proxy",
            Self::Hook(_) => "hook",
            Self::None => "none",
        }
    }
}

/// Settings for username/password authentication.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonAuthConfig {
    /// Optional reCAPTCHA verification on login.
    pub recaptcha: Option<RecaptchaConfig>,
}

/// reCAPTCHA verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecaptchaConfig {
    /// Verification endpoint host.
    pub host: String,
    /// Site key.
    pub key: String,
    /// Shared secret.
    pub secret: String,
}

/// Settings for reverse-proxy header authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyAuthConfig {
    /// Header carrying the authenticated username.
    pub header: String,
}

/// Settings for external-command authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookAuthConfig {
    /// Command invoked with the candidate credentials.
    pub command: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_selects_variant() {
        let parsed: AuthConfig =
            serde_json::from_str(r#"{"method":"proxy","header":"X-Forwarded-User"}"#)
                .expect("should parse proxy config");
        assert_eq!(
            parsed,
            AuthConfig::Proxy(ProxyAuthConfig {
                header: "X-Forwarded-User".to_string(),
            })
        );
    }

    #[test]
    fn discriminator_survives_round_trip() {
        let configs = [
            AuthConfig::Json(JsonAuthConfig {
                recaptcha: Some(RecaptchaConfig {
                    host: "https://www.google.com/recaptcha/api/siteverify".to_string(),
                    key: "site-key".to_string(),
                    secret: "shared-secret".to_string(),
                }),
            }),
            AuthConfig::Proxy(ProxyAuthConfig {
                header: "Remote-User".to_string(),
            }),
            AuthConfig::Hook(HookAuthConfig {
                command: "/usr/local/bin/check-login".to_string(),
            }),
            AuthConfig::None,
        ];

        for config in configs {
            let json = serde_json::to_string(&config).expect("should serialize");
            assert!(
                json.contains(&format!(r#""method":"{}""#, config.method())),
                "document should carry the discriminator: {json}"
            );
            let back: AuthConfig = serde_json::from_str(&json).expect("should deserialize");
            assert_eq!(back, config);
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = serde_json::from_str::<AuthConfig>(r#"{"method":"ldap"}"#)
            .expect_err("unknown method should fail");
        assert!(err.to_string().contains("ldap"));
    }
}
