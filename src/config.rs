use std::fmt;

use serde::Deserialize;

use crate::{Result, VoipMsError};

pub const DEFAULT_API_URL: &str = "https://voip.ms/api/v1/rest.php";

pub const ENV_API_URL: &str = "VOIPMS_API_URL";
pub const ENV_API_USERNAME: &str = "VOIPMS_API_USERNAME";
pub const ENV_API_PASSWORD: &str = "VOIPMS_API_PASSWORD";
pub const ENV_DEBUG: &str = "VOIPMS_DEBUG";

/// Connection settings for [`crate::VoipMsClient`]. Deserializable so it can
/// sit inside a caller's own config file.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_url")]
    pub url: String,
    pub username: String,
    pub password: String,
    /// Log raw requests and responses through `tracing`.
    #[serde(default)]
    pub debug: bool,
}

fn default_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ClientConfig {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            url: default_url(),
            username: username.to_string(),
            password: password.to_string(),
            debug: false,
        }
    }

    /// Read `VOIPMS_API_URL`, `VOIPMS_API_USERNAME`, `VOIPMS_API_PASSWORD`
    /// and `VOIPMS_DEBUG`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| VoipMsError::Config(format!("{key} is not set")))
        };
        let username = required(ENV_API_USERNAME)?;
        let password = required(ENV_API_PASSWORD)?;
        let url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(default_url);
        let debug = lookup(ENV_DEBUG).map(|v| parse_bool(&v)).unwrap_or(false);
        Ok(Self {
            url,
            username,
            password,
            debug,
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("debug", &self.debug)
            .finish()
    }
}

pub fn normalize_base_url(input: &str) -> String {
    input.trim().trim_end_matches('/').to_string()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_lookup_fills_defaults() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (ENV_API_USERNAME, "me@example.com"),
            (ENV_API_PASSWORD, "secret"),
        ]))
        .unwrap();
        assert_eq!(cfg.url, DEFAULT_API_URL);
        assert!(!cfg.debug);
    }

    #[test]
    fn env_lookup_normalizes_url_and_reads_debug() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, " http://localhost:8080/rest.php/ "),
            (ENV_API_USERNAME, "me@example.com"),
            (ENV_API_PASSWORD, "secret"),
            (ENV_DEBUG, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(cfg.url, "http://localhost:8080/rest.php");
        assert!(cfg.debug);
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_USERNAME, "me")])).unwrap_err();
        assert!(matches!(err, VoipMsError::Config(_)));
        assert_eq!(err.to_string(), "config: VOIPMS_API_PASSWORD is not set");
    }

    #[test]
    fn debug_output_hides_password() {
        let cfg = ClientConfig::new("me", "hunter2");
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{"username":"me","password":"pw"}"#).unwrap();
        assert_eq!(cfg.url, DEFAULT_API_URL);
        assert!(!cfg.debug);
    }
}
