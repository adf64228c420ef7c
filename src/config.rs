use crate::error::{ReportError, Result};
use log::warn;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";
pub const BASE_URL_VAR: &str = "PERPLEXITY_BASE_URL";
pub const TIMEOUT_VAR: &str = "PERPLEXITY_TIMEOUT_SECS";
pub const PASSWORD_VAR: &str = "RIA_REPORT_PASSWORD";

/// Connection settings for the chat-completion endpoint.
///
/// Generation parameters are not part of this; they are fixed per request.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// No timeout is applied when `None`.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ReportError::Config(format!("{} must be set", API_KEY_VAR)))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ReportError::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_VAR, raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// Keeps the key out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Plaintext password check guarding report generation.
pub struct AccessGate {
    expected: String,
}

impl AccessGate {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        std::env::var(PASSWORD_VAR)
            .map(Self::new)
            .map_err(|_| ReportError::Config(format!("{} must be set", PASSWORD_VAR)))
    }

    pub fn verify(&self, input: &str) -> Result<()> {
        if input == self.expected {
            Ok(())
        } else {
            warn!("Rejected report request with an incorrect password");
            Err(ReportError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.completions_url(),
            "https://api.perplexity.ai/chat/completions"
        );
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("key").with_base_url("http://127.0.0.1:1234/");
        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:1234/chat/completions"
        );
    }

    #[test]
    fn test_from_lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://localhost:9000"),
            (TIMEOUT_VAR, "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ClientConfig::new("pplx-secret"));
        assert!(!rendered.contains("pplx-secret"));
    }

    #[test]
    fn test_access_gate() {
        let gate = AccessGate::new("hunter2");
        assert!(gate.verify("hunter2").is_ok());
        assert!(matches!(
            gate.verify("hunter3"),
            Err(ReportError::Unauthorized)
        ));
        assert!(gate.verify("").is_err());
    }
}
