//! Gateway configuration: operating mode, credentials and endpoint settings.
//!
//! Values are resolved once at startup by the caller (the MCP binary reads CLI
//! flags then environment) and stay fixed for the lifetime of the client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ClientError;

/// Default upstream origin, including the API version prefix.
pub const DEFAULT_BASE_URL: &str = "https://public-api.etoro.com/api/v1";

/// Trading environment selector.
///
/// Decides which URL namespace trading execution and trading info requests
/// use. Market data, feeds, watchlists and user info are mode-independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    /// Virtual-money account.
    #[default]
    Demo,
    /// Live account.
    Real,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Real => "real",
        }
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(Self::Demo),
            "real" => Ok(Self::Real),
            other => Err(ClientError::config_error(format!(
                "Invalid trading mode: {other}. Must be \"demo\" or \"real\"."
            ))),
        }
    }
}

/// API key and user key. Either may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    user_key: Option<String>,
}

impl Credentials {
    /// Build credentials, treating empty or whitespace-only strings as absent.
    pub fn new(api_key: Option<String>, user_key: Option<String>) -> Self {
        Self {
            api_key: non_empty(api_key),
            user_key: non_empty(user_key),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn user_key(&self) -> Option<&str> {
        self.user_key.as_deref()
    }
}

// Keys never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_key", &self.user_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub mode: TradingMode,
    pub credentials: Credentials,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: TradingMode::default(),
            credentials: Credentials::default(),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Default per-request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    /// Build a config from already-resolved raw values.
    ///
    /// `mode` is the raw mode string (`None` means "use the default"). An
    /// unrecognized value is a fatal configuration error.
    pub fn resolve(
        base_url: Option<String>,
        mode: Option<&str>,
        api_key: Option<String>,
        user_key: Option<String>,
        timeout_ms: Option<u64>,
    ) -> Result<Self, ClientError> {
        let mode = match mode.map(str::trim).filter(|m| !m.is_empty()) {
            Some(raw) => raw.parse()?,
            None => TradingMode::default(),
        };

        let base_url = non_empty(base_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url,
            mode,
            credentials: Credentials::new(api_key, user_key),
            timeout_ms: timeout_ms.unwrap_or(Self::DEFAULT_TIMEOUT_MS),
        })
    }

    /// Log the startup summary: mode at info, each missing key at warn.
    pub fn log_summary(&self) {
        info!(trading_mode = %self.mode, base_url = %self.base_url, "Gateway configured");
        if self.credentials.api_key().is_none() {
            warn!("No API key configured. Set ETORO_API_KEY or pass --api-key.");
        }
        if self.credentials.user_key().is_none() {
            warn!("No user key configured. Set ETORO_USER_KEY or pass --user-key.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("demo".parse::<TradingMode>().unwrap(), TradingMode::Demo);
        assert_eq!("real".parse::<TradingMode>().unwrap(), TradingMode::Real);
    }

    #[test]
    fn test_mode_parse_invalid_is_config_error() {
        let err = "paper".parse::<TradingMode>().unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
        assert!(err.to_string().contains("paper"));
    }

    #[test]
    fn test_mode_parse_is_case_sensitive() {
        assert!("Real".parse::<TradingMode>().is_err());
    }

    #[test]
    fn test_resolve_defaults_to_demo() {
        let config = ClientConfig::resolve(None, None, None, None, None).unwrap();
        assert_eq!(config.mode, TradingMode::Demo);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, ClientConfig::DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_resolve_rejects_invalid_mode() {
        let result = ClientConfig::resolve(None, Some("live"), None, None, None);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_resolve_strips_trailing_slash() {
        let config =
            ClientConfig::resolve(Some("http://localhost:9000/".into()), None, None, None, None)
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_empty_keys_are_absent() {
        let creds = Credentials::new(Some(String::new()), Some("  ".into()));
        assert_eq!(creds.api_key(), None);
        assert_eq!(creds.user_key(), None);
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = Credentials::new(Some("secret-api".into()), Some("secret-user".into()));
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
