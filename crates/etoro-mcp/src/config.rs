//! Command-line and environment configuration.
//!
//! Every flag falls back to an `ETORO_*` environment variable; a flag given
//! on the command line wins.

use std::fmt;

use clap::Parser;
use etoro_client::{ClientConfig, ClientResult};

#[derive(Parser)]
#[command(name = "etoro-mcp", author, version, about)]
pub struct Cli {
    /// eToro public API key, sent as `x-user-key`
    #[arg(long, env = "ETORO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// eToro user key, sent as `x-api-key`
    #[arg(long, env = "ETORO_USER_KEY", hide_env_values = true)]
    pub user_key: Option<String>,

    /// Trading environment: "demo" or "real" (default demo)
    #[arg(long, env = "ETORO_TRADING_MODE")]
    pub trading_mode: Option<String>,

    /// Upstream origin including the version prefix
    #[arg(long, env = "ETORO_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "ETORO_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Cli")
            .field("api_key", &redact(&self.api_key))
            .field("user_key", &redact(&self.user_key))
            .field("trading_mode", &self.trading_mode)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Cli {
    /// Resolve into a client configuration. An unknown trading mode is fatal.
    pub fn into_client_config(self) -> ClientResult<ClientConfig> {
        ClientConfig::resolve(
            self.base_url,
            self.trading_mode.as_deref(),
            self.api_key,
            self.user_key,
            self.timeout_ms,
        )
    }
}
