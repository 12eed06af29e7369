//! # eToro API Gateway Client
//!
//! Authenticated client for the eToro public REST API.
//!
//! - [`gateway`]: one HTTP exchange per call with credential and correlation
//!   headers, and uniform classification of the response
//! - [`routing`]: demo/real namespacing of trading paths
//! - [`normalize`]: pure reshaping of feed, portfolio, watchlist and search
//!   payloads into small stable views
//! - [`api`]: typed operations per resource, including the multi-step ones
//!   (search then enrich, username then feed, portfolio lookup then close)
//!
//! ```no_run
//! use etoro_client::{api, ClientConfig, GatewayClient};
//!
//! # async fn example() -> etoro_client::ClientResult<()> {
//! let config = ClientConfig::resolve(None, Some("demo"), Some("api".into()), Some("user".into()), None)?;
//! let client = GatewayClient::new(config)?;
//! let portfolio = api::trading::get_portfolio(&client).await?;
//! println!("{} open positions", portfolio.position_count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod request_id;
pub mod routing;

pub use config::{ClientConfig, Credentials, TradingMode, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use gateway::{classify_response, GatewayClient, RequestOptions, ResponseBody};
pub use request_id::{RequestIdGenerator, SequentialRequestIds, UuidRequestIds};
