//! MCP tool implementations, parameter and response types.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool registration.
//! Tool functions take the shared gateway client and a param struct and
//! return a `CallToolResult`; failures set the error flag and carry a
//! structured JSON message.

pub mod feeds;
pub mod helpers;
pub mod market_data;
pub mod params;
pub mod trading;
pub mod users;
pub mod watchlists;

pub use params::*;
