//! eToro MCP Server library.
//!
//! Provides the [`server::EtoroMcpServer`] MCP server handler, its CLI
//! configuration and tool parameter/response types. Used by the `etoro-mcp`
//! binary and available for integration testing.

pub mod config;
pub mod server;
pub mod tools;
