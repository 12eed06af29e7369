//! Public user information tools.

use rmcp::model::CallToolResult;

use etoro_client::api::users;
use etoro_client::GatewayClient;

use super::helpers::respond_body;
use super::params::{DiscoverUsersParams, UserPeriodParams, UsernameParams};

pub async fn get_user_profile(client: &GatewayClient, params: UsernameParams) -> CallToolResult {
    respond_body(users::get_user_profile(client, &params.username).await)
}

pub async fn get_user_performance(client: &GatewayClient, params: UsernameParams) -> CallToolResult {
    respond_body(users::get_user_performance(client, &params.username, None).await)
}

pub async fn get_user_performance_granular(
    client: &GatewayClient,
    params: UserPeriodParams,
) -> CallToolResult {
    respond_body(users::get_user_performance(client, &params.username, Some(params.period)).await)
}

pub async fn get_user_trades(client: &GatewayClient, params: UserPeriodParams) -> CallToolResult {
    respond_body(users::get_user_trades(client, &params.username, params.period).await)
}

pub async fn get_user_portfolio(client: &GatewayClient, params: UsernameParams) -> CallToolResult {
    respond_body(users::get_user_portfolio(client, &params.username).await)
}

pub async fn discover_users(client: &GatewayClient, params: DiscoverUsersParams) -> CallToolResult {
    respond_body(users::discover_users(client, &params.into()).await)
}
