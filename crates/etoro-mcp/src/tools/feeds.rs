//! Social feed tools.

use rmcp::model::CallToolResult;

use etoro_client::api::{feeds, UserFeed};
use etoro_client::GatewayClient;

use super::helpers::{client_error_json, error_json, failure, respond, respond_body, success};
use super::params::{
    CreateCommentParams, CreatePostParams, InstrumentFeedParams, UserFeedParams, UserFeedResponse,
};

pub async fn get_instrument_feed(
    client: &GatewayClient,
    params: InstrumentFeedParams,
) -> CallToolResult {
    respond(feeds::get_instrument_feed(client, params.instrument_id, params.page()).await)
}

/// An unknown username is reported as a tool error, not an empty feed.
pub async fn get_user_feed(client: &GatewayClient, params: UserFeedParams) -> CallToolResult {
    match feeds::get_user_feed(client, &params.username, params.page()).await {
        Ok(UserFeed::Found { account_id, feed }) => success(&UserFeedResponse {
            username: params.username.trim().to_string(),
            account_id,
            feed,
        }),
        Ok(UserFeed::NotFound { username }) => failure(error_json(
            "user_not_found",
            &format!("User {username} not found"),
        )),
        Err(e) => failure(client_error_json(&e)),
    }
}

pub async fn create_post(client: &GatewayClient, params: CreatePostParams) -> CallToolResult {
    respond_body(feeds::create_post(client, &params.content, params.instrument_id).await)
}

pub async fn create_comment(client: &GatewayClient, params: CreateCommentParams) -> CallToolResult {
    respond_body(feeds::create_comment(client, &params.post_id, &params.content).await)
}
