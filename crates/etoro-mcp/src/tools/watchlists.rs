//! Watchlist tools.

use rmcp::model::CallToolResult;

use etoro_client::api::watchlists;
use etoro_client::GatewayClient;

use super::helpers::{respond, respond_body};
use super::params::{
    AddWatchlistItemsParams, CreateWatchlistParams, PublicWatchlistsParams,
    RemoveWatchlistItemParams, RenameWatchlistParams, WatchlistIdParams,
};

pub async fn get_watchlists(client: &GatewayClient) -> CallToolResult {
    respond(watchlists::get_watchlists(client).await)
}

pub async fn create_watchlist(client: &GatewayClient, params: CreateWatchlistParams) -> CallToolResult {
    respond_body(watchlists::create_watchlist(client, &params.name).await)
}

pub async fn delete_watchlist(client: &GatewayClient, params: WatchlistIdParams) -> CallToolResult {
    respond_body(watchlists::delete_watchlist(client, params.watchlist_id).await)
}

pub async fn rename_watchlist(client: &GatewayClient, params: RenameWatchlistParams) -> CallToolResult {
    respond_body(watchlists::rename_watchlist(client, params.watchlist_id, &params.name).await)
}

pub async fn add_watchlist_items(
    client: &GatewayClient,
    params: AddWatchlistItemsParams,
) -> CallToolResult {
    respond_body(
        watchlists::add_watchlist_items(client, params.watchlist_id, &params.instrument_ids).await,
    )
}

pub async fn remove_watchlist_item(
    client: &GatewayClient,
    params: RemoveWatchlistItemParams,
) -> CallToolResult {
    respond_body(
        watchlists::remove_watchlist_item(client, params.watchlist_id, params.instrument_id).await,
    )
}

pub async fn set_default_watchlist(
    client: &GatewayClient,
    params: WatchlistIdParams,
) -> CallToolResult {
    respond_body(watchlists::set_default_watchlist(client, params.watchlist_id).await)
}

pub async fn get_curated_lists(client: &GatewayClient) -> CallToolResult {
    respond_body(watchlists::get_curated_lists(client).await)
}

pub async fn get_public_watchlists(
    client: &GatewayClient,
    params: PublicWatchlistsParams,
) -> CallToolResult {
    respond_body(watchlists::get_public_watchlists(client, params.user_id).await)
}
