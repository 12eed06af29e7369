//! Watchlist management and curated lists.

use serde::Serialize;

use super::{require_text, Query};
use crate::error::{ClientError, ClientResult};
use crate::gateway::{GatewayClient, ResponseBody, NO_BODY};
use crate::normalize::watchlist::WatchlistsResponse;
use crate::normalize::{normalize_watchlists, WatchlistsView};

/// Item type sent when removing instruments from a watchlist.
pub const ITEM_TYPE_INSTRUMENT: &str = "Instrument";

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WatchlistItemRef {
    item_id: i64,
    item_type: &'static str,
}

fn watchlist_name(name: &str) -> ClientResult<&str> {
    let name = require_text(name, "name")?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ClientError::invalid_input(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

pub async fn get_watchlists(client: &GatewayClient) -> ClientResult<WatchlistsView> {
    let response: WatchlistsResponse = client.get("/watchlists").await?.decode("watchlists")?;
    Ok(normalize_watchlists(response))
}

pub async fn create_watchlist(client: &GatewayClient, name: &str) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set("name", watchlist_name(name)?)
        .to_path("/watchlists");
    client.post(&path, NO_BODY).await
}

pub async fn delete_watchlist(client: &GatewayClient, watchlist_id: i64) -> ClientResult<ResponseBody> {
    client
        .delete(&format!("/watchlists/{watchlist_id}"), NO_BODY)
        .await
}

pub async fn rename_watchlist(
    client: &GatewayClient,
    watchlist_id: i64,
    name: &str,
) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set("newName", watchlist_name(name)?)
        .to_path(&format!("/watchlists/{watchlist_id}"));
    client.put(&path, NO_BODY).await
}

/// Append instruments. The body is a bare JSON array of ids.
pub async fn add_watchlist_items(
    client: &GatewayClient,
    watchlist_id: i64,
    instrument_ids: &[i64],
) -> ClientResult<ResponseBody> {
    if instrument_ids.is_empty() {
        return Err(ClientError::invalid_input(
            "instrument_ids must contain at least one id",
        ));
    }
    client
        .post(&format!("/watchlists/{watchlist_id}/items"), Some(instrument_ids))
        .await
}

/// Remove one instrument. Upstream takes a DELETE with an item array body.
pub async fn remove_watchlist_item(
    client: &GatewayClient,
    watchlist_id: i64,
    instrument_id: i64,
) -> ClientResult<ResponseBody> {
    let body = [WatchlistItemRef {
        item_id: instrument_id,
        item_type: ITEM_TYPE_INSTRUMENT,
    }];
    client
        .delete(&format!("/watchlists/{watchlist_id}/items"), Some(&body))
        .await
}

pub async fn set_default_watchlist(
    client: &GatewayClient,
    watchlist_id: i64,
) -> ClientResult<ResponseBody> {
    client
        .put(
            &format!("/watchlists/setUserSelectedUserDefault/{watchlist_id}"),
            NO_BODY,
        )
        .await
}

pub async fn get_curated_lists(client: &GatewayClient) -> ClientResult<ResponseBody> {
    client.get("/curated-lists").await
}

pub async fn get_public_watchlists(client: &GatewayClient, user_id: i64) -> ClientResult<ResponseBody> {
    client.get(&format!("/watchlists/public/{user_id}")).await
}
