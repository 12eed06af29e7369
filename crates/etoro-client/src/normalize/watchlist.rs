//! Watchlist normalization.

use serde::{Deserialize, Serialize};

use serde_json::Number;

use super::{lenient, lenient_seq, FlexibleId};

// ── Upstream shape ──

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistsResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub watchlists: Option<Vec<Watchlist>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    #[serde(default, deserialize_with = "lenient")]
    pub watchlist_id: Option<FlexibleId>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub watchlist_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_items: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_default: Option<bool>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Option<Vec<WatchlistItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(default, deserialize_with = "lenient")]
    pub item_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub market: Option<ItemMarket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMarket {
    #[serde(default, deserialize_with = "lenient")]
    pub symbol_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

// ── View ──

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistsView {
    pub watchlists: Vec<WatchlistView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchlist_id: Option<FlexibleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    pub items: Vec<WatchlistItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItemView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

// ── Transform ──

pub fn normalize_watchlists(response: WatchlistsResponse) -> WatchlistsView {
    WatchlistsView {
        watchlists: response
            .watchlists
            .unwrap_or_default()
            .into_iter()
            .map(normalize_watchlist)
            .collect(),
    }
}

fn normalize_watchlist(watchlist: Watchlist) -> WatchlistView {
    WatchlistView {
        watchlist_id: watchlist.watchlist_id,
        name: watchlist.name,
        kind: watchlist.watchlist_type,
        total_items: watchlist.total_items,
        is_default: watchlist.is_default,
        items: watchlist
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| {
                let market = item.market.unwrap_or_default();
                WatchlistItemView {
                    instrument_id: item.item_id,
                    symbol: market.symbol_name,
                    display_name: market.display_name,
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> WatchlistsView {
        normalize_watchlists(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_item_id_becomes_instrument_id() {
        let view = parse(json!({
            "watchlists": [{
                "watchlistId": "wl-1",
                "name": "Tech",
                "watchlistType": "Static",
                "totalItems": 1,
                "isDefault": true,
                "items": [{
                    "itemId": 100,
                    "itemType": "Instrument",
                    "itemRank": 0,
                    "market": {"symbolName": "AAPL", "displayName": "Apple", "exchangeId": 4}
                }]
            }]
        }));

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "watchlists": [{
                    "watchlistId": "wl-1",
                    "name": "Tech",
                    "type": "Static",
                    "totalItems": 1,
                    "isDefault": true,
                    "items": [{"instrumentId": 100, "symbol": "AAPL", "displayName": "Apple"}]
                }]
            })
        );
    }

    #[test]
    fn test_numeric_watchlist_id_and_missing_items() {
        let view = parse(json!({
            "watchlists": [{"watchlistId": 88, "name": "Empty"}]
        }));
        let watchlist = &view.watchlists[0];
        assert_eq!(watchlist.watchlist_id, Some(FlexibleId::Number(88)));
        assert!(watchlist.items.is_empty());
    }

    #[test]
    fn test_item_without_market() {
        let view = parse(json!({
            "watchlists": [{"items": [{"itemId": 5}]}]
        }));
        let item = &view.watchlists[0].items[0];
        assert_eq!(item.instrument_id, Some(5));
        assert!(item.symbol.is_none());
        assert!(item.display_name.is_none());
    }

    #[test]
    fn test_missing_watchlists_is_empty() {
        let view = parse(json!({}));
        assert!(view.watchlists.is_empty());
    }

    #[test]
    fn test_type_drift_degrades_per_field() {
        let view = parse(json!({
            "watchlists": [{
                "watchlistId": 12.5,
                "name": "Tech",
                "totalItems": "two",
                "isDefault": "yes",
                "items": [
                    {"itemId": 100, "itemRank": 1.5, "market": {"symbolName": "AAPL", "exchangeId": "NASDAQ"}},
                    {"itemId": "abc", "market": "n/a"},
                    7
                ]
            }]
        }));

        let watchlist = &view.watchlists[0];
        assert!(watchlist.watchlist_id.is_none());
        assert_eq!(watchlist.name.as_deref(), Some("Tech"));
        assert!(watchlist.total_items.is_none());
        assert!(watchlist.is_default.is_none());
        assert_eq!(watchlist.items.len(), 3);
        assert_eq!(watchlist.items[0].instrument_id, Some(100));
        assert_eq!(watchlist.items[0].symbol.as_deref(), Some("AAPL"));
        assert!(watchlist.items[1].instrument_id.is_none());
        assert!(watchlist.items[1].symbol.is_none());
        assert!(watchlist.items[2].instrument_id.is_none());
    }

    #[test]
    fn test_non_list_watchlists_is_empty() {
        let view = parse(json!({"watchlists": "none"}));
        assert!(view.watchlists.is_empty());
    }
}
