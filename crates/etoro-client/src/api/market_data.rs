//! Market data: instrument search, metadata, candles and rates.
//!
//! None of these endpoints depend on the trading mode.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{join_ids, non_zero, require_text, Query};
use crate::error::ClientResult;
use crate::gateway::{GatewayClient, ResponseBody};
use crate::normalize::search::{InstrumentsResponse, SearchResponse};
use crate::normalize::{normalize_search, Enrichment, SearchView};

const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;
const DEFAULT_CANDLE_COUNT: u32 = 10;
pub const MAX_CANDLE_COUNT: u32 = 1000;

/// Candle bar width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CandlePeriod {
    OneMinute,
    FiveMinutes,
    TenMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    FourHours,
    OneDay,
    OneWeek,
}

impl CandlePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "OneMinute",
            Self::FiveMinutes => "FiveMinutes",
            Self::TenMinutes => "TenMinutes",
            Self::FifteenMinutes => "FifteenMinutes",
            Self::ThirtyMinutes => "ThirtyMinutes",
            Self::OneHour => "OneHour",
            Self::FourHours => "FourHours",
            Self::OneDay => "OneDay",
            Self::OneWeek => "OneWeek",
        }
    }
}

impl fmt::Display for CandlePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candle ordering: `asc` is oldest first, `desc` newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CandleDirection {
    Asc,
    #[default]
    Desc,
}

impl CandleDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for CandleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument search request.
#[derive(Debug, Clone, Default)]
pub struct InstrumentSearch {
    pub query: String,
    /// Match the ticker exactly instead of free text.
    pub exact_symbol: bool,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Search instruments, then enrich the page with instrument metadata.
///
/// The metadata lookup is best effort: if it fails the search results are
/// still returned with `enrichment: "unavailable"`, and the failure is logged.
pub async fn search_instruments(
    client: &GatewayClient,
    search: &InstrumentSearch,
) -> ClientResult<SearchView> {
    let text = require_text(&search.query, "query")?;
    let query = if search.exact_symbol {
        Query::new().set("internalSymbolFull", text)
    } else {
        Query::new().set("searchText", text)
    };
    let path = query
        .set_opt("pageNumber", non_zero(search.page))
        .set(
            "pageSize",
            non_zero(search.page_size).unwrap_or(DEFAULT_SEARCH_PAGE_SIZE),
        )
        .to_path("/market-data/search");

    let page: SearchResponse = client.get(&path).await?.decode("search results")?;

    let ids = page.instrument_ids();
    let enrichment = if ids.is_empty() {
        Enrichment::NoInstrumentIds
    } else {
        match fetch_metadata(client, &ids).await {
            Ok(metadata) => Enrichment::from_metadata(metadata),
            Err(e) => {
                warn!(error = %e, ids = ids.len(), "Instrument metadata unavailable, using search values");
                Enrichment::unavailable(e.to_string())
            }
        }
    };

    Ok(normalize_search(page, &enrichment))
}

async fn fetch_metadata(client: &GatewayClient, ids: &[i64]) -> ClientResult<InstrumentsResponse> {
    get_instruments(client, ids)
        .await?
        .decode("instrument metadata")
}

pub async fn get_instruments(client: &GatewayClient, ids: &[i64]) -> ClientResult<ResponseBody> {
    let ids = join_ids(ids, "instrumentIds")?;
    client
        .get(&format!("/market-data/instruments?instrumentIds={ids}"))
        .await
}

pub async fn get_instrument_types(client: &GatewayClient) -> ClientResult<ResponseBody> {
    client.get("/market-data/instrument-types").await
}

pub async fn get_industries(client: &GatewayClient) -> ClientResult<ResponseBody> {
    client.get("/market-data/stocks-industries").await
}

pub async fn get_exchanges(client: &GatewayClient) -> ClientResult<ResponseBody> {
    client.get("/market-data/exchanges").await
}

/// OHLCV candles. `count` defaults to 10 and is capped at 1000.
pub async fn get_candles(
    client: &GatewayClient,
    instrument_id: i64,
    period: CandlePeriod,
    count: Option<u32>,
    direction: Option<CandleDirection>,
) -> ClientResult<ResponseBody> {
    let count = non_zero(count)
        .unwrap_or(DEFAULT_CANDLE_COUNT)
        .min(MAX_CANDLE_COUNT);
    let direction = direction.unwrap_or_default();
    client
        .get(&format!(
            "/market-data/instruments/{instrument_id}/history/candles/{direction}/{period}/{count}"
        ))
        .await
}

pub async fn get_closing_prices(client: &GatewayClient) -> ClientResult<ResponseBody> {
    client
        .get("/market-data/instruments/history/closing-price")
        .await
}

/// Live bid/ask rates.
pub async fn get_rates(client: &GatewayClient, ids: &[i64]) -> ClientResult<ResponseBody> {
    let ids = join_ids(ids, "instrumentIds")?;
    client
        .get(&format!("/market-data/instruments/rates?instrumentIds={ids}"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client_for;
    use crate::config::TradingMode;
    use crate::error::ClientError;
    use crate::normalize::search::EnrichmentStatus;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn apple_search(exact: bool) -> InstrumentSearch {
        InstrumentSearch {
            query: "AAPL".into(),
            exact_symbol: exact,
            page: None,
            page_size: None,
        }
    }

    #[tokio::test]
    async fn test_search_enriches_from_metadata() {
        let server = MockServer::start_async().await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/search")
                    .query_param("searchText", "AAPL")
                    .query_param("pageSize", "10");
                then.status(200).json_body(json!({
                    "page": 1, "pageSize": 10, "totalItems": 1,
                    "items": [{"instrumentId": 1001, "internalSymbolFull": "AAPL", "displayName": "Apple"}]
                }));
            })
            .await;
        let metadata = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/instruments")
                    .query_param("instrumentIds", "1001");
                then.status(200).json_body(json!({
                    "instrumentDisplayDatas": [
                        {"instrumentID": 1001, "symbolFull": "AAPL", "instrumentDisplayName": "Apple Inc", "exchangeID": 4}
                    ]
                }));
            })
            .await;

        let client = client_for(&server, TradingMode::Demo);
        let view = search_instruments(&client, &apple_search(false)).await.unwrap();

        search.assert_async().await;
        metadata.assert_async().await;
        assert_eq!(view.enrichment, EnrichmentStatus::Enriched);
        assert_eq!(view.items[0].display_name.as_deref(), Some("Apple Inc"));
        assert_eq!(view.items[0].exchange_id, Some(4));
    }

    #[tokio::test]
    async fn test_search_survives_metadata_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/search")
                    .query_param("internalSymbolFull", "AAPL");
                then.status(200).json_body(json!({
                    "items": [{"instrumentId": 1001, "internalSymbolFull": "AAPL", "displayName": "Apple"}]
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/market-data/instruments");
                then.status(503).body("maintenance");
            })
            .await;

        let client = client_for(&server, TradingMode::Demo);
        let view = search_instruments(&client, &apple_search(true)).await.unwrap();

        assert_eq!(view.enrichment, EnrichmentStatus::Unavailable);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].display_name.as_deref(), Some("Apple"));
    }

    #[tokio::test]
    async fn test_search_skips_metadata_without_ids() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/market-data/search");
                then.status(200)
                    .json_body(json!({"items": [{"instrumentId": 0, "displayName": "Index"}]}));
            })
            .await;
        let metadata = server
            .mock_async(|when, then| {
                when.method(GET).path("/market-data/instruments");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = client_for(&server, TradingMode::Demo);
        let view = search_instruments(&client, &apple_search(false)).await.unwrap();

        assert_eq!(view.enrichment, EnrichmentStatus::Skipped);
        metadata.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let server = MockServer::start_async().await;
        let client = client_for(&server, TradingMode::Demo);
        let search = InstrumentSearch {
            query: "  ".into(),
            ..InstrumentSearch::default()
        };
        let err = search_instruments(&client, &search).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_candles_path_defaults() {
        let server = MockServer::start_async().await;
        let candles = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/instruments/1001/history/candles/desc/OneDay/10");
                then.status(200).json_body(json!({"candles": []}));
            })
            .await;

        let client = client_for(&server, TradingMode::Real);
        get_candles(&client, 1001, CandlePeriod::OneDay, None, None)
            .await
            .unwrap();
        candles.assert_async().await;
    }

    #[tokio::test]
    async fn test_candles_count_is_capped() {
        let server = MockServer::start_async().await;
        let candles = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/instruments/7/history/candles/asc/FourHours/1000");
                then.status(200).json_body(json!({"candles": []}));
            })
            .await;

        let client = client_for(&server, TradingMode::Demo);
        get_candles(
            &client,
            7,
            CandlePeriod::FourHours,
            Some(5000),
            Some(CandleDirection::Asc),
        )
        .await
        .unwrap();
        candles.assert_async().await;
    }

    #[tokio::test]
    async fn test_rates_join_ids() {
        let server = MockServer::start_async().await;
        let rates = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/market-data/instruments/rates")
                    .query_param("instrumentIds", "1,2,3");
                then.status(200).json_body(json!({"rates": []}));
            })
            .await;

        let client = client_for(&server, TradingMode::Demo);
        let body = get_rates(&client, &[1, 2, 3]).await.unwrap();
        rates.assert_async().await;
        assert_eq!(body, ResponseBody::Json(json!({"rates": []})));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(CandlePeriod::FifteenMinutes.to_string(), "FifteenMinutes");
        assert_eq!(CandleDirection::default().to_string(), "desc");
        let parsed: CandleDirection = serde_json::from_value(json!("asc")).unwrap();
        assert_eq!(parsed, CandleDirection::Asc);
    }
}
