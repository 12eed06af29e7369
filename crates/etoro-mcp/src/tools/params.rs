//! Parameter and response structs for all MCP tools.
//!
//! Arguments use camelCase names on the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use etoro_client::api::{
    CandleDirection, CandlePeriod, FeedPage, InstrumentSearch, OrderTerms, Period, UserDiscovery,
};
use etoro_client::normalize::FeedView;

// ── search_instruments ──

/// Parameters for the `search_instruments` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchInstrumentsParams {
    #[schemars(description = "Search keyword (e.g. 'AAPL', 'Bitcoin', 'Tesla')")]
    pub query: String,
    #[schemars(
        description = "If true, search by exact ticker symbol (e.g. 'AAPL') instead of free text"
    )]
    pub exact_symbol: Option<bool>,
    #[schemars(description = "Page number (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Results per page (default 10)")]
    pub page_size: Option<u32>,
}

impl From<SearchInstrumentsParams> for InstrumentSearch {
    fn from(params: SearchInstrumentsParams) -> Self {
        Self {
            query: params.query,
            exact_symbol: params.exact_symbol.unwrap_or(false),
            page: params.page,
            page_size: params.page_size,
        }
    }
}

// ── get_instruments / get_rates ──

/// Parameters for tools that take a list of instrument ids.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentIdsParams {
    #[schemars(description = "Instrument IDs (max 100)")]
    pub instrument_ids: Vec<i64>,
}

// ── get_candles ──

/// Parameters for the `get_candles` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandlesParams {
    #[schemars(description = "Instrument ID")]
    pub instrument_id: i64,
    #[schemars(description = "Candle period")]
    pub period: CandlePeriod,
    #[schemars(description = "Number of candles to return (max 1000, default 10)")]
    pub count: Option<u32>,
    #[schemars(
        description = "Sort direction: 'asc' (oldest first) or 'desc' (newest first). Default: desc"
    )]
    pub direction: Option<CandleDirection>,
}

// ── open_position_by_amount ──

/// Parameters for the `open_position_by_amount` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenByAmountParams {
    #[schemars(description = "Instrument ID to trade")]
    pub instrument_id: i64,
    #[schemars(description = "Investment amount in USD")]
    pub amount: f64,
    #[schemars(description = "true = Buy/Long, false = Sell/Short")]
    pub is_buy: bool,
    #[schemars(description = "Leverage multiplier (e.g. 1, 2, 5, 10). Default 1")]
    pub leverage: Option<u32>,
    #[schemars(description = "Stop loss price")]
    pub stop_loss_rate: Option<f64>,
    #[schemars(description = "Take profit price")]
    pub take_profit_rate: Option<f64>,
}

impl OpenByAmountParams {
    pub fn terms(&self) -> OrderTerms {
        OrderTerms {
            instrument_id: self.instrument_id,
            is_buy: self.is_buy,
            leverage: self.leverage,
            stop_loss_rate: self.stop_loss_rate,
            take_profit_rate: self.take_profit_rate,
        }
    }
}

// ── open_position_by_units ──

/// Parameters for the `open_position_by_units` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenByUnitsParams {
    #[schemars(description = "Instrument ID to trade")]
    pub instrument_id: i64,
    #[schemars(description = "Number of units (shares, coins, etc.) to buy or sell")]
    pub units: f64,
    #[schemars(description = "true = Buy/Long, false = Sell/Short")]
    pub is_buy: bool,
    #[schemars(description = "Leverage multiplier. Default 1")]
    pub leverage: Option<u32>,
    #[schemars(description = "Stop loss price")]
    pub stop_loss_rate: Option<f64>,
    #[schemars(description = "Take profit price")]
    pub take_profit_rate: Option<f64>,
}

impl OpenByUnitsParams {
    pub fn terms(&self) -> OrderTerms {
        OrderTerms {
            instrument_id: self.instrument_id,
            is_buy: self.is_buy,
            leverage: self.leverage,
            stop_loss_rate: self.stop_loss_rate,
            take_profit_rate: self.take_profit_rate,
        }
    }
}

// ── close_position ──

/// Parameters for the `close_position` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionParams {
    #[schemars(description = "The position ID to close")]
    pub position_id: i64,
    #[schemars(
        description = "The instrument ID of the position (if omitted, it is looked up from the portfolio)"
    )]
    pub instrument_id: Option<i64>,
    #[schemars(description = "Units to close for a partial close. Omit to close the whole position")]
    pub units_to_deduct: Option<f64>,
}

// ── place_limit_order ──

/// Parameters for the `place_limit_order` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderParams {
    #[schemars(description = "Instrument ID")]
    pub instrument_id: i64,
    #[schemars(description = "Investment amount in USD")]
    pub amount: f64,
    #[schemars(description = "true = Buy/Long, false = Sell/Short")]
    pub is_buy: bool,
    #[schemars(description = "Limit price at which the order should execute")]
    pub rate: f64,
    #[schemars(description = "Leverage multiplier. Default 1")]
    pub leverage: Option<u32>,
    #[schemars(description = "Stop loss price")]
    pub stop_loss_rate: Option<f64>,
    #[schemars(description = "Take profit price")]
    pub take_profit_rate: Option<f64>,
}

impl LimitOrderParams {
    pub fn terms(&self) -> OrderTerms {
        OrderTerms {
            instrument_id: self.instrument_id,
            is_buy: self.is_buy,
            leverage: self.leverage,
            stop_loss_rate: self.stop_loss_rate,
            take_profit_rate: self.take_profit_rate,
        }
    }
}

// ── cancel_order ──

/// Parameters for the `cancel_order` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderParams {
    #[schemars(description = "The order ID to cancel")]
    pub order_id: i64,
}

// ── get_instrument_feed ──

/// Parameters for the `get_instrument_feed` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentFeedParams {
    #[schemars(description = "Instrument ID")]
    pub instrument_id: i64,
    #[schemars(description = "Number of posts to retrieve (default 20, max 100)")]
    pub take: Option<u32>,
    #[schemars(description = "Number of posts to skip (default 0)")]
    pub offset: Option<u32>,
}

impl InstrumentFeedParams {
    pub fn page(&self) -> FeedPage {
        FeedPage {
            take: self.take,
            offset: self.offset,
        }
    }
}

// ── get_user_feed ──

/// Parameters for the `get_user_feed` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedParams {
    #[schemars(description = "eToro username")]
    pub username: String,
    #[schemars(description = "Number of posts to retrieve (default 20, max 100)")]
    pub take: Option<u32>,
    #[schemars(description = "Number of posts to skip (default 0)")]
    pub offset: Option<u32>,
}

impl UserFeedParams {
    pub fn page(&self) -> FeedPage {
        FeedPage {
            take: self.take,
            offset: self.offset,
        }
    }
}

/// Response for the `get_user_feed` tool.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedResponse {
    pub username: String,
    pub account_id: i64,
    #[serde(flatten)]
    pub feed: FeedView,
}

// ── create_post ──

/// Parameters for the `create_post` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostParams {
    #[schemars(description = "Post content/text")]
    pub content: String,
    #[schemars(description = "Optional instrument ID to tag")]
    pub instrument_id: Option<i64>,
}

// ── create_comment ──

/// Parameters for the `create_comment` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentParams {
    #[schemars(description = "ID of the post to comment on")]
    pub post_id: String,
    #[schemars(description = "Comment content/text")]
    pub content: String,
}

// ── create_watchlist ──

/// Parameters for the `create_watchlist` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateWatchlistParams {
    #[schemars(description = "Name for the new watchlist (max 100 chars)")]
    pub name: String,
}

// ── delete_watchlist / set_default_watchlist ──

/// Parameters for tools addressing one watchlist.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistIdParams {
    #[schemars(description = "Watchlist ID")]
    pub watchlist_id: i64,
}

// ── rename_watchlist ──

/// Parameters for the `rename_watchlist` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameWatchlistParams {
    #[schemars(description = "Watchlist ID to rename")]
    pub watchlist_id: i64,
    #[schemars(description = "New name for the watchlist (max 100 chars)")]
    pub name: String,
}

// ── add_watchlist_items ──

/// Parameters for the `add_watchlist_items` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistItemsParams {
    #[schemars(description = "Watchlist ID")]
    pub watchlist_id: i64,
    #[schemars(description = "Instrument IDs to add")]
    pub instrument_ids: Vec<i64>,
}

// ── remove_watchlist_item ──

/// Parameters for the `remove_watchlist_item` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveWatchlistItemParams {
    #[schemars(description = "Watchlist ID")]
    pub watchlist_id: i64,
    #[schemars(description = "Instrument ID to remove")]
    pub instrument_id: i64,
}

// ── get_public_watchlists ──

/// Parameters for the `get_public_watchlists` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicWatchlistsParams {
    #[schemars(description = "User ID whose public watchlists to retrieve")]
    pub user_id: i64,
}

// ── get_user_profile / get_user_performance / get_user_portfolio ──

/// Parameters for tools addressing one user.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UsernameParams {
    #[schemars(description = "eToro username")]
    pub username: String,
}

// ── get_user_performance_granular / get_user_trades ──

/// Parameters for per-user tools scoped to a period.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserPeriodParams {
    #[schemars(description = "eToro username")]
    pub username: String,
    #[schemars(description = "Reporting period")]
    pub period: Period,
}

// ── discover_users ──

/// Parameters for the `discover_users` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverUsersParams {
    #[schemars(description = "Performance period to filter by")]
    pub period: Period,
    #[schemars(description = "Minimum gain percentage")]
    pub gain_min: Option<f64>,
    #[schemars(description = "Maximum gain percentage")]
    pub gain_max: Option<f64>,
    #[schemars(description = "Max daily risk score")]
    pub max_daily_risk_score_max: Option<u32>,
    #[schemars(description = "Max monthly risk score")]
    pub max_monthly_risk_score_max: Option<u32>,
    #[schemars(description = "Filter to popular investors only")]
    pub popular_investor: Option<bool>,
    #[schemars(description = "Page number (default 1)")]
    pub page: Option<u32>,
    #[schemars(description = "Results per page (default 20)")]
    pub page_size: Option<u32>,
}

impl From<DiscoverUsersParams> for UserDiscovery {
    fn from(params: DiscoverUsersParams) -> Self {
        Self {
            period: params.period,
            gain_min: params.gain_min,
            gain_max: params.gain_max,
            max_daily_risk_score_max: params.max_daily_risk_score_max,
            max_monthly_risk_score_max: params.max_monthly_risk_score_max,
            popular_investor: params.popular_investor,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_arguments() {
        let params: OpenByAmountParams = serde_json::from_value(json!({
            "instrumentId": 1001,
            "amount": 250,
            "isBuy": true,
            "stopLossRate": 150.5
        }))
        .unwrap();
        let terms = params.terms();
        assert_eq!(terms.instrument_id, 1001);
        assert_eq!(terms.leverage, None);
        assert_eq!(terms.stop_loss_rate, Some(150.5));
        assert_eq!(params.amount, 250.0);
    }

    #[test]
    fn test_candle_enums_deserialize() {
        let params: CandlesParams = serde_json::from_value(json!({
            "instrumentId": 7,
            "period": "FourHours",
            "direction": "asc"
        }))
        .unwrap();
        assert_eq!(params.period, CandlePeriod::FourHours);
        assert_eq!(params.direction, Some(CandleDirection::Asc));
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let result: Result<UserPeriodParams, _> =
            serde_json::from_value(json!({"username": "jdoe", "period": "Forever"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_feed_response_flattens_feed() {
        let response = UserFeedResponse {
            username: "jdoe".into(),
            account_id: 42,
            feed: FeedView {
                posts: vec![],
                paging: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"username": "jdoe", "accountId": 42, "posts": []})
        );
    }
}
