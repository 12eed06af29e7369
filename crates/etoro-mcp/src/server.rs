//! MCP ServerHandler implementation for the eToro public API.
//!
//! Every tool wraps one operation from `etoro_client::api`:
//!
//! **Market data**
//! - `search_instruments`: keyword or exact-symbol search, enriched with instrument metadata
//! - `get_instruments`, `get_instrument_types`, `get_industries`, `get_exchanges`
//! - `get_candles`: OHLCV candles for an instrument
//! - `get_closing_prices`, `get_rates`
//!
//! **Trading** (routed to demo or real by the configured mode)
//! - `open_position_by_amount`, `open_position_by_units`, `place_limit_order`
//! - `close_position`: looks up the instrument from the portfolio when omitted
//! - `cancel_order`, `get_orders`, `get_portfolio`
//!
//! **Feeds**
//! - `get_instrument_feed`, `get_user_feed`, `create_post`, `create_comment`
//!
//! **Watchlists**
//! - `get_watchlists`, `create_watchlist`, `delete_watchlist`, `rename_watchlist`
//! - `add_watchlist_items`, `remove_watchlist_item`, `set_default_watchlist`
//! - `get_curated_lists`, `get_public_watchlists`
//!
//! **Users**
//! - `get_user_profile`, `get_user_performance`, `get_user_performance_granular`
//! - `get_user_trades`, `get_user_portfolio`, `discover_users`

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};

use etoro_client::{GatewayClient, TradingMode};

use crate::tools::*;

/// eToro MCP server handler.
#[derive(Debug, Clone)]
pub struct EtoroMcpServer {
    tool_router: ToolRouter<Self>,
    client: GatewayClient,
}

impl EtoroMcpServer {
    pub fn new(client: GatewayClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client,
        }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for EtoroMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mode_note = match self.client.mode() {
            TradingMode::Demo => "Trading tools act on the DEMO (virtual money) account.",
            TradingMode::Real => {
                "Trading tools act on the REAL account. Confirm orders with the user before \
                 opening or closing positions."
            }
        };
        let instructions = format!(
            "Access to the eToro public API: market data, trading, social feeds, watchlists \
             and public user information.\n\
             {mode_note}\n\
             Find instrument IDs with search_instruments before trading or reading feeds.\n\
             close_position looks up the instrument from the portfolio when instrumentId is omitted.\n\
             Failed calls return a JSON error with 'error', 'message' and, for upstream \
             failures, 'status' and 'details'."
        );

        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "etoro-mcp".to_string(),
                title: Some("eToro MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing the eToro public API: market data, demo/real trading, \
                     social feeds, watchlists and user discovery"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(instructions),
        }
    }
}

#[tool_router(router = tool_router)]
impl EtoroMcpServer {
    // ── Market data ──

    #[tool(
        name = "search_instruments",
        description = "Search for eToro instruments by keyword (stocks, crypto, ETFs, etc.). Results are enriched with instrument metadata when available."
    )]
    pub async fn search_instruments(
        &self,
        Parameters(params): Parameters<SearchInstrumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(market_data::search_instruments(&self.client, params).await)
    }

    #[tool(
        name = "get_instruments",
        description = "Get details for one or more instruments by their IDs"
    )]
    pub async fn get_instruments(
        &self,
        Parameters(params): Parameters<InstrumentIdsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_instruments(&self.client, params).await)
    }

    #[tool(
        name = "get_instrument_types",
        description = "Get all available instrument types (stocks, crypto, ETFs, etc.)"
    )]
    pub async fn get_instrument_types(&self) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_instrument_types(&self.client).await)
    }

    #[tool(
        name = "get_industries",
        description = "Get all available industry classifications for instruments"
    )]
    pub async fn get_industries(&self) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_industries(&self.client).await)
    }

    #[tool(name = "get_exchanges", description = "Get all available stock exchanges")]
    pub async fn get_exchanges(&self) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_exchanges(&self.client).await)
    }

    #[tool(name = "get_candles", description = "Get OHLCV candle data for an instrument")]
    pub async fn get_candles(
        &self,
        Parameters(params): Parameters<CandlesParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_candles(&self.client, params).await)
    }

    #[tool(
        name = "get_closing_prices",
        description = "Get historical closing prices for all instruments"
    )]
    pub async fn get_closing_prices(&self) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_closing_prices(&self.client).await)
    }

    #[tool(name = "get_rates", description = "Get live bid/ask rates for instruments")]
    pub async fn get_rates(
        &self,
        Parameters(params): Parameters<InstrumentIdsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(market_data::get_rates(&self.client, params).await)
    }

    // ── Trading ──

    #[tool(
        name = "open_position_by_amount",
        description = "Open a new position by specifying the investment amount in USD"
    )]
    pub async fn open_position_by_amount(
        &self,
        Parameters(params): Parameters<OpenByAmountParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(trading::open_position_by_amount(&self.client, params).await)
    }

    #[tool(
        name = "open_position_by_units",
        description = "Open a new position by specifying the number of units (shares, coins, etc.)"
    )]
    pub async fn open_position_by_units(
        &self,
        Parameters(params): Parameters<OpenByUnitsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(trading::open_position_by_units(&self.client, params).await)
    }

    #[tool(
        name = "close_position",
        description = "Close an open position by its position ID, fully or partially. The instrument ID is looked up from the portfolio when omitted."
    )]
    pub async fn close_position(
        &self,
        Parameters(params): Parameters<ClosePositionParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(trading::close_position(&self.client, params).await)
    }

    #[tool(
        name = "place_limit_order",
        description = "Place a limit/entry order at a specified price"
    )]
    pub async fn place_limit_order(
        &self,
        Parameters(params): Parameters<LimitOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(trading::place_limit_order(&self.client, params).await)
    }

    #[tool(name = "cancel_order", description = "Cancel a pending order by its order ID")]
    pub async fn cancel_order(
        &self,
        Parameters(params): Parameters<CancelOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(trading::cancel_order(&self.client, params).await)
    }

    #[tool(
        name = "get_orders",
        description = "Get all pending orders for the current user"
    )]
    pub async fn get_orders(&self) -> Result<CallToolResult, McpError> {
        Ok(trading::get_orders(&self.client).await)
    }

    #[tool(
        name = "get_portfolio",
        description = "Get the current user's portfolio: balances, open positions and pending orders"
    )]
    pub async fn get_portfolio(&self) -> Result<CallToolResult, McpError> {
        Ok(trading::get_portfolio(&self.client).await)
    }

    // ── Feeds ──

    #[tool(
        name = "get_instrument_feed",
        description = "Get the social feed for a specific instrument (posts, discussions)"
    )]
    pub async fn get_instrument_feed(
        &self,
        Parameters(params): Parameters<InstrumentFeedParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(feeds::get_instrument_feed(&self.client, params).await)
    }

    #[tool(
        name = "get_user_feed",
        description = "Get the social feed for a specific user by username"
    )]
    pub async fn get_user_feed(
        &self,
        Parameters(params): Parameters<UserFeedParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(feeds::get_user_feed(&self.client, params).await)
    }

    #[tool(name = "create_post", description = "Create a new post on the eToro social feed")]
    pub async fn create_post(
        &self,
        Parameters(params): Parameters<CreatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(feeds::create_post(&self.client, params).await)
    }

    #[tool(
        name = "create_comment",
        description = "Add a comment to an existing post on the eToro social feed"
    )]
    pub async fn create_comment(
        &self,
        Parameters(params): Parameters<CreateCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(feeds::create_comment(&self.client, params).await)
    }

    // ── Watchlists ──

    #[tool(name = "get_watchlists", description = "Get all watchlists for the current user")]
    pub async fn get_watchlists(&self) -> Result<CallToolResult, McpError> {
        Ok(watchlists::get_watchlists(&self.client).await)
    }

    #[tool(name = "create_watchlist", description = "Create a new watchlist")]
    pub async fn create_watchlist(
        &self,
        Parameters(params): Parameters<CreateWatchlistParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::create_watchlist(&self.client, params).await)
    }

    #[tool(name = "delete_watchlist", description = "Delete a watchlist by its ID")]
    pub async fn delete_watchlist(
        &self,
        Parameters(params): Parameters<WatchlistIdParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::delete_watchlist(&self.client, params).await)
    }

    #[tool(name = "rename_watchlist", description = "Rename an existing watchlist")]
    pub async fn rename_watchlist(
        &self,
        Parameters(params): Parameters<RenameWatchlistParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::rename_watchlist(&self.client, params).await)
    }

    #[tool(
        name = "add_watchlist_items",
        description = "Add instruments to an existing watchlist"
    )]
    pub async fn add_watchlist_items(
        &self,
        Parameters(params): Parameters<AddWatchlistItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::add_watchlist_items(&self.client, params).await)
    }

    #[tool(
        name = "remove_watchlist_item",
        description = "Remove an instrument from a watchlist"
    )]
    pub async fn remove_watchlist_item(
        &self,
        Parameters(params): Parameters<RemoveWatchlistItemParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::remove_watchlist_item(&self.client, params).await)
    }

    #[tool(
        name = "set_default_watchlist",
        description = "Set a watchlist as the default watchlist"
    )]
    pub async fn set_default_watchlist(
        &self,
        Parameters(params): Parameters<WatchlistIdParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::set_default_watchlist(&self.client, params).await)
    }

    #[tool(
        name = "get_curated_lists",
        description = "Get eToro's curated/featured instrument lists"
    )]
    pub async fn get_curated_lists(&self) -> Result<CallToolResult, McpError> {
        Ok(watchlists::get_curated_lists(&self.client).await)
    }

    #[tool(
        name = "get_public_watchlists",
        description = "Get publicly shared watchlists from a user"
    )]
    pub async fn get_public_watchlists(
        &self,
        Parameters(params): Parameters<PublicWatchlistsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(watchlists::get_public_watchlists(&self.client, params).await)
    }

    // ── Users ──

    #[tool(
        name = "get_user_profile",
        description = "Get a user's public profile information"
    )]
    pub async fn get_user_profile(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::get_user_profile(&self.client, params).await)
    }

    #[tool(
        name = "get_user_performance",
        description = "Get a user's trading performance summary (returns, risk score, etc.)"
    )]
    pub async fn get_user_performance(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::get_user_performance(&self.client, params).await)
    }

    #[tool(
        name = "get_user_performance_granular",
        description = "Get detailed/granular performance data for a user over a period"
    )]
    pub async fn get_user_performance_granular(
        &self,
        Parameters(params): Parameters<UserPeriodParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::get_user_performance_granular(&self.client, params).await)
    }

    #[tool(
        name = "get_user_trades",
        description = "Get a user's trade info for a specific period"
    )]
    pub async fn get_user_trades(
        &self,
        Parameters(params): Parameters<UserPeriodParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::get_user_trades(&self.client, params).await)
    }

    #[tool(
        name = "get_user_portfolio",
        description = "Get a user's live public portfolio holdings"
    )]
    pub async fn get_user_portfolio(
        &self,
        Parameters(params): Parameters<UsernameParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::get_user_portfolio(&self.client, params).await)
    }

    #[tool(
        name = "discover_users",
        description = "Discover popular investors and traders on eToro (filterable)"
    )]
    pub async fn discover_users(
        &self,
        Parameters(params): Parameters<DiscoverUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(users::discover_users(&self.client, params).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etoro_client::{ClientConfig, Credentials};
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use serde_json::{json, Value};

    fn server_for(mock: &MockServer, mode: TradingMode) -> EtoroMcpServer {
        let config = ClientConfig {
            base_url: mock.base_url(),
            mode,
            credentials: Credentials::new(Some("ak".into()), Some("uk".into())),
            timeout_ms: 5_000,
        };
        EtoroMcpServer::new(GatewayClient::new(config).unwrap())
    }

    fn text_of(result: &CallToolResult) -> &str {
        result
            .content
            .first()
            .and_then(|c| c.raw.as_text())
            .map(|t| t.text.as_str())
            .unwrap()
    }

    fn json_of(result: &CallToolResult) -> Value {
        serde_json::from_str(text_of(result)).unwrap()
    }

    #[test]
    fn test_server_info_demo() {
        let mock = MockServer::start();
        let server = server_for(&mock, TradingMode::Demo);
        let info = server.get_info();

        assert_eq!(info.server_info.name, "etoro-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("DEMO"));
        assert!(instructions.contains("search_instruments"));
    }

    #[test]
    fn test_server_info_real() {
        let mock = MockServer::start();
        let server = server_for(&mock, TradingMode::Real);
        let instructions = server.get_info().instructions.unwrap();
        assert!(instructions.contains("REAL"));
        assert!(!instructions.contains("DEMO"));
    }

    #[test]
    fn test_tool_router_lists_every_tool() {
        let mock = MockServer::start();
        let server = server_for(&mock, TradingMode::Demo);
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), 34);
        for name in ["search_instruments", "close_position", "get_user_feed", "discover_users"] {
            assert!(
                tools.iter().any(|t| t.name == name),
                "missing tool {name}"
            );
        }
    }

    #[tokio::test]
    async fn test_get_portfolio_returns_view() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/trading/info/demo/portfolio");
            then.status(200).json_body(json!({
                "clientPortfolio": {
                    "credit": 500,
                    "positions": [{"positionID": 1, "instrumentID": 2, "fees": 3}],
                    "orders": [{"orderID": 4}]
                }
            }));
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server.get_portfolio().await.unwrap();

        assert_eq!(result.is_error, Some(false));
        let parsed = json_of(&result);
        assert_eq!(parsed["positionCount"], 1);
        assert_eq!(parsed["positions"][0], json!({"positionID": 1, "instrumentID": 2}));
        assert_eq!(parsed["pendingOrders"], json!([{"orderID": 4}]));
    }

    #[tokio::test]
    async fn test_get_orders_returns_pending_only() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/trading/info/portfolio");
            then.status(200).json_body(json!({
                "clientPortfolio": {"stockOrders": [{"orderID": 8}], "mirrors": [{"mirrorID": 1}]}
            }));
        })
        .await;

        let server = server_for(&mock, TradingMode::Real);
        let result = server.get_orders().await.unwrap();
        assert_eq!(json_of(&result), json!([{"orderID": 8}]));
    }

    #[tokio::test]
    async fn test_close_unknown_position_is_tool_error() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/trading/info/demo/portfolio");
            then.status(200)
                .json_body(json!({"clientPortfolio": {"positions": []}}));
        })
        .await;
        let close = mock
            .mock_async(|when, then| {
                when.method(POST).path_contains("/market-close-orders/");
                then.status(200);
            })
            .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .close_position(Parameters(ClosePositionParams {
                position_id: 77,
                instrument_id: None,
                units_to_deduct: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let parsed = json_of(&result);
        assert_eq!(parsed["error"], "position_not_found");
        assert_eq!(parsed["message"], "Position 77 not found in portfolio");
        close.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_upstream_4xx_is_tool_error_with_details() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(POST)
                .path("/trading/execution/demo/market-open-orders/by-amount");
            then.status(400)
                .json_body(json!({"errorCode": "InsufficientFunds"}));
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .open_position_by_amount(Parameters(OpenByAmountParams {
                instrument_id: 1001,
                amount: 1_000_000.0,
                is_buy: true,
                leverage: None,
                stop_loss_rate: None,
                take_profit_rate: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let parsed = json_of(&result);
        assert_eq!(parsed["error"], "api_error");
        assert_eq!(parsed["status"], 400);
        assert_eq!(parsed["details"]["errorCode"], "InsufficientFunds");
    }

    #[tokio::test]
    async fn test_user_feed_not_found_is_tool_error() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/user-info/people");
            then.status(200).json_body(json!({"users": []}));
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .get_user_feed(Parameters(UserFeedParams {
                username: "ghost".into(),
                take: None,
                offset: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let parsed = json_of(&result);
        assert_eq!(parsed["error"], "user_not_found");
        assert_eq!(parsed["message"], "User ghost not found");
    }

    #[tokio::test]
    async fn test_user_feed_found() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/user-info/people");
            then.status(200)
                .json_body(json!({"users": [{"username": "jdoe", "gcid": 55}]}));
        })
        .await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/feeds/user/55");
            then.status(200).json_body(json!({
                "discussions": [{"post": {"id": 1, "owner": {"username": "jdoe"}}}]
            }));
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .get_user_feed(Parameters(UserFeedParams {
                username: "jdoe".into(),
                take: None,
                offset: None,
            }))
            .await
            .unwrap();

        let parsed = json_of(&result);
        assert_eq!(parsed["accountId"], 55);
        assert_eq!(parsed["posts"][0]["author"]["username"], "jdoe");
    }

    #[tokio::test]
    async fn test_plain_text_body_passes_through() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(GET).path("/curated-lists");
            then.status(200).body("maintenance window");
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server.get_curated_lists().await.unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "maintenance window");
    }

    #[tokio::test]
    async fn test_empty_body_renders_null() {
        let mock = MockServer::start_async().await;
        mock.mock_async(|when, then| {
            when.method(httpmock::Method::DELETE).path("/watchlists/3");
            then.status(204);
        })
        .await;

        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .delete_watchlist(Parameters(WatchlistIdParams { watchlist_id: 3 }))
            .await
            .unwrap();
        assert_eq!(text_of(&result), "null");
    }

    #[tokio::test]
    async fn test_transport_failure_is_tool_error() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            mode: TradingMode::Demo,
            credentials: Credentials::default(),
            timeout_ms: 2_000,
        };
        let server = EtoroMcpServer::new(GatewayClient::new(config).unwrap());
        let result = server.get_exchanges().await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(json_of(&result)["error"], "transport_error");
    }

    #[tokio::test]
    async fn test_empty_id_list_is_rejected() {
        let mock = MockServer::start_async().await;
        let server = server_for(&mock, TradingMode::Demo);
        let result = server
            .get_rates(Parameters(InstrumentIdsParams {
                instrument_ids: vec![],
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(json_of(&result)["error"], "invalid_input");
    }
}
