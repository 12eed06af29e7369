//! Market data tools. Mode-independent.

use rmcp::model::CallToolResult;

use etoro_client::api::market_data;
use etoro_client::GatewayClient;

use super::helpers::{respond, respond_body};
use super::params::{CandlesParams, InstrumentIdsParams, SearchInstrumentsParams};

pub async fn search_instruments(
    client: &GatewayClient,
    params: SearchInstrumentsParams,
) -> CallToolResult {
    respond(market_data::search_instruments(client, &params.into()).await)
}

pub async fn get_instruments(client: &GatewayClient, params: InstrumentIdsParams) -> CallToolResult {
    respond_body(market_data::get_instruments(client, &params.instrument_ids).await)
}

pub async fn get_instrument_types(client: &GatewayClient) -> CallToolResult {
    respond_body(market_data::get_instrument_types(client).await)
}

pub async fn get_industries(client: &GatewayClient) -> CallToolResult {
    respond_body(market_data::get_industries(client).await)
}

pub async fn get_exchanges(client: &GatewayClient) -> CallToolResult {
    respond_body(market_data::get_exchanges(client).await)
}

pub async fn get_candles(client: &GatewayClient, params: CandlesParams) -> CallToolResult {
    respond_body(
        market_data::get_candles(
            client,
            params.instrument_id,
            params.period,
            params.count,
            params.direction,
        )
        .await,
    )
}

pub async fn get_closing_prices(client: &GatewayClient) -> CallToolResult {
    respond_body(market_data::get_closing_prices(client).await)
}

pub async fn get_rates(client: &GatewayClient, params: InstrumentIdsParams) -> CallToolResult {
    respond_body(market_data::get_rates(client, &params.instrument_ids).await)
}
