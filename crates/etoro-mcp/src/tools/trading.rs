//! Trading tools. Routed to the demo or real namespace by the client's mode.

use rmcp::model::CallToolResult;

use etoro_client::api::trading;
use etoro_client::GatewayClient;

use super::helpers::{respond, respond_body};
use super::params::{
    CancelOrderParams, ClosePositionParams, LimitOrderParams, OpenByAmountParams,
    OpenByUnitsParams,
};

pub async fn open_position_by_amount(
    client: &GatewayClient,
    params: OpenByAmountParams,
) -> CallToolResult {
    respond_body(trading::open_position_by_amount(client, &params.terms(), params.amount).await)
}

pub async fn open_position_by_units(
    client: &GatewayClient,
    params: OpenByUnitsParams,
) -> CallToolResult {
    respond_body(trading::open_position_by_units(client, &params.terms(), params.units).await)
}

pub async fn close_position(client: &GatewayClient, params: ClosePositionParams) -> CallToolResult {
    respond_body(
        trading::close_position(
            client,
            params.position_id,
            params.instrument_id,
            params.units_to_deduct,
        )
        .await,
    )
}

pub async fn place_limit_order(client: &GatewayClient, params: LimitOrderParams) -> CallToolResult {
    respond_body(
        trading::place_limit_order(client, &params.terms(), params.amount, params.rate).await,
    )
}

pub async fn cancel_order(client: &GatewayClient, params: CancelOrderParams) -> CallToolResult {
    respond_body(trading::cancel_order(client, params.order_id).await)
}

pub async fn get_orders(client: &GatewayClient) -> CallToolResult {
    respond(trading::get_pending_orders(client).await)
}

pub async fn get_portfolio(client: &GatewayClient) -> CallToolResult {
    respond(trading::get_portfolio(client).await)
}
