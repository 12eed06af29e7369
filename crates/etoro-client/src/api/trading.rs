//! Trading operations, routed to the demo or real namespace by mode.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::gateway::{GatewayClient, ResponseBody, NO_BODY};
use crate::normalize::portfolio::PortfolioResponse;
use crate::normalize::{normalize_portfolio, PortfolioView};

const DEFAULT_LEVERAGE: u32 = 1;

/// Terms shared by every opening order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerms {
    pub instrument_id: i64,
    /// `true` opens long, `false` short.
    pub is_buy: bool,
    /// Defaults to 1.
    pub leverage: Option<u32>,
    pub stop_loss_rate: Option<f64>,
    pub take_profit_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OpenOrderBody {
    #[serde(rename = "InstrumentID")]
    instrument_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount_in_units: Option<f64>,
    is_buy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate: Option<f64>,
    leverage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_loss_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    take_profit_rate: Option<f64>,
}

impl OpenOrderBody {
    fn new(terms: &OrderTerms) -> Self {
        Self {
            instrument_id: terms.instrument_id,
            amount: None,
            amount_in_units: None,
            is_buy: terms.is_buy,
            rate: None,
            leverage: terms.leverage.unwrap_or(DEFAULT_LEVERAGE),
            stop_loss_rate: terms.stop_loss_rate,
            take_profit_rate: terms.take_profit_rate,
        }
    }
}

#[derive(Debug, Serialize)]
struct CloseOrderBody {
    #[serde(rename = "InstrumentID")]
    instrument_id: i64,
    /// `null` closes the whole position.
    #[serde(rename = "UnitsToDeduct")]
    units_to_deduct: Option<f64>,
}

fn require_positive(value: f64, what: &str) -> ClientResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ClientError::invalid_input(format!(
            "{what} must be a positive number, got {value}"
        )))
    }
}

/// Open a market position sized in account currency.
pub async fn open_position_by_amount(
    client: &GatewayClient,
    terms: &OrderTerms,
    amount: f64,
) -> ClientResult<ResponseBody> {
    let body = OpenOrderBody {
        amount: Some(require_positive(amount, "amount")?),
        ..OpenOrderBody::new(terms)
    };
    let path = client.execution_path("/market-open-orders/by-amount");
    client.post(&path, Some(&body)).await
}

/// Open a market position sized in instrument units.
pub async fn open_position_by_units(
    client: &GatewayClient,
    terms: &OrderTerms,
    units: f64,
) -> ClientResult<ResponseBody> {
    let body = OpenOrderBody {
        amount_in_units: Some(require_positive(units, "units")?),
        ..OpenOrderBody::new(terms)
    };
    let path = client.execution_path("/market-open-orders/by-units");
    client.post(&path, Some(&body)).await
}

/// Place an entry order that executes at `rate`.
pub async fn place_limit_order(
    client: &GatewayClient,
    terms: &OrderTerms,
    amount: f64,
    rate: f64,
) -> ClientResult<ResponseBody> {
    let body = OpenOrderBody {
        amount: Some(require_positive(amount, "amount")?),
        rate: Some(require_positive(rate, "rate")?),
        ..OpenOrderBody::new(terms)
    };
    let path = client.execution_path("/limit-orders");
    client.post(&path, Some(&body)).await
}

/// Close an open position, fully or by `units_to_deduct`.
///
/// When `instrument_id` is not given it is looked up from a fresh portfolio
/// snapshot; a position missing from that snapshot fails with
/// [`ClientError::PositionNotFound`] and no close is sent.
///
/// The lookup and the close are two separate exchanges with nothing held in
/// between. A position closed elsewhere after the snapshot is read will make
/// the close request itself fail upstream.
pub async fn close_position(
    client: &GatewayClient,
    position_id: i64,
    instrument_id: Option<i64>,
    units_to_deduct: Option<f64>,
) -> ClientResult<ResponseBody> {
    let units_to_deduct = units_to_deduct
        .map(|units| require_positive(units, "units_to_deduct"))
        .transpose()?;

    let instrument_id = match instrument_id {
        Some(id) => id,
        None => resolve_instrument_id(client, position_id).await?,
    };

    let body = CloseOrderBody {
        instrument_id,
        units_to_deduct,
    };
    let path = client.execution_path(&format!("/market-close-orders/positions/{position_id}"));
    client.post(&path, Some(&body)).await
}

async fn resolve_instrument_id(client: &GatewayClient, position_id: i64) -> ClientResult<i64> {
    let portfolio = get_portfolio(client).await?;
    let position = portfolio
        .find_position(position_id)
        .ok_or(ClientError::PositionNotFound { position_id })?;
    let instrument_id = position.instrument_id.ok_or_else(|| {
        ClientError::invalid_response(
            "instrumentID",
            format!("position {position_id} has no instrument id"),
        )
    })?;
    debug!(position_id, instrument_id, "Resolved instrument for position");
    Ok(instrument_id)
}

pub async fn cancel_order(client: &GatewayClient, order_id: i64) -> ClientResult<ResponseBody> {
    let path = client.execution_path(&format!("/market-open-orders/{order_id}"));
    client.delete(&path, NO_BODY).await
}

/// Balances, open positions and pending orders for the configured mode.
pub async fn get_portfolio(client: &GatewayClient) -> ClientResult<PortfolioView> {
    let path = client.info_path("/portfolio");
    let response: PortfolioResponse = client.get(&path).await?.decode("portfolio")?;
    Ok(normalize_portfolio(response))
}

/// Pending orders only, in portfolio order.
pub async fn get_pending_orders(client: &GatewayClient) -> ClientResult<Vec<Value>> {
    Ok(get_portfolio(client).await?.pending_orders)
}
