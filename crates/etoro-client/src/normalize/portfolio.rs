//! Portfolio normalization.
//!
//! Upstream nests everything under `clientPortfolio`: balances, open
//! positions and five pending-order collections. The view keeps balances,
//! a ten-field projection of each position, and the pending orders that are
//! still waiting to open.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{lenient, lenient_seq};

// ── Upstream shape ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub client_portfolio: Option<ClientPortfolio>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPortfolio {
    #[serde(default, deserialize_with = "lenient")]
    pub credit: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub bonus_credit: Option<Number>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub positions: Option<Vec<PositionView>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub orders: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub stock_orders: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub entry_orders: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub orders_for_open: Option<Vec<Value>>,
}

/// The projected fields of an open position.
///
/// Deserializing an upstream position record into this type is the
/// projection: every other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PositionView {
    #[serde(
        rename = "positionID",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub position_id: Option<i64>,
    #[serde(
        rename = "instrumentID",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub instrument_id: Option<i64>,
    #[serde(
        rename = "isBuy",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_buy: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Number>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub units: Option<Number>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub leverage: Option<Number>,
    #[serde(
        rename = "openRate",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_rate: Option<Number>,
    #[serde(
        rename = "openDateTime",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub open_date_time: Option<String>,
    #[serde(
        rename = "stopLossRate",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_loss_rate: Option<Number>,
    #[serde(
        rename = "takeProfitRate",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub take_profit_rate: Option<Number>,
}

// ── View ──

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_credit: Option<Number>,
    pub position_count: usize,
    pub positions: Vec<PositionView>,
    pub pending_orders: Vec<Value>,
}

impl PortfolioView {
    /// Find an open position by id.
    pub fn find_position(&self, position_id: i64) -> Option<&PositionView> {
        self.positions
            .iter()
            .find(|p| p.position_id == Some(position_id))
    }
}

// ── Transform ──

/// Reduce a portfolio payload to balances, positions and pending orders.
///
/// `pendingOrders` concatenates `orders`, `stockOrders`, `entryOrders` and
/// `ordersForOpen` in that order. `ordersForClose` and `mirrors` are not
/// pending opens and are left out.
pub fn normalize_portfolio(response: PortfolioResponse) -> PortfolioView {
    let portfolio = response.client_portfolio.unwrap_or_default();
    let positions = portfolio.positions.unwrap_or_default();

    let pending_orders = [
        portfolio.orders,
        portfolio.stock_orders,
        portfolio.entry_orders,
        portfolio.orders_for_open,
    ]
    .into_iter()
    .flatten()
    .flatten()
    .collect();

    PortfolioView {
        credit: portfolio.credit,
        bonus_credit: portfolio.bonus_credit,
        position_count: positions.len(),
        positions,
        pending_orders,
    }
}
