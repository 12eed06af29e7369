//! Public user information: profiles, performance, trades and discovery.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{non_zero, path_segment, require_text, Query};
use crate::error::ClientResult;
use crate::gateway::{GatewayClient, ResponseBody};

/// Reporting window for performance, trade info and discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Period {
    CurrMonth,
    CurrQuarter,
    CurrYear,
    LastYear,
    LastTwoYears,
    OneMonthAgo,
    TwoMonthsAgo,
    ThreeMonthsAgo,
    SixMonthsAgo,
    OneYearAgo,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrMonth => "CurrMonth",
            Self::CurrQuarter => "CurrQuarter",
            Self::CurrYear => "CurrYear",
            Self::LastYear => "LastYear",
            Self::LastTwoYears => "LastTwoYears",
            Self::OneMonthAgo => "OneMonthAgo",
            Self::TwoMonthsAgo => "TwoMonthsAgo",
            Self::ThreeMonthsAgo => "ThreeMonthsAgo",
            Self::SixMonthsAgo => "SixMonthsAgo",
            Self::OneYearAgo => "OneYearAgo",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for investor discovery. Only `period` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDiscovery {
    pub period: Period,
    pub gain_min: Option<f64>,
    pub gain_max: Option<f64>,
    pub max_daily_risk_score_max: Option<u32>,
    pub max_monthly_risk_score_max: Option<u32>,
    pub popular_investor: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl UserDiscovery {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            gain_min: None,
            gain_max: None,
            max_daily_risk_score_max: None,
            max_monthly_risk_score_max: None,
            popular_investor: None,
            page: None,
            page_size: None,
        }
    }
}

fn people_path(username: &str, suffix: &str) -> ClientResult<String> {
    let username = require_text(username, "username")?;
    Ok(format!("/user-info/people/{}{suffix}", path_segment(username)))
}

pub async fn get_user_profile(client: &GatewayClient, username: &str) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set("usernames", require_text(username, "username")?)
        .to_path("/user-info/people");
    client.get(&path).await
}

/// Gain summary, optionally narrowed to one period.
pub async fn get_user_performance(
    client: &GatewayClient,
    username: &str,
    period: Option<Period>,
) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set_opt("period", period)
        .to_path(&people_path(username, "/gain")?);
    client.get(&path).await
}

pub async fn get_user_trades(
    client: &GatewayClient,
    username: &str,
    period: Period,
) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set("period", period)
        .to_path(&people_path(username, "/tradeinfo")?);
    client.get(&path).await
}

pub async fn get_user_portfolio(client: &GatewayClient, username: &str) -> ClientResult<ResponseBody> {
    client
        .get(&people_path(username, "/portfolio/live")?)
        .await
}

pub async fn discover_users(
    client: &GatewayClient,
    filter: &UserDiscovery,
) -> ClientResult<ResponseBody> {
    let path = Query::new()
        .set("period", filter.period)
        .set_opt("gainMin", filter.gain_min)
        .set_opt("gainMax", filter.gain_max)
        .set_opt("maxDailyRiskScoreMax", filter.max_daily_risk_score_max)
        .set_opt("maxMonthlyRiskScoreMax", filter.max_monthly_risk_score_max)
        .set_opt("popularInvestor", filter.popular_investor)
        .set_opt("page", non_zero(filter.page))
        .set_opt("pageSize", non_zero(filter.page_size))
        .to_path("/user-info/people/search");
    client.get(&path).await
}
