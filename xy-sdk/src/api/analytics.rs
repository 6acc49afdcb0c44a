//! Statistics and order analytics APIs.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::http::{ApiError, Client, Error, decode};
use crate::range::DateRange;

/// Overall statistics of the administrator.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_cookies: u64,
    #[serde(default)]
    pub active_cookies: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_cards: u64,
}

/// Order analytics of a date range.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OrderAnalytics {
    pub revenue_stats: RevenueStats,
    #[serde(default)]
    pub daily_stats: Vec<DailyStats>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RevenueStats {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_orders: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DailyStats {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub order_count: u64,
}

impl DailyStats {
    /// Average amount of an order. Zero when there are no orders.
    pub fn avg_amount(&self) -> f64 {
        match self.order_count {
            0 => 0.0,
            count => self.amount / count as f64,
        }
    }
}

/// `GET /admin/stats`
pub async fn stats(client: &Client) -> Result<AdminStats, Error> {
    let (status, body) = client.request(Method::GET, "/admin/stats", None).await?;
    decode::<AdminStats>(StatusCode::OK, status, &body)
}

/// `GET /analytics/orders?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn orders(client: &Client, range: &DateRange) -> Result<OrderAnalytics, Error> {
    let query = match serde_urlencoded::to_string(range) {
        Err(e) => return Err(Error::Api(ApiError::unexpected(e.to_string()))),
        Ok(query) => query,
    };
    let path = format!("/analytics/orders?{}", query);
    let (status, body) = client.request(Method::GET, path.as_str(), None).await?;
    decode::<OrderAnalytics>(StatusCode::OK, status, &body)
}
