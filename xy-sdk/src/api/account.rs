//! Marketplace account APIs.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::http::{Client, Error, decode};

/// A marketplace account (cookie) of the automation tool.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AccountDetail {
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(default)]
    pub auto_confirm: bool,
    /// Pause duration of auto-reply in minutes.
    #[serde(default)]
    pub pause_duration: u64,
}

/// `GET /cookies/details`
pub async fn list(client: &Client) -> Result<Vec<AccountDetail>, Error> {
    let (status, body) = client
        .request(Method::GET, "/cookies/details", None)
        .await?;
    decode::<Vec<AccountDetail>>(StatusCode::OK, status, &body)
}
