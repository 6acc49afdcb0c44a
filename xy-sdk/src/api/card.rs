//! Card (dispatch content) APIs.
//!
//! The content of a card is decoded into one [`CardContent`] variant by the `type` field. Cards of
//! unknown types are rejected when decoding.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::http::{Client, Error, decode};

/// A dispatch card.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Card {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    /// Delay before dispatching in seconds.
    #[serde(default, deserialize_with = "nullable")]
    pub delay_seconds: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub is_multi_spec: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub content: CardContent,
}

/// The content of each card type.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardContent {
    /// Fixed text.
    Text {
        #[serde(default, deserialize_with = "nullable")]
        text_content: String,
    },
    /// An image.
    Image {
        #[serde(default, deserialize_with = "nullable")]
        image_url: String,
    },
    /// Content fetched from a third-party API when dispatching.
    Api { api_config: ApiConfig },
    /// Inventory lines. Each line is dispatched once.
    Data {
        #[serde(default, deserialize_with = "nullable")]
        data_content: String,
    },
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum ApiMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ApiConfig {
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub method: ApiMethod,
    /// Timeout in seconds.
    #[serde(default = "def_api_timeout")]
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

/// Inventory and dispatch records of a card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardDetails {
    pub total: u64,
    pub used: u64,
    pub remaining: u64,
    /// Inventory lines. Always empty for non-[`CardContent::Data`] cards.
    pub items: Vec<CardItem>,
    pub history: Vec<DeliveryRecord>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CardItem {
    pub content: String,
    #[serde(default)]
    pub is_used: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DeliveryRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<String>,
}

#[derive(Deserialize)]
struct DetailsRes {
    #[serde(default, deserialize_with = "nullable")]
    total: u64,
    #[serde(default, deserialize_with = "nullable")]
    used: u64,
    #[serde(default, deserialize_with = "nullable")]
    remaining: u64,
    #[serde(default, deserialize_with = "nullable")]
    cards: Vec<CardItem>,
    #[serde(default, deserialize_with = "nullable")]
    history: Vec<DeliveryRecord>,
}

const DEF_API_TIMEOUT: u64 = 10;

impl CardContent {
    /// The `type` value of the content.
    pub fn kind(&self) -> &'static str {
        match self {
            CardContent::Text { .. } => "text",
            CardContent::Image { .. } => "image",
            CardContent::Api { .. } => "api",
            CardContent::Data { .. } => "data",
        }
    }
}

/// `GET /cards`
pub async fn list(client: &Client) -> Result<Vec<Card>, Error> {
    let (status, body) = client.request(Method::GET, "/cards", None).await?;
    decode::<Vec<Card>>(StatusCode::OK, status, &body)
}

/// `GET /cards/{id}`
pub async fn get(client: &Client, card_id: u64) -> Result<Card, Error> {
    let path = format!("/cards/{}", card_id);
    let (status, body) = client.request(Method::GET, path.as_str(), None).await?;
    decode::<Card>(StatusCode::OK, status, &body)
}

/// `GET /cards/{id}/details`
pub async fn details(client: &Client, card: &Card) -> Result<CardDetails, Error> {
    let path = format!("/cards/{}/details", card.id);
    let (status, body) = client.request(Method::GET, path.as_str(), None).await?;
    let res = decode::<DetailsRes>(StatusCode::OK, status, &body)?;
    Ok(CardDetails {
        total: res.total,
        used: res.used,
        remaining: res.remaining,
        items: match card.content {
            CardContent::Data { .. } => res.cards,
            _ => vec![],
        },
        history: res.history,
    })
}

fn def_api_timeout() -> u64 {
    DEF_API_TIMEOUT
}

/// Treat `null` as the default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(v) => Ok(v),
        Value::Number(v) => Ok(v.to_string()),
        v => Err(serde::de::Error::custom(format!(
            "expect string or number, got {}",
            v
        ))),
    }
}
