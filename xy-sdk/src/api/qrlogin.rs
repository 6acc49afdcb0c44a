//! QR-code login APIs.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::http::{ApiError, Client, Error, api_path, decode};
use crate::login::LoginBackend;

/// The login session status reported by the backend.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStatus {
    Pending,
    Waiting,
    Success,
    Expired,
    Error,
    /// Any other value such as `scanned`. Treated as "keep polling".
    #[serde(other)]
    Other,
}

/// A created login session with the scannable code.
#[derive(Clone, Debug, PartialEq)]
pub struct QrSession {
    pub session_id: String,
    pub qr_code_url: String,
}

#[derive(Deserialize)]
struct GenerateRes {
    #[serde(default)]
    success: bool,
    session_id: Option<String>,
    qr_code_url: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct CheckRes {
    status: QrStatus,
}

impl QrStatus {
    /// Terminal statuses stop polling.
    pub fn is_terminal(&self) -> bool {
        match self {
            QrStatus::Success | QrStatus::Expired | QrStatus::Error => true,
            _ => false,
        }
    }
}

/// `POST /qr-login/generate`
///
/// A response without `success`, `session_id` or `qr_code_url` is an error.
pub async fn generate(client: &Client) -> Result<QrSession, Error> {
    let (status, body) = client
        .request(Method::POST, "/qr-login/generate", None)
        .await?;
    let res = decode::<GenerateRes>(StatusCode::OK, status, &body)?;
    if !res.success {
        let msg = res
            .message
            .unwrap_or_else(|| "generate QR code failed".to_string());
        return Err(Error::Api(ApiError::unexpected(msg)));
    }
    match (res.session_id, res.qr_code_url) {
        (Some(session_id), Some(qr_code_url)) if session_id.len() > 0 && qr_code_url.len() > 0 => {
            Ok(QrSession {
                session_id,
                qr_code_url,
            })
        }
        _ => Err(Error::Api(ApiError::unexpected(
            "missing session_id or qr_code_url".to_string(),
        ))),
    }
}

/// `GET /qr-login/check/{session_id}`
pub async fn check(client: &Client, session_id: &str) -> Result<QrStatus, Error> {
    let path = api_path(&["qr-login", "check", session_id])?;
    let (status, body) = client.request(Method::GET, path.as_str(), None).await?;
    let res = decode::<CheckRes>(StatusCode::OK, status, &body)?;
    Ok(res.status)
}

#[async_trait]
impl LoginBackend for Client {
    async fn generate(&self) -> Result<QrSession, Error> {
        generate(self).await
    }

    async fn check(&self, session_id: &str) -> Result<QrStatus, Error> {
        check(self, session_id).await
    }
}
