//! A wrapped HTTP client that is used for the backend APIs.
//!
//! Here is an example to create a client to access an API:
//!
//! ```ignore
//! use reqwest::Method;
//! use xy_sdk::api::http::{Client, ClientOptions};
//!
//! async fn main() {
//!     let opts = ClientOptions {
//!         base: "http://localhost:8080".to_string(),
//!         token: None,
//!     };
//!     let client = Client::new(opts);
//!     match client.request(Method::GET, "/cookies/details", None).await {
//!         Err(e) => {
//!             // Handle error.
//!         },
//!         Ok((status_code, body)) => {
//!             // Handle response.
//!         },
//!     }
//! }
//! ```
use std::{error::Error as StdError, fmt};

use bytes::Bytes;
use reqwest::{Client as ReqwestClient, Method, StatusCode, Url, header};
use serde::{Deserialize, de::DeserializeOwned};

use xy_corelib::{
    constants::ContentType,
    err::{self, ErrResp},
};

/// The HTTP client to request backend APIs.
#[derive(Clone)]
pub struct Client {
    /// The underlying HTTP client instance.
    client: ReqwestClient,
    /// Backend base path.
    base: String,
    /// The bearer token.
    token: Option<String>,
}

/// Options of the HTTP client [`Client`].
pub struct ClientOptions {
    /// Backend base path with scheme. For example `http://localhost:8080`
    pub base: String,
    /// The bearer token if the backend requires one.
    pub token: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    Std(Box<dyn StdError + Send + Sync>),
    Api(ApiError),
}

/// The API error.
#[derive(Debug)]
pub struct ApiError {
    /// Error code such as [`xy_corelib::err::E_NOT_FOUND`].
    pub code: String,
    /// Detail message.
    pub message: Option<String>,
}

/// The placeholder origin to build paths with [`Url`].
const PATH_ORIGIN: &'static str = "http://localhost";

/// Known error body formats of the backend.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

impl Client {
    /// Create an instance.
    pub fn new(opts: ClientOptions) -> Self {
        Client {
            client: ReqwestClient::new(),
            base: opts.base.trim_end_matches('/').to_string(),
            token: opts.token,
        }
    }

    /// The backend base path.
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Execute a backend API request.
    /// - `api_path` is the relative path (of the base) of the API with query string.
    ///   For example: `/analytics/orders?start_date=2024-02-27&end_date=2024-03-01`.
    /// - `body` **MUST** be JSON format.
    pub async fn request(
        &self,
        method: Method,
        api_path: &str,
        body: Option<Bytes>,
    ) -> Result<(StatusCode, Bytes), Error> {
        let url = format!("{}{}", self.base, api_path);
        let mut builder = self.client.request(method, url.as_str());
        if let Some(token) = self.token.as_ref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.header(header::CONTENT_TYPE, ContentType::JSON);
            builder = builder.body(body);
        }
        let req = match builder.build() {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(req) => req,
        };
        let resp = match self.client.execute(req).await {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(resp) => resp,
        };
        let status = resp.status();
        let body = match resp.bytes().await {
            Err(e) => return Err(Error::Std(Box::new(e))),
            Ok(body) => body,
        };
        Ok((status, body))
    }
}

impl ApiError {
    /// To generate an error from an unexpected response.
    pub fn from_resp(status: StatusCode, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Err(_) => String::from_utf8_lossy(body).to_string(),
            Ok(body) => match body.detail.or(body.message) {
                None => status.canonical_reason().unwrap_or("").to_string(),
                Some(message) => message,
            },
        };
        let code = ErrResp::from_status(status.as_u16(), String::new()).code();
        ApiError {
            code: code.to_string(),
            message: match message.len() {
                0 => None,
                _ => Some(message),
            },
        }
    }

    /// To generate an error for a response that does not match the expected format.
    pub fn unexpected(message: String) -> Self {
        ApiError {
            code: err::E_INT_MSG.to_string(),
            message: Some(message),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Std(e) => write!(f, "{}", e),
            Error::Api(e) => write!(f, "{}", err::to_json(e.code.as_str(), e.message.as_deref())),
        }
    }
}

impl StdError for Error {}

/// To join path segments into an API path for [`Client::request`]. Each segment is
/// percent-encoded so that `/`, `?` and `#` stay inside the segment.
///
/// For example `["qr-login", "check", "a/b"]` becomes `/qr-login/check/a%2Fb`.
pub fn api_path(segments: &[&str]) -> Result<String, Error> {
    let mut url = match Url::parse(PATH_ORIGIN) {
        Err(e) => return Err(Error::Std(Box::new(e))),
        Ok(url) => url,
    };
    match url.path_segments_mut() {
        Err(_) => {
            let msg = "cannot build API path".to_string();
            return Err(Error::Api(ApiError::unexpected(msg)));
        }
        Ok(mut path) => {
            path.clear().extend(segments);
        }
    }
    Ok(url.path().to_string())
}

/// To decode the response body with the expected status code, or to generate the API error.
pub(crate) fn decode<T: DeserializeOwned>(
    expect_status: StatusCode,
    status: StatusCode,
    body: &[u8],
) -> Result<T, Error> {
    if status != expect_status {
        return Err(Error::Api(ApiError::from_resp(status, body)));
    }
    match serde_json::from_slice::<T>(body) {
        Err(e) => Err(Error::Api(ApiError::unexpected(e.to_string()))),
        Ok(data) => Ok(data),
    }
}
