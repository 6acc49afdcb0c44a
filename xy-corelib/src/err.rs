//! To describe errors of backend operations.
//!
//! ```ignore
//! use xy_corelib::err::ErrResp;
//! // To report a backend response that cannot be decoded.
//! if format_error(body) {
//!     return Err(ErrResp::ErrIntMsg(Some("response format error".to_string())));
//! }
//! ```

use std::{error::Error, fmt};

use serde::Serialize;
use serde_json;

/// The standard error definitions.
#[derive(Debug)]
pub enum ErrResp {
    ErrAuth(Option<String>),
    ErrIntMsg(Option<String>),
    ErrNotFound(Option<String>),
    ErrParam(Option<String>),
    ErrPerm(Option<String>),
    ErrRsc(Option<String>),
    ErrUnknown(Option<String>),
    Custom(&'static str, Option<String>),
}

/// Used for generating JSON strings for errors.
#[derive(Serialize)]
struct RespJson<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// 401, token not authorized.
pub const E_AUTH: &'static str = "err_auth";
/// 503, backend communication error or unexpected response.
pub const E_INT_MSG: &'static str = "err_int_msg";
/// 404, resource (in path) not found.
pub const E_NOT_FOUND: &'static str = "err_not_found";
/// 400, request format error.
pub const E_PARAM: &'static str = "err_param";
/// 403, invalid permission.
pub const E_PERM: &'static str = "err_perm";
/// 503, allocate resource error.
pub const E_RSC: &'static str = "err_rsc";
/// 500, unknown error.
pub const E_UNKNOWN: &'static str = "err_unknown";

/// To generate error JSON string.
pub fn to_json(code: &str, message: Option<&str>) -> String {
    match serde_json::to_string(&RespJson { code, message }) {
        Err(_) => format!("{{\"code\":\"{}\"}}", code),
        Ok(str) => str,
    }
}

impl ErrResp {
    /// To map an unexpected HTTP status of the backend to an error.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ErrResp::ErrParam(Some(message)),
            401 => ErrResp::ErrAuth(Some(message)),
            403 => ErrResp::ErrPerm(Some(message)),
            404 => ErrResp::ErrNotFound(Some(message)),
            500 => ErrResp::ErrUnknown(Some(message)),
            _ => ErrResp::ErrIntMsg(Some(message)),
        }
    }

    /// The error code such as [`E_AUTH`].
    pub fn code(&self) -> &'static str {
        self.parts().0
    }

    fn parts(&self) -> (&'static str, &Option<String>) {
        match *self {
            ErrResp::ErrAuth(ref desc) => (E_AUTH, desc),
            ErrResp::ErrIntMsg(ref desc) => (E_INT_MSG, desc),
            ErrResp::ErrNotFound(ref desc) => (E_NOT_FOUND, desc),
            ErrResp::ErrParam(ref desc) => (E_PARAM, desc),
            ErrResp::ErrPerm(ref desc) => (E_PERM, desc),
            ErrResp::ErrRsc(ref desc) => (E_RSC, desc),
            ErrResp::ErrUnknown(ref desc) => (E_UNKNOWN, desc),
            ErrResp::Custom(err_code, ref desc) => (err_code, desc),
        }
    }
}

impl fmt::Display for ErrResp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (code, desc) = self.parts();
        write!(f, "{}", to_json(code, desc.as_deref()))
    }
}

impl Error for ErrResp {}
