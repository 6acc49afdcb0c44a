//! SDK for the administrative client of the marketplace automation backend.
//!
//! - `api`: HTTP client and the REST operations of the backend.
//! - `login`: the QR-login session flow.
//! - `range`: the analytics time-range resolver.

pub mod api;
pub mod login;
pub mod range;
