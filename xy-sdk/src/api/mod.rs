//! REST operations of the backend.

pub mod account;
pub mod analytics;
pub mod card;
pub mod http;
pub mod qrlogin;
