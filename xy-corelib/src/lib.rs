//! Common libraries of xy-admin modules.

pub mod constants;
pub mod err;
pub mod logger;
pub mod strings;
