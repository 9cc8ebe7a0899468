//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResponse`] - unified error handling
//! - [`logger`] - tracing setup
//! - [`validation`] - API-boundary input checks

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse, ok};
pub use result::AppResult;
