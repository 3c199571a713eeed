//! Finance service layer
//!
//! This module handles all communication with the remote services:
//! - HTTP client abstraction (trait + reqwest adapter)
//! - Typed calls for fraud checks, savings recommendations and
//!   low-balance notifications
//! - Error classification

pub mod client;
pub mod error;
pub mod http;
pub mod reqwest_client;

#[cfg(test)]
pub mod mock;

pub use client::FinanceApi;
pub use error::ApiError;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use reqwest_client::ReqwestHttpClient;
