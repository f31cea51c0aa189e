//! HTTP base layer: auth header injection, retry, error translation.

pub mod client;
pub mod error;
pub mod retry;

pub use client::{ApiClient, Auth};
pub use error::ApiError;
pub use retry::{retry, HttpMethod, RetryPolicy};
