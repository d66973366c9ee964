//! Infrastructure Layer
//!
//! HTTP client for the model provider.

pub mod http;

pub use http::HttpModelClient;
