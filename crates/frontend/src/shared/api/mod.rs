//! HTTP access to the REST backend
//!
//! - `transport.rs`: the `HttpTransport` seam and its gloo-net implementation
//! - `client.rs`: `ApiClient`, envelope unwrapping and toast side effects
//! - `error.rs`: `ApiError`

mod client;
mod error;
mod transport;

pub use client::{ApiClient, DEFAULT_DELETE_MESSAGE};
pub use error::ApiError;
pub use transport::{ApiRequest, GlooTransport, HttpMethod, HttpTransport, RawResponse};

#[cfg(test)]
pub mod testing;
