//! # Quill Client
//!
//! A resilient typed API client: raw network calls become typed, classified
//! outcomes with bounded, backoff-governed retries.
//!
//! ## Features
//!
//! - **Typed results**: every call resolves to exactly one success value of
//!   the caller-declared type or exactly one typed error
//! - **Bounded retries**: exponential backoff (1s/2s/4s by default), server
//!   errors and transport failures only; client errors and timeouts are
//!   never retried
//! - **Timeout budgets**: a fresh full per-attempt deadline, 10s for the
//!   standard verbs and 60s for long-running operations and uploads
//! - **Failure classification**: `Timeout`, `Api`, `Transport`, and `Decode`
//!   errors callers can pattern-match on
//! - **Observability**: one report per attempt outcome through a pluggable
//!   [`Observer`], backed by `tracing` by default
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quill_client::{ApiClient, ClientConfig};
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::from_env());
//!
//!     let collections: Value = client.get("/collections").await?;
//!     println!("{collections}");
//!     Ok(())
//! }
//! ```
//!
//! ## Handling failures
//!
//! ```rust,no_run
//! use quill_client::{ApiClient, ClientError};
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ApiClient::from_env();
//!
//!     match client.get::<Value>("/collections/1").await {
//!         Ok(collection) => println!("{collection}"),
//!         Err(ClientError::Api { status: 404, .. }) => println!("gone"),
//!         Err(ClientError::Timeout { budget }) => println!("gave up after {budget:?}"),
//!         Err(err) => eprintln!("request failed: {err}"),
//!     }
//! }
//! ```

mod client;
mod config;
mod error;
mod executor;
mod observe;
mod request;
mod resolve;
mod response;
mod retry;

pub use client::ApiClient;
pub use config::{BASE_URL_ENV, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use error::{ClientError, ErrorPayload, Result};
pub use observe::{NullObserver, Observer, TracingObserver};
pub use request::{FilePart, RequestBody, RequestDescriptor};
pub use response::RawResponse;
pub use retry::RetryPolicy;

// Re-export common types
pub use bytes::Bytes;
pub use http::{Method, StatusCode};

/// Prelude for common imports.
///
/// ```
/// use quill_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::ApiClient;
    pub use crate::config::{ClientConfig, ClientConfigBuilder};
    pub use crate::error::{ClientError, ErrorPayload, Result};
    pub use crate::observe::{NullObserver, Observer, TracingObserver};
    pub use crate::request::FilePart;
    pub use crate::retry::RetryPolicy;
    pub use http::{Method, StatusCode};
}
