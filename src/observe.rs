//! Observability collaborator.
//!
//! The client reports one event per attempt outcome (request issued,
//! response received, failure) through an [`Observer`]. The default
//! implementation forwards to `tracing`; tests typically install
//! [`NullObserver`].

use serde_json::Value;

/// Sink for per-attempt outcome reports.
pub trait Observer: Send + Sync {
    /// Record an informational event.
    fn log(&self, category: &str, message: &str, payload: Option<&Value>);

    /// Record a failure event.
    fn error(&self, category: &str, message: &str, payload: Option<&Value>);
}

/// Observer backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn log(&self, category: &str, message: &str, payload: Option<&Value>) {
        match payload {
            Some(payload) => tracing::debug!(category, %payload, "{message}"),
            None => tracing::debug!(category, "{message}"),
        }
    }

    fn error(&self, category: &str, message: &str, payload: Option<&Value>) {
        match payload {
            Some(payload) => tracing::error!(category, %payload, "{message}"),
            None => tracing::error!(category, "{message}"),
        }
    }
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn log(&self, _category: &str, _message: &str, _payload: Option<&Value>) {}

    fn error(&self, _category: &str, _message: &str, _payload: Option<&Value>) {}
}
