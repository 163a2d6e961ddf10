//! The client facade.

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::executor::RequestExecutor;
use crate::observe::{Observer, TracingObserver};
use crate::resolve::ResponseResolver;
use crate::retry::RetryCoordinator;
use crate::{ClientConfig, FilePart, RequestBody, RequestDescriptor, Result, RetryPolicy};

/// Typed API client. The only surface callers use; each verb binds a fixed
/// timeout budget and retry eligibility.
///
/// The client holds no state across calls, so cloning is cheap and
/// concurrent calls never contend. There is no separate cancellation
/// token: dropping the future returned by any method cancels the call and
/// aborts the in-flight attempt.
#[derive(Clone)]
pub struct ApiClient {
    executor: RequestExecutor,
    config: Arc<ClientConfig>,
    observer: Arc<dyn Observer>,
}

impl ApiClient {
    /// Create a client with the given configuration, reporting outcomes
    /// through `tracing`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a client with a custom observability sink.
    pub fn with_observer(config: ClientConfig, observer: Arc<dyn Observer>) -> Self {
        let executor = RequestExecutor::new(&config);
        Self {
            executor,
            config: Arc::new(config),
            observer,
        }
    }

    /// Create a client configured from the environment
    /// (`QUILL_API_URL`, defaulting to the local backend).
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET a resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(
            Method::GET,
            path,
            RequestBody::Empty,
            self.config.timeout,
            self.config.retry.clone(),
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.call(
            Method::POST,
            path,
            RequestBody::json(body)?,
            self.config.timeout,
            self.config.retry.clone(),
        )
        .await
    }

    /// PATCH a resource with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.call(
            Method::PATCH,
            path,
            RequestBody::json(body)?,
            self.config.timeout,
            self.config.retry.clone(),
        )
        .await
    }

    /// DELETE a resource.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(
            Method::DELETE,
            path,
            RequestBody::Empty,
            self.config.timeout,
            self.config.retry.clone(),
        )
        .await
    }

    /// POST a JSON body to a legitimately long-running operation (e.g. a
    /// generation-augmented search). Same retry policy as the standard
    /// verbs, but with the larger timeout budget.
    pub async fn post_slow<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.call(
            Method::POST,
            path,
            RequestBody::json(body)?,
            self.config.slow_timeout,
            self.config.retry.clone(),
        )
        .await
    }

    /// POST a multipart file upload. Never retried: re-issuing a file
    /// submission risks duplicate server-side resources.
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, parts: Vec<FilePart>) -> Result<T> {
        self.call(
            Method::POST,
            path,
            RequestBody::Multipart(parts),
            self.config.slow_timeout,
            RetryPolicy::none(),
        )
        .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        timeout: std::time::Duration,
        policy: RetryPolicy,
    ) -> Result<T> {
        let descriptor = RequestDescriptor::new(&self.config, method, path, body, timeout)?;
        let resolver = ResponseResolver::new(self.observer.as_ref(), descriptor.label());
        let coordinator = RetryCoordinator::new(&self.executor, &policy, self.observer.as_ref());

        let settled = coordinator.run(&descriptor).await;
        resolver.resolve(settled)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_env()
    }
}
