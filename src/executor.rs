//! Single-attempt request execution.

use crate::{ClientConfig, ClientError, RawResponse, RequestDescriptor, Result};

/// Executes exactly one HTTP attempt under the descriptor's deadline.
///
/// The deadline covers send plus body buffering. When it fires, the attempt
/// future is dropped, which aborts the in-flight reqwest call and frees the
/// underlying connection.
#[derive(Clone)]
pub(crate) struct RequestExecutor {
    inner: reqwest::Client,
}

impl RequestExecutor {
    pub(crate) fn new(config: &ClientConfig) -> Self {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("Failed to build HTTP client");

        Self { inner }
    }

    /// Perform one attempt. Returns the buffered response if it arrives
    /// within the budget; `Timeout` when the deadline fires; `Transport`
    /// for any network-level failure before a buffered response.
    pub(crate) async fn execute(&self, descriptor: &RequestDescriptor) -> Result<RawResponse> {
        let request = descriptor.to_request(&self.inner)?;
        let budget = descriptor.timeout();

        let attempt = async {
            let response = self.inner.execute(request).await?;
            RawResponse::from_reqwest(response).await
        };

        match tokio::time::timeout(budget, attempt).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { budget }),
        }
    }
}
