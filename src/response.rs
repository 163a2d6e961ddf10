//! Buffered response wrapper.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientError, Result};

/// A fully buffered HTTP response.
///
/// The body is read eagerly so classification and resolution can inspect it
/// without holding the connection open.
#[derive(Debug)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Buffer a reqwest response. A failure while reading the body counts
    /// as a transport failure, not a response.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the response body as bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::Decode)
    }

    #[cfg(test)]
    pub(crate) fn fake(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parses_body() {
        let response = RawResponse::fake(StatusCode::OK, r#"{"id": 7}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["id"], 7);
        assert!(response.is_success());
    }

    #[test]
    fn test_json_decode_failure_is_loud() {
        let response = RawResponse::fake(StatusCode::OK, "<html>oops</html>");
        let result: Result<serde_json::Value> = response.json();
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
