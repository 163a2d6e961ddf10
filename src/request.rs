//! Request descriptors.
//!
//! A [`RequestDescriptor`] captures everything about a call before the first
//! attempt and is immutable from then on. Each attempt rebuilds a fresh
//! `reqwest::Request` from the descriptor, so a retried request never reuses
//! a consumed body.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, header};
use reqwest::multipart;
use serde::Serialize;
use url::Url;

use crate::{ClientConfig, ClientError, Result};

/// One file part of a multipart upload body.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name.
    pub name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the file contents.
    pub mime_type: String,
    /// File contents.
    pub data: Bytes,
}

impl FilePart {
    /// Create a file part.
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// Request body variants supported by the client.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A serialized JSON body.
    Json(Bytes),
    /// A multipart form of file parts.
    Multipart(Vec<FilePart>),
}

impl RequestBody {
    /// Serialize a value into a JSON body.
    pub fn json<B: Serialize>(value: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(value).map_err(ClientError::Decode)?;
        Ok(Self::Json(Bytes::from(bytes)))
    }
}

/// An immutable description of one call: method, resolved URL, headers,
/// body, and the per-attempt timeout budget.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
    pub(crate) timeout: Duration,
    path: String,
}

impl RequestDescriptor {
    /// Build a descriptor from the client configuration and call parameters.
    pub(crate) fn new(
        config: &ClientConfig,
        method: Method,
        path: &str,
        body: RequestBody,
        timeout: Duration,
    ) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let url = base.join(path)?;

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::try_from(config.user_agent.as_str()) {
            headers.insert(header::USER_AGENT, value);
        }
        for (name, value) in &config.default_headers {
            // Invalid configured headers are skipped rather than failing the call.
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }
        if matches!(body, RequestBody::Json(_)) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
            timeout,
            path: path.to_string(),
        })
    }

    /// The per-attempt timeout budget, fixed at issuance.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Label for observability reports, e.g. `POST /search`.
    pub(crate) fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Materialize a fresh `reqwest::Request` for one attempt.
    pub(crate) fn to_request(&self, client: &reqwest::Client) -> Result<reqwest::Request> {
        let mut builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());

        builder = match &self.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes.clone()),
            RequestBody::Multipart(parts) => {
                let mut form = multipart::Form::new();
                for part in parts {
                    let piece = multipart::Part::bytes(part.data.to_vec())
                        .file_name(part.file_name.clone())
                        .mime_str(&part.mime_type)?;
                    form = form.part(part.name.clone(), piece);
                }
                builder.multipart(form)
            }
        };

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::builder()
            .base_url("https://api.example.com")
            .default_header("X-Workspace", "default")
            .build()
    }

    #[test]
    fn test_joins_path_onto_base_url() {
        let descriptor = RequestDescriptor::new(
            &config(),
            Method::GET,
            "/collections/1",
            RequestBody::Empty,
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(descriptor.url.as_str(), "https://api.example.com/collections/1");
        assert_eq!(descriptor.label(), "GET /collections/1");
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let body = RequestBody::json(&serde_json::json!({"name": "papers"})).unwrap();
        let descriptor = RequestDescriptor::new(
            &config(),
            Method::POST,
            "/collections",
            body,
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(
            descriptor.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(descriptor.headers.get("X-Workspace").unwrap(), "default");
    }

    #[test]
    fn test_empty_body_has_no_content_type() {
        let descriptor = RequestDescriptor::new(
            &config(),
            Method::DELETE,
            "/documents/7",
            RequestBody::Empty,
            Duration::from_secs(10),
        )
        .unwrap();

        assert!(descriptor.headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ClientConfig::builder().base_url("not a url").build();
        let result = RequestDescriptor::new(
            &config,
            Method::GET,
            "/health",
            RequestBody::Empty,
            Duration::from_secs(10),
        );

        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_rebuilds_fresh_request_per_attempt() {
        let body = RequestBody::json(&serde_json::json!({"q": "rust"})).unwrap();
        let descriptor = RequestDescriptor::new(
            &config(),
            Method::POST,
            "/search",
            body,
            Duration::from_secs(10),
        )
        .unwrap();

        let client = reqwest::Client::new();
        let first = descriptor.to_request(&client).unwrap();
        let second = descriptor.to_request(&client).unwrap();

        assert_eq!(first.method(), second.method());
        assert!(first.body().is_some());
        assert!(second.body().is_some());
    }
}
