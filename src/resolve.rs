//! Typed resolution of settled attempts.

use serde::de::DeserializeOwned;

use crate::observe::Observer;
use crate::{ClientError, ErrorPayload, RawResponse, Result};

/// Build an `Api` error from a non-success response, reading the error body
/// opportunistically. A malformed error body degrades to an absent payload
/// rather than failing resolution.
pub(crate) fn api_error(response: &RawResponse) -> ClientError {
    let payload: Option<ErrorPayload> = serde_json::from_slice(response.bytes()).ok();
    ClientError::api(response.status(), payload)
}

/// Converts a settled call into a typed value or a typed error and reports
/// the outcome to the observer, labeled with the calling verb and path.
pub(crate) struct ResponseResolver<'a> {
    observer: &'a dyn Observer,
    label: String,
}

impl<'a> ResponseResolver<'a> {
    pub(crate) fn new(observer: &'a dyn Observer, label: String) -> Self {
        Self { observer, label }
    }

    pub(crate) fn resolve<T: DeserializeOwned>(&self, settled: Result<RawResponse>) -> Result<T> {
        match settled {
            Ok(response) => {
                let status = response.status();
                match response.json::<T>() {
                    Ok(value) => {
                        self.observer.log(
                            "http",
                            &format!("response received: {}: {}", self.label, status),
                            None,
                        );
                        Ok(value)
                    }
                    Err(err) => {
                        self.observer.error(
                            "http",
                            &format!("request failed: {}: {}", self.label, err),
                            None,
                        );
                        Err(err)
                    }
                }
            }
            Err(err) => {
                let payload = match &err {
                    ClientError::Api {
                        payload: Some(payload),
                        ..
                    } => serde_json::to_value(payload).ok(),
                    _ => None,
                };
                self.observer.error(
                    "http",
                    &format!("request failed: {}: {}", self.label, err),
                    payload.as_ref(),
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::testing::RecordingObserver;
    use http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Collection {
        id: u64,
        name: String,
    }

    #[test]
    fn test_resolves_success_body_and_reports() {
        let observer = RecordingObserver::default();
        let resolver = ResponseResolver::new(&observer, "GET /collections/1".to_string());

        let response = RawResponse::fake(StatusCode::OK, r#"{"id": 1, "name": "papers"}"#);
        let value: Collection = resolver.resolve(Ok(response)).unwrap();

        assert_eq!(
            value,
            Collection {
                id: 1,
                name: "papers".to_string()
            }
        );
        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].1.contains("GET /collections/1"));
    }

    #[test]
    fn test_malformed_success_body_raises_decode() {
        let observer = RecordingObserver::default();
        let resolver = ResponseResolver::new(&observer, "GET /collections".to_string());

        let response = RawResponse::fake(StatusCode::OK, "not json");
        let result: Result<Collection> = resolver.resolve(Ok(response));

        assert!(matches!(result, Err(ClientError::Decode(_))));
        assert_eq!(observer.errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_api_error_keeps_payload_and_reports() {
        let observer = RecordingObserver::default();
        let resolver = ResponseResolver::new(&observer, "PATCH /collections/1".to_string());

        let response = RawResponse::fake(StatusCode::NOT_FOUND, r#"{"detail": "not found"}"#);
        let err = api_error(&response);
        let result: Result<Collection> = resolver.resolve(Err(err));

        match result {
            Err(ClientError::Api {
                status, message, ..
            }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(observer.errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_error_body_degrades_to_status_text() {
        let response = RawResponse::fake(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        let err = api_error(&response);

        match err {
            ClientError::Api {
                payload, message, ..
            } => {
                assert!(payload.is_none());
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
