//! HTTP response handling and API envelope unwrapping.

use crate::AdminError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

/// Error body; only `message` is read.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, AdminError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| AdminError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Convert non-2xx responses into [`AdminError::Api`].
    ///
    /// The message is the body's `message` (or `error`) field when the body
    /// is JSON, otherwise the raw text.
    pub fn error_for_status(self) -> Result<Self, AdminError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .or_else(|| self.text().ok().filter(|t| !t.trim().is_empty()))
            .unwrap_or_else(|| "Unknown error".to_string());

        Err(AdminError::Api {
            status: self.status,
            message,
        })
    }

    /// Parse the payload, unwrapping a `{"data": ...}` envelope if present.
    ///
    /// A body without a `data` key is read as the payload itself; a body
    /// with one is never reinterpreted, so `{"data": null}` is an error.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, AdminError> {
        let value: serde_json::Value = serde_json::from_slice(&self.body)
            .map_err(|e| AdminError::ParseError(e.to_string()))?;
        let payload = match value {
            serde_json::Value::Object(mut map) => match map.remove("data") {
                Some(data) => data,
                None => serde_json::Value::Object(map),
            },
            other => other,
        };
        serde_json::from_value(payload).map_err(|e| AdminError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Uploaded {
        url: String,
    }

    #[test]
    fn test_data_unwraps_envelope() {
        let resp = make_response(200, br#"{"message": "ok", "data": {"url": "a.png"}}"#);
        let data: Uploaded = resp.data().unwrap();
        assert_eq!(data.url, "a.png");
    }

    #[test]
    fn test_data_accepts_bare_payload() {
        let resp = make_response(200, br#"{"url": "b.png"}"#);
        let data: Uploaded = resp.data().unwrap();
        assert_eq!(data.url, "b.png");
    }

    #[test]
    fn test_data_rejects_garbage() {
        let resp = make_response(200, b"<html>");
        assert!(matches!(resp.data::<Uploaded>(), Err(AdminError::ParseError(_))));
    }

    #[test]
    fn test_error_for_status_reads_json_message() {
        let resp = make_response(422, br#"{"message": "Price must be positive"}"#);
        match resp.error_for_status() {
            Err(AdminError::Api { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Price must be positive");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_for_status_falls_back_to_text() {
        let resp = make_response(502, b"Bad Gateway");
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Unknown error");
    }

    #[test]
    fn test_data_null_envelope_is_an_error() {
        let resp = make_response(201, br#"{"message": "Created", "data": null}"#);
        assert!(matches!(resp.data::<Uploaded>(), Err(AdminError::ParseError(_))));
    }
}
