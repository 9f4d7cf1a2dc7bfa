//! Request transports.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use crate::request::{Method, RequestBody, RequestBuilder};
use crate::{AdminError, Response};

/// Sends a built request and returns the raw response.
///
/// Non-2xx statuses are returned as responses, not errors; the client
/// unwraps them uniformly.
pub trait Transport {
    fn send(&self, request: RequestBuilder) -> Result<Response, AdminError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdminError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: RequestBuilder) -> Result<Response, AdminError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Bytes(bytes) => builder.body(bytes),
            RequestBody::Multipart(part) => {
                let file = multipart::Part::bytes(part.bytes)
                    .file_name(part.file_name)
                    .mime_str(&part.content_type)
                    .map_err(|e| AdminError::RequestError(e.to_string()))?;
                builder.multipart(multipart::Form::new().part(part.field, file))
            }
        };

        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                AdminError::Timeout
            } else {
                AdminError::RequestError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .map_err(|e| AdminError::RequestError(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}
