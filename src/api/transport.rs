use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::trace;

use crate::error::{NumlabError, NumlabResult};

/// Wire seam between the API clients and the network.
///
/// Implementations perform exactly one attempt per call. They must not log
/// failures at error level; the calling client does that once.
pub trait Transport {
    /// POSTs `body` as `application/json` to `url` and returns the decoded
    /// response body. `resource` names the target in errors.
    fn post_json(&self, resource: &str, url: &str, body: &Value) -> NumlabResult<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, resource: &str, url: &str, body: &Value) -> NumlabResult<Value> {
        (**self).post_json(resource, url, body)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post_json(&self, resource: &str, url: &str, body: &Value) -> NumlabResult<Value> {
        (**self).post_json(resource, url, body)
    }
}

/// Blocking reqwest transport. No retries and no request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> NumlabResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| NumlabError::Config(format!("reqwest client error: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps a preconfigured client (proxies, TLS roots, headers).
    #[must_use]
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn post_json(&self, resource: &str, url: &str, body: &Value) -> NumlabResult<Value> {
        let payload = serde_json::to_vec(body).map_err(|e| {
            NumlabError::InvalidData(format!("failed to serialize request body: {e}"))
        })?;
        trace!(resource, bytes = payload.len(), "sending request body");

        let transport_error = |e: reqwest::Error| NumlabError::Transport {
            resource: resource.to_owned(),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text() {
                Ok(body) => body,
                Err(err) => {
                    trace!(resource, status = status.as_u16(), error = %err, "error body unreadable");
                    format!("<unreadable body: {err}>")
                }
            };
            return Err(NumlabError::HttpStatus {
                resource: resource.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.bytes().map_err(transport_error)?;
        serde_json::from_slice(&raw).map_err(|e| NumlabError::Decode {
            resource: resource.to_owned(),
            message: e.to_string(),
        })
    }
}
