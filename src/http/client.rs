use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use crate::config::ClientConfig;
use crate::error::{ClientError, TransportFault};

use super::request::ApiRequest;
use super::response::ApiReply;

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiReply, TransportFault>> + Send + 'a>>;

/// The "execute a request, get a response" capability the engine runs on.
///
/// Implementations must report every non-2xx reply as a [`TransportFault`]
/// with `status` set, and every connection-level failure with `status` empty.
pub trait Transport: Send + Sync {
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Production transport over `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ms) = config.timeout_ms {
            if ms > 0 {
                builder = builder.timeout(Duration::from_millis(ms));
            }
        }

        if let Some(ref proxy_url) = config.proxy_url {
            if !proxy_url.is_empty() {
                let proxy = Proxy::all(proxy_url)
                    .map_err(|err| ClientError::Http(format!("Invalid proxy URL: {err}")))?;
                builder = builder.proxy(proxy);
            }
        }

        if !config.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|err| ClientError::Http(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self::new(client))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportFault> {
        let headers = build_headers(&request.headers).map_err(TransportFault::new)?;

        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|err| TransportFault {
                status: err.status().map(|s| s.as_u16()),
                message: format!("Request failed: {}", err.without_url()),
            })?;
        let status = response.status();

        let bytes = response.bytes().await.map_err(|err| TransportFault {
            status: Some(status.as_u16()),
            message: format!("Failed to read response: {}", err.without_url()),
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        tracing::trace!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            size = bytes.len(),
            "reply received"
        );

        if !status.is_success() {
            return Err(TransportFault::with_status(
                status.as_u16(),
                format!(
                    "The remote server returned an error: ({}) {}. {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown"),
                    body.trim()
                ),
            ));
        }

        Ok(ApiReply {
            status: status.as_u16(),
            body,
        })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.send(request))
    }
}

pub fn build_headers(input: &HashMap<String, String>) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        if key.is_empty() {
            continue;
        }

        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|err| format!("Invalid header name `{key}`: {err}"))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| format!("Invalid header value for `{key}`: {err}"))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
