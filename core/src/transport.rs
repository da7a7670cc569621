//! Executing an `HttpRequest` over the network.
//!
//! # Design
//! `Client` only ever talks to the `Transport` trait, so tests can swap the
//! network for a closure. `UreqTransport` builds a fresh agent per call: one
//! outbound connection per request and no pooling. Status codes come back as
//! data, redirects included; deciding what counts as a failure is the
//! client's job. Proxy settings from the environment are ignored and
//! success bodies are read to the end without a size cap.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MAX_SUCCESS_STATUS};

/// Executes a request and returns the raw response.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// Blocking transport backed by ureq.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

/// Headers ureq derives itself from the URL and the body.
const DERIVED_HEADERS: [&str; 2] = ["host", "content-length"];

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .proxy(None)
            .timeout_global(request.timeout)
            .build()
            .new_agent();

        let url = request.url();
        let headers = request
            .headers
            .iter()
            .filter(|(name, _)| !DERIVED_HEADERS.iter().any(|h| name.eq_ignore_ascii_case(h)));

        let mut response = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(&url);
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpMethod::Post => {
                let mut builder = agent.post(&url);
                for (name, value) in headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        // Failure statuses are answered without reading the body.
        let body = if status.as_u16() > MAX_SUCCESS_STATUS {
            String::new()
        } else {
            response
                .body_mut()
                .with_config()
                .limit(u64::MAX)
                .read_to_string()?
        };

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            headers,
            body,
        })
    }
}
