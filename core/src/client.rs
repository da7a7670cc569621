//! The request client for the GitHub v2 API.
//!
//! # Design
//! `Client` holds a base `Options` value and a `Transport`. A call resolves
//! the options it runs with up front: the base options, or, when per-call
//! overrides are supplied, a fresh `Options` built from the defaults plus
//! those overrides. The base is never touched during a call, so a shared
//! `&Client` can serve concurrent calls with different overrides.
//!
//! Each call is split into `build_request` (pure), the transport round-trip,
//! and `decode_response` (pure).

use serde_json::Value;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::auth;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::options::{is_truthy, Format, Options, OptionsOverride};
use crate::transport::{Transport, UreqTransport};
use crate::types::Decoded;

/// Client for the legacy GitHub v2 API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    options: Options,
    transport: T,
}

impl Client<UreqTransport> {
    pub fn new(overrides: OptionsOverride) -> Self {
        Self::with_transport(overrides, UreqTransport)
    }
}

impl Default for Client<UreqTransport> {
    fn default() -> Self {
        Self::new(OptionsOverride::default())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(overrides: OptionsOverride, transport: T) -> Self {
        Self {
            options: Options::from_overrides(overrides),
            transport,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the whole configuration with the defaults plus `overrides`.
    /// Settings made earlier and absent from `overrides` revert to defaults.
    pub fn configure(&mut self, overrides: OptionsOverride) -> &mut Self {
        self.options = Options::from_overrides(overrides);
        self
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ApiError> {
        self.options.set(name, value.into())?;
        Ok(self)
    }

    /// The named option if its value is truthy, otherwise `default`.
    ///
    /// Falsy stored values (`false`, `0`, `""`) count as absent here. Use
    /// `Options::get` for a strict presence check.
    pub fn get_option(&self, name: &str, default: Option<Value>) -> Option<Value> {
        self.options.get(name).filter(is_truthy).or(default)
    }

    pub fn get(
        &self,
        api_path: &str,
        params: &[(&str, &str)],
        overrides: Option<OptionsOverride>,
    ) -> Result<Decoded, ApiError> {
        self.send(api_path, params, HttpMethod::Get, overrides)
    }

    pub fn post(
        &self,
        api_path: &str,
        params: &[(&str, &str)],
        overrides: Option<OptionsOverride>,
    ) -> Result<Decoded, ApiError> {
        self.send(api_path, params, HttpMethod::Post, overrides)
    }

    /// Send a request and decode the response.
    ///
    /// `overrides` configure this call only: they resolve against the
    /// defaults, exactly like `configure`, and leave the client unchanged.
    pub fn send(
        &self,
        api_path: &str,
        params: &[(&str, &str)],
        method: HttpMethod,
        overrides: Option<OptionsOverride>,
    ) -> Result<Decoded, ApiError> {
        let per_call;
        let options = match overrides {
            Some(overrides) => {
                per_call = Options::from_overrides(overrides);
                &per_call
            }
            None => &self.options,
        };

        let raw = self.do_send(api_path, params, method, options)?;
        decode_response(&raw, options)
    }

    /// Transmit a request and return the undecoded body.
    pub fn do_send(
        &self,
        api_path: &str,
        params: &[(&str, &str)],
        method: HttpMethod,
        options: &Options,
    ) -> Result<String, ApiError> {
        let request = build_request(api_path, params, method, options);

        if options.debug {
            info!(method = %request.method, path = %request.path, "send request");
        } else {
            debug!(method = %request.method, path = %request.path, "send request");
        }

        let response = self
            .transport
            .execute(&request)
            .inspect_err(|e| warn!(path = %request.path, error = %e, "request failed"))?;

        if !response.is_success() {
            warn!(
                path = %request.path,
                status = response.status,
                "request rejected"
            );
            return Err(ApiError::Status {
                status: response.status,
                msg: response.status_text,
            });
        }

        Ok(response.body)
    }

    /// Build the request a call would send with the client's options.
    pub fn build_request(&self, api_path: &str, params: &[(&str, &str)], method: HttpMethod) -> HttpRequest {
        build_request(api_path, params, method, &self.options)
    }

    /// Decode a raw body according to the client's configured format.
    pub fn decode_response(&self, raw: &str) -> Result<Decoded, ApiError> {
        decode_response(raw, &self.options)
    }
}

/// Build the transport-level request for a logical API call.
pub fn build_request(
    api_path: &str,
    params: &[(&str, &str)],
    method: HttpMethod,
    options: &Options,
) -> HttpRequest {
    let params = auth::with_access_token(options, params);
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();

    let mut path = format!(
        "{}/{}/{}",
        options.path,
        options.format.as_str(),
        api_path.trim_end_matches('/')
    );

    let body = match method {
        _ if query.is_empty() => None,
        HttpMethod::Get => {
            path.push('?');
            path.push_str(&query);
            None
        }
        HttpMethod::Post => Some(query),
    };

    let content_length = body.as_ref().map_or(0, String::len);
    let mut headers = vec![
        ("Host".to_string(), options.hostname.clone()),
        ("User-Agent".to_string(), options.user_agent.clone()),
        ("Content-Length".to_string(), content_length.to_string()),
    ];
    if body.is_some() {
        headers.push((
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
    }
    if let Some(authorization) = auth::authorization(options) {
        headers.push(("Authorization".to_string(), authorization));
    }

    HttpRequest {
        method,
        scheme: options.scheme(),
        host: options.hostname.clone(),
        port: options.http_port,
        path,
        headers,
        body,
        timeout: options.timeout_duration(),
    }
}

/// Interpret a raw body according to `options.format`.
pub fn decode_response(raw: &str, options: &Options) -> Result<Decoded, ApiError> {
    match options.format {
        Format::Text => Ok(Decoded::Text(raw.to_string())),
        Format::Json => Ok(Decoded::Json(serde_json::from_str(raw)?)),
    }
}
