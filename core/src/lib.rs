//! Blocking client for the legacy GitHub v2 API.
//!
//! # Overview
//! Turns a logical API call such as `user/show/alice` into an HTTP request
//! against `<protocol>://<hostname>:<port><path>/<format>/<api path>`, adds
//! the configured authentication, sends it, and decodes the body as JSON or
//! returns it as text.
//!
//! # Design
//! - `Options` is an immutable-by-default configuration value. Per-call
//!   overrides derive a new value instead of mutating the client.
//! - Request building (`build_request`) and response decoding
//!   (`decode_response`) are pure; the network round-trip sits behind the
//!   `Transport` trait, with `UreqTransport` as the real implementation.
//! - One call is one connection. There is no retry, caching, pagination or
//!   connection pooling.

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

pub use client::{build_request, decode_response, Client};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, MAX_SUCCESS_STATUS};
pub use options::{Format, LoginType, Options, OptionsOverride};
pub use transport::{Transport, UreqTransport};
pub use types::{Decoded, User, UserEnvelope};
