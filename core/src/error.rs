//! Error types for the GitHub v2 request client.
//!
//! # Design
//! Every failure mode of a single request/response cycle maps to one variant.
//! `Status` keeps exactly the `{status, msg}` pair the API reports for a
//! rejected call; the other variants carry their underlying cause so callers
//! can inspect it through `std::error::Error::source`.

use thiserror::Error;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The connection, TLS handshake, or body read failed.
    #[error("transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a status above `MAX_SUCCESS_STATUS`.
    #[error("HTTP {status}: {msg}")]
    Status { status: u16, msg: String },

    /// The body could not be parsed as JSON.
    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// An option name is unknown or its value has the wrong shape.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: String, reason: String },

    /// The HTTP method is neither GET nor POST.
    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),
}

impl ApiError {
    /// HTTP status carried by a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_code_and_message() {
        let err = ApiError::Status {
            status: 404,
            msg: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn decode_error_wraps_serde_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(source);
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.status().is_none());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_option_names_the_option() {
        let err = ApiError::InvalidOption {
            name: "format".to_string(),
            reason: "unknown variant `xml`".to_string(),
        };
        assert!(err.to_string().contains("`format`"));
    }
}
