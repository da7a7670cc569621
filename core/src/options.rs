//! Client configuration.
//!
//! # Design
//! `Options` is a plain value: every recognized option is a typed field and
//! `Options::default()` holds the defaults. Callers describe the subset they
//! want to change with an `OptionsOverride`; `Options::from_overrides` fills
//! every absent field from the defaults. Nothing here is shared or mutated
//! behind the caller's back, so a per-call configuration is just another
//! `Options` value.
//!
//! Name-based access (`get` / `set`) goes through the serde representation,
//! which keeps the option names in one place: the field names below.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

pub const DEFAULT_PROTOCOL: &str = "https";
pub const DEFAULT_HOSTNAME: &str = "github.com";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_PATH: &str = "/api/v2";
pub const DEFAULT_USER_AGENT: &str = "github-v2 (https://github.com/ornicar/php-github-api)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// How the response body is interpreted. Also the format segment of the
/// request path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Text,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Text => "text",
        }
    }
}

/// Authentication strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    #[default]
    None,
    OAuth,
    Token,
    Basic,
}

/// The complete, resolved configuration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub protocol: String,
    pub hostname: String,
    pub http_port: u16,
    pub path: String,
    pub format: Format,
    pub user_agent: String,
    /// Seconds; zero disables the timeout.
    pub timeout: u64,
    pub login_type: LoginType,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
    pub oauth_access_token: Option<String>,
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            http_port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            format: Format::Json,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            login_type: LoginType::None,
            username: None,
            password: None,
            api_token: None,
            oauth_access_token: None,
            debug: false,
        }
    }
}

/// A partial configuration. Absent fields fall back to the defaults when
/// resolved, never to a previously active configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsOverride {
    pub protocol: Option<String>,
    pub hostname: Option<String>,
    pub http_port: Option<u16>,
    pub path: Option<String>,
    pub format: Option<Format>,
    pub user_agent: Option<String>,
    pub timeout: Option<u64>,
    pub login_type: Option<LoginType>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
    pub oauth_access_token: Option<String>,
    pub debug: Option<bool>,
}

impl OptionsOverride {
    /// Parse an override set from a JSON object such as
    /// `{"login_type": "basic", "username": "alice"}`.
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::InvalidOption {
            name: "<json>".to_string(),
            reason: e.to_string(),
        })
    }
}

impl Options {
    pub fn from_overrides(overrides: OptionsOverride) -> Self {
        let defaults = Options::default();
        Self {
            protocol: overrides.protocol.unwrap_or(defaults.protocol),
            hostname: overrides.hostname.unwrap_or(defaults.hostname),
            http_port: overrides.http_port.unwrap_or(defaults.http_port),
            path: overrides.path.unwrap_or(defaults.path),
            format: overrides.format.unwrap_or(defaults.format),
            user_agent: overrides.user_agent.unwrap_or(defaults.user_agent),
            timeout: overrides.timeout.unwrap_or(defaults.timeout),
            login_type: overrides.login_type.unwrap_or(defaults.login_type),
            username: overrides.username.or(defaults.username),
            password: overrides.password.or(defaults.password),
            api_token: overrides.api_token.or(defaults.api_token),
            oauth_access_token: overrides.oauth_access_token.or(defaults.oauth_access_token),
            debug: overrides.debug.unwrap_or(defaults.debug),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.protocol == "https"
    }

    pub fn scheme(&self) -> &'static str {
        if self.is_secure() {
            "https"
        } else {
            "http"
        }
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Value of the named option, `None` when it is unknown or unset.
    pub fn get(&self, name: &str) -> Option<Value> {
        let value = serde_json::to_value(self).ok()?;
        value.get(name).filter(|v| !v.is_null()).cloned()
    }

    /// Replace a single option. The value must fit the option's type;
    /// `Value::Null` clears a credential.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ApiError> {
        let mut current = serde_json::to_value(&*self)?;
        let slot = current.get_mut(name).ok_or_else(|| ApiError::InvalidOption {
            name: name.to_string(),
            reason: "unknown option".to_string(),
        })?;
        *slot = value;

        *self = serde_json::from_value(current).map_err(|e| ApiError::InvalidOption {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Falsy values are null, false, zero and the empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
