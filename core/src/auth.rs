//! Authentication strategies selected by `login_type`.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::options::{LoginType, Options};

/// `Authorization` header value for the configured login type, if it uses one.
/// Unset credentials encode as empty strings.
pub fn authorization(options: &Options) -> Option<String> {
    let credentials = match options.login_type {
        LoginType::Token => format!(
            "{}/token:{}",
            options.username.as_deref().unwrap_or_default(),
            options.api_token.as_deref().unwrap_or_default()
        ),
        LoginType::Basic => format!(
            "{}:{}",
            options.username.as_deref().unwrap_or_default(),
            options.password.as_deref().unwrap_or_default()
        ),
        LoginType::None | LoginType::OAuth => return None,
    };
    Some(format!("Basic {}", STANDARD.encode(credentials)))
}

/// Parameters to send. OAuth sets `access_token`, in place when the caller
/// already supplied one and appended otherwise.
pub fn with_access_token(options: &Options, params: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    if options.login_type == LoginType::OAuth {
        let token = options.oauth_access_token.clone().unwrap_or_default();
        match out.iter_mut().find(|(k, _)| k == "access_token") {
            Some((_, value)) => *value = token,
            None => out.push(("access_token".to_string(), token)),
        }
    }
    out
}
