use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEnvelope {
    pub user: User,
}

/// What the server saw of a request to `echo`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Lowercased header names.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<HashMap<String, User>>>;

/// Users present when the server starts.
pub fn seed() -> HashMap<String, User> {
    let alice = User {
        login: "alice".to_string(),
        name: Some("Alice".to_string()),
        email: None,
        location: None,
    };
    HashMap::from([(alice.login.clone(), alice)])
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route(
            "/api/v2/{format}/user/show/{login}",
            get(show_user).post(update_user),
        )
        .route("/api/v2/{format}/echo", get(echo).post(echo))
        .route("/api/v2/{format}/status/{code}", get(status).post(status))
        .route("/api/v2/{format}/malformed", get(malformed))
        .route("/api/v2/{format}/large/{mib}", get(large))
        .route("/api/v2/{format}/slow/{millis}", get(slow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn render(format: &str, envelope: &UserEnvelope) -> Response {
    match format {
        "json" => Json(envelope).into_response(),
        "text" => {
            let user = &envelope.user;
            format!(
                "login: {}\nname: {}\n",
                user.login,
                user.name.as_deref().unwrap_or_default()
            )
            .into_response()
        }
        _ => (StatusCode::NOT_FOUND, "unknown format").into_response(),
    }
}

async fn show_user(
    State(db): State<Db>,
    Path((format, login)): Path<(String, String)>,
) -> Response {
    let users = db.read().await;
    match users.get(&login) {
        Some(user) => render(&format, &UserEnvelope { user: user.clone() }),
        None => (StatusCode::NOT_FOUND, "user not found").into_response(),
    }
}

async fn update_user(
    State(db): State<Db>,
    Path((format, login)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let authenticated =
        headers.contains_key(header::AUTHORIZATION) || form.contains_key("access_token");
    if !authenticated {
        return (StatusCode::UNAUTHORIZED, "authentication required").into_response();
    }

    let mut users = db.write().await;
    let Some(user) = users.get_mut(&login) else {
        return (StatusCode::NOT_FOUND, "user not found").into_response();
    };
    if let Some(name) = form.get("values[name]") {
        user.name = Some(name.clone());
    }
    if let Some(email) = form.get("values[email]") {
        user.email = Some(email.clone());
    }
    if let Some(location) = form.get("values[location]") {
        user.location = Some(location.clone());
    }
    info!(login = %user.login, "user updated");
    render(&format, &UserEnvelope { user: user.clone() })
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    debug!(%method, %uri, "echo");
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    })
}

async fn status(Path((format, code)): Path<(String, u16)>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    let body = format!("status {code}");
    if status.is_redirection() {
        let location = format!("/api/v2/{format}/user/show/alice");
        return (status, [(header::LOCATION, location)], body).into_response();
    }
    (status, body).into_response()
}

/// A plain-text body of `mib` mebibytes.
async fn large(Path((_format, mib)): Path<(String, usize)>) -> String {
    "x".repeat(mib * 1024 * 1024)
}

async fn slow(Path((_format, millis)): Path<(String, u64)>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    "done"
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"user":"#)
}
