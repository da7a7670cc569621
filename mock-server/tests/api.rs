use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, UserEnvelope};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str, authorization: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
    if let Some(value) = authorization {
        builder = builder.header(http::header::AUTHORIZATION, value);
    }
    builder.body(body.to_string()).unwrap()
}

// --- user/show ---

#[tokio::test]
async fn show_user_json() {
    let resp = app()
        .oneshot(get("/api/v2/json/user/show/alice"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: UserEnvelope = body_json(resp).await;
    assert_eq!(envelope.user.login, "alice");
    assert_eq!(envelope.user.name.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn show_user_text() {
    let resp = app()
        .oneshot(get("/api/v2/text/user/show/alice"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"login: alice\nname: Alice\n");
}

#[tokio::test]
async fn show_unknown_user_returns_404() {
    let resp = app()
        .oneshot(get("/api/v2/json/user/show/nobody"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_requires_auth() {
    let resp = app()
        .oneshot(form_request(
            "/api/v2/json/user/show/alice",
            "values%5Bname%5D=Eve",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_user_accepts_access_token_param() {
    let resp = app()
        .oneshot(form_request(
            "/api/v2/json/user/show/alice",
            "values%5Blocation%5D=Paris&access_token=tok",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: UserEnvelope = body_json(resp).await;
    assert_eq!(envelope.user.location.as_deref(), Some("Paris"));
}

// --- echo / status / malformed ---

#[tokio::test]
async fn echo_reports_query_and_headers() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v2/json/echo?a=1&b=two")
                .header(http::header::USER_AGENT, "tests")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/api/v2/json/echo");
    assert_eq!(echo.query.as_deref(), Some("a=1&b=two"));
    assert_eq!(echo.headers["user-agent"], "tests");
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_post_body() {
    let resp = app()
        .oneshot(form_request("/api/v2/json/echo", "name=x", Some("Basic abc")))
        .await
        .unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "name=x");
    assert_eq!(echo.headers["authorization"], "Basic abc");
    assert!(echo.query.is_none());
}

#[tokio::test]
async fn status_endpoint_returns_requested_code() {
    for code in [201u16, 204, 404, 500] {
        let resp = app()
            .oneshot(get(&format!("/api/v2/json/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn redirect_status_carries_location() {
    let resp = app().oneshot(get("/api/v2/text/status/302")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers()[http::header::LOCATION],
        "/api/v2/text/user/show/alice"
    );
}

#[tokio::test]
async fn large_returns_requested_size() {
    let resp = app().oneshot(get("/api/v2/text/large/2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 2 * 1024 * 1024);
}

#[tokio::test]
async fn malformed_returns_truncated_json() {
    let resp = app().oneshot(get("/api/v2/json/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
}

// --- state carried across requests ---

#[tokio::test]
async fn update_then_show() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request(
            "/api/v2/json/user/show/alice",
            "values%5Bname%5D=Alice+Liddell&values%5Bemail%5D=alice%40example.org",
            Some("Basic YWxpY2U6c2VjcmV0"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: UserEnvelope = body_json(resp).await;
    assert_eq!(updated.user.name.as_deref(), Some("Alice Liddell"));
    assert_eq!(updated.user.email.as_deref(), Some("alice@example.org"));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/v2/json/user/show/alice"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: UserEnvelope = body_json(resp).await;
    assert_eq!(fetched.user, updated.user);
}
