mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

use common::{expect_error, TestServer, ADMIN_EMAIL, ADMIN_PASSWORD, GUEST_EMAIL, GUEST_PASSWORD};

#[tokio::test]
async fn health_reports_database_state() -> Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    server.store.set_offline(true);
    let res = client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["error"], "database unavailable");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": ADMIN_EMAIL }))
        .send()
        .await?;
    expect_error(res, 400, "Email and password are required").await?;

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "email": "", "password": "x" }))
        .send()
        .await?;
    expect_error(res, 400, "Email and password are required").await
}

#[tokio::test]
async fn login_rejects_malformed_email_before_lookup() -> Result<()> {
    let server = TestServer::start().await?;
    server.store.set_offline(true);

    let res = server.login(&server.client(), "not-an-email", "pw").await?;
    expect_error(res, 400, "Invalid email format").await
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.login(&server.client(), ADMIN_EMAIL, "wrong").await?;
    expect_error(res, 401, "Invalid email or password").await?;
    assert!(server.sessions.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn login_sets_session_cookie_and_reports_role() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.login(&server.client(), ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("petcare.sid="), "cookie: {}", cookie);
    assert!(cookie.contains("HttpOnly"));

    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "message": "Logged in successfully", "role": "admin" }));
    assert_eq!(server.sessions.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn missing_role_defaults_to_user() -> Result<()> {
    let server = TestServer::start().await?;
    server.store.add_user(10, "norole@petcare.ca", "pw", None).await;

    let res = server.login(&server.client(), "norole@petcare.ca", "pw").await?;
    let body: Value = res.json().await?;
    assert_eq!(body["role"], "user");
    Ok(())
}

#[tokio::test]
async fn repeated_login_replaces_the_session() -> Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    server.login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    server.login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await?;
    assert_eq!(server.sessions.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn anonymous_requests_are_not_logged_in() -> Result<()> {
    let server = TestServer::start().await?;
    let client = server.client();

    let res = client.get(server.url("/api/owners")).send().await?;
    expect_error(res, 401, "Not logged in").await?;

    // Authorization runs before body validation
    let res = client
        .post(server.url("/api/owners"))
        .json(&json!({}))
        .send()
        .await?;
    expect_error(res, 401, "Not logged in").await
}

#[tokio::test]
async fn unknown_session_cookie_is_not_logged_in() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client()
        .get(server.url("/api/owners"))
        .header(header::COOKIE, "petcare.sid=forged")
        .send()
        .await?;
    expect_error(res, 401, "Not logged in").await
}

#[tokio::test]
async fn non_admin_writes_are_forbidden() -> Result<()> {
    let server = TestServer::start().await?;
    let user = server.user().await?;

    let res = user
        .post(server.url("/api/owners"))
        .json(&common::owner(1, "Ann", "Smith", "ann@smith.ca"))
        .send()
        .await?;
    expect_error(res, 403, "Forbidden: insufficient role").await?;

    let res = user.delete(server.url("/api/pets/1")).send().await?;
    expect_error(res, 403, "Forbidden: insufficient role").await?;

    let res = user.get(server.url("/api/export/owners.csv")).send().await?;
    expect_error(res, 403, "Forbidden: insufficient role").await
}

#[tokio::test]
async fn guests_can_read_but_not_write() -> Result<()> {
    let server = TestServer::start().await?;
    let guest = server.client_as(GUEST_EMAIL, GUEST_PASSWORD).await?;

    let res = guest.get(server.url("/api/owners")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = guest.put(server.url("/api/owners/1")).json(&json!({})).send().await?;
    expect_error(res, 403, "Forbidden: insufficient role").await
}

#[tokio::test]
async fn logout_ends_the_session() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin().await?;

    let res = admin.post(server.url("/api/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Logged out" }));
    assert!(server.sessions.is_empty().await);

    let res = admin.get(server.url("/api/owners")).send().await?;
    expect_error(res, 401, "Not logged in").await
}

#[tokio::test]
async fn logout_without_session_still_succeeds() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client().post(server.url("/api/logout")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Logged out" }));
    Ok(())
}

#[tokio::test]
async fn root_serves_the_dashboard() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client().get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("PetCare Plus dashboard"));
    Ok(())
}
