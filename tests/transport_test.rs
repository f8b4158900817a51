// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Login Transport Tests
 * Form encoding, shared session cookies, redirects and timeouts
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use hauki_engine::config::RunConfig;
use hauki_engine::errors::NetworkError;
use hauki_engine::jobs::CredentialPair;
use hauki_engine::token::fetch_csrf_token;
use hauki_engine::transport::LoginClient;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pair(username: &str, password: &str) -> CredentialPair {
    CredentialPair {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn login_config(server: &MockServer) -> RunConfig {
    RunConfig::new(format!("{}/login", server.uri()))
}

#[tokio::test]
async fn test_submit_uses_configured_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("login=admin"))
        .and(body_string_contains("secret=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = login_config(&server);
    config.user_field = "login".to_string();
    config.pass_field = "secret".to_string();

    let client = LoginClient::new(&config).unwrap();
    let response = client.submit(&pair("admin", "hunter2"), None).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_submit_includes_token_field_when_supplied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("csrf_token=tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("with token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();
    let response = client
        .submit(&pair("admin", "hunter2"), Some("tok123"))
        .await
        .unwrap();

    assert_eq!(response.body, "with token");
}

#[tokio::test]
async fn test_submit_omits_token_field_when_absent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("csrf_token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("unexpected token"))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("no token"))
        .with_priority(5)
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();
    let response = client.submit(&pair("admin", "hunter2"), None).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "no token");
}

#[tokio::test]
async fn test_cookies_persist_across_attempts() {
    let server = MockServer::start().await;

    // once the server-assigned cookie comes back, later attempts carry it
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("session continued"))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc; Path=/")
                .set_body_string("session started"),
        )
        .with_priority(5)
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();

    let first = client.submit(&pair("a", "1"), None).await.unwrap();
    assert_eq!(first.body, "session started");

    let second = client.submit(&pair("a", "2"), None).await.unwrap();
    assert_eq!(second.body, "session continued");
}

#[tokio::test]
async fn test_final_url_reflects_followed_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/home"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Home"))
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();
    let response = client.submit(&pair("a", "1"), None).await.unwrap();

    assert!(response.final_url.ends_with("/home"));
    assert_eq!(response.body, "Home");
}

#[tokio::test]
async fn test_timeout_surfaces_as_connection_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_string("too slow"),
        )
        .mount(&server)
        .await;

    let mut config = login_config(&server);
    config.request_timeout_secs = 1;

    let client = LoginClient::new(&config).unwrap();
    let result = client.submit(&pair("a", "1"), None).await;

    assert!(matches!(
        result,
        Err(NetworkError::ConnectionTimeout { .. })
    ));
}

#[tokio::test]
async fn test_connection_refused_surfaces_as_error() {
    // nothing listens on this port
    let config = RunConfig::new("http://127.0.0.1:9/login");
    let client = LoginClient::new(&config).unwrap();
    let result = client.submit(&pair("a", "1"), None).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_csrf_token_from_login_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><form>
                 <input type="hidden" name="csrf_token" value="tok-xyz">
               </form></body></html>"#,
        ))
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();
    let token = fetch_csrf_token(&client).await.unwrap();

    assert_eq!(token, Some("tok-xyz".to_string()));
}

#[tokio::test]
async fn test_fetch_csrf_token_absent_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>no form</body></html>"))
        .mount(&server)
        .await;

    let client = LoginClient::new(&login_config(&server)).unwrap();
    let token = fetch_csrf_token(&client).await.unwrap();

    assert_eq!(token, None);
}
