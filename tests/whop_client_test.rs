use affiliate_calc::config::app_config::WhopConfig;
use affiliate_calc::domain::ports::IdentityProvider;
use affiliate_calc::{AppError, UserId, WhopClient};
use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;

fn client_for(server: &MockServer) -> WhopClient {
    let config = WhopConfig {
        api_key: "app_key_123".to_string(),
        app_id: "app_abc".to_string(),
        access_pass_id: "pass_affiliate".to_string(),
        base_url: server.base_url(),
        timeout_seconds: 5,
    };
    WhopClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_verify_user_with_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let me_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v5/me")
                .header("authorization", "Bearer user_token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "id": "user_42", "username": "affiliate" }));
        })
        .await;

    let client = client_for(&server);
    let user = client.verify_user(Some("user_token")).await?;

    me_mock.assert_async().await;
    assert_eq!(user, Some(UserId::new("user_42")));
    Ok(())
}

#[tokio::test]
async fn test_rejected_token_is_unverified() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v5/me");
            then.status(401);
        })
        .await;

    let client = client_for(&server);
    assert_eq!(client.verify_user(Some("expired")).await?, None);
    Ok(())
}

#[test]
fn test_missing_token_uses_demo_user() {
    let config = WhopConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };

    let demo = WhopClient::new(&config)
        .unwrap()
        .with_demo_user(Some("demo-user-id".to_string()));
    let user = tokio_test::block_on(demo.verify_user(None)).unwrap();
    assert_eq!(user, Some(UserId::new("demo-user-id")));

    let no_demo = WhopClient::new(&config).unwrap();
    let user = tokio_test::block_on(no_demo.verify_user(Some("   "))).unwrap();
    assert_eq!(user, None);
}

#[tokio::test]
async fn test_check_access() -> Result<()> {
    let server = MockServer::start_async().await;
    let access_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v5/access_passes/pass_affiliate/access")
                .query_param("user_id", "user_42")
                .header("authorization", "Bearer app_key_123");
            then.status(200).json_body(json!({ "has_access": true }));
        })
        .await;

    let client = client_for(&server);
    let allowed = client
        .check_access(&UserId::new("user_42"), "pass_affiliate")
        .await?;

    access_mock.assert_async().await;
    assert!(allowed);
    Ok(())
}

#[tokio::test]
async fn test_check_access_server_error_is_external_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v5/access_passes/pass_affiliate/access");
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server);
    let err = client
        .check_access(&UserId::new("user_42"), "pass_affiliate")
        .await
        .unwrap_err();

    assert!(err.is_external_service_failure());
    assert!(matches!(err, AppError::ExternalServiceError { .. }));
}

#[tokio::test]
async fn test_get_user_fills_missing_fields() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v5/users/user_42");
            then.status(200).json_body(json!({ "id": "user_42", "username": null }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v5/users/ghost");
            then.status(404);
        })
        .await;

    let client = client_for(&server);
    let user = client.get_user(&UserId::new("user_42")).await?.unwrap();
    assert_eq!(user.id, UserId::new("user_42"));
    assert_eq!(user.username, "");
    assert_eq!(user.email, "");

    assert!(client.get_user(&UserId::new("ghost")).await?.is_none());
    Ok(())
}
