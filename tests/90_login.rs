mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use college_api::auth::validate_jwt;

#[tokio::test]
async fn valid_credentials_issue_decodable_token() -> Result<()> {
    let config = common::test_config();
    let app = common::app_with(config.clone());

    let res = common::send(
        &app,
        Method::POST,
        "/api/Login",
        Some(json!({ "username": "Venkat", "password": "Venkat123" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);

    let body = res.json()?;
    assert_eq!(body["username"], "Venkat");
    let token = body["token"].as_str().expect("token string");

    let claims = validate_jwt(token, &config.security)?;
    assert_eq!(claims.name, "Venkat");
    assert_eq!(claims.role, "Admin");

    let lifetime = claims.exp - claims.iat;
    assert!((4 * 3600 - 5..=4 * 3600 + 5).contains(&lifetime), "lifetime {}", lifetime);
    Ok(())
}

#[tokio::test]
async fn wrong_credentials_get_no_token() -> Result<()> {
    let app = common::app();

    let res = common::send(
        &app,
        Method::POST,
        "/api/Login",
        Some(json!({ "username": "Venkat", "password": "wrong" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.text(), "Invalid Credentials");
    Ok(())
}

#[tokio::test]
async fn strict_mode_answers_unauthorized() -> Result<()> {
    let mut config = common::test_config();
    config.security.strict_login_status = true;
    let app = common::app_with(config);

    let res = common::send(
        &app,
        Method::POST,
        "/api/Login",
        Some(json!({ "username": "Someone", "password": "Venkat123" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let body = res.json()?;
    assert_eq!(body["message"], "Invalid Credentials");
    assert!(body.get("token").is_none());
    Ok(())
}

#[tokio::test]
async fn missing_credentials_are_bad_requests() -> Result<()> {
    let app = common::app();

    for payload in [
        json!({ "username": "Venkat" }),
        json!({ "username": "", "password": "Venkat123" }),
        json!({}),
        json!(null),
    ] {
        let res = common::send(&app, Method::POST, "/api/Login", Some(payload.clone())).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(res.json()?["message"], "Please provide username and password");
    }

    let res = common::send(&app, Method::POST, "/api/Login", None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn accepts_pascal_case_field_names() -> Result<()> {
    let app = common::app();
    let res = common::send(
        &app,
        Method::POST,
        "/api/Login",
        Some(json!({ "Username": "Venkat", "Password": "Venkat123" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.json()?["token"].is_string());
    Ok(())
}

#[tokio::test]
async fn unrepresentable_token_lifetime_is_a_server_error() -> Result<()> {
    let mut config = common::test_config();
    config.security.jwt_expiry_hours = 3_000_000_000;
    let app = common::app_with(config);

    let res = common::send(
        &app,
        Method::POST,
        "/api/Login",
        Some(json!({ "username": "Venkat", "password": "Venkat123" })),
    )
    .await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.json()?.get("token").is_none());
    Ok(())
}
