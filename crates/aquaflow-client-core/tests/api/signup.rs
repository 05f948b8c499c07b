use crate::helpers::{no_cb, spawn_app};
use aquaflow_shared::{
    errors::ValidationError,
    req_args::{Portion, SignupReqArgs},
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

fn signup_args() -> SignupReqArgs {
    SignupReqArgs {
        full_name: "Test User".to_string(),
        email: "new@test.com".to_string(),
        password: "12345678".to_string().into(),
        confirm_password: "12345678".to_string().into(),
        house_number: "12-B".to_string(),
        portion: Portion::Lower,
        area: "Gulberg".to_string(),
    }
}

#[tokio::test]
async fn signup_success_returns_confirmation_without_logging_in() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_json(json!({
            "fullName": "Test User",
            "email": "new@test.com",
            "password": "12345678",
            "confirmPassword": "12345678",
            "houseNumber": "12-B",
            "portion": "lower",
            "area": "Gulberg"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"msg": "User created"})))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    // Act
    let outcome = app.core_client.signup(signup_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap(), "User created");
    assert!(!app.core_client.is_logged_in());
    assert!(app.stored().is_none());
}

#[tokio::test]
async fn signup_success_status_without_msg_is_an_error() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/signup",
        ResponseTemplate::new(200).set_body_json(json!({"message": "Email already registered"})),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.signup(signup_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Email already registered");
}

#[tokio::test]
async fn signup_success_status_with_empty_body_uses_generic_message() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/signup",
        ResponseTemplate::new(200).set_body_json(json!({})),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.signup(signup_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Failed to create account");
}

#[tokio::test]
async fn signup_failure_shows_server_message() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/signup",
        ResponseTemplate::new(409).set_body_json(json!({"error": "User already exists"})),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.signup(signup_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "User already exists");
}

#[tokio::test]
async fn mismatched_passwords_rejected_without_request() {
    // Arrange
    let app = spawn_app().await;
    let mut args = signup_args();
    args.confirm_password = "87654321".to_string().into();

    // Act
    let outcome = app.core_client.signup(args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome.unwrap_err().downcast_ref::<ValidationError>(),
        Some(&ValidationError::PasswordsDoNotMatch)
    );
    assert_eq!(app.received_count().await, 0);
}

#[tokio::test]
async fn missing_field_rejected_without_request() {
    // Arrange
    let app = spawn_app().await;
    let mut args = signup_args();
    args.area = "  ".to_string();

    // Act
    let outcome = app.core_client.signup(args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome.unwrap_err().downcast_ref::<ValidationError>(),
        Some(&ValidationError::MissingFields)
    );
    assert_eq!(app.received_count().await, 0);
}
