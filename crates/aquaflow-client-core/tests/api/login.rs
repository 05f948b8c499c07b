use crate::helpers::{login_args, login_success_body, no_cb, spawn_app, TEST_EMAIL};
use aquaflow_shared::{
    errors::ValidationError,
    req_args::LoginReqArgs,
    session::Route,
    uac::{Role, UserId},
};
use aquaflow_client_core::SessionStore;
use rstest::rstest;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn login_success_persists_session() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": TEST_EMAIL, "password": "12345678"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_success_body("user")))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    // Act
    let session = app
        .core_client
        .login(login_args(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Session returned
    assert_eq!(session.auth_token().expose_secret(), "abc");
    assert_eq!(session.user_id, UserId::Number(1));
    assert_eq!(session.role, Role::Customer);
    assert_eq!(session.display_name.as_ref(), "Test");
    assert_eq!(session.email, TEST_EMAIL);
    assert_eq!(session.home_route(), Route::CustomerHome);

    // Assert - Session persisted and active
    let stored = app.stored().expect("session should be persisted");
    assert_eq!(stored.auth_token().expose_secret(), "abc");
    assert!(app.core_client.is_logged_in());
}

#[tokio::test]
async fn driver_login_routes_to_driver_home() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/login",
        ResponseTemplate::new(200).set_body_json(login_success_body("driver")),
        1,
    )
    .await;

    // Act
    let session = app
        .core_client
        .login(login_args(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(session.home_route(), Route::DriverHome);
}

#[tokio::test]
async fn login_failure_shows_server_message() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/login",
        ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Invalid credentials");
    assert!(app.stored().is_none(), "nothing should be persisted");
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn login_failure_prefers_error_field() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/login",
        ResponseTemplate::new(400)
            .set_body_json(json!({"error": "User not found", "message": "Bad Request"})),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "User not found");
}

#[tokio::test]
async fn login_with_unknown_role_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/login",
        ResponseTemplate::new(200).set_body_json(login_success_body("admin")),
        1,
    )
    .await;

    // Act
    let outcome = app.core_client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert!(outcome.unwrap_err().to_string().contains("admin"));
    assert!(app.stored().is_none());
}

#[rstest]
#[case::empty_email("", "12345678", ValidationError::MissingCredentials)]
#[case::empty_password("user@test.com", "", ValidationError::MissingCredentials)]
#[case::no_at("user.test.com", "12345678", ValidationError::InvalidEmail)]
#[case::short_password("user@test.com", "12345", ValidationError::PasswordTooShort { min: 6 })]
#[tokio::test]
async fn invalid_input_is_rejected_without_request(
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: ValidationError,
) {
    // Arrange
    let app = spawn_app().await;
    let args = LoginReqArgs::new(email, password.to_string().into());

    // Act
    let outcome = app.core_client.login(args, no_cb).await.unwrap();

    // Assert
    let err = outcome.unwrap_err();
    assert_eq!(err.downcast_ref::<ValidationError>(), Some(&expected));
    assert_eq!(app.received_count().await, 0, "no request should be sent");
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    // Arrange
    let app = spawn_app().await;
    let client = aquaflow_client_core::Client::new(
        "http://127.0.0.1:1".to_string(),
        Arc::clone(&app.store) as Arc<dyn SessionStore>,
    );

    // Act
    let outcome = client.login(login_args(), no_cb).await.unwrap();

    // Assert
    assert!(outcome.is_err());
    assert!(app.stored().is_none());
}

#[tokio::test]
async fn ensure_call_back_is_run() {
    // Arrange
    let app = spawn_app().await;
    app.mock_post(
        "/auth/login",
        ResponseTemplate::new(200).set_body_json(login_success_body("user")),
        1,
    )
    .await;
    let test_flag = Arc::new(Mutex::new(false));
    let test_flag_clone = Arc::clone(&test_flag);

    // Act
    app.core_client
        .login(login_args(), move || {
            *test_flag_clone.lock().unwrap() = true;
        })
        .await
        .expect("failed to receive from rx")
        .expect("failed to get result of login");

    // Assert
    assert!(*test_flag.lock().unwrap(), "flag was not flipped");
}
