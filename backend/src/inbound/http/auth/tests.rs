//! Tests for account HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::error::json_config;
use crate::domain::ports::{
    MockCompanyRegistry, MockCredentialAuthenticator, MockTokenVerifier, TokenError,
};
use crate::domain::{
    AccessToken, AuthSession, Email, INVALID_CREDENTIALS_MESSAGE, TokenClaims, UserId, UserView,
    Username,
};

#[fixture]
fn ada() -> UserView {
    UserView {
        id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        username: Username::new("ada").expect("valid username"),
        email: Email::new("ada@example.com").expect("valid email"),
    }
}

fn session_for(user: UserView) -> AuthSession {
    AuthSession {
        token: AccessToken::new("signed.jwt.token"),
        user,
    }
}

fn claims_for(user: &UserView) -> TokenClaims {
    TokenClaims {
        user_id: user.id,
        username: user.username.to_string(),
        email: user.email.to_string(),
        expires_at: Utc
            .with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn test_app(
    auth: MockCredentialAuthenticator,
    tokens: MockTokenVerifier,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(MockCompanyRegistry::new()),
        Arc::new(auth),
        Arc::new(tokens),
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(current_user),
        )
}

async fn json_body(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

#[rstest]
#[actix_web::test]
async fn register_returns_token_and_sanitised_user(ada: UserView) {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_register()
        .withf(|registration| {
            registration.username().as_ref() == "ada" && registration.password() == "hunter22"
        })
        .times(1)
        .return_once(move |_| Ok(session_for(ada)));
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22",
            "confirmPassword": "hunter22",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let value = json_body(response).await;
    assert_eq!(value["token"], "signed.jwt.token");
    assert_eq!(value["user"]["username"], "ada");
    assert_eq!(value["user"]["email"], "ada@example.com");
    assert!(value["user"].get("passwordHash").is_none());
}

#[rstest]
#[case("hunter22", "hunter23", "confirmPassword")]
#[case("short", "short", "password")]
#[actix_web::test]
async fn register_rejects_invalid_payload_before_service(
    #[case] password: &str,
    #[case] confirm: &str,
    #[case] field: &str,
) {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_register().never();
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": password,
            "confirmPassword": confirm,
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = json_body(response).await;
    assert_eq!(value["code"], "registration_failed");
    assert_eq!(value["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn register_surfaces_taken_username() {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_register().return_once(|_| {
        Err(Error::registration_failed(
            "Failed to register user: username is already taken",
        ))
    });
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22",
            "confirmPassword": "hunter22",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Failed to register user: username is already taken"
    );
}

#[rstest]
#[actix_web::test]
async fn login_returns_session(ada: UserView) {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_login()
        .withf(|credentials| credentials.username() == "ada")
        .times(1)
        .return_once(move |_| Ok(session_for(ada)));
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            username: "ada".into(),
            password: "hunter22".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["token"], "signed.jwt.token");
}

#[rstest]
#[actix_web::test]
async fn login_failure_is_bad_request_with_generic_message() {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_login()
        .return_once(|_| Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE)));
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            username: "nouser".into(),
            password: "anypass".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = json_body(response).await;
    assert_eq!(value["code"], "invalid_credentials");
    assert_eq!(value["message"], INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn login_with_blank_password_names_the_field() {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_login().never();
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(LoginRequest {
            username: "ada".into(),
            password: String::new(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["details"]["field"], "password");
}

#[rstest]
#[actix_web::test]
async fn login_body_without_password_is_enveloped() {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_login().never();
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "ada"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value = json_body(response).await;
    assert_eq!(value["code"], "invalid_request");
    assert!(
        value["message"]
            .as_str()
            .is_some_and(|message| message.contains("password"))
    );
}

#[rstest]
#[actix_web::test]
async fn me_returns_user_for_valid_token(ada: UserView) {
    let claims = claims_for(&ada);
    let expected_id = ada.id;
    let mut tokens = MockTokenVerifier::new();
    tokens
        .expect_verify()
        .withf(|token| token == "signed.jwt.token")
        .return_once(move |_| Ok(claims));
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_get_user_by_id()
        .withf(move |id| *id == expected_id)
        .times(1)
        .return_once(move |_| Ok(Some(ada)));
    let app = actix_test::init_service(test_app(auth, tokens)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((AUTHORIZATION, "Bearer signed.jwt.token"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["username"], "ada");
}

#[rstest]
#[actix_web::test]
async fn me_without_token_is_unauthorised() {
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_get_user_by_id().never();
    let app = actix_test::init_service(test_app(auth, MockTokenVerifier::new())).await;

    let request = actix_test::TestRequest::get().uri("/api/auth/me").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn me_with_expired_token_is_unauthorised() {
    let mut tokens = MockTokenVerifier::new();
    tokens
        .expect_verify()
        .return_once(|_| Err(TokenError::Expired));
    let app = actix_test::init_service(test_app(MockCredentialAuthenticator::new(), tokens)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((AUTHORIZATION, "Bearer stale"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["code"], "unauthorized");
}

#[rstest]
#[actix_web::test]
async fn me_for_deleted_user_is_not_found(ada: UserView) {
    let claims = claims_for(&ada);
    let mut tokens = MockTokenVerifier::new();
    tokens.expect_verify().return_once(move |_| Ok(claims));
    let mut auth = MockCredentialAuthenticator::new();
    auth.expect_get_user_by_id().return_once(|_| Ok(None));
    let app = actix_test::init_service(test_app(auth, tokens)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((AUTHORIZATION, "Bearer signed.jwt.token"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
