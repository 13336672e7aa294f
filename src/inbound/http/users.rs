//! Account HTTP handlers.
//!
//! ```text
//! GET  /users   — the authenticated account, password excluded
//! POST /users   — open registration
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, Error, Field, NewUser, User, validate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{ErrorMessageSchema, ValidationErrorsSchema};
use crate::inbound::http::state::HttpState;

/// Body returned by a successful registration.
pub const ACCOUNT_CREATED_MESSAGE: &str = "Account successfully created!";

/// Body returned when registration fails on a storage constraint.
pub const REGISTRATION_FAILED_MESSAGE: &str = "That didn't work, bud!";

/// Registration payload. Every field is checked for presence by the
/// validator, so all of them arrive as options.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Account representation. The password hash never appears here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email_address: user.email_address().to_string(),
        }
    }
}

fn map_create_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::invalid_request(REGISTRATION_FAILED_MESSAGE),
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Fetch the authenticated account.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "The authenticated account", body = UserResponse),
        (status = 401, description = "Access denied", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser"
)]
#[get("/users")]
pub async fn get_current_user(identity: CurrentUser) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse::from(identity.user())))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUserBody,
    responses(
        (status = 201, description = "Account created", body = ErrorMessageSchema),
        (status = 400, description = "Invalid submission", body = ValidationErrorsSchema),
        (status = 503, description = "Service unavailable", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUserBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();

    let outcome = validate(&[
        Field::new("firstName", body.first_name.as_deref()),
        Field::new("lastName", body.last_name.as_deref()),
        Field::new("emailAddress", body.email_address.as_deref()),
        Field::new("password", body.password.as_deref()),
    ])?;
    if !outcome.is_valid() {
        return Err(Error::validation(outcome.into_violations()));
    }

    // Presence passed, so the unwraps below cannot trip; the email still has
    // to satisfy its own shape rule.
    let email_address = body
        .email_address
        .and_then(|email| EmailAddress::new(email).ok())
        .ok_or_else(|| {
            Error::validation(vec![
                "Please provide a valid value for the \"emailAddress\" field!".to_owned(),
            ])
        })?;
    let password = outcome
        .hashed_password()
        .cloned()
        .ok_or_else(|| Error::internal("validated password missing its hash"))?;

    state
        .users
        .create(NewUser {
            first_name: body.first_name.unwrap_or_default(),
            last_name: body.last_name.unwrap_or_default(),
            email_address,
            password,
        })
        .await
        .map_err(map_create_error)?;

    Ok(HttpResponse::Created()
        .insert_header(("Location", "/"))
        .json(json!({ "message": ACCOUNT_CREATED_MESSAGE })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureCourseRepository, FixtureUserRepository};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state() -> HttpState {
        let users = Arc::new(FixtureUserRepository::new());
        let courses = Arc::new(FixtureCourseRepository::new(users.clone()));
        HttpState::new(users, courses)
    }

    async fn app(
        state: HttpState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_current_user)
                .service(create_user),
        )
        .await
    }

    fn registration() -> Value {
        json!({
            "firstName": "Jo",
            "lastName": "Lee",
            "emailAddress": "jo@x.com",
            "password": "longenough1",
        })
    }

    #[actix_rt::test]
    async fn registration_returns_created_with_location_and_message() {
        let app = app(state()).await;

        let request = test::TestRequest::post()
            .uri("/users")
            .set_json(registration())
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get("Location")
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        assert_eq!(body, json!({ "message": "Account successfully created!" }));
    }

    #[actix_rt::test]
    async fn registration_lists_every_missing_field_in_order() {
        let app = app(state()).await;

        let request = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "lastName": "Lee" }))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        assert_eq!(
            body,
            json!({
                "errors": [
                    "Please provide a value for the \"firstName\" field!",
                    "Please provide a value for the \"emailAddress\" field!",
                    "Please provide a value for the \"password\" field!",
                ]
            })
        );
    }

    #[actix_rt::test]
    async fn registration_rejects_an_out_of_bound_password() {
        let app = app(state()).await;

        let mut payload = registration();
        payload["password"] = json!("short77");
        let request = test::TestRequest::post()
            .uri("/users")
            .set_json(payload)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        let errors = body["errors"].as_array().expect("errors array");
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0]
                .as_str()
                .expect("string violation")
                .contains("between 8 and 20")
        );
    }

    #[actix_rt::test]
    async fn duplicate_email_is_rejected_with_the_registration_failure_body() {
        let state = state();
        let app = app(state).await;

        let first = test::TestRequest::post()
            .uri("/users")
            .set_json(registration())
            .to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::CREATED
        );

        let second = test::TestRequest::post()
            .uri("/users")
            .set_json(registration())
            .to_request();
        let response = test::call_service(&app, second).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        assert_eq!(body, json!({ "message": "That didn't work, bud!" }));
    }

    #[actix_rt::test]
    async fn stored_password_is_the_hash_not_the_plaintext() {
        let state = state();
        let app = app(state.clone()).await;

        let request = test::TestRequest::post()
            .uri("/users")
            .set_json(registration())
            .to_request();
        assert_eq!(
            test::call_service(&app, request).await.status(),
            StatusCode::CREATED
        );

        let stored = state
            .users
            .find_by_email("jo@x.com")
            .await
            .expect("lookup succeeds")
            .expect("account stored");
        assert_ne!(stored.password().as_ref(), "longenough1");
        assert!(crate::domain::password::verify_password(
            "longenough1",
            stored.password()
        ));
    }

    #[actix_rt::test]
    async fn current_user_projection_excludes_the_password() {
        let state = state();
        let app = app(state).await;

        let register = test::TestRequest::post()
            .uri("/users")
            .set_json(registration())
            .to_request();
        assert_eq!(
            test::call_service(&app, register).await.status(),
            StatusCode::CREATED
        );

        let encoded = BASE64.encode("jo@x.com:longenough1");
        let request = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", format!("Basic {encoded}")))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        assert_eq!(
            body,
            json!({
                "id": 1,
                "firstName": "Jo",
                "lastName": "Lee",
                "emailAddress": "jo@x.com",
            })
        );
    }

    #[actix_rt::test]
    async fn current_user_requires_credentials() {
        let app = app(state()).await;

        let request = test::TestRequest::get().uri("/users").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value =
            serde_json::from_slice(&test::read_body(response).await).expect("JSON body");
        assert_eq!(body, json!({ "message": "Access Denied!" }));
    }
}
