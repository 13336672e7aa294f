//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! HTTP endpoint, the request/response schemas, and the Basic authentication
//! scheme. Debug builds serve the document at `/api-docs/openapi.json`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::courses::{CourseBody, CourseResponse};
use crate::inbound::http::schemas::{ErrorMessageSchema, ValidationErrorsSchema};
use crate::inbound::http::users::{NewUserBody, UserResponse};

/// Enrich the generated document with the Basic authentication scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Coursebook API",
        description = "Basic-auth-protected users and courses REST API."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::users::get_current_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NewUserBody,
        UserResponse,
        CourseBody,
        CourseResponse,
        ErrorMessageSchema,
        ValidationErrorsSchema,
    ))
)]
pub struct ApiDoc;

/// Serve the generated document; wired up in debug builds only.
#[cfg(debug_assertions)]
pub async fn openapi_json() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(ApiDoc::openapi())
}
