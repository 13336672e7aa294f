//! Course HTTP handlers.
//!
//! ```text
//! GET    /courses        — open
//! GET    /courses/{id}   — open
//! POST   /courses        — authenticated; owner is the caller
//! PUT    /courses/{id}   — authenticated owner only
//! DELETE /courses/{id}   — authenticated owner only
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CoursePersistenceError, CourseRepository};
use crate::domain::{CourseDraft, CourseWithOwner, Error, Field, validate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::ownership::authorize_owner;
use crate::inbound::http::schemas::{ErrorMessageSchema, ValidationErrorsSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Course submission payload. Presence of the required fields is checked by
/// the validator, so they arrive as options.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Course representation with its owner embedded; the owner's password is
/// excluded by [`UserResponse`].
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i32,
    pub user: UserResponse,
}

impl From<&CourseWithOwner> for CourseResponse {
    fn from(record: &CourseWithOwner) -> Self {
        Self {
            id: record.course.id(),
            title: record.course.title().to_owned(),
            description: record.course.description().to_owned(),
            estimated_time: record.course.estimated_time().map(str::to_owned),
            materials_needed: record.course.materials_needed().map(str::to_owned),
            user_id: record.course.user_id(),
            user: UserResponse::from(&record.owner),
        }
    }
}

fn map_repository_error(error: CoursePersistenceError) -> Error {
    match error {
        CoursePersistenceError::Connection { message } => Error::service_unavailable(message),
        CoursePersistenceError::Query { message } => Error::internal(message),
        CoursePersistenceError::OwnerMissing => {
            Error::invalid_request("The owning account no longer exists.")
        }
    }
}

fn validated_draft(body: CourseBody, user_id: i32) -> ApiResult<CourseDraft> {
    let outcome = validate(&[
        Field::new("title", body.title.as_deref()),
        Field::new("description", body.description.as_deref()),
    ])?;
    if !outcome.is_valid() {
        return Err(Error::validation(outcome.into_violations()));
    }

    Ok(CourseDraft {
        title: body.title.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
        estimated_time: body.estimated_time,
        materials_needed: body.materials_needed,
        user_id,
    })
}

/// List every course with its owner.
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "All courses with their owners", body = [CourseResponse]),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let courses = state
        .courses
        .list_with_owners()
        .await
        .map_err(map_repository_error)?;
    let body: Vec<CourseResponse> = courses.iter().map(CourseResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one course with its owner.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "The course with its owner", body = CourseResponse),
        (status = 404, description = "No such course", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let course = state
        .courses
        .find_with_owner(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("Course {id} was not found.")))?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(&course)))
}

/// Create a course owned by the authenticated account.
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseBody,
    responses(
        (status = 201, description = "Course created; Location names the new resource"),
        (status = 400, description = "Invalid submission", body = ValidationErrorsSchema),
        (status = 401, description = "Access denied", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    identity: CurrentUser,
    payload: web::Json<CourseBody>,
) -> ApiResult<HttpResponse> {
    let draft = validated_draft(payload.into_inner(), identity.id())?;
    let course = state
        .courses
        .create(draft)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Created()
        .insert_header(("Location", format!("/courses/{}", course.id())))
        .finish())
}

/// Update a course the authenticated account owns.
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    request_body = CourseBody,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Invalid submission, unknown course, or not the owner"),
        (status = 401, description = "Access denied", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    identity: CurrentUser,
    path: web::Path<i32>,
    payload: web::Json<CourseBody>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    authorize_owner(state.courses.as_ref(), identity.user(), id).await?;
    let draft = validated_draft(payload.into_inner(), identity.id())?;
    state
        .courses
        .update(id, draft)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a course the authenticated account owns.
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Unknown course or not the owner"),
        (status = 401, description = "Access denied", body = ErrorMessageSchema),
        (status = 500, description = "Internal server error", body = ErrorMessageSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    identity: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    authorize_owner(state.courses.as_ref(), identity.user(), id).await?;
    state
        .courses
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::NoContent().finish())
}
