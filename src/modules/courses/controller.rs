use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::courses::model::{CourseResponse, CreateCourseDto, UpdateCourseDto};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorBody, ValidationErrorBody};
use crate::validator::{ValidatedJson, ValidatedPath};

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses with their owners", body = Vec<CourseResponse>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = CourseService::get_courses(&state.db).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "The requested course with its owner", body = CourseResponse),
        (status = 404, description = "No course with that ID", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created; the Location header points at it"),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip_all, fields(user.id = %current_user.0.id))]
pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let course = CourseService::create_course(&state.db, current_user.0.id, dto).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/courses/{}", course.id))],
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody),
        (status = 403, description = "Authenticated user does not own the course", body = ErrorBody),
        (status = 404, description = "No course with that ID", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip_all, fields(course.id = %id, user.id = %current_user.0.id))]
pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<StatusCode, AppError> {
    let course = CourseService::get_course_row(&state.db, id).await?;

    if course.owner_id != current_user.0.id {
        warn!(course.id = %id, "Update rejected: requester does not own the course");
        return Err(AppError::forbidden(
            "You are not authorized to update this course",
        ));
    }

    CourseService::update_course(&state.db, id, dto).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody),
        (status = 403, description = "Authenticated user does not own the course", body = ErrorBody),
        (status = 404, description = "No course with that ID", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip_all, fields(course.id = %id, user.id = %current_user.0.id))]
pub async fn delete_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let course = CourseService::get_course_row(&state.db, id).await?;

    if course.owner_id != current_user.0.id {
        warn!(course.id = %id, "Delete rejected: requester does not own the course");
        return Err(AppError::forbidden(
            "You are not authorized to delete this course",
        ));
    }

    CourseService::delete_course(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
