use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::{CreateUserDto, UserResponse};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorBody, ValidationErrorBody};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "The currently authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody)
    ),
    tag = "Users",
    security(("basic_auth" = []))
)]
#[instrument(skip_all, fields(user.id = %current_user.0.id))]
pub async fn get_current_user(current_user: CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&current_user.0))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created; the Location header points at the site root"),
        (status = 400, description = "Validation failed", body = ValidationErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    UserService::create_user(&state.db, dto).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
