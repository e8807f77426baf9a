use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// Every failure a handler can produce, classified by how it must reach the
/// client. Handlers return `Result<_, AppError>` and the `IntoResponse` impl
/// below is the single place errors are turned into HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or unverifiable credentials. Always rendered with the same
    /// generic body so a response does not reveal whether an email exists.
    Unauthenticated,
    /// Authenticated, but not allowed to touch this resource.
    Forbidden(String),
    NotFound(String),
    /// One or more field-level messages, from request validation or a
    /// persistence constraint.
    Validation(Vec<String>),
    /// Anything unclassified. Logged server-side, never shown to the client.
    Internal(Error),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation(messages)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Unauthenticated => error_body(StatusCode::UNAUTHORIZED, "Access Denied"),
            AppError::Forbidden(message) => error_body(StatusCode::FORBIDDEN, &message),
            AppError::NotFound(message) => error_body(StatusCode::NOT_FOUND, &message),
            AppError::Internal(err) => {
                error!(error = %err, "unhandled error reached the response translator");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message, "error": {} }))).into_response()
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Shape of every non-validation error response. Documentation only.
#[derive(ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[schema(value_type = Object)]
    pub error: serde_json::Value,
}

/// Shape of a 400 validation response. Documentation only.
#[derive(ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_renders_400_with_message_list() {
        let response = AppError::validation(vec![
            "firstName is required".to_string(),
            "emailAddress must be unique".to_string(),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["errors"],
            json!(["firstName is required", "emailAddress must be unique"])
        );
    }

    #[tokio::test]
    async fn unauthenticated_renders_generic_401() {
        let response = AppError::Unauthenticated.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Access Denied");
        assert_eq!(body["error"], json!({}));
    }

    #[tokio::test]
    async fn forbidden_and_not_found_carry_their_messages() {
        let forbidden = AppError::forbidden("You do not own this course").into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(forbidden).await["message"],
            "You do not own this course"
        );

        let not_found = AppError::not_found("Course Not Found").into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(not_found).await["message"], "Course Not Found");
    }

    #[tokio::test]
    async fn internal_never_leaks_detail() {
        let response =
            AppError::internal(anyhow::anyhow!("connection refused to 10.0.0.3")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn foreign_errors_convert_to_internal() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
