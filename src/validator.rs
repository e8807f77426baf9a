use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors iterates a map; sort so clients see a stable order
    messages.sort();
    messages
}

/// JSON extractor that runs the payload's `validator::Validate` rules and
/// renders every failure as the 400 message-list contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::validation(vec![format!("{} is required", field)]);
                }

                if error_msg.contains("invalid type") {
                    return AppError::validation(vec![
                        "Invalid field type in request".to_string(),
                    ]);
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::validation(vec![
                        "Missing 'Content-Type: application/json' header".to_string(),
                    ]);
                }

                AppError::validation(vec!["Invalid request body".to_string()])
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_messages(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Path extractor for `{id}` segments that reports malformed ids through the
/// same 400 message-list contract instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation(vec!["id must be a valid UUID".to_string()]))?;

        Ok(ValidatedPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "firstName is required"))]
        first_name: String,
        #[validate(email(message = "emailAddress must be a valid email address"))]
        email_address: String,
    }

    #[test]
    fn collects_every_message_in_stable_order() {
        let bad = Signup {
            first_name: "".to_string(),
            email_address: "not-an-email".to_string(),
        };

        let errors = bad.validate().unwrap_err();
        let messages = collect_messages(&errors);

        assert_eq!(
            messages,
            vec![
                "emailAddress must be a valid email address".to_string(),
                "firstName is required".to_string(),
            ]
        );
    }

    #[test]
    fn valid_payload_produces_no_messages() {
        let ok = Signup {
            first_name: "Joe".to_string(),
            email_address: "joe@example.com".to_string(),
        };

        assert!(ok.validate().is_ok());
    }
}
