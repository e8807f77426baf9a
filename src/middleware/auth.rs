use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use tracing::{debug, warn};

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::password::verify_password;

/// Extractor that resolves `Authorization: Basic` credentials to a stored user.
///
/// Handlers that take a `CurrentUser` argument only run for authenticated
/// requests; anything else is rejected with the generic 401 body before the
/// handler is reached. The 401 never says whether the email or the password
/// was at fault.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(credentials)) = parts
            .extract::<TypedHeader<Authorization<Basic>>>()
            .await
            .map_err(|_| {
                debug!("Missing or malformed basic authorization header");
                AppError::Unauthenticated
            })?;

        let user = UserService::find_by_email(&state.db, credentials.username())
            .await?
            .ok_or_else(|| {
                warn!(user.email = %credentials.username(), "Authentication failed: unknown email");
                AppError::Unauthenticated
            })?;

        if !verify_password(credentials.password(), &user.password)? {
            warn!(user.email = %credentials.username(), "Authentication failed: wrong password");
            return Err(AppError::Unauthenticated);
        }

        Ok(CurrentUser(user))
    }
}
