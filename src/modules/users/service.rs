use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use crate::modules::users::model::{CreateUserDto, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

pub struct UserService;

impl UserService {
    /// Inserts a new user with a bcrypt-hashed password. A duplicate email
    /// surfaces as a validation failure rather than an internal error.
    #[instrument(skip(db, dto), fields(user.email = %dto.email_address, db.operation = "INSERT", db.table = "users"))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        debug!(user.email = %dto.email_address, "Creating new user");

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email_address, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, first_name, last_name, email_address, password",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email_address)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(user.email = %dto.email_address, "Attempted signup with an existing email");
                return AppError::validation(vec!["emailAddress must be unique".to_string()]);
            }
            error!(error = %e, user.email = %dto.email_address, "Database error creating user");
            AppError::from(e)
        })?;

        info!(user.id = %user.id, "User created successfully");

        Ok(user)
    }

    /// Looks up a user by email for credential resolution.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn find_by_email(db: &PgPool, email_address: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email_address, password
             FROM users
             WHERE email_address = $1",
        )
        .bind(email_address)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
