use axum::body::Body;
use axum::http::Request;
use axum_extra::headers::{Authorization, HeaderMapExt};
use coursebook::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (first_name, last_name, email_address, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, owner_id: Uuid, title: &str) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO courses (title, description, estimated_time, owner_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(title)
    .bind("A course used by the integration tests")
    .bind("6 hours")
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap();

    id
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Attaches an `Authorization: Basic` header for the given credentials.
pub fn with_basic_auth(request: &mut Request<Body>, email: &str, password: &str) {
    request
        .headers_mut()
        .typed_insert(Authorization::basic(email, password));
}
