mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{create_test_user, generate_unique_email, with_basic_auth};
use coursebook::config::cors::CorsConfig;
use coursebook::router::init_router;
use coursebook::state::AppState;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "firstName": "Joe",
                "lastName": "Smith",
                "emailAddress": generate_unique_email(),
                "password": "joepassword"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_with_empty_body_reports_the_first_missing_field(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], json!(["firstName is required"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_with_blank_fields_lists_every_failure(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "firstName": "",
                "lastName": "",
                "emailAddress": "not-an-email",
                "password": ""
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"],
        json!([
            "emailAddress must be a valid email address",
            "firstName is required",
            "lastName is required",
            "password is required"
        ])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_user_with_duplicate_email(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "firstpassword").await;

    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "firstName": "Second",
                "lastName": "User",
                "emailAddress": email,
                "password": "secondpassword"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"], json!(["emailAddress must be unique"]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_user(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123").await;

    let app = setup_test_app(pool);

    let mut request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    with_basic_auth(&mut request, &user.email, &user.password);

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], json!(user.id));
    assert_eq!(body["firstName"], "Test");
    assert_eq!(body["lastName"], "User");
    assert_eq!(body["emailAddress"], email);
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_user_without_credentials(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access Denied");
    assert_eq!(body["error"], json!({}));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_user_with_wrong_password(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "rightpassword").await;

    let app = setup_test_app(pool);

    let mut request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    with_basic_auth(&mut request, &email, "wrongpassword");

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access Denied");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_user_with_malformed_header(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .header("authorization", "Basic not!valid!base64")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access Denied");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_current_user_with_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let mut request = Request::builder()
        .method("GET")
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    with_basic_auth(&mut request, "nobody@test.com", "whatever");

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access Denied");
    assert_eq!(body["error"], json!({}));
}
