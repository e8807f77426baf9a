use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::courses::model::{CourseResponse, CreateCourseDto, UpdateCourseDto};
use crate::modules::users::model::{CreateUserDto, UserResponse};
use crate::utils::errors::{ErrorBody, ValidationErrorBody};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::create_user,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            UserResponse,
            CreateUserDto,
            CourseResponse,
            CreateCourseDto,
            UpdateCourseDto,
            ErrorBody,
            ValidationErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Signup and the authenticated user's profile"),
        (name = "Courses", description = "Course directory with owner-scoped mutation")
    ),
    info(
        title = "Coursebook API",
        version = "0.1.0",
        description = "A REST API for a shared course directory built with Rust, Axum, and PostgreSQL, with HTTP Basic authentication and owner-scoped course mutation.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}
