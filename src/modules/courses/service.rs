use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::modules::courses::model::{
    Course, CourseResponse, CourseWithOwnerRow, CreateCourseDto, UpdateCourseDto,
};
use crate::utils::errors::AppError;

pub struct CourseService;

impl CourseService {
    /// Returns every course with its owner, oldest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<CourseResponse>, AppError> {
        let rows = sqlx::query_as::<_, CourseWithOwnerRow>(
            "SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed,
                    c.owner_id,
                    u.first_name AS owner_first_name,
                    u.last_name AS owner_last_name,
                    u.email_address AS owner_email_address
             FROM courses c
             INNER JOIN users u ON u.id = c.owner_id
             ORDER BY c.created_at",
        )
        .fetch_all(db)
        .await?;

        debug!(count = rows.len(), "Fetched courses");

        Ok(rows.into_iter().map(CourseResponse::from).collect())
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, course_id: Uuid) -> Result<CourseResponse, AppError> {
        let row = sqlx::query_as::<_, CourseWithOwnerRow>(
            "SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed,
                    c.owner_id,
                    u.first_name AS owner_first_name,
                    u.last_name AS owner_last_name,
                    u.email_address AS owner_email_address
             FROM courses c
             INNER JOIN users u ON u.id = c.owner_id
             WHERE c.id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            debug!(course.id = %course_id, "Course not found");
            AppError::not_found("Course Not Found")
        })?;

        Ok(CourseResponse::from(row))
    }

    /// Fetches the bare course row. Used by mutation handlers to decide
    /// between 404 and 403 before touching anything.
    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course_row(db: &PgPool, course_id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, title, description, estimated_time, materials_needed, owner_id
             FROM courses
             WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Course Not Found"))
    }

    #[instrument(skip(db, dto), fields(user.id = %owner_id, course.title = %dto.title, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        owner_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (title, description, estimated_time, materials_needed, owner_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, description, estimated_time, materials_needed, owner_id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.estimated_time)
        .bind(&dto.materials_needed)
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        info!(course.id = %course.id, "Course created successfully");

        Ok(course)
    }

    #[instrument(skip(db, dto), fields(course.id = %course_id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE courses
             SET title = $1,
                 description = $2,
                 estimated_time = $3,
                 materials_needed = $4,
                 updated_at = NOW()
             WHERE id = $5",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.estimated_time)
        .bind(&dto.materials_needed)
        .bind(course_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course Not Found"));
        }

        info!(course.id = %course_id, "Course updated successfully");

        Ok(())
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(db: &PgPool, course_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course Not Found"));
        }

        info!(course.id = %course_id, "Course deleted successfully");

        Ok(())
    }
}
