pub mod courses;
pub mod users;

pub use self::courses::model::CourseResponse;
pub use self::users::model::User;
