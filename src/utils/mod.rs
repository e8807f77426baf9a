//! Shared utilities.
//!
//! - [`errors`]: the application error type and its HTTP translation
//! - [`password`]: bcrypt password hashing and verification

pub mod errors;
pub mod password;
