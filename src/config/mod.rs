//! Application configuration, loaded from environment variables.
//!
//! Each submodule owns one concern:
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`server`]: listen port and error-logging verbosity

pub mod cors;
pub mod database;
pub mod server;
