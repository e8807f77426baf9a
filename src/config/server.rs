use std::env;

/// Listen port and error-logging verbosity.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// When true, the default log filter is widened from info to debug.
    /// `RUST_LOG` still overrides the computed default entirely.
    pub enable_global_error_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            enable_global_error_logging: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            enable_global_error_logging: env::var("ENABLE_GLOBAL_ERROR_LOGGING")
                .map(|v| v == "true")
                .unwrap_or(false),
        }
    }
}
