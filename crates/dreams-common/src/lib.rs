//! # dreams-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, Environment, JwtConfig, RateLimitConfig,
    ServerConfig, StorageConfig,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
