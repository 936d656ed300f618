//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod channel;
pub mod context;
pub mod dm;
pub mod error;
pub mod ingest;
pub mod membership;
pub mod message;
pub mod scheduler;
pub mod session;
pub mod standup;
pub mod stats;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use dm::DmService;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use scheduler::{TaskScheduler, TimerKey};
pub use session::{Session, SessionResolver};
pub use standup::StandupService;
pub use user::UserService;
