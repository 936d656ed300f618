//! # dreams-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every operation takes the caller's session token, resolves it against the
//! workspace document, and performs its checks and mutations inside a single
//! serialized document update. Standup flushes and messages sent for later
//! run as deferred tasks on [`services::TaskScheduler`].

pub mod dto;
pub mod services;

pub use services::{
    AuthService, ChannelService, DmService, MessageService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, StandupService, TaskScheduler, TimerKey, UserService,
};
