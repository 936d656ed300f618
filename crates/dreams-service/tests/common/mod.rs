//! Shared setup for service tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use dreams_common::auth::JwtService;
use dreams_core::{ChannelId, DomainError, UserId};
use dreams_db::{Database, JsonFileStore, MemoryStore};
use dreams_service::dto::{CreateChannelRequest, RegisterRequest};
use dreams_service::{
    AuthService, ChannelService, ServiceContext, ServiceContextBuilder, ServiceError,
};

/// A registered user with a live session
pub struct TestUser {
    pub token: String,
    pub user_id: UserId,
    pub handle: String,
}

/// Context over a fresh in-memory workspace
pub fn context() -> ServiceContext {
    ServiceContextBuilder::new()
        .db(Database::new(MemoryStore::new()))
        .jwt_service(Arc::new(JwtService::new("service-test-secret", 3600)))
        .build()
        .expect("context builds")
}

/// Context over a JSON file, so every update really reads and writes disk
pub fn file_context(path: &Path) -> ServiceContext {
    ServiceContextBuilder::new()
        .db(Database::new(JsonFileStore::new(path)))
        .jwt_service(Arc::new(JwtService::new("service-test-secret", 3600)))
        .build()
        .expect("context builds")
}

/// Register `first last` as `{first}@example.com`; handle is `{first}{last}` lowercased
pub async fn register(ctx: &ServiceContext, first: &str, last: &str) -> TestUser {
    let response = AuthService::new(ctx)
        .register(RegisterRequest {
            email: format!("{}@example.com", first.to_lowercase()),
            password: "password123".to_string(),
            name_first: first.to_string(),
            name_last: last.to_string(),
        })
        .await
        .expect("registration succeeds");

    TestUser {
        token: response.token,
        user_id: response.auth_user_id,
        handle: format!("{first}{last}").to_lowercase(),
    }
}

pub async fn create_channel(
    ctx: &ServiceContext,
    owner: &TestUser,
    name: &str,
    is_public: bool,
) -> ChannelId {
    ChannelService::new(ctx)
        .create(
            &owner.token,
            CreateChannelRequest {
                name: name.to_string(),
                is_public,
            },
        )
        .await
        .expect("channel created")
        .channel_id
}

pub fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain()
        .unwrap_or_else(|| panic!("expected a domain error, got {err:?}"))
}
