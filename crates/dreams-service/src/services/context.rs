//! Service context - dependency container for services
//!
//! Holds the document database, the token service, and the deferred task
//! registry. Cloning is cheap; clones share all three.

use std::sync::Arc;

use dreams_common::auth::JwtService;
use dreams_db::Database;

use super::error::{ServiceError, ServiceResult};
use super::scheduler::TaskScheduler;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    db: Database,
    jwt_service: Arc<JwtService>,
    scheduler: TaskScheduler,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(db: Database, jwt_service: Arc<JwtService>, scheduler: TaskScheduler) -> Self {
        Self {
            db,
            jwt_service,
            scheduler,
        }
    }

    /// Get the serialized document handle
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the registry of standup flushes and later sends
    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("db", &self.db)
            .field("jwt_service", &self.jwt_service)
            .field("pending_timers", &self.scheduler.pending())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    db: Option<Database>,
    jwt_service: Option<Arc<JwtService>>,
    scheduler: Option<TaskScheduler>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn db(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Share an existing scheduler; a fresh one is created otherwise
    pub fn scheduler(mut self, scheduler: TaskScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.db
                .ok_or_else(|| ServiceError::validation("db is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.scheduler.unwrap_or_default(),
        ))
    }
}
