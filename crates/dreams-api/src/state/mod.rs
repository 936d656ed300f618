//! State shared by every handler

use std::fmt;
use std::sync::Arc;

use dreams_common::AppConfig;
use dreams_service::ServiceContext;

/// Cheap to clone; both halves live behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    services: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }

    /// Store, token service, and standup scheduler
    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.config.app.env)
            .field("listen", &self.config.api.address())
            .finish_non_exhaustive()
    }
}
