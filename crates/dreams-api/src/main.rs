//! Dreams API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p dreams-api
//! ```
//!
//! Configuration is loaded from environment variables (and a `.env` file if present).

use dreams_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format can follow the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        persistent = config.storage.data_file.is_some(),
        "Configuration loaded"
    );

    if let Err(e) = dreams_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
