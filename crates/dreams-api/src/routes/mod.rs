//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, channels, dms, health, messages, standups, users};
use crate::state::AppState;

/// Create the main API router (health routes are merged separately so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(channel_routes())
        .merge(standup_routes())
        .merge(dm_routes())
        .merge(message_routes())
        .merge(admin_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/@me/stats", get(users::get_current_user_stats))
        .route("/users/@me/name", put(users::set_name))
        .route("/users/@me/email", put(users::set_email))
        .route("/users/@me/handle", put(users::set_handle))
        .route("/users/:user_id", get(users::get_user))
        .route("/stats", get(users::get_workspace_stats))
}

fn channel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels",
            post(channels::create_channel).get(channels::list_channels),
        )
        .route("/channels/all", get(channels::list_all_channels))
        .route("/channels/:channel_id", get(channels::get_channel))
        .route("/channels/:channel_id/join", post(channels::join_channel))
        .route("/channels/:channel_id/invite", post(channels::invite_to_channel))
        .route("/channels/:channel_id/leave", post(channels::leave_channel))
        .route(
            "/channels/:channel_id/messages",
            get(channels::get_channel_messages).post(channels::send_channel_message),
        )
        .route(
            "/channels/:channel_id/messages/later",
            post(channels::send_channel_message_later),
        )
}

fn standup_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/standup",
            post(standups::start_standup).get(standups::get_standup),
        )
        .route(
            "/channels/:channel_id/standup/messages",
            post(standups::send_standup_message),
        )
}

fn dm_routes() -> Router<AppState> {
    Router::new()
        .route("/dms", post(dms::create_dm).get(dms::list_dms))
        .route("/dms/:dm_id", get(dms::get_dm))
        .route("/dms/:dm_id/leave", post(dms::leave_dm))
        .route(
            "/dms/:dm_id/messages",
            get(dms::get_dm_messages).post(dms::send_dm_message),
        )
        .route("/dms/:dm_id/messages/later", post(dms::send_dm_message_later))
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages/:message_id",
            put(messages::edit_message).delete(messages::remove_message),
        )
        .route("/messages/:message_id/pin", post(messages::pin_message))
        .route("/messages/:message_id/unpin", post(messages::unpin_message))
        .route("/messages/:message_id/react", post(messages::react_to_message))
        .route("/messages/:message_id/unreact", post(messages::unreact_to_message))
        .route("/messages/:message_id/share", post(messages::share_message))
        .route("/search", get(messages::search_messages))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users/:user_id", delete(users::remove_user))
        .route(
            "/admin/users/:user_id/permission",
            post(users::change_permission),
        )
}
