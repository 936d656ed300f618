//! Test fixtures and data generators
//!
//! Client-side mirrors of the API's request and response bodies.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Current time in Unix seconds, as the server counts it
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name_first: String,
    pub name_last: String,
}

impl RegisterRequest {
    /// A user named `first last` with a unique email
    pub fn named(first: &str, last: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{}{suffix}@example.com", first.to_lowercase()),
            password: "TestPass123".to_string(),
            name_first: first.to_string(),
            name_last: last.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateChannelRequest {
    pub name: String,
    pub is_public: bool,
}

impl CreateChannelRequest {
    pub fn public(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_public: true,
        }
    }

    pub fn private(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_public: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InviteRequest {
    pub u_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageRequest {
    pub message: String,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReactRequest {
    pub react_id: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateDmRequest {
    pub u_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct StandupStartRequest {
    pub length: i64,
}

#[derive(Debug, Serialize)]
pub struct SendLaterRequest {
    pub message: String,
    pub time_sent: i64,
}

#[derive(Debug, Serialize)]
pub struct ShareMessageRequest {
    pub message: String,
    pub channel_id: i64,
    pub dm_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SetHandleRequest {
    pub handle_str: String,
}

#[derive(Debug, Serialize)]
pub struct PermissionChangeRequest {
    pub permission_id: i64,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub auth_user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LogoutResponse {
    pub is_success: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub u_id: i64,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelIdResponse {
    pub channel_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSummary {
    pub channel_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    pub channels: Vec<ChannelSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelDetailsResponse {
    pub name: String,
    pub is_public: bool,
    pub owner_members: Vec<UserResponse>,
    pub all_members: Vec<UserResponse>,
}

#[derive(Debug, Deserialize)]
pub struct DmCreateResponse {
    pub dm_id: i64,
    pub dm_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DmSummary {
    pub dm_id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DmListResponse {
    pub dms: Vec<DmSummary>,
}

#[derive(Debug, Deserialize)]
pub struct MessageIdResponse {
    pub message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReactResponse {
    pub react_id: u32,
    pub u_ids: Vec<i64>,
    pub is_this_user_reacted: bool,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message_id: i64,
    pub u_id: i64,
    pub message: String,
    pub time_created: i64,
    pub reacts: Vec<ReactResponse>,
    pub is_pinned: bool,
}

#[derive(Debug, Deserialize)]
pub struct SharedMessageResponse {
    pub shared_message_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesPage {
    pub messages: Vec<MessageResponse>,
    pub start: usize,
    pub end: i64,
}

#[derive(Debug, Deserialize)]
pub struct StandupStartResponse {
    pub time_finish: i64,
}

#[derive(Debug, Deserialize)]
pub struct StandupActiveResponse {
    pub is_active: bool,
    pub time_finish: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatPoint {
    pub count: usize,
    pub time_stamp: i64,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceStats {
    pub channels_exist: Vec<StatPoint>,
    pub dms_exist: Vec<StatPoint>,
    pub messages_exist: Vec<StatPoint>,
    pub utilization_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceStatsResponse {
    pub dreams_stats: WorkspaceStats,
}

#[derive(Debug, Deserialize)]
pub struct UserStats {
    pub channels_joined: Vec<StatPoint>,
    pub dms_joined: Vec<StatPoint>,
    pub messages_sent: Vec<StatPoint>,
    pub involvement_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct UserStatsResponse {
    pub user_stats: UserStats,
}

/// `{"error": {"code", "message"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
