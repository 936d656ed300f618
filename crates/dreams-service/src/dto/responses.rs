//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Ids are plain
//! integers and timestamps are Unix seconds.

use dreams_core::{ChannelId, MessageId, StatSeries, UserId};
use serde::Serialize;

/// Body for operations that return nothing: `{}`
#[derive(Debug, Default, Serialize)]
pub struct EmptyResponse {}

// ============================================================================
// Auth Responses
// ============================================================================

/// Session token for a new login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub auth_user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub is_success: bool,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub channels_joined: StatSeries,
    pub dms_joined: StatSeries,
    pub messages_sent: StatSeries,
    pub involvement_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub user_stats: UserStats,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceStats {
    pub channels_exist: StatSeries,
    pub dms_exist: StatSeries,
    pub messages_exist: StatSeries,
    pub utilization_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct WorkspaceStatsResponse {
    pub dreams_stats: WorkspaceStats,
}

// ============================================================================
// Channel Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ChannelIdResponse {
    pub channel_id: ChannelId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub channel_id: ChannelId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ChannelListResponse {
    pub channels: Vec<ChannelSummary>,
}

#[derive(Debug, Serialize)]
pub struct ChannelDetailsResponse {
    pub name: String,
    pub is_public: bool,
    pub owner_members: Vec<UserResponse>,
    pub all_members: Vec<UserResponse>,
}

// ============================================================================
// DM Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DmCreateResponse {
    pub dm_id: ChannelId,
    pub dm_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DmSummary {
    pub dm_id: ChannelId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DmListResponse {
    pub dms: Vec<DmSummary>,
}

#[derive(Debug, Serialize)]
pub struct DmDetailsResponse {
    pub name: String,
    pub members: Vec<UserResponse>,
}

// ============================================================================
// Message Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageIdResponse {
    pub message_id: MessageId,
}

/// A react as seen by one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactResponse {
    pub react_id: u32,
    pub u_ids: Vec<UserId>,
    pub is_this_user_reacted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message_id: MessageId,
    pub u_id: UserId,
    pub message: String,
    pub time_created: i64,
    pub reacts: Vec<ReactResponse>,
    pub is_pinned: bool,
}

#[derive(Debug, Serialize)]
pub struct SharedMessageResponse {
    pub shared_message_id: MessageId,
}

/// Search hits across the caller's channels and DMs, newest first
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub messages: Vec<MessageResponse>,
}

/// One page of history, newest first; `end` is -1 once the oldest message is included
#[derive(Debug, Serialize)]
pub struct MessagesPage {
    pub messages: Vec<MessageResponse>,
    pub start: usize,
    pub end: i64,
}

// ============================================================================
// Standup Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct StandupStartResponse {
    pub time_finish: i64,
}

#[derive(Debug, Serialize)]
pub struct StandupActiveResponse {
    pub is_active: bool,
    pub time_finish: Option<i64>,
}
