//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Services repeat the checks that carry domain meaning (message length,
//! name bounds) so they hold for every caller, not only HTTP.

use dreams_core::UserId;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub name_first: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub name_last: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Channel Requests
// ============================================================================

/// Create channel request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 20, message = "Channel name must be 1-20 characters"))]
    pub name: String,

    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

/// Invite a user to a channel or DM
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteRequest {
    pub u_id: UserId,
}

/// Query string for paged message history
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MessagesQuery {
    /// Offset from the newest message
    #[serde(default)]
    pub start: usize,
}

// ============================================================================
// Profile Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetNameRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub name_first: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub name_last: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetHandleRequest {
    #[validate(length(min = 3, max = 20, message = "Handle must be 3-20 characters"))]
    pub handle_str: String,
}

/// Change a user's global permission: 1 = owner, 2 = member
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PermissionChangeRequest {
    pub permission_id: i64,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: String,
}

/// Edit message request; an empty message removes it
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditMessageRequest {
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: String,
}

/// React / unreact request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ReactRequest {
    pub react_id: u32,
}

/// Send a message at a future time
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendLaterRequest {
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: String,

    /// Unix seconds; must not be in the past
    pub time_sent: i64,
}

/// Share a message into a channel or DM
///
/// Exactly one of `channel_id` and `dm_id` is -1.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShareMessageRequest {
    #[serde(default)]
    pub message: String,

    pub channel_id: i64,

    pub dm_id: i64,
}

/// Query string for message search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 1000, message = "Query must be 1-1000 characters"))]
    pub query_str: String,
}

// ============================================================================
// DM Requests
// ============================================================================

/// Create DM request; the creator is added automatically
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDmRequest {
    #[validate(length(max = 100, message = "A DM can include at most 100 users"))]
    pub u_ids: Vec<UserId>,
}

// ============================================================================
// Standup Requests
// ============================================================================

/// Start standup request
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct StandupStartRequest {
    /// Window length in seconds
    pub length: i64,
}

/// Buffer a line in the active standup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StandupSendRequest {
    pub message: String,
}
