//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ChannelId, MessageId, UserId};

/// Broad classification used to pick the HTTP status of a domain error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client-correctable input problem (400)
    Input,
    /// Identity or authorization failure (403)
    Access,
    /// Storage or other infrastructure failure (500)
    Internal,
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Unknown Ids
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(ChannelId),

    #[error("DM not found: {0}")]
    DmNotFound(ChannelId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Message too long: max {max} characters")]
    MessageTooLong { max: usize },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Password too short: minimum {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid standup length: {0}")]
    InvalidStandupLength(i64),

    #[error("Invalid react id: {0}")]
    InvalidReact(u32),

    #[error("Start {start} is greater than the number of messages ({total})")]
    InvalidStart { start: usize, total: usize },

    #[error("Time sent is in the past: {0}")]
    InvalidTimeSent(i64),

    #[error("Exactly one of channel_id and dm_id must be -1")]
    InvalidShareTarget,

    #[error("Search query must be 1 to {max} characters")]
    InvalidQuery { max: usize },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid permission id: {0}")]
    InvalidPermission(i64),

    // =========================================================================
    // State Conflicts
    // =========================================================================
    #[error("A standup is already active in this channel")]
    StandupAlreadyActive,

    #[error("No standup is active in this channel")]
    NoActiveStandup,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Handle already in use")]
    HandleAlreadyExists,

    #[error("The only Dreams owner cannot be removed or demoted")]
    LastGlobalOwner,

    #[error("Already a member of this channel")]
    AlreadyMember,

    #[error("Message already pinned")]
    AlreadyPinned,

    #[error("Message is not pinned")]
    NotPinned,

    #[error("Already reacted to this message")]
    AlreadyReacted,

    #[error("Has not reacted to this message")]
    NotReacted,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Not a member of this channel")]
    NotMember,

    #[error("Not an owner of this channel")]
    NotOwner,

    #[error("Not message author")]
    NotMessageAuthor,

    #[error("Channel is private")]
    PrivateChannel,

    #[error("Not a Dreams owner")]
    NotGlobalOwner,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Unknown ids
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::DmNotFound(_) => "UNKNOWN_DM",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MessageTooLong { .. } => "MESSAGE_TOO_LONG",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidName(_) => "INVALID_NAME",
            Self::PasswordTooShort { .. } => "PASSWORD_TOO_SHORT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidStandupLength(_) => "INVALID_STANDUP_LENGTH",
            Self::InvalidReact(_) => "INVALID_REACT",
            Self::InvalidStart { .. } => "INVALID_START",
            Self::InvalidTimeSent(_) => "INVALID_TIME_SENT",
            Self::InvalidShareTarget => "INVALID_SHARE_TARGET",
            Self::InvalidQuery { .. } => "INVALID_QUERY",
            Self::InvalidHandle(_) => "INVALID_HANDLE",
            Self::InvalidPermission(_) => "INVALID_PERMISSION",

            // State conflicts
            Self::StandupAlreadyActive => "STANDUP_ALREADY_ACTIVE",
            Self::NoActiveStandup => "NO_ACTIVE_STANDUP",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::HandleAlreadyExists => "HANDLE_ALREADY_EXISTS",
            Self::LastGlobalOwner => "LAST_GLOBAL_OWNER",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyPinned => "ALREADY_PINNED",
            Self::NotPinned => "NOT_PINNED",
            Self::AlreadyReacted => "ALREADY_REACTED",
            Self::NotReacted => "NOT_REACTED",

            // Authorization
            Self::InvalidSession => "INVALID_SESSION",
            Self::NotMember => "NOT_MEMBER",
            Self::NotOwner => "NOT_OWNER",
            Self::NotMessageAuthor => "NOT_MESSAGE_AUTHOR",
            Self::PrivateChannel => "PRIVATE_CHANNEL",
            Self::NotGlobalOwner => "NOT_GLOBAL_OWNER",

            // Infrastructure
            Self::StoreError(_) => "STORE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Classify the error as input, access, or internal
    pub fn kind(&self) -> ErrorKind {
        if self.is_access() {
            ErrorKind::Access
        } else if self.is_internal() {
            ErrorKind::Internal
        } else {
            ErrorKind::Input
        }
    }

    /// Check if this is an identity or authorization error
    pub fn is_access(&self) -> bool {
        matches!(
            self,
            Self::InvalidSession
                | Self::NotMember
                | Self::NotOwner
                | Self::NotMessageAuthor
                | Self::PrivateChannel
                | Self::NotGlobalOwner
        )
    }

    /// Check if this is an infrastructure error
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::StoreError(_) | Self::InternalError(_))
    }

    /// Check if this is a client-correctable input error
    pub fn is_input(&self) -> bool {
        self.kind() == ErrorKind::Input
    }
}
