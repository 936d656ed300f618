//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateChannelRequest, CreateDmRequest, EditMessageRequest, InviteRequest, LoginRequest,
    MessagesQuery, PermissionChangeRequest, ReactRequest, RegisterRequest, SearchQuery,
    SendLaterRequest, SendMessageRequest, SetEmailRequest, SetHandleRequest, SetNameRequest,
    ShareMessageRequest, StandupSendRequest, StandupStartRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, ChannelDetailsResponse, ChannelIdResponse, ChannelListResponse, ChannelSummary,
    DmCreateResponse, DmDetailsResponse, DmListResponse, DmSummary, EmptyResponse,
    LogoutResponse, MessageIdResponse, MessageResponse, MessagesPage, ProfileResponse,
    ReactResponse, SearchResponse, SharedMessageResponse, StandupActiveResponse,
    StandupStartResponse, UserResponse, UserStats, UserStatsResponse, UsersResponse,
    WorkspaceStats, WorkspaceStatsResponse,
};

/// Messages returned per page by channel and DM history
pub const PAGE_SIZE: usize = 50;
