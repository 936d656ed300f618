//! Entity to DTO mappers

use dreams_core::{Channel, Document, Message, User, UserId};

use super::responses::{
    ChannelSummary, DmSummary, MessageResponse, MessagesPage, ReactResponse, UserResponse,
};
use super::PAGE_SIZE;

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            u_id: user.u_id,
            email: user.email.clone(),
            name_first: user.name_first.clone(),
            name_last: user.name_last.clone(),
            handle_str: user.handle_str.clone(),
        }
    }
}

/// Profiles for a list of ids, skipping any that no longer resolve
pub fn profiles(document: &Document, ids: &[UserId]) -> Vec<UserResponse> {
    ids.iter()
        .filter_map(|id| document.user(*id))
        .map(UserResponse::from)
        .collect()
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<&Channel> for ChannelSummary {
    fn from(channel: &Channel) -> Self {
        Self {
            channel_id: channel.channel_id,
            name: channel.name.clone(),
        }
    }
}

impl From<&Channel> for DmSummary {
    fn from(channel: &Channel) -> Self {
        Self {
            dm_id: channel.channel_id,
            name: channel.name.clone(),
        }
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

impl MessageResponse {
    /// Render a message with reacts relative to `viewer`
    pub fn for_viewer(message: &Message, viewer: UserId) -> Self {
        Self {
            message_id: message.message_id,
            u_id: message.u_id,
            message: message.message.clone(),
            time_created: message.time_created,
            reacts: message
                .reacts
                .iter()
                .map(|react| ReactResponse {
                    react_id: react.react_id,
                    u_ids: react.u_ids.clone(),
                    is_this_user_reacted: react.u_ids.contains(&viewer),
                })
                .collect(),
            is_pinned: message.is_pinned,
        }
    }
}

impl MessagesPage {
    /// Page of up to [`PAGE_SIZE`] messages, newest first, starting `start` back from the newest
    ///
    /// The caller has already checked `start <= channel.messages.len()`.
    pub fn from_channel(channel: &Channel, start: usize, viewer: UserId) -> Self {
        let total = channel.messages.len();
        let messages: Vec<MessageResponse> = channel
            .messages
            .iter()
            .rev()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|m| MessageResponse::for_viewer(m, viewer))
            .collect();

        let end = if start + PAGE_SIZE >= total {
            -1
        } else {
            (start + PAGE_SIZE) as i64
        };

        Self {
            messages,
            start,
            end,
        }
    }
}
