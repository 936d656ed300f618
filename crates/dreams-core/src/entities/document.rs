//! Workspace document - the single root of all persisted state

use serde::{Deserialize, Serialize};

use super::channel::Channel;
use super::stats::WorkspaceStats;
use super::user::User;
use crate::value_objects::{ChannelId, MessageId, UserId};

/// Everything the workspace stores, loaded and saved as one unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Last message id ever issued; ids are never reused
    #[serde(default)]
    pub last_message_id: MessageId,
    #[serde(default)]
    pub stats: WorkspaceStats,
}

impl Document {
    // =========================================================================
    // Users
    // =========================================================================

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.u_id == user_id)
    }

    pub fn user_mut(&mut self, user_id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.u_id == user_id)
    }

    /// Removed users have no email and never match
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.active_users().find(|u| u.email == email)
    }

    pub fn handle_taken(&self, handle: &str) -> bool {
        self.users.iter().any(|u| u.handle_str == handle)
    }

    /// Users that have not been removed
    pub fn active_users(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| !u.removed)
    }

    pub fn global_owner_count(&self) -> usize {
        self.active_users().filter(|u| u.is_global_owner()).count()
    }

    pub fn next_user_id(&self) -> UserId {
        self.users
            .iter()
            .map(|u| u.u_id)
            .max()
            .map_or(UserId::new(1), UserId::next)
    }

    // =========================================================================
    // Channels
    // =========================================================================

    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.channel_id == channel_id)
    }

    pub fn channel_mut(&mut self, channel_id: ChannelId) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| c.channel_id == channel_id)
    }

    pub fn next_channel_id(&self) -> ChannelId {
        self.channels
            .iter()
            .map(|c| c.channel_id)
            .max()
            .map_or(ChannelId::new(1), ChannelId::next)
    }

    /// Channel (or DM) holding a message
    pub fn channel_of_message(&self, message_id: MessageId) -> Option<ChannelId> {
        self.channels
            .iter()
            .find(|c| c.message(message_id).is_some())
            .map(|c| c.channel_id)
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Issue the next globally unique message id
    pub fn issue_message_id(&mut self) -> MessageId {
        self.last_message_id = self.last_message_id.next();
        self.last_message_id
    }

    /// Messages currently present across all channels and DMs
    pub fn message_count(&self) -> usize {
        self.channels.iter().map(|c| c.messages.len()).sum()
    }

    // =========================================================================
    // Counts
    // =========================================================================

    /// `(channels, dms)` the user is a member of
    pub fn memberships_of(&self, user_id: UserId) -> (usize, usize) {
        self.channels
            .iter()
            .filter(|c| c.is_member(user_id))
            .fold((0, 0), |(channels, dms), c| {
                if c.is_dm {
                    (channels, dms + 1)
                } else {
                    (channels + 1, dms)
                }
            })
    }

    /// `(channels, dms)` that exist
    pub fn channel_counts(&self) -> (usize, usize) {
        let dms = self.channels.iter().filter(|c| c.is_dm).count();
        (self.channels.len() - dms, dms)
    }
}
