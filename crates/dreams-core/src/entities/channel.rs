//! Channel entity - a channel or DM with its members, log, and standup

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::standup::Standup;
use crate::value_objects::{ChannelId, MessageId, UserId};

/// Channel entity; DMs share this representation with `is_dm` set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: ChannelId,
    pub name: String,
    pub is_public: bool,
    #[serde(default)]
    pub is_dm: bool,
    pub owner_members: Vec<UserId>,
    pub all_members: Vec<UserId>,
    /// Oldest first
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub standup: Standup,
}

impl Channel {
    /// Create a channel owned by its creator
    #[must_use]
    pub fn new_channel(
        channel_id: ChannelId,
        name: String,
        is_public: bool,
        creator: UserId,
    ) -> Self {
        Self {
            channel_id,
            name,
            is_public,
            is_dm: false,
            owner_members: vec![creator],
            all_members: vec![creator],
            messages: Vec::new(),
            standup: Standup::default(),
        }
    }

    /// Create a private DM owned by its creator; `members` includes the creator
    #[must_use]
    pub fn new_dm(
        channel_id: ChannelId,
        name: String,
        creator: UserId,
        members: Vec<UserId>,
    ) -> Self {
        Self {
            channel_id,
            name,
            is_public: false,
            is_dm: true,
            owner_members: vec![creator],
            all_members: members,
            messages: Vec::new(),
            standup: Standup::default(),
        }
    }

    #[inline]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.all_members.contains(&user_id)
    }

    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_members.contains(&user_id)
    }

    pub fn add_member(&mut self, user_id: UserId) {
        if !self.is_member(user_id) {
            self.all_members.push(user_id);
        }
    }

    /// Remove from both the member and owner lists
    pub fn remove_member(&mut self, user_id: UserId) {
        self.all_members.retain(|id| *id != user_id);
        self.owner_members.retain(|id| *id != user_id);
    }

    pub fn message(&self, message_id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.message_id == message_id)
    }

    pub fn message_mut(&mut self, message_id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.message_id == message_id)
    }

    /// Remove a message, returning it
    pub fn remove_message(&mut self, message_id: MessageId) -> Option<Message> {
        let index = self.messages.iter().position(|m| m.message_id == message_id)?;
        Some(self.messages.remove(index))
    }
}
