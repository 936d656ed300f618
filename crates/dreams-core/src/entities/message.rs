//! Message entity - one entry in a channel or DM log

use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageId, UserId};

/// Maximum message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// The only supported react type
pub const REACT_THUMBS_UP: u32 = 1;

/// Reaction of one type and the users who gave it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct React {
    pub react_id: u32,
    pub u_ids: Vec<UserId>,
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub u_id: UserId,
    pub message: String,
    pub time_created: i64,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub reacts: Vec<React>,
}

impl Message {
    /// Create an unpinned message with an empty thumbs-up react
    pub fn new(message_id: MessageId, u_id: UserId, message: String, time_created: i64) -> Self {
        Self {
            message_id,
            u_id,
            message,
            time_created,
            is_pinned: false,
            reacts: vec![React {
                react_id: REACT_THUMBS_UP,
                u_ids: Vec::new(),
            }],
        }
    }

    /// Check a text against the length limit, counted in characters
    #[inline]
    pub fn exceeds_length(text: &str) -> bool {
        text.chars().count() > MAX_MESSAGE_LENGTH
    }

    pub fn react(&self, react_id: u32) -> Option<&React> {
        self.reacts.iter().find(|r| r.react_id == react_id)
    }

    pub fn react_mut(&mut self, react_id: u32) -> Option<&mut React> {
        self.reacts.iter_mut().find(|r| r.react_id == react_id)
    }

    /// Whether `user_id` has given this react
    pub fn has_reacted(&self, react_id: u32, user_id: UserId) -> bool {
        self.react(react_id)
            .is_some_and(|r| r.u_ids.contains(&user_id))
    }
}
