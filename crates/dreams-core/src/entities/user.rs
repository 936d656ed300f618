//! User entity - a registered account with its sessions and usage series

use serde::{Deserialize, Serialize};

use super::stats::StatSeries;
use crate::value_objects::UserId;

/// Workspace-wide role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlobalRole {
    /// Dreams owner; moderates every channel
    Owner,
    #[default]
    Member,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub u_id: UserId,
    pub email: String,
    pub name_first: String,
    pub name_last: String,
    pub handle_str: String,
    /// Argon2 PHC string
    pub password: String,
    /// Live session ids; one per login
    #[serde(default)]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub permission: GlobalRole,
    #[serde(default)]
    pub channels_joined: StatSeries,
    #[serde(default)]
    pub dms_joined: StatSeries,
    #[serde(default)]
    pub messages_sent: StatSeries,
    /// Set once an owner removes the account; the record stays for its messages
    #[serde(default)]
    pub removed: bool,
}

impl User {
    /// Create a new member with no sessions and zeroed usage series
    pub fn new(
        u_id: UserId,
        email: String,
        name_first: String,
        name_last: String,
        handle_str: String,
        password: String,
        now: i64,
    ) -> Self {
        Self {
            u_id,
            email,
            name_first,
            name_last,
            handle_str,
            password,
            sessions: Vec::new(),
            permission: GlobalRole::Member,
            channels_joined: StatSeries::starting_at(now),
            dms_joined: StatSeries::starting_at(now),
            messages_sent: StatSeries::starting_at(now),
            removed: false,
        }
    }

    /// Turn the account into a "Removed user" placeholder
    ///
    /// Frees the email and handle for reuse and ends every session. Usage
    /// series are kept.
    pub fn anonymize(&mut self) {
        self.name_first = "Removed".to_string();
        self.name_last = "user".to_string();
        self.email.clear();
        self.handle_str.clear();
        self.sessions.clear();
        self.permission = GlobalRole::Member;
        self.removed = true;
    }

    #[inline]
    pub fn is_global_owner(&self) -> bool {
        self.permission == GlobalRole::Owner
    }

    #[inline]
    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s == session_id)
    }

    /// Remove a session; returns whether it was live
    pub fn end_session(&mut self, session_id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s != session_id);
        self.sessions.len() != before
    }
}
