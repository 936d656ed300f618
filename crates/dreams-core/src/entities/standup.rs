//! Standup - the per-channel time-boxed message buffer
//!
//! Lifecycle: `Idle --begin--> Active --close--> Idle`, with `queue` growing the
//! buffer while active. Every channel owns exactly one, created idle.

use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Per-channel standup state, persisted inside the channel record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standup {
    pub is_active: bool,
    /// Absolute Unix seconds at which the window closes
    pub time_finish: Option<i64>,
    /// User the digest is posted as
    #[serde(rename = "u_id")]
    pub initiator: Option<UserId>,
    /// Preformatted `"handle: text"` lines in acceptance order
    #[serde(rename = "queued_messages")]
    pub buffer: Vec<String>,
    /// Counts windows opened on this channel; survives `reset`
    #[serde(default)]
    pub window: u64,
}

/// What a closed window hands to message ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandupDigest {
    pub initiator: Option<UserId>,
    pub text: String,
}

impl Standup {
    /// Active with a `time_finish` still ahead of `now`
    #[inline]
    pub fn is_running(&self, now: i64) -> bool {
        self.is_active && self.time_finish.is_some_and(|finish| finish > now)
    }

    /// Still flagged active although its window already closed
    #[inline]
    pub fn is_overdue(&self, now: i64) -> bool {
        self.is_active && !self.is_running(now)
    }

    /// Open a fresh window, returning its number
    pub fn begin(&mut self, initiator: UserId, time_finish: i64) -> u64 {
        self.window = self.window.wrapping_add(1);
        self.is_active = true;
        self.time_finish = Some(time_finish);
        self.initiator = Some(initiator);
        self.buffer.clear();
        self.window
    }

    /// Buffer one contribution as `"{handle}: {text}"`
    pub fn queue(&mut self, handle: &str, text: &str) {
        self.buffer.push(format!("{handle}: {text}"));
    }

    /// Close the window, returning its digest and resetting to idle.
    /// Closing an idle standup yields nothing.
    pub fn close(&mut self) -> Option<StandupDigest> {
        if !self.is_active {
            return None;
        }
        let digest = StandupDigest {
            initiator: self.initiator,
            text: self.buffer.join("\n"),
        };
        self.reset();
        Some(digest)
    }

    pub fn reset(&mut self) {
        *self = Self {
            window: self.window,
            ..Self::default()
        };
    }
}
