//! Deferred task registry
//!
//! Tracks pending timers using `DashMap` for concurrent access: one standup
//! flush per channel and one delivery per scheduled message. Arming is
//! fire-and-forget: the caller gets control back immediately and the task
//! runs on its own once the delay elapses.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dreams_core::{ChannelId, MessageId};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// What a pending timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Closing the standup window of a channel
    Standup(ChannelId),
    /// Delivering a message sent for later
    Delivery(MessageId),
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standup(channel_id) => write!(f, "standup:{channel_id}"),
            Self::Delivery(message_id) => write!(f, "delivery:{message_id}"),
        }
    }
}

struct PendingTask {
    /// Distinguishes this arming from a later one under the same key
    token: u64,
    handle: JoinHandle<()>,
}

/// Registry of pending deferred tasks
#[derive(Clone, Default)]
pub struct TaskScheduler {
    timers: Arc<DashMap<TimerKey, PendingTask>>,
    next_token: Arc<AtomicU64>,
}

impl TaskScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` on a background task
    ///
    /// Replaces (and aborts) any task already pending under `key`. The entry
    /// removes itself once the task has run.
    pub fn schedule<F>(&self, key: TimerKey, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let timers = Arc::clone(&self.timers);

        // Holding the entry while spawning keeps the task's own cleanup from
        // running before it is registered.
        let replaced = match self.timers.entry(key) {
            Entry::Occupied(mut occupied) => {
                let handle = spawn_task(timers, key, token, delay, task);
                Some(occupied.insert(PendingTask { token, handle }))
            }
            Entry::Vacant(vacant) => {
                let handle = spawn_task(timers, key, token, delay, task);
                vacant.insert(PendingTask { token, handle });
                None
            }
        };

        if let Some(previous) = replaced {
            previous.handle.abort();
            tracing::debug!(key = %key, "Replaced pending task");
        }

        tracing::debug!(key = %key, delay_secs = delay.as_secs(), "Task scheduled");
    }

    /// Whether a task is still pending under `key`
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.contains_key(&key)
    }

    /// Number of pending tasks
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Abort every pending task (shutdown)
    pub fn cancel_all(&self) {
        let keys: Vec<TimerKey> = self.timers.iter().map(|entry| *entry.key()).collect();
        for key in keys {
            if let Some((_, pending)) = self.timers.remove(&key) {
                pending.handle.abort();
                tracing::warn!(key = %key, "Pending task cancelled");
            }
        }
    }
}

fn spawn_task<F>(
    timers: Arc<DashMap<TimerKey, PendingTask>>,
    key: TimerKey,
    token: u64,
    delay: Duration,
    task: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
        timers.remove_if(&key, |_, pending| pending.token == token);
    })
}

impl fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.timers.len())
            .finish()
    }
}
