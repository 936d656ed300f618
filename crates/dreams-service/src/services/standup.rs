//! Standup service
//!
//! A standup is a time-boxed window on a channel. While it is open, members
//! buffer short lines into it; when the window closes the buffered lines are
//! joined into one message posted as the member who started it.
//!
//! Closing is driven by a deferred task armed on [`TaskScheduler`] at
//! start. The task carries the window's number, so a late or duplicated
//! firing that no longer matches the stored window does nothing.
//!
//! [`TaskScheduler`]: super::scheduler::TaskScheduler

use std::time::Duration;

use dreams_core::{
    unix_now, ChannelId, Document, DomainError, Message, MessageId, MAX_MESSAGE_LENGTH,
};
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{EmptyResponse, StandupActiveResponse, StandupStartResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::ingest;
use super::membership;
use super::scheduler::TimerKey;
use super::session::SessionResolver;

/// Standup service
pub struct StandupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StandupService<'a> {
    /// Create a new StandupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a standup window of `length` seconds on a channel
    ///
    /// Returns the absolute time at which the window closes.
    #[instrument(skip(self, token))]
    pub async fn start(
        &self,
        token: &str,
        channel_id: ChannelId,
        length: i64,
    ) -> ServiceResult<StandupStartResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let (initiator, time_finish, window) = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;

                if length < 0 {
                    return Err(DomainError::InvalidStandupLength(length).into());
                }
                if channel.standup.is_running(now) {
                    return Err(DomainError::StandupAlreadyActive.into());
                }
                membership::require_member(channel, user_id)?;

                // The previous window closed but its timer has not fired yet
                if channel.standup.is_overdue(now) {
                    warn!(channel_id = %channel_id, "Flushing overdue standup before restart");
                    flush_channel(doc, channel_id, None, now);
                }

                let time_finish = now.saturating_add(length);
                let window = membership::find_channel_mut(doc, channel_id)?
                    .standup
                    .begin(user_id, time_finish);

                Ok((user_id, time_finish, window))
            })
            .await?;

        self.arm_flush(channel_id, window, length);

        info!(
            channel_id = %channel_id,
            initiator = %initiator,
            time_finish,
            "Standup started"
        );

        Ok(StandupStartResponse { time_finish })
    }

    /// Report whether a standup is active on a channel
    ///
    /// Reads the stored flag as-is; a window past its `time_finish` stays
    /// active until its flush has run.
    #[instrument(skip(self, token))]
    pub async fn active(
        &self,
        token: &str,
        channel_id: ChannelId,
    ) -> ServiceResult<StandupActiveResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;

                Ok(StandupActiveResponse {
                    is_active: channel.standup.is_active,
                    time_finish: channel.standup.time_finish,
                })
            })
            .await
    }

    /// Buffer one line in the channel's active standup
    #[instrument(skip(self, token, text))]
    pub async fn send(
        &self,
        token: &str,
        channel_id: ChannelId,
        text: &str,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;

                if Message::exceeds_length(text) {
                    return Err(DomainError::MessageTooLong {
                        max: MAX_MESSAGE_LENGTH,
                    }
                    .into());
                }
                if !channel.standup.is_active {
                    return Err(DomainError::NoActiveStandup.into());
                }
                membership::require_member(channel, user_id)?;

                let handle = doc
                    .user(user_id)
                    .map(|u| u.handle_str.clone())
                    .ok_or(DomainError::UserNotFound(user_id))?;
                membership::find_channel_mut(doc, channel_id)?
                    .standup
                    .queue(&handle, text);

                Ok(())
            })
            .await?;

        debug!(channel_id = %channel_id, "Standup line buffered");

        Ok(EmptyResponse {})
    }

    /// Close window number `window` on a channel
    ///
    /// Returns the id of the posted digest, or `None` when there was nothing
    /// to close (already flushed, or superseded by a newer window).
    #[instrument(skip(self))]
    pub async fn flush_window(
        &self,
        channel_id: ChannelId,
        window: u64,
    ) -> ServiceResult<Option<MessageId>> {
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                Ok(flush_channel(doc, channel_id, Some(window), now))
            })
            .await
    }

    fn arm_flush(&self, channel_id: ChannelId, window: u64, length: i64) {
        let ctx = self.ctx.clone();
        let delay = Duration::from_secs(u64::try_from(length).unwrap_or(0));

        let key = TimerKey::Standup(channel_id);
        self.ctx.scheduler().schedule(key, delay, async move {
            if let Err(e) = StandupService::new(&ctx)
                .flush_window(channel_id, window)
                .await
            {
                error!(channel_id = %channel_id, error = %e, "Standup flush failed");
            }
        });
    }
}

/// Close the channel's standup and post its digest
///
/// With `window` set, only that window is closed. The standup is reset even
/// when posting the digest fails.
fn flush_channel(
    doc: &mut Document,
    channel_id: ChannelId,
    window: Option<u64>,
    now: i64,
) -> Option<MessageId> {
    let channel = doc.channel_mut(channel_id)?;

    if let Some(expected) = window {
        if !channel.standup.is_active || channel.standup.window != expected {
            debug!(channel_id = %channel_id, "Stale standup flush ignored");
            return None;
        }
    }

    let digest = channel.standup.close()?;
    let Some(initiator) = digest.initiator else {
        warn!(channel_id = %channel_id, "Standup closed without an initiator");
        return None;
    };

    match ingest::append(doc, initiator, channel_id, digest.text, now) {
        Ok(message_id) => {
            info!(
                channel_id = %channel_id,
                message_id = %message_id,
                "Standup digest posted"
            );
            Some(message_id)
        }
        Err(e) => {
            error!(channel_id = %channel_id, error = %e, "Standup digest could not be posted");
            None
        }
    }
}
