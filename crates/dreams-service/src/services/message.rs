//! Message service
//!
//! Handles message sending, editing, removal, pins, reacts, sharing, and
//! search. Messages are addressed by their global id; a message in a channel
//! or DM the caller has not joined is reported as not found.
//!
//! A send scheduled for later gets its id when it is accepted and enters the
//! log when its timer fires. Pending sends live only in the scheduler, so a
//! restart drops them.

use std::time::Duration;

use dreams_core::{
    unix_now, Channel, ChannelId, Document, DomainError, Message, MessageId, UserId,
    MAX_MESSAGE_LENGTH, REACT_THUMBS_UP,
};
use tracing::{error, info, instrument, warn};

use crate::dto::{
    EmptyResponse, MessageIdResponse, MessageResponse, SearchResponse, SharedMessageResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::ingest;
use super::membership;
use super::scheduler::TimerKey;
use super::session::SessionResolver;
use super::stats;

/// Longest accepted search query, in characters
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Where a message is headed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Channel(ChannelId),
    Dm(ChannelId),
}

impl Destination {
    /// Read the `(channel_id, dm_id)` pair of a share; the unused one is -1
    fn from_pair(channel_id: i64, dm_id: i64) -> Result<Self, DomainError> {
        match (channel_id, dm_id) {
            (-1, -1) => Err(DomainError::InvalidShareTarget),
            (-1, dm_id) => Ok(Self::Dm(ChannelId::new(dm_id))),
            (channel_id, -1) => Ok(Self::Channel(ChannelId::new(channel_id))),
            _ => Err(DomainError::InvalidShareTarget),
        }
    }

    fn id(self) -> ChannelId {
        match self {
            Self::Channel(id) | Self::Dm(id) => id,
        }
    }

    fn find(self, doc: &Document) -> Result<&Channel, DomainError> {
        match self {
            Self::Channel(id) => membership::find_channel(doc, id),
            Self::Dm(id) => membership::find_dm(doc, id),
        }
    }
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message to a channel the caller belongs to
    #[instrument(skip(self, token, text))]
    pub async fn send(
        &self,
        token: &str,
        channel_id: ChannelId,
        text: &str,
    ) -> ServiceResult<MessageIdResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let message_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;

                check_length(text)?;
                membership::require_member(channel, user_id)?;

                Ok(ingest::append(doc, user_id, channel_id, text.to_string(), now)?)
            })
            .await?;

        info!(message_id = %message_id, channel_id = %channel_id, "Message sent");

        Ok(MessageIdResponse { message_id })
    }

    /// Schedule a message to a channel for `time_sent`
    ///
    /// The id is issued now and returned immediately.
    #[instrument(skip(self, token, text))]
    pub async fn send_later(
        &self,
        token: &str,
        channel_id: ChannelId,
        text: &str,
        time_sent: i64,
    ) -> ServiceResult<MessageIdResponse> {
        self.schedule_send(token, Destination::Channel(channel_id), text, time_sent)
            .await
    }

    /// Schedule a message to a DM for `time_sent`
    #[instrument(skip(self, token, text))]
    pub async fn send_later_dm(
        &self,
        token: &str,
        dm_id: ChannelId,
        text: &str,
        time_sent: i64,
    ) -> ServiceResult<MessageIdResponse> {
        self.schedule_send(token, Destination::Dm(dm_id), text, time_sent)
            .await
    }

    async fn schedule_send(
        &self,
        token: &str,
        destination: Destination,
        text: &str,
        time_sent: i64,
    ) -> ServiceResult<MessageIdResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let (author, message_id) = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let target = destination.find(doc)?;

                check_length(text)?;
                if time_sent < now {
                    return Err(DomainError::InvalidTimeSent(time_sent).into());
                }
                membership::require_member(target, user_id)?;

                Ok((user_id, doc.issue_message_id()))
            })
            .await?;

        self.arm_delivery(author, destination.id(), message_id, text.to_string(), time_sent - now);

        info!(
            message_id = %message_id,
            channel_id = %destination.id(),
            time_sent,
            "Message scheduled"
        );

        Ok(MessageIdResponse { message_id })
    }

    fn arm_delivery(
        &self,
        author: UserId,
        channel_id: ChannelId,
        message_id: MessageId,
        text: String,
        delay_secs: i64,
    ) {
        let ctx = self.ctx.clone();
        let delay = Duration::from_secs(u64::try_from(delay_secs).unwrap_or(0));

        self.ctx
            .scheduler()
            .schedule(TimerKey::Delivery(message_id), delay, async move {
                match MessageService::new(&ctx)
                    .deliver(author, channel_id, message_id, text)
                    .await
                {
                    Ok(true) => {}
                    Ok(false) => {
                        warn!(
                            message_id = %message_id,
                            channel_id = %channel_id,
                            "Scheduled message dropped"
                        );
                    }
                    Err(e) => {
                        error!(message_id = %message_id, error = %e, "Scheduled delivery failed");
                    }
                }
            });
    }

    /// Post a scheduled message under its pre-issued id
    ///
    /// Returns false without posting when the author has since left the
    /// target or the id is already in a log.
    pub async fn deliver(
        &self,
        author: UserId,
        channel_id: ChannelId,
        message_id: MessageId,
        text: String,
    ) -> ServiceResult<bool> {
        let now = unix_now();

        let delivered = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                if !membership::is_member(doc, author, channel_id)
                    || doc.channel_of_message(message_id).is_some()
                {
                    return Ok(false);
                }
                ingest::deliver(doc, message_id, author, channel_id, text, now)?;
                Ok(true)
            })
            .await?;

        if delivered {
            info!(
                message_id = %message_id,
                channel_id = %channel_id,
                "Scheduled message delivered"
            );
        }

        Ok(delivered)
    }

    /// Repost a visible message into a channel or DM the caller belongs to
    ///
    /// The new text is the original followed by `", "` and the comment, or
    /// the original alone when the comment is empty.
    #[instrument(skip(self, token, comment))]
    pub async fn share(
        &self,
        token: &str,
        og_message_id: MessageId,
        comment: &str,
        channel_id: i64,
        dm_id: i64,
    ) -> ServiceResult<SharedMessageResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let shared_message_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let destination = Destination::from_pair(channel_id, dm_id)?;

                let source = locate(doc, user_id, og_message_id)?;
                let original = doc
                    .channel(source)
                    .and_then(|c| c.message(og_message_id))
                    .ok_or(DomainError::MessageNotFound(og_message_id))?;
                let text = shared_text(&original.message, comment);

                let target = destination.find(doc)?;
                check_length(&text)?;
                membership::require_member(target, user_id)?;

                Ok(ingest::append(doc, user_id, destination.id(), text, now)?)
            })
            .await?;

        info!(
            og_message_id = %og_message_id,
            shared_message_id = %shared_message_id,
            "Message shared"
        );

        Ok(SharedMessageResponse { shared_message_id })
    }

    /// Case-insensitive substring search over the caller's channels and DMs
    #[instrument(skip(self, token))]
    pub async fn search(&self, token: &str, query: &str) -> ServiceResult<SearchResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        let length = query.chars().count();
        if length == 0 || length > MAX_QUERY_LENGTH {
            return Err(DomainError::InvalidQuery {
                max: MAX_QUERY_LENGTH,
            }
            .into());
        }
        let needle = query.to_lowercase();

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;

                let mut hits: Vec<&Message> = doc
                    .channels
                    .iter()
                    .filter(|c| c.is_member(user_id))
                    .flat_map(|c| c.messages.iter())
                    .filter(|m| m.message.to_lowercase().contains(&needle))
                    .collect();
                hits.sort_by(|a, b| b.message_id.cmp(&a.message_id));

                Ok(SearchResponse {
                    messages: hits
                        .into_iter()
                        .map(|m| MessageResponse::for_viewer(m, user_id))
                        .collect(),
                })
            })
            .await
    }

    /// Replace a message's text; empty text removes the message
    #[instrument(skip(self, token, text))]
    pub async fn edit(
        &self,
        token: &str,
        message_id: MessageId,
        text: &str,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                check_length(text)?;
                let channel_id = require_author_or_moderator(doc, user_id, message_id)?;

                if text.is_empty() {
                    remove_from(doc, channel_id, message_id, now);
                } else if let Some(message) = doc
                    .channel_mut(channel_id)
                    .and_then(|c| c.message_mut(message_id))
                {
                    message.message = text.to_string();
                }
                Ok(())
            })
            .await?;

        info!(message_id = %message_id, "Message edited");

        Ok(EmptyResponse {})
    }

    #[instrument(skip(self, token))]
    pub async fn remove(
        &self,
        token: &str,
        message_id: MessageId,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel_id = require_author_or_moderator(doc, user_id, message_id)?;
                remove_from(doc, channel_id, message_id, now);
                Ok(())
            })
            .await?;

        info!(message_id = %message_id, "Message removed");

        Ok(EmptyResponse {})
    }

    /// Pin a message; channel owners (and global owners outside DMs) only
    #[instrument(skip(self, token))]
    pub async fn pin(&self, token: &str, message_id: MessageId) -> ServiceResult<EmptyResponse> {
        self.set_pinned(token, message_id, true).await
    }

    #[instrument(skip(self, token))]
    pub async fn unpin(&self, token: &str, message_id: MessageId) -> ServiceResult<EmptyResponse> {
        self.set_pinned(token, message_id, false).await
    }

    async fn set_pinned(
        &self,
        token: &str,
        message_id: MessageId,
        pinned: bool,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel_id = locate(doc, user_id, message_id)?;
                let channel = doc
                    .channel(channel_id)
                    .ok_or(DomainError::MessageNotFound(message_id))?;
                let is_pinned = channel
                    .message(message_id)
                    .is_some_and(|m| m.is_pinned);

                match (pinned, is_pinned) {
                    (true, true) => return Err(DomainError::AlreadyPinned.into()),
                    (false, false) => return Err(DomainError::NotPinned.into()),
                    _ => {}
                }
                if !membership::is_moderator(doc, user_id, channel) {
                    return Err(DomainError::NotOwner.into());
                }

                if let Some(message) = doc
                    .channel_mut(channel_id)
                    .and_then(|c| c.message_mut(message_id))
                {
                    message.is_pinned = pinned;
                }
                Ok(())
            })
            .await?;

        info!(message_id = %message_id, pinned, "Message pin changed");

        Ok(EmptyResponse {})
    }

    /// Add the caller's react to a message
    #[instrument(skip(self, token))]
    pub async fn react(
        &self,
        token: &str,
        message_id: MessageId,
        react_id: u32,
    ) -> ServiceResult<EmptyResponse> {
        self.set_reacted(token, message_id, react_id, true).await
    }

    #[instrument(skip(self, token))]
    pub async fn unreact(
        &self,
        token: &str,
        message_id: MessageId,
        react_id: u32,
    ) -> ServiceResult<EmptyResponse> {
        self.set_reacted(token, message_id, react_id, false).await
    }

    async fn set_reacted(
        &self,
        token: &str,
        message_id: MessageId,
        react_id: u32,
        reacted: bool,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel_id = locate(doc, user_id, message_id)?;
                if react_id != REACT_THUMBS_UP {
                    return Err(DomainError::InvalidReact(react_id).into());
                }

                let message = doc
                    .channel_mut(channel_id)
                    .and_then(|c| c.message_mut(message_id))
                    .ok_or(DomainError::MessageNotFound(message_id))?;
                let has_reacted = message.has_reacted(react_id, user_id);

                match (reacted, has_reacted) {
                    (true, true) => return Err(DomainError::AlreadyReacted.into()),
                    (false, false) => return Err(DomainError::NotReacted.into()),
                    _ => {}
                }

                if let Some(react) = message.react_mut(react_id) {
                    if reacted {
                        react.u_ids.push(user_id);
                    } else {
                        react.u_ids.retain(|id| *id != user_id);
                    }
                }
                Ok(())
            })
            .await?;

        info!(message_id = %message_id, react_id, reacted, "Message react changed");

        Ok(EmptyResponse {})
    }
}

fn check_length(text: &str) -> Result<(), DomainError> {
    if Message::exceeds_length(text) {
        Err(DomainError::MessageTooLong {
            max: MAX_MESSAGE_LENGTH,
        })
    } else {
        Ok(())
    }
}

fn shared_text(original: &str, comment: &str) -> String {
    if comment.is_empty() {
        original.to_string()
    } else {
        format!("{original}, {comment}")
    }
}

/// Channel holding the message, if the user has joined it
fn locate(
    doc: &Document,
    user_id: UserId,
    message_id: MessageId,
) -> Result<ChannelId, DomainError> {
    doc.channel_of_message(message_id)
        .filter(|channel_id| membership::is_member(doc, user_id, *channel_id))
        .ok_or(DomainError::MessageNotFound(message_id))
}

fn require_author_or_moderator(
    doc: &Document,
    user_id: UserId,
    message_id: MessageId,
) -> Result<ChannelId, DomainError> {
    let channel_id = locate(doc, user_id, message_id)?;
    let channel = doc
        .channel(channel_id)
        .ok_or(DomainError::MessageNotFound(message_id))?;
    let is_author = channel
        .message(message_id)
        .is_some_and(|m| m.u_id == user_id);

    if is_author || membership::is_moderator(doc, user_id, channel) {
        Ok(channel_id)
    } else {
        Err(DomainError::NotMessageAuthor)
    }
}

fn remove_from(doc: &mut Document, channel_id: ChannelId, message_id: MessageId, now: i64) {
    if let Some(channel) = doc.channel_mut(channel_id) {
        channel.remove_message(message_id);
    }
    stats::refresh_messages(doc, now);
}
