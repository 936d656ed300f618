//! Message ingestion
//!
//! The single path by which a finished message enters a channel or DM log,
//! used for regular sends, delivered later sends, shares, and flushed standup
//! digests. Callers do their own authorization; this only requires the
//! channel and author to exist.

use dreams_core::{ChannelId, Document, DomainError, Message, MessageId, UserId};

use super::stats;

/// Append a message and update the usage counters
///
/// Issues the next global message id, appends an unpinned message with an
/// empty react, bumps the author's `messages_sent`, and records
/// `messages_exist`.
pub fn append(
    document: &mut Document,
    author: UserId,
    channel_id: ChannelId,
    text: String,
    now: i64,
) -> Result<MessageId, DomainError> {
    check_targets(document, author, channel_id)?;

    let message_id = document.issue_message_id();
    push(document, message_id, author, channel_id, text, now);

    Ok(message_id)
}

/// Append a message under an id issued when it was scheduled
pub fn deliver(
    document: &mut Document,
    message_id: MessageId,
    author: UserId,
    channel_id: ChannelId,
    text: String,
    now: i64,
) -> Result<(), DomainError> {
    check_targets(document, author, channel_id)?;
    push(document, message_id, author, channel_id, text, now);
    Ok(())
}

fn check_targets(
    document: &Document,
    author: UserId,
    channel_id: ChannelId,
) -> Result<(), DomainError> {
    if document.user(author).is_none() {
        return Err(DomainError::UserNotFound(author));
    }
    if document.channel(channel_id).is_none() {
        return Err(DomainError::ChannelNotFound(channel_id));
    }
    Ok(())
}

fn push(
    document: &mut Document,
    message_id: MessageId,
    author: UserId,
    channel_id: ChannelId,
    text: String,
    now: i64,
) {
    if let Some(channel) = document.channel_mut(channel_id) {
        channel
            .messages
            .push(Message::new(message_id, author, text, now));
    }
    if let Some(user) = document.user_mut(author) {
        user.messages_sent.increment(now);
    }
    stats::refresh_messages(document, now);
}
