//! Membership oracle
//!
//! Pure queries over the document used as authorization gates. Nothing here
//! mutates state.

use dreams_core::{Channel, ChannelId, Document, DomainError, UserId};

/// Whether the user is in the channel's (or DM's) member list
pub fn is_member(document: &Document, user_id: UserId, channel_id: ChannelId) -> bool {
    document
        .channel(channel_id)
        .is_some_and(|c| c.is_member(user_id))
}

/// Whether the user is in the channel's (or DM's) owner list
pub fn is_owner(document: &Document, user_id: UserId, channel_id: ChannelId) -> bool {
    document
        .channel(channel_id)
        .is_some_and(|c| c.is_owner(user_id))
}

/// Channel owners, plus global owners for regular channels (not DMs)
pub fn is_moderator(document: &Document, user_id: UserId, channel: &Channel) -> bool {
    channel.is_owner(user_id)
        || (!channel.is_dm && document.user(user_id).is_some_and(|u| u.is_global_owner()))
}

/// Look up a regular channel; DMs do not count
pub fn find_channel(document: &Document, channel_id: ChannelId) -> Result<&Channel, DomainError> {
    document
        .channel(channel_id)
        .filter(|c| !c.is_dm)
        .ok_or(DomainError::ChannelNotFound(channel_id))
}

pub fn find_channel_mut(
    document: &mut Document,
    channel_id: ChannelId,
) -> Result<&mut Channel, DomainError> {
    document
        .channel_mut(channel_id)
        .filter(|c| !c.is_dm)
        .ok_or(DomainError::ChannelNotFound(channel_id))
}

/// Look up a DM; regular channels do not count
pub fn find_dm(document: &Document, dm_id: ChannelId) -> Result<&Channel, DomainError> {
    document
        .channel(dm_id)
        .filter(|c| c.is_dm)
        .ok_or(DomainError::DmNotFound(dm_id))
}

pub fn find_dm_mut(document: &mut Document, dm_id: ChannelId) -> Result<&mut Channel, DomainError> {
    document
        .channel_mut(dm_id)
        .filter(|c| c.is_dm)
        .ok_or(DomainError::DmNotFound(dm_id))
}

/// Fail with `NotMember` unless the user belongs to the channel
pub fn require_member(channel: &Channel, user_id: UserId) -> Result<(), DomainError> {
    if channel.is_member(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotMember)
    }
}
