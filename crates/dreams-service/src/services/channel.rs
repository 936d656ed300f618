//! Channel service
//!
//! Handles channel creation, listing, membership changes, and history.

use dreams_core::{unix_now, Channel, ChannelId, DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::mappers::profiles;
use crate::dto::{
    ChannelDetailsResponse, ChannelIdResponse, ChannelListResponse, ChannelSummary,
    CreateChannelRequest, EmptyResponse, MessagesPage,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::membership;
use super::session::SessionResolver;
use super::stats;

const MAX_CHANNEL_NAME_LENGTH: usize = 20;

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a channel owned by the caller
    #[instrument(skip(self, token, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        token: &str,
        request: CreateChannelRequest,
    ) -> ServiceResult<ChannelIdResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let channel_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;

                let length = request.name.chars().count();
                if length == 0 || length > MAX_CHANNEL_NAME_LENGTH {
                    return Err(DomainError::InvalidName(request.name.clone()).into());
                }

                let channel_id = doc.next_channel_id();
                doc.channels.push(Channel::new_channel(
                    channel_id,
                    request.name.clone(),
                    request.is_public,
                    user_id,
                ));
                stats::refresh_membership(doc, now);

                Ok(channel_id)
            })
            .await?;

        info!(channel_id = %channel_id, "Channel created");

        Ok(ChannelIdResponse { channel_id })
    }

    /// Channels the caller belongs to
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> ServiceResult<ChannelListResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channels = doc
                    .channels
                    .iter()
                    .filter(|c| !c.is_dm && c.is_member(user_id))
                    .map(ChannelSummary::from)
                    .collect();
                Ok(ChannelListResponse { channels })
            })
            .await
    }

    /// Every channel, public or private, excluding DMs
    #[instrument(skip(self, token))]
    pub async fn list_all(&self, token: &str) -> ServiceResult<ChannelListResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                session.resolve(doc)?;
                let channels = doc
                    .channels
                    .iter()
                    .filter(|c| !c.is_dm)
                    .map(ChannelSummary::from)
                    .collect();
                Ok(ChannelListResponse { channels })
            })
            .await
    }

    /// Channel name, visibility, and member profiles; members only
    #[instrument(skip(self, token))]
    pub async fn details(
        &self,
        token: &str,
        channel_id: ChannelId,
    ) -> ServiceResult<ChannelDetailsResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;
                membership::require_member(channel, user_id)?;

                Ok(ChannelDetailsResponse {
                    name: channel.name.clone(),
                    is_public: channel.is_public,
                    owner_members: profiles(doc, &channel.owner_members),
                    all_members: profiles(doc, &channel.all_members),
                })
            })
            .await
    }

    /// Join a public channel; global owners may also join private ones
    #[instrument(skip(self, token))]
    pub async fn join(&self, token: &str, channel_id: ChannelId) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let user_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let is_global_owner = doc.user(user_id).is_some_and(|u| u.is_global_owner());
                let channel = membership::find_channel(doc, channel_id)?;

                if channel.is_member(user_id) {
                    return Err(DomainError::AlreadyMember.into());
                }
                if !channel.is_public && !is_global_owner {
                    return Err(DomainError::PrivateChannel.into());
                }

                membership::find_channel_mut(doc, channel_id)?.add_member(user_id);
                stats::refresh_membership(doc, now);
                Ok(user_id)
            })
            .await?;

        info!(channel_id = %channel_id, user_id = %user_id, "User joined channel");

        Ok(EmptyResponse {})
    }

    /// Add another user to a channel the caller belongs to
    #[instrument(skip(self, token))]
    pub async fn invite(
        &self,
        token: &str,
        channel_id: ChannelId,
        invitee: UserId,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;

                if doc.user(invitee).is_none() {
                    return Err(DomainError::UserNotFound(invitee).into());
                }
                membership::require_member(channel, user_id)?;
                if channel.is_member(invitee) {
                    return Err(DomainError::AlreadyMember.into());
                }

                membership::find_channel_mut(doc, channel_id)?.add_member(invitee);
                stats::refresh_membership(doc, now);
                Ok(())
            })
            .await?;

        info!(channel_id = %channel_id, invitee = %invitee, "User invited to channel");

        Ok(EmptyResponse {})
    }

    /// Leave a channel, giving up ownership as well
    #[instrument(skip(self, token))]
    pub async fn leave(&self, token: &str, channel_id: ChannelId) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel_mut(doc, channel_id)?;
                membership::require_member(channel, user_id)?;

                channel.remove_member(user_id);
                stats::refresh_membership(doc, now);
                Ok(())
            })
            .await?;

        info!(channel_id = %channel_id, "User left channel");

        Ok(EmptyResponse {})
    }

    /// Page of channel history, newest first
    #[instrument(skip(self, token))]
    pub async fn messages(
        &self,
        token: &str,
        channel_id: ChannelId,
        start: usize,
    ) -> ServiceResult<MessagesPage> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let channel = membership::find_channel(doc, channel_id)?;
                membership::require_member(channel, user_id)?;

                page_of(channel, start, user_id)
            })
            .await
    }
}

/// History page for a channel or DM, rejecting a `start` past the oldest message
pub(crate) fn page_of(
    channel: &Channel,
    start: usize,
    viewer: UserId,
) -> ServiceResult<MessagesPage> {
    let total = channel.messages.len();
    if start > total {
        return Err(DomainError::InvalidStart { start, total }.into());
    }
    Ok(MessagesPage::from_channel(channel, start, viewer))
}
