//! DM service
//!
//! Direct messages are channels flagged `is_dm`: always private, owned by
//! their creator, and named after their members' handles.

use dreams_core::{unix_now, Channel, ChannelId, DomainError, Message, MAX_MESSAGE_LENGTH};
use tracing::{info, instrument};

use crate::dto::mappers::profiles;
use crate::dto::{
    CreateDmRequest, DmCreateResponse, DmDetailsResponse, DmListResponse, DmSummary,
    EmptyResponse, MessageIdResponse, MessagesPage,
};

use super::channel::page_of;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::ingest;
use super::membership;
use super::session::SessionResolver;
use super::stats;

/// DM service
pub struct DmService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DmService<'a> {
    /// Create a new DmService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a DM between the caller and `u_ids`
    #[instrument(skip(self, token, request))]
    pub async fn create(
        &self,
        token: &str,
        request: CreateDmRequest,
    ) -> ServiceResult<DmCreateResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let response = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let creator = session.resolve(doc)?;

                let mut members = vec![creator];
                for u_id in &request.u_ids {
                    if doc.user(*u_id).is_none() {
                        return Err(DomainError::UserNotFound(*u_id).into());
                    }
                    if !members.contains(u_id) {
                        members.push(*u_id);
                    }
                }

                let mut handles: Vec<&str> = members
                    .iter()
                    .filter_map(|id| doc.user(*id))
                    .map(|u| u.handle_str.as_str())
                    .collect();
                handles.sort_unstable();
                let dm_name = handles.join(",");

                let dm_id = doc.next_channel_id();
                doc.channels
                    .push(Channel::new_dm(dm_id, dm_name.clone(), creator, members));
                stats::refresh_membership(doc, now);

                Ok(DmCreateResponse { dm_id, dm_name })
            })
            .await?;

        info!(dm_id = %response.dm_id, "DM created");

        Ok(response)
    }

    /// DMs the caller belongs to
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &str) -> ServiceResult<DmListResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let dms = doc
                    .channels
                    .iter()
                    .filter(|c| c.is_dm && c.is_member(user_id))
                    .map(DmSummary::from)
                    .collect();
                Ok(DmListResponse { dms })
            })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn details(
        &self,
        token: &str,
        dm_id: ChannelId,
    ) -> ServiceResult<DmDetailsResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let dm = membership::find_dm(doc, dm_id)?;
                membership::require_member(dm, user_id)?;

                Ok(DmDetailsResponse {
                    name: dm.name.clone(),
                    members: profiles(doc, &dm.all_members),
                })
            })
            .await
    }

    /// Leave a DM; its name is left unchanged
    #[instrument(skip(self, token))]
    pub async fn leave(&self, token: &str, dm_id: ChannelId) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let dm = membership::find_dm_mut(doc, dm_id)?;
                membership::require_member(dm, user_id)?;

                dm.remove_member(user_id);
                stats::refresh_membership(doc, now);
                Ok(())
            })
            .await?;

        info!(dm_id = %dm_id, "User left DM");

        Ok(EmptyResponse {})
    }

    #[instrument(skip(self, token))]
    pub async fn messages(
        &self,
        token: &str,
        dm_id: ChannelId,
        start: usize,
    ) -> ServiceResult<MessagesPage> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let dm = membership::find_dm(doc, dm_id)?;
                membership::require_member(dm, user_id)?;

                page_of(dm, start, user_id)
            })
            .await
    }

    /// Post a message to a DM the caller belongs to
    #[instrument(skip(self, token, text))]
    pub async fn send(
        &self,
        token: &str,
        dm_id: ChannelId,
        text: &str,
    ) -> ServiceResult<MessageIdResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        let message_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let dm = membership::find_dm(doc, dm_id)?;

                if Message::exceeds_length(text) {
                    return Err(DomainError::MessageTooLong {
                        max: MAX_MESSAGE_LENGTH,
                    }
                    .into());
                }
                membership::require_member(dm, user_id)?;

                Ok(ingest::append(doc, user_id, dm_id, text.to_string(), now)?)
            })
            .await?;

        info!(dm_id = %dm_id, message_id = %message_id, "DM message sent");

        Ok(MessageIdResponse { message_id })
    }
}

