//! User service
//!
//! Profiles, usage statistics, and the Dreams owner's admin operations.
//!
//! Removing a user keeps the record so old messages still have an author:
//! the account is anonymized, its messages read "Removed user", and it
//! leaves every channel and DM.

use dreams_core::{unix_now, Document, DomainError, GlobalRole, User, UserId};
use tracing::{info, instrument};
use validator::ValidateEmail;

use crate::dto::{
    EmptyResponse, ProfileResponse, UserResponse, UserStats, UserStatsResponse, UsersResponse,
    WorkspaceStats, WorkspaceStatsResponse,
};

use super::auth::{check_name, MAX_HANDLE_LENGTH, MIN_HANDLE_LENGTH};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::session::SessionResolver;
use super::stats;

/// Text that replaces every message of a removed user
pub const REMOVED_MESSAGE_TEXT: &str = "Removed user";

/// `permission_id` values accepted by [`UserService::change_permission`]
const PERMISSION_OWNER: i64 = 1;
const PERMISSION_MEMBER: i64 = 2;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every registered user that has not been removed
    #[instrument(skip(self, token))]
    pub async fn all(&self, token: &str) -> ServiceResult<UsersResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                session.resolve(doc)?;
                Ok(UsersResponse {
                    users: doc.active_users().map(UserResponse::from).collect(),
                })
            })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &str, user_id: UserId) -> ServiceResult<ProfileResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                session.resolve(doc)?;
                let user = doc
                    .user(user_id)
                    .ok_or(DomainError::UserNotFound(user_id))?;
                Ok(ProfileResponse {
                    user: UserResponse::from(user),
                })
            })
            .await
    }

    /// The caller's usage series and involvement rate
    #[instrument(skip(self, token))]
    pub async fn user_stats(&self, token: &str) -> ServiceResult<UserStatsResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                let user = doc
                    .user(user_id)
                    .ok_or(DomainError::UserNotFound(user_id))?;

                Ok(UserStatsResponse {
                    user_stats: UserStats {
                        channels_joined: user.channels_joined.clone(),
                        dms_joined: user.dms_joined.clone(),
                        messages_sent: user.messages_sent.clone(),
                        involvement_rate: stats::involvement_rate(doc, user_id),
                    },
                })
            })
            .await
    }

    /// Workspace-wide series and utilization rate
    #[instrument(skip(self, token))]
    pub async fn workspace_stats(&self, token: &str) -> ServiceResult<WorkspaceStatsResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        self.ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                session.resolve(doc)?;
                Ok(WorkspaceStatsResponse {
                    dreams_stats: WorkspaceStats {
                        channels_exist: doc.stats.channels_exist.clone(),
                        dms_exist: doc.stats.dms_exist.clone(),
                        messages_exist: doc.stats.messages_exist.clone(),
                        utilization_rate: stats::utilization_rate(doc),
                    },
                })
            })
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn set_name(
        &self,
        token: &str,
        name_first: &str,
        name_last: &str,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        let user_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                check_name(name_first)?;
                check_name(name_last)?;

                let user = doc
                    .user_mut(user_id)
                    .ok_or(DomainError::UserNotFound(user_id))?;
                user.name_first = name_first.to_string();
                user.name_last = name_last.to_string();
                Ok(user_id)
            })
            .await?;

        info!(user_id = %user_id, "Name changed");

        Ok(EmptyResponse {})
    }

    #[instrument(skip(self, token))]
    pub async fn set_email(&self, token: &str, email: &str) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        let user_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                if !email.validate_email() {
                    return Err(DomainError::InvalidEmail.into());
                }
                if doc.user_by_email(email).is_some_and(|u| u.u_id != user_id) {
                    return Err(DomainError::EmailAlreadyExists.into());
                }

                let user = doc
                    .user_mut(user_id)
                    .ok_or(DomainError::UserNotFound(user_id))?;
                user.email = email.to_string();
                Ok(user_id)
            })
            .await?;

        info!(user_id = %user_id, "Email changed");

        Ok(EmptyResponse {})
    }

    /// Handles are 3 to 20 characters without `@` or whitespace
    #[instrument(skip(self, token))]
    pub async fn set_handle(&self, token: &str, handle: &str) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        let user_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user_id = session.resolve(doc)?;
                check_handle(handle)?;

                let current = doc.user(user_id).map(|u| u.handle_str.as_str());
                if current != Some(handle) && doc.handle_taken(handle) {
                    return Err(DomainError::HandleAlreadyExists.into());
                }

                let user = doc
                    .user_mut(user_id)
                    .ok_or(DomainError::UserNotFound(user_id))?;
                user.handle_str = handle.to_string();
                Ok(user_id)
            })
            .await?;

        info!(user_id = %user_id, handle, "Handle changed");

        Ok(EmptyResponse {})
    }

    /// Remove a user from Dreams; Dreams owners only
    ///
    /// The only remaining owner cannot be removed.
    #[instrument(skip(self, token))]
    pub async fn remove_user(&self, token: &str, user_id: UserId) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;
        let now = unix_now();

        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let caller = session.resolve(doc)?;
                let target = find_active(doc, user_id)?;
                let target_is_owner = target.is_global_owner();

                require_global_owner(doc, caller)?;
                if target_is_owner && doc.global_owner_count() == 1 {
                    return Err(DomainError::LastGlobalOwner.into());
                }

                for channel in &mut doc.channels {
                    channel.remove_member(user_id);
                    for message in channel.messages.iter_mut().filter(|m| m.u_id == user_id) {
                        message.message = REMOVED_MESSAGE_TEXT.to_string();
                    }
                }
                if let Some(user) = doc.user_mut(user_id) {
                    user.anonymize();
                }
                stats::refresh_membership(doc, now);
                Ok(())
            })
            .await?;

        info!(user_id = %user_id, "User removed");

        Ok(EmptyResponse {})
    }

    /// Make a user a Dreams owner (1) or a member (2); Dreams owners only
    #[instrument(skip(self, token))]
    pub async fn change_permission(
        &self,
        token: &str,
        user_id: UserId,
        permission_id: i64,
    ) -> ServiceResult<EmptyResponse> {
        let session = SessionResolver::new(self.ctx).decode(token)?;

        let role = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let caller = session.resolve(doc)?;
                let target = find_active(doc, user_id)?;
                let target_is_owner = target.is_global_owner();
                let role = match permission_id {
                    PERMISSION_OWNER => GlobalRole::Owner,
                    PERMISSION_MEMBER => GlobalRole::Member,
                    other => return Err(DomainError::InvalidPermission(other).into()),
                };

                require_global_owner(doc, caller)?;
                if target_is_owner && role == GlobalRole::Member && doc.global_owner_count() == 1 {
                    return Err(DomainError::LastGlobalOwner.into());
                }

                if let Some(user) = doc.user_mut(user_id) {
                    user.permission = role;
                }
                Ok(role)
            })
            .await?;

        info!(user_id = %user_id, role = ?role, "Permission changed");

        Ok(EmptyResponse {})
    }
}

fn check_handle(handle: &str) -> Result<(), DomainError> {
    let length = handle.chars().count();
    let well_formed = (MIN_HANDLE_LENGTH..=MAX_HANDLE_LENGTH).contains(&length)
        && !handle.chars().any(|c| c == '@' || c.is_whitespace());

    if well_formed {
        Ok(())
    } else {
        Err(DomainError::InvalidHandle(handle.to_string()))
    }
}

fn find_active(doc: &Document, user_id: UserId) -> Result<&User, DomainError> {
    doc.user(user_id)
        .filter(|u| !u.removed)
        .ok_or(DomainError::UserNotFound(user_id))
}

fn require_global_owner(doc: &Document, user_id: UserId) -> Result<(), DomainError> {
    if doc.user(user_id).is_some_and(|u| u.is_global_owner()) {
        Ok(())
    } else {
        Err(DomainError::NotGlobalOwner)
    }
}
