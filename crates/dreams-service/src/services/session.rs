//! Session resolution
//!
//! A token is decoded once, outside the document lock, into a [`Session`].
//! Liveness is then checked against the user's session list inside the same
//! locked update that performs the operation, so a concurrent logout can
//! never be observed half-applied.

use dreams_core::{Document, DomainError, UserId};
use tracing::debug;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A decoded, not yet validated, session credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub session_id: String,
}

impl Session {
    /// Resolve to the caller's user id if the session is still live
    pub fn resolve(&self, document: &Document) -> Result<UserId, DomainError> {
        match document.user(self.user_id) {
            Some(user) if user.has_session(&self.session_id) => Ok(user.u_id),
            _ => Err(DomainError::InvalidSession),
        }
    }
}

/// Turns bearer tokens into sessions
pub struct SessionResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionResolver<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Decode a token. Any malformed, forged, or expired token is an invalid session.
    pub fn decode(&self, token: &str) -> ServiceResult<Session> {
        let claims = self.ctx.jwt_service().decode_token(token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            DomainError::InvalidSession
        })?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::InvalidSession)?;

        Ok(Session {
            user_id,
            session_id: claims.sid,
        })
    }

    /// Issue a token for a freshly created session
    pub fn issue(&self, user_id: UserId, session_id: &str) -> ServiceResult<String> {
        Ok(self.ctx.jwt_service().issue(user_id, session_id)?)
    }
}

/// Generate a new session id
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
