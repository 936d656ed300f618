//! Authentication service
//!
//! Handles user registration, login, and logout. Every login creates an
//! independent session; logout ends only the session it was called with.

use dreams_common::auth::{hash_password, verify_password};
use dreams_core::{unix_now, Document, DomainError, GlobalRole, User, WorkspaceStats};
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

use crate::dto::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::session::{new_session_id, SessionResolver};

const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_NAME_LENGTH: usize = 50;
pub(super) const MIN_HANDLE_LENGTH: usize = 3;
pub(super) const MAX_HANDLE_LENGTH: usize = 20;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and log them in
    ///
    /// The first user to register becomes the Dreams owner.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_registration(&request)?;

        // Hash outside the document lock
        let password_hash = hash_password(&request.password)?;
        let session_id = new_session_id();
        let now = unix_now();

        let user_id = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                if doc.user_by_email(&request.email).is_some() {
                    return Err(DomainError::EmailAlreadyExists.into());
                }

                let is_first = doc.users.is_empty();
                if is_first {
                    doc.stats = WorkspaceStats::starting_at(now);
                }

                let user_id = doc.next_user_id();
                let handle = generate_handle(doc, &request.name_first, &request.name_last);
                let mut user = User::new(
                    user_id,
                    request.email.clone(),
                    request.name_first.clone(),
                    request.name_last.clone(),
                    handle,
                    password_hash,
                    now,
                );
                if is_first {
                    user.permission = GlobalRole::Owner;
                }
                user.sessions.push(session_id.clone());
                doc.users.push(user);

                Ok(user_id)
            })
            .await?;

        info!(user_id = %user_id, "User registered successfully");

        let token = SessionResolver::new(self.ctx).issue(user_id, &session_id)?;
        Ok(AuthResponse {
            token,
            auth_user_id: user_id,
        })
    }

    /// Login with email and password, opening a new session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let (user_id, password_hash) = self
            .ctx
            .db()
            .read(|doc| -> ServiceResult<_> {
                let user = doc.user_by_email(&request.email).ok_or_else(|| {
                    warn!(email = %request.email, "Login failed: user not found");
                    DomainError::InvalidCredentials
                })?;
                Ok((user.u_id, user.password.clone()))
            })
            .await?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user_id, "Login failed: invalid password");
            return Err(DomainError::InvalidCredentials.into());
        }

        let session_id = new_session_id();
        self.ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                let user = doc
                    .user_mut(user_id)
                    .ok_or(DomainError::InvalidCredentials)?;
                user.sessions.push(session_id.clone());
                Ok(())
            })
            .await?;

        info!(user_id = %user_id, "User logged in successfully");

        let token = SessionResolver::new(self.ctx).issue(user_id, &session_id)?;
        Ok(AuthResponse {
            token,
            auth_user_id: user_id,
        })
    }

    /// End the session behind `token`
    ///
    /// Reports `is_success: false` instead of failing when the session is
    /// already gone or the token does not decode.
    #[instrument(skip(self, token))]
    pub async fn logout(&self, token: &str) -> ServiceResult<LogoutResponse> {
        let Ok(session) = SessionResolver::new(self.ctx).decode(token) else {
            return Ok(LogoutResponse { is_success: false });
        };

        let is_success = self
            .ctx
            .db()
            .update(|doc| -> ServiceResult<_> {
                Ok(doc
                    .user_mut(session.user_id)
                    .is_some_and(|user| user.end_session(&session.session_id)))
            })
            .await?;

        if is_success {
            info!(user_id = %session.user_id, "User logged out");
        }

        Ok(LogoutResponse { is_success })
    }
}

fn validate_registration(request: &RegisterRequest) -> Result<(), DomainError> {
    if !request.email.validate_email() {
        return Err(DomainError::InvalidEmail);
    }
    if request.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    check_name(&request.name_first)?;
    check_name(&request.name_last)
}

/// A first or last name of 1 to 50 characters
pub(super) fn check_name(name: &str) -> Result<(), DomainError> {
    let length = name.chars().count();
    if length == 0 || length > MAX_NAME_LENGTH {
        Err(DomainError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Derive a unique handle from a user's names
///
/// Lowercased concatenation without `@` or whitespace, cut to 20 characters.
/// A taken handle gets the smallest free numeric suffix, starting at 0.
fn generate_handle(doc: &Document, name_first: &str, name_last: &str) -> String {
    let base: String = name_first
        .chars()
        .chain(name_last.chars())
        .filter(|c| *c != '@' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .take(MAX_HANDLE_LENGTH)
        .collect();

    if !doc.handle_taken(&base) {
        return base;
    }

    let mut suffix = 0u64;
    loop {
        let candidate = format!("{base}{suffix}");
        if !doc.handle_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
