//! Authentication handlers
//!
//! Endpoints for registration, login, and logout.

use axum::{extract::State, Json};
use dreams_service::dto::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};
use dreams_service::AuthService;

use crate::extractors::{SessionToken, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user and open their first session
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Logout; reports `is_success: false` for a session that is already gone
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<LogoutResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.logout(token.as_str()).await?;
    Ok(Json(response))
}
