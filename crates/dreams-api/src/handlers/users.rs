//! User handlers
//!
//! Profiles, usage statistics, and admin actions.

use axum::{extract::State, Json};
use dreams_core::UserId;
use dreams_service::dto::{
    EmptyResponse, PermissionChangeRequest, ProfileResponse, SetEmailRequest, SetHandleRequest,
    SetNameRequest, UserStatsResponse, UsersResponse, WorkspaceStatsResponse,
};
use dreams_service::UserService;

use crate::extractors::{IdPath, SessionToken, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<UsersResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.all(token.as_str()).await?;
    Ok(Json(response))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.profile(token.as_str(), user_id).await?;
    Ok(Json(response))
}

/// The caller's own usage series
///
/// GET /users/@me/stats
pub async fn get_current_user_stats(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.user_stats(token.as_str()).await?;
    Ok(Json(response))
}

/// Workspace-wide usage series
///
/// GET /stats
pub async fn get_workspace_stats(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<WorkspaceStatsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.workspace_stats(token.as_str()).await?;
    Ok(Json(response))
}

/// PUT /users/@me/name
pub async fn set_name(
    State(state): State<AppState>,
    token: SessionToken,
    ValidatedJson(request): ValidatedJson<SetNameRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .set_name(token.as_str(), &request.name_first, &request.name_last)
        .await?;
    Ok(Json(response))
}

/// PUT /users/@me/email
pub async fn set_email(
    State(state): State<AppState>,
    token: SessionToken,
    ValidatedJson(request): ValidatedJson<SetEmailRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.set_email(token.as_str(), &request.email).await?;
    Ok(Json(response))
}

/// PUT /users/@me/handle
pub async fn set_handle(
    State(state): State<AppState>,
    token: SessionToken,
    ValidatedJson(request): ValidatedJson<SetHandleRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .set_handle(token.as_str(), &request.handle_str)
        .await?;
    Ok(Json(response))
}

/// Remove a user from Dreams (Dreams owners only)
///
/// DELETE /admin/users/{user_id}
pub async fn remove_user(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.remove_user(token.as_str(), user_id).await?;
    Ok(Json(response))
}

/// POST /admin/users/{user_id}/permission
pub async fn change_permission(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<PermissionChangeRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .change_permission(token.as_str(), user_id, request.permission_id)
        .await?;
    Ok(Json(response))
}
