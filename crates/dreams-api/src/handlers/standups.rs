//! Standup handlers
//!
//! A standup buffers lines for a fixed window and posts them to the channel
//! as one message, attributed to the starter, when the window closes.

use axum::{extract::State, Json};
use dreams_core::ChannelId;
use dreams_service::dto::{
    EmptyResponse, StandupActiveResponse, StandupSendRequest, StandupStartRequest,
    StandupStartResponse,
};
use dreams_service::StandupService;

use crate::extractors::{IdPath, SessionToken, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Open a standup window of `length` seconds
///
/// POST /channels/{channel_id}/standup
pub async fn start_standup(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<StandupStartRequest>,
) -> ApiResult<Json<StandupStartResponse>> {
    let service = StandupService::new(state.service_context());
    let response = service
        .start(token.as_str(), channel_id, request.length)
        .await?;
    Ok(Json(response))
}

/// GET /channels/{channel_id}/standup
pub async fn get_standup(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<StandupActiveResponse>> {
    let service = StandupService::new(state.service_context());
    let response = service.active(token.as_str(), channel_id).await?;
    Ok(Json(response))
}

/// Buffer a line in the active window
///
/// POST /channels/{channel_id}/standup/messages
pub async fn send_standup_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<StandupSendRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = StandupService::new(state.service_context());
    let response = service
        .send(token.as_str(), channel_id, &request.message)
        .await?;
    Ok(Json(response))
}
