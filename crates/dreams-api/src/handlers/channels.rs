//! Channel handlers
//!
//! Endpoints for channel management and channel message history.

use axum::{extract::State, Json};
use dreams_core::ChannelId;
use dreams_service::dto::{
    ChannelDetailsResponse, ChannelIdResponse, ChannelListResponse, CreateChannelRequest,
    EmptyResponse, InviteRequest, MessageIdResponse, MessagesPage, SendLaterRequest,
    SendMessageRequest,
};
use dreams_service::{ChannelService, MessageService};

use crate::extractors::{IdPath, PageStart, SessionToken, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a channel; the creator becomes its owner
///
/// POST /channels
pub async fn create_channel(
    State(state): State<AppState>,
    token: SessionToken,
    ValidatedJson(request): ValidatedJson<CreateChannelRequest>,
) -> ApiResult<Created<Json<ChannelIdResponse>>> {
    let service = ChannelService::new(state.service_context());
    let response = service.create(token.as_str(), request).await?;
    Ok(Created(Json(response)))
}

/// Channels the caller belongs to
///
/// GET /channels
pub async fn list_channels(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<ChannelListResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.list(token.as_str()).await?;
    Ok(Json(response))
}

/// Every channel in the workspace, public or private
///
/// GET /channels/all
pub async fn list_all_channels(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<ChannelListResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.list_all(token.as_str()).await?;
    Ok(Json(response))
}

/// GET /channels/{channel_id}
pub async fn get_channel(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<ChannelDetailsResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.details(token.as_str(), channel_id).await?;
    Ok(Json(response))
}

/// POST /channels/{channel_id}/join
pub async fn join_channel(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.join(token.as_str(), channel_id).await?;
    Ok(Json(response))
}

/// POST /channels/{channel_id}/invite
pub async fn invite_to_channel(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<InviteRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service
        .invite(token.as_str(), channel_id, request.u_id)
        .await?;
    Ok(Json(response))
}

/// POST /channels/{channel_id}/leave
pub async fn leave_channel(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service.leave(token.as_str(), channel_id).await?;
    Ok(Json(response))
}

/// Page of channel history, newest first
///
/// GET /channels/{channel_id}/messages?start=0
pub async fn get_channel_messages(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    PageStart(start): PageStart,
) -> ApiResult<Json<MessagesPage>> {
    let service = ChannelService::new(state.service_context());
    let response = service.messages(token.as_str(), channel_id, start).await?;
    Ok(Json(response))
}

/// POST /channels/{channel_id}/messages
pub async fn send_channel_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageIdResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .send(token.as_str(), channel_id, &request.message)
        .await?;
    Ok(Created(Json(response)))
}

/// Schedule a channel message for `time_sent`
///
/// POST /channels/{channel_id}/messages/later
pub async fn send_channel_message_later(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(channel_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<SendLaterRequest>,
) -> ApiResult<Created<Json<MessageIdResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .send_later(token.as_str(), channel_id, &request.message, request.time_sent)
        .await?;
    Ok(Created(Json(response)))
}
