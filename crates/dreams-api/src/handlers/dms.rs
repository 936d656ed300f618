//! DM handlers

use axum::{extract::State, Json};
use dreams_core::ChannelId;
use dreams_service::dto::{
    CreateDmRequest, DmCreateResponse, DmDetailsResponse, DmListResponse, EmptyResponse,
    MessageIdResponse, MessagesPage, SendLaterRequest, SendMessageRequest,
};
use dreams_service::{DmService, MessageService};

use crate::extractors::{IdPath, PageStart, SessionToken, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /dms
pub async fn create_dm(
    State(state): State<AppState>,
    token: SessionToken,
    ValidatedJson(request): ValidatedJson<CreateDmRequest>,
) -> ApiResult<Created<Json<DmCreateResponse>>> {
    let service = DmService::new(state.service_context());
    let response = service.create(token.as_str(), request).await?;
    Ok(Created(Json(response)))
}

/// GET /dms
pub async fn list_dms(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<DmListResponse>> {
    let service = DmService::new(state.service_context());
    let response = service.list(token.as_str()).await?;
    Ok(Json(response))
}

/// GET /dms/{dm_id}
pub async fn get_dm(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(dm_id): IdPath<ChannelId>,
) -> ApiResult<Json<DmDetailsResponse>> {
    let service = DmService::new(state.service_context());
    let response = service.details(token.as_str(), dm_id).await?;
    Ok(Json(response))
}

/// POST /dms/{dm_id}/leave
pub async fn leave_dm(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(dm_id): IdPath<ChannelId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = DmService::new(state.service_context());
    let response = service.leave(token.as_str(), dm_id).await?;
    Ok(Json(response))
}

/// GET /dms/{dm_id}/messages?start=0
pub async fn get_dm_messages(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(dm_id): IdPath<ChannelId>,
    PageStart(start): PageStart,
) -> ApiResult<Json<MessagesPage>> {
    let service = DmService::new(state.service_context());
    let response = service.messages(token.as_str(), dm_id, start).await?;
    Ok(Json(response))
}

/// POST /dms/{dm_id}/messages
pub async fn send_dm_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(dm_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageIdResponse>>> {
    let service = DmService::new(state.service_context());
    let response = service
        .send(token.as_str(), dm_id, &request.message)
        .await?;
    Ok(Created(Json(response)))
}

/// Schedule a DM message for `time_sent`
///
/// POST /dms/{dm_id}/messages/later
pub async fn send_dm_message_later(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(dm_id): IdPath<ChannelId>,
    ValidatedJson(request): ValidatedJson<SendLaterRequest>,
) -> ApiResult<Created<Json<MessageIdResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .send_later_dm(token.as_str(), dm_id, &request.message, request.time_sent)
        .await?;
    Ok(Created(Json(response)))
}
