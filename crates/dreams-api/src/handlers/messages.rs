//! Message handlers
//!
//! Messages are addressed by their workspace-wide id, so these routes work
//! the same for channel and DM messages.

use axum::{extract::State, Json};
use dreams_core::MessageId;
use dreams_service::dto::{
    EditMessageRequest, EmptyResponse, ReactRequest, SearchResponse, ShareMessageRequest,
    SharedMessageResponse,
};
use dreams_service::MessageService;

use crate::extractors::{IdPath, SearchText, SessionToken, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Edit message text; an empty message removes it
///
/// PUT /messages/{message_id}
pub async fn edit_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<EditMessageRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .edit(token.as_str(), message_id, &request.message)
        .await?;
    Ok(Json(response))
}

/// DELETE /messages/{message_id}
pub async fn remove_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.remove(token.as_str(), message_id).await?;
    Ok(Json(response))
}

/// POST /messages/{message_id}/pin
pub async fn pin_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.pin(token.as_str(), message_id).await?;
    Ok(Json(response))
}

/// POST /messages/{message_id}/unpin
pub async fn unpin_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.unpin(token.as_str(), message_id).await?;
    Ok(Json(response))
}

/// POST /messages/{message_id}/react
pub async fn react_to_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .react(token.as_str(), message_id, request.react_id)
        .await?;
    Ok(Json(response))
}

/// POST /messages/{message_id}/unreact
pub async fn unreact_to_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .unreact(token.as_str(), message_id, request.react_id)
        .await?;
    Ok(Json(response))
}

/// Share a message into a channel or DM
///
/// POST /messages/{message_id}/share
pub async fn share_message(
    State(state): State<AppState>,
    token: SessionToken,
    IdPath(message_id): IdPath<MessageId>,
    ValidatedJson(request): ValidatedJson<ShareMessageRequest>,
) -> ApiResult<Created<Json<SharedMessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .share(
            token.as_str(),
            message_id,
            &request.message,
            request.channel_id,
            request.dm_id,
        )
        .await?;
    Ok(Created(Json(response)))
}

/// GET /search?query_str=...
pub async fn search_messages(
    State(state): State<AppState>,
    token: SessionToken,
    SearchText(query): SearchText,
) -> ApiResult<Json<SearchResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.search(token.as_str(), &query).await?;
    Ok(Json(response))
}
