//! Message history paging
//!
//! History is paged by offset from the newest message: `?start=0` is the
//! newest page, `?start=50` the one before it.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use dreams_service::dto::MessagesQuery;

use crate::response::ApiError;

/// Offset into a message history; defaults to 0
#[derive(Debug, Clone, Copy, Default)]
pub struct PageStart(pub usize);

#[async_trait]
impl<S> FromRequestParts<S> for PageStart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<MessagesQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(PageStart(query.start))
    }
}
