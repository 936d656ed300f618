//! Search query string
//!
//! `?query_str=...`; length rules are enforced by the message service.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use dreams_service::dto::SearchQuery;

use crate::response::ApiError;

/// Text to search for
#[derive(Debug, Clone)]
pub struct SearchText(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SearchText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<SearchQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(SearchText(query.query_str))
    }
}
