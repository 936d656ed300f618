//! Axum extractors for request handling
//!
//! Custom extractors for the session token, validated bodies, id path
//! segments, message paging, and search text.

mod auth;
mod pagination;
mod path;
mod search;
mod validated;

pub use auth::SessionToken;
pub use pagination::PageStart;
pub use path::IdPath;
pub use search::SearchText;
pub use validated::ValidatedJson;
