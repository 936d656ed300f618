//! # dreams-core
//!
//! Domain layer containing the workspace document, its entities, id value objects,
//! and the document store trait. This crate has zero dependencies on infrastructure
//! (file system, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, Document, GlobalRole, Message, React, Standup, StandupDigest, StatPoint, StatSeries,
    User, WorkspaceStats, MAX_MESSAGE_LENGTH, REACT_THUMBS_UP,
};
pub use error::{DomainError, ErrorKind};
pub use traits::{DocumentStore, RepoResult};
pub use value_objects::{unix_now, ChannelId, IdParseError, MessageId, UserId};
