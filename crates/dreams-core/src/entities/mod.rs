//! Domain entities - the workspace document and the records it owns

mod channel;
mod document;
mod message;
mod standup;
mod stats;
mod user;

pub use channel::Channel;
pub use document::Document;
pub use message::{Message, React, MAX_MESSAGE_LENGTH, REACT_THUMBS_UP};
pub use standup::{Standup, StandupDigest};
pub use stats::{StatPoint, StatSeries, WorkspaceStats};
pub use user::{GlobalRole, User};
