//! Value objects - immutable types that represent domain concepts

mod ids;

pub use ids::{ChannelId, IdParseError, MessageId, UserId};

/// Current wall-clock time as Unix epoch seconds
#[inline]
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
