//! Usage statistics bookkeeping
//!
//! Series only grow when a value actually changes, so calling these after
//! every mutation is safe.

use dreams_core::{Document, UserId};

/// Recompute `channels_joined` and `dms_joined` for every user, and
/// `channels_exist` and `dms_exist` for the workspace
pub fn refresh_membership(document: &mut Document, now: i64) {
    let counts: Vec<(UserId, usize, usize)> = document
        .users
        .iter()
        .map(|u| {
            let (channels, dms) = document.memberships_of(u.u_id);
            (u.u_id, channels, dms)
        })
        .collect();

    for (user_id, channels, dms) in counts {
        if let Some(user) = document.user_mut(user_id) {
            user.channels_joined.record(channels, now);
            user.dms_joined.record(dms, now);
        }
    }

    let (channels, dms) = document.channel_counts();
    document.stats.channels_exist.record(channels, now);
    document.stats.dms_exist.record(dms, now);
}

/// Record the number of messages currently present in the workspace
pub fn refresh_messages(document: &mut Document, now: i64) {
    let total = document.message_count();
    document.stats.messages_exist.record(total, now);
}

/// Share of the workspace the user takes part in, between 0 and 1
pub fn involvement_rate(document: &Document, user_id: UserId) -> f64 {
    let Some(user) = document.user(user_id) else {
        return 0.0;
    };
    let involved = user.channels_joined.current()
        + user.dms_joined.current()
        + user.messages_sent.current();

    let (channels, dms) = document.channel_counts();
    let total = channels + dms + document.stats.messages_exist.current();

    if total == 0 {
        0.0
    } else {
        (involved as f64 / total as f64).min(1.0)
    }
}

/// Share of users in at least one channel or DM
pub fn utilization_rate(document: &Document) -> f64 {
    let users = document.active_users().count();
    if users == 0 {
        return 0.0;
    }
    let involved = document
        .active_users()
        .filter(|u| document.memberships_of(u.u_id) != (0, 0))
        .count();
    involved as f64 / users as f64
}
