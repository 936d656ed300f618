//! Usage time series - append-on-change `(count, time_stamp)` points

use serde::{Deserialize, Serialize};

/// A single sample in a usage series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPoint {
    pub count: usize,
    pub time_stamp: i64,
}

/// Append-only series whose last point is the current value
///
/// A point is only appended when the count actually changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatSeries(Vec<StatPoint>);

impl StatSeries {
    /// Series seeded with a zero point at `now`
    #[must_use]
    pub fn starting_at(now: i64) -> Self {
        Self(vec![StatPoint {
            count: 0,
            time_stamp: now,
        }])
    }

    /// Current value (zero for an empty series)
    #[inline]
    pub fn current(&self) -> usize {
        self.0.last().map_or(0, |point| point.count)
    }

    /// Record `count` at `now`; returns whether a point was appended
    pub fn record(&mut self, count: usize, now: i64) -> bool {
        if !self.0.is_empty() && self.current() == count {
            return false;
        }
        self.0.push(StatPoint {
            count,
            time_stamp: now,
        });
        true
    }

    /// Increment the current value by one at `now`
    pub fn increment(&mut self, now: i64) {
        let next = self.current() + 1;
        self.record(next, now);
    }

    pub fn points(&self) -> &[StatPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Document-level workspace counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceStats {
    pub channels_exist: StatSeries,
    pub dms_exist: StatSeries,
    pub messages_exist: StatSeries,
}

impl WorkspaceStats {
    #[must_use]
    pub fn starting_at(now: i64) -> Self {
        Self {
            channels_exist: StatSeries::starting_at(now),
            dms_exist: StatSeries::starting_at(now),
            messages_exist: StatSeries::starting_at(now),
        }
    }
}
