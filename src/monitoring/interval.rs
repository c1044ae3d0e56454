//! Time window construction

use chrono::{DateTime, Duration, Utc};

/// How far back from "now" the window reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lookback {
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub seconds: u64,
}

impl Lookback {
    /// Lookback of a number of seconds
    pub fn seconds(seconds: u64) -> Self {
        Self {
            seconds,
            ..Self::default()
        }
    }

    /// Total length in whole seconds (saturating)
    pub fn total_seconds(&self) -> i64 {
        let from_units = i64::from(self.weeks) * 7 * 86_400
            + i64::from(self.days) * 86_400
            + i64::from(self.hours) * 3_600;
        let seconds = i64::try_from(self.seconds).unwrap_or(i64::MAX);
        from_units.saturating_add(seconds)
    }

    /// Length as a duration (clamped to the largest representable one)
    pub fn to_duration(&self) -> Duration {
        Duration::try_seconds(self.total_seconds()).unwrap_or(Duration::MAX)
    }
}

/// Closed-open time window `[start_time, end_time)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl TimeInterval {
    /// Window of `lookback` length ending at the current wall-clock time
    pub fn ending_now(lookback: &Lookback) -> Self {
        Self::ending_at(Utc::now(), lookback)
    }

    /// Window of `lookback` length ending at `end_time`
    ///
    /// Both bounds keep the sub-second part of `end_time`.
    pub fn ending_at(end_time: DateTime<Utc>, lookback: &Lookback) -> Self {
        let start_time = end_time
            .checked_sub_signed(lookback.to_duration())
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            start_time,
            end_time,
        }
    }

    /// Length of the window
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}
