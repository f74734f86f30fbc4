//! Time-of-day windows and the calendar-day anchor.
//!
//! # Design
//!
//! Commute times are drawn as fractional *hours after midnight* and then
//! anchored to one calendar day to become Unix timestamps:
//!
//!   unix_secs = day.midnight_unix_secs + round(hours * 3600)
//!
//! Keeping the day anchor as an explicit value (rather than reading the
//! clock deep inside the sampler) is what lets tests and replayed runs pin
//! the output timestamps.

use std::fmt;

use chrono::{Local, TimeZone};

use crate::{CoreError, CoreResult};

pub const SECS_PER_HOUR: f64 = 3_600.0;

// ── TimeWindow ────────────────────────────────────────────────────────────────

/// A window of the day, in hours after midnight (e.g. `6.0..9.0`).
///
/// Only the midpoint is used for sampling: draws are normal around
/// [`center`](Self::center), so some land outside the window.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start_hour: f64,
    pub end_hour:   f64,
}

impl TimeWindow {
    /// Morning departure window, 06:00–09:00.
    pub const MORNING: TimeWindow = TimeWindow { start_hour: 6.0, end_hour: 9.0 };
    /// Evening return window: 17:00–20:00.
    pub const EVENING: TimeWindow = TimeWindow { start_hour: 17.0, end_hour: 20.0 };

    /// Construct and validate a window.
    pub fn new(start_hour: f64, end_hour: f64) -> CoreResult<Self> {
        let w = Self { start_hour, end_hour };
        w.validate()?;
        Ok(w)
    }

    /// Reject non-finite bounds, reversed windows and windows outside one day.
    pub fn validate(&self) -> CoreResult<()> {
        let err = |reason| CoreError::InvalidTimeWindow {
            start_hour: self.start_hour,
            end_hour:   self.end_hour,
            reason,
        };
        if !self.start_hour.is_finite() || !self.end_hour.is_finite() {
            return Err(err("bounds must be finite"));
        }
        if self.start_hour > self.end_hour {
            return Err(err("start is after end"));
        }
        if self.start_hour < 0.0 || self.end_hour > 24.0 {
            return Err(err("bounds must lie within 0..=24"));
        }
        Ok(())
    }

    /// Midpoint of the window in hours.
    #[inline]
    pub fn center(&self) -> f64 {
        (self.start_hour + self.end_hour) / 2.0
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}h - {:.2}h]", self.start_hour, self.end_hour)
    }
}

// ── DayAnchor ─────────────────────────────────────────────────────────────────

/// Unix timestamp of the midnight all sampled hour offsets are added to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayAnchor {
    pub midnight_unix_secs: i64,
}

impl DayAnchor {
    pub fn new(midnight_unix_secs: i64) -> Self {
        Self { midnight_unix_secs }
    }

    /// Local midnight of the current calendar day.
    pub fn today_local() -> CoreResult<Self> {
        let midnight = Local::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::InvalidDayAnchor("no 00:00 on today's date".into()))?;
        // DST transitions can make local midnight ambiguous; take the first.
        let local = Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| CoreError::InvalidDayAnchor("local midnight does not exist".into()))?;
        Ok(Self::new(local.timestamp()))
    }

    /// Unix seconds for `hours` after this midnight, rounded to the nearest
    /// whole second.  Negative or >24 offsets spill into the neighbouring days.
    #[inline]
    pub fn at_hours(&self, hours: f64) -> i64 {
        self.midnight_unix_secs + (hours * SECS_PER_HOUR).round() as i64
    }
}
