//! Time handling for games, timeslots and jobs
//!
//! Schedules are built in the job's local wall-clock time, so games and
//! timeslots carry `NaiveDateTime` values. A job's [`Timezone`] turns a
//! UTC instant into that local time, e.g. to decide which calendar day a
//! request falls on.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid window: start {start} must be before end {end}")]
    InvalidWindow {
        start: String,
        end: String,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// A half-open span of local time `[start, end)`
///
/// Used for game windows and field availability. Two windows that merely
/// touch (one ends exactly when the next starts) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TemporalError> {
        if start >= end {
            return Err(TemporalError::InvalidWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a window that starts at `start` and lasts `minutes`
    pub fn from_duration(start: NaiveDateTime, minutes: u32) -> Result<Self, TemporalError> {
        Self::new(start, start + Duration::minutes(i64::from(minutes)))
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Signed minutes from the end of this window to the start of `other`
    ///
    /// Negative when `other` starts before this window ends.
    pub fn gap_minutes_to(&self, other: &TimeWindow) -> i64 {
        (other.start - self.end).num_minutes()
    }

    /// Minutes of rest between two windows regardless of their order,
    /// or `None` when they overlap
    pub fn rest_between(&self, other: &TimeWindow) -> Option<i64> {
        if self.overlaps(other) {
            return None;
        }
        Some(if self.end <= other.start {
            self.gap_minutes_to(other)
        } else {
            other.gap_minutes_to(self)
        })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Calendar date the window starts on
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Timezone a job's events take place in
///
/// Wraps chrono_tz::Tz and serializes as the IANA name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name such as `America/New_York`
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(name.to_string()))
    }

    /// Converts a UTC instant to the job's wall-clock time
    pub fn to_local(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.0).naive_local()
    }

    /// Calendar date in this timezone at a UTC instant
    pub fn date_at(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::America::New_York)
    }
}
