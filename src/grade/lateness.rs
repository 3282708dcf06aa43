#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::io::BufRead;

use bon::Builder;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{constants::DEFAULT_GRACE_MINUTES, error::MergeError, parsers::parser};

/// Overdue bucket for a submission that counts as on time.
pub const ON_TIME: i64 = -1;

/// How late submissions are bucketed into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCounting {
    /// Count civil midnights crossed between the deadline and the submission.
    #[default]
    CalendarDate,
    /// Count whole 24 hour periods elapsed since the deadline.
    Elapsed,
}

/// Deadline and penalty settings for one assignment.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct LatePolicy {
    /// Submission deadline, in the same local time as the timestamps.
    deadline:      NaiveDateTime,
    /// Points the assignment is out of; penalties are fractions of this.
    full_grade:    f64,
    /// Minutes after the deadline that still count as on time.
    #[builder(default = DEFAULT_GRACE_MINUTES)]
    grace_minutes: i64,
    /// How days late are counted once past the grace period.
    #[builder(default)]
    day_counting:  DayCounting,
}

impl LatePolicy {
    /// Creates a policy with the default grace period and calendar-date
    /// counting.
    pub fn new(deadline: NaiveDateTime, full_grade: f64) -> Self {
        Self::builder()
            .deadline(deadline)
            .full_grade(full_grade)
            .build()
    }

    /// Submission deadline.
    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    /// Points the assignment is out of.
    pub fn full_grade(&self) -> f64 {
        self.full_grade
    }

    /// Grace period in minutes.
    pub fn grace_minutes(&self) -> i64 {
        self.grace_minutes
    }

    /// Day counting mode.
    pub fn day_counting(&self) -> DayCounting {
        self.day_counting
    }

    /// Returns the overdue bucket for a submission: [`ON_TIME`] if it arrived
    /// before the grace period ended, otherwise the number of days late plus
    /// one.
    pub fn overdue_days(&self, submitted_at: NaiveDateTime) -> i64 {
        if submitted_at < self.deadline + TimeDelta::minutes(self.grace_minutes) {
            return ON_TIME;
        }

        let days = match self.day_counting {
            DayCounting::CalendarDate => submitted_at
                .date()
                .signed_duration_since(self.deadline.date())
                .num_days(),
            DayCounting::Elapsed => submitted_at
                .signed_duration_since(self.deadline)
                .num_days(),
        };

        days + 1
    }

    /// Points deducted for the given overdue bucket.
    pub fn penalty(&self, days: i64) -> f64 {
        penalty(days, self.full_grade)
    }
}

/// The late penalty schedule: 4% of `full_grade` for one or two days, 8% for
/// three, 16% for four, and nothing otherwise (on time, or five days and more).
pub fn penalty(days: i64, full_grade: f64) -> f64 {
    match days {
        1 | 2 => full_grade * 0.04,
        3 => full_grade * 0.08,
        4 => full_grade * 0.16,
        _ => 0.0,
    }
}

/// Parses a `YYYYMMDDHHMMSSmmm` timestamp.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, MergeError> {
    parser::timestamp(text).map_err(|_| MergeError::Timestamp {
        value: text.trim().to_string(),
    })
}

/// Reads the submission time from the first line of a timestamp stream.
pub fn read_submission_time(mut reader: impl BufRead) -> Result<NaiveDateTime, MergeError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_timestamp(&line)
}
