// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveDate;

/// Errors that can occur during domain validation and evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Commitment title is empty or invalid.
    InvalidTitle(String),
    /// Category string is not one of the known values.
    InvalidCategory(String),
    /// Status string is not one of the known values.
    InvalidStatus(String),
    /// Recurrence rule string is not one of the known values.
    InvalidRecurrence(String),
    /// Threshold kind string is not one of the known values.
    InvalidThresholdKind(String),
    /// Recurrence end date precedes the commitment date.
    InvalidRecurrenceEndDate {
        /// The commitment (seed) date.
        commitment_date: NaiveDate,
        /// The offending end date.
        end_date: NaiveDate,
    },
    /// The commitment's wall-clock time could not be resolved in the
    /// configured timezone (DST gap or ambiguity).
    UnresolvableLocalTime {
        /// The commitment date.
        date: NaiveDate,
        /// The declared timezone name.
        timezone: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date or time from a string.
    DateParseError {
        /// The invalid date/time string.
        value: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidCategory(msg) => write!(f, "Invalid category: {msg}"),
            Self::InvalidStatus(msg) => write!(f, "Invalid status: {msg}"),
            Self::InvalidRecurrence(msg) => write!(f, "Invalid recurrence rule: {msg}"),
            Self::InvalidThresholdKind(msg) => write!(f, "Invalid threshold kind: {msg}"),
            Self::InvalidRecurrenceEndDate {
                commitment_date,
                end_date,
            } => {
                write!(
                    f,
                    "Recurrence end date {end_date} precedes commitment date {commitment_date}"
                )
            }
            Self::UnresolvableLocalTime { date, timezone } => {
                write!(
                    f,
                    "Could not resolve local time on {date} in timezone {timezone} (ambiguous or non-existent due to DST)"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { value, error } => {
                write!(f, "Failed to parse date/time '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
