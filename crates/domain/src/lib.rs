// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod message;
mod recurrence;
mod reminder_window;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use message::render_message;
pub use recurrence::{RECURRENCE_HORIZON_MONTHS, expand_occurrences};
pub use reminder_window::{ONTIME_GRACE_MINUTES, WindowState, evaluate_window};
pub use types::{
    Category, Commitment, CommitmentStatus, FiredThresholds, Recipient, RecurrenceRule,
    ReminderThreshold, ThresholdKind,
};
pub use validation::validate_commitment_fields;
