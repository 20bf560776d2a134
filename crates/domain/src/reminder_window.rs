// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Commitment, CommitmentStatus, ReminderThreshold, ThresholdKind};
use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

/// Minutes past the scheduled time during which the on-time reminder may
/// still fire. Beyond this the commitment is expired for reminder purposes.
pub const ONTIME_GRACE_MINUTES: i64 = 5;

/// The decision for one commitment on one sweep, re-derived every pass and
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowState {
    /// No threshold window contains the current time distance.
    NotDue,
    /// One of the "before" thresholds should fire, with its display label.
    DueBefore(ReminderThreshold),
    /// The scheduled time has arrived (within the grace window).
    DueOnTime,
    /// The grace window has closed; nothing will ever fire again.
    Expired,
    /// The on-time window is current but its flag is already set.
    AlreadyFired,
}

/// Decides which reminder threshold, if any, is due for `commitment` at
/// `now`.
///
/// The commitment's civil date and time are interpreted in `now`'s
/// timezone. Thresholds are assigned half-open firing windows
/// `(next_smaller, this]` over the enabled-and-unfired set, with a floor
/// of zero, so at most one "before" threshold can fire on any sweep no
/// matter how many are simultaneously overdue. The on-time threshold
/// fires only inside the grace window `(-5, 0]` minutes.
///
/// # Arguments
///
/// * `commitment` - The commitment under evaluation
/// * `now` - The current timezone-aware instant
///
/// # Errors
///
/// Returns `DomainError::UnresolvableLocalTime` when the commitment's
/// civil date/time does not exist or is ambiguous in the timezone (DST
/// transitions).
pub fn evaluate_window(commitment: &Commitment, now: &DateTime<Tz>) -> Result<WindowState, DomainError> {
    if commitment.status != CommitmentStatus::Pending {
        return Ok(WindowState::NotDue);
    }

    let local: NaiveDateTime = commitment.commitment_date.and_time(commitment.commitment_time);
    let Some(event) = local.and_local_timezone(now.timezone()).single() else {
        return Err(DomainError::UnresolvableLocalTime {
            date: commitment.commitment_date,
            timezone: now.timezone().name().to_string(),
        });
    };

    let diff_minutes: i64 = event.signed_duration_since(now).num_minutes();

    if diff_minutes < -ONTIME_GRACE_MINUTES {
        return Ok(WindowState::Expired);
    }

    let thresholds: Vec<ReminderThreshold> = commitment.pending_before_thresholds();
    for (index, threshold) in thresholds.iter().enumerate() {
        let floor: i64 = thresholds
            .get(index + 1)
            .map_or(0, |next| next.minutes_before);
        if diff_minutes <= threshold.minutes_before && diff_minutes > floor {
            return Ok(WindowState::DueBefore(threshold.clone()));
        }
    }

    if diff_minutes <= 0 {
        if commitment.fired.contains(ThresholdKind::OnTime) {
            return Ok(WindowState::AlreadyFired);
        }
        return Ok(WindowState::DueOnTime);
    }

    Ok(WindowState::NotDue)
}
