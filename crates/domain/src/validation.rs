// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Commitment, RecurrenceRule};

/// Validates that a commitment's basic field constraints are met.
///
/// This function checks local field invariants only. It does NOT verify
/// that the referenced profile or delegated contacts exist (that
/// requires storage context).
///
/// # Arguments
///
/// * `commitment` - The commitment to validate
///
/// # Returns
///
/// * `Ok(())` if the commitment's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or whitespace-only
/// - A recurrence end date is set without a recurrence rule
/// - The recurrence end date is not after the commitment date
pub fn validate_commitment_fields(commitment: &Commitment) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if commitment.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: an end date only makes sense on a repeating series
    if let Some(end_date) = commitment.recurrence_end_date {
        if commitment.recurrence == RecurrenceRule::None {
            return Err(DomainError::InvalidRecurrence(String::from(
                "Recurrence end date requires a recurrence rule",
            )));
        }

        // Rule: the series must end after it starts
        if end_date <= commitment.commitment_date {
            return Err(DomainError::InvalidRecurrenceEndDate {
                commitment_date: commitment.commitment_date,
                end_date,
            });
        }
    }

    Ok(())
}
