// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::RecurrenceRule;
use chrono::{Duration, Months, NaiveDate};

/// Default expansion horizon when a series has no end date.
pub const RECURRENCE_HORIZON_MONTHS: u32 = 3;

/// Expands a seed date into its future occurrence dates.
///
/// The seed's own date is never included. When `end_date` is absent the
/// series is capped at the seed date plus three months so indefinite
/// rules stay bounded. Monthly advancement preserves the day of month
/// when the target month is long enough and clamps to the month's last
/// day otherwise.
///
/// # Arguments
///
/// * `seed_date` - The date of the seed commitment
/// * `rule` - The repetition rule
/// * `end_date` - Optional inclusive end of the series
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if date advancement
/// leaves the representable calendar range.
pub fn expand_occurrences(
    seed_date: NaiveDate,
    rule: RecurrenceRule,
    end_date: Option<NaiveDate>,
) -> Result<Vec<NaiveDate>, DomainError> {
    if rule == RecurrenceRule::None {
        return Ok(Vec::new());
    }

    let horizon: NaiveDate = match end_date {
        Some(end) => end,
        None => seed_date
            .checked_add_months(Months::new(RECURRENCE_HORIZON_MONTHS))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: "recurrence horizon".to_string(),
            })?,
    };

    let mut occurrences: Vec<NaiveDate> = Vec::new();
    let mut current: NaiveDate = seed_date;
    let mut step: u32 = 1;

    loop {
        let next: Option<NaiveDate> = match rule {
            RecurrenceRule::None => None,
            RecurrenceRule::Daily => current.checked_add_signed(Duration::days(1)),
            RecurrenceRule::Weekly => current.checked_add_signed(Duration::days(7)),
            RecurrenceRule::Biweekly => current.checked_add_signed(Duration::days(14)),
            // Monthly advances from the seed each time so a short month
            // does not permanently clamp the day for the rest of the series.
            RecurrenceRule::Monthly => seed_date.checked_add_months(Months::new(step)),
        };

        let next: NaiveDate = next.ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("{rule} recurrence advancement"),
        })?;

        if next > horizon {
            break;
        }

        occurrences.push(next);
        current = next;
        step += 1;
    }

    Ok(occurrences)
}
