// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod commitment_tests;
mod notification_log_tests;

use crate::Persistence;
use chrono::{NaiveDate, NaiveTime};
use whatsping_domain::{
    Category, Commitment, CommitmentStatus, FiredThresholds, RecurrenceRule,
};

/// Builds a pending commitment owned by `profile_id` for insert tests.
pub fn create_test_commitment(profile_id: i64) -> Commitment {
    Commitment {
        commitment_id: None,
        profile_id,
        parent_commitment_id: None,
        category: Category::Dentista,
        title: String::from("Limpeza"),
        description: None,
        commitment_date: NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        commitment_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        location: Some(String::from("Consultório 12")),
        provider_name: None,
        remind_days_before: 1,
        remind_hours_before: 0,
        remind_minutes_before: 30,
        notify_contact_ids: Vec::new(),
        custom_message: None,
        recurrence: RecurrenceRule::None,
        recurrence_end_date: None,
        status: CommitmentStatus::Pending,
        fired: FiredThresholds::empty(),
    }
}

/// Fresh in-memory store plus one profile, the baseline for most tests.
pub fn setup_store_with_profile() -> (Persistence, i64) {
    let mut store: Persistence = Persistence::new_in_memory().unwrap();
    let profile_id: i64 = store
        .create_profile("Maria", Some("+55 11 91234-5678"))
        .unwrap();
    (store, profile_id)
}
