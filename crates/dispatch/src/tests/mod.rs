// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod sweep_tests;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::sync::Mutex as StdMutex;
use whatsping_domain::{
    Category, Commitment, CommitmentStatus, FiredThresholds, RecurrenceRule,
};
use whatsping_gateway::{GatewayError, MessagingGateway};
use whatsping_persistence::Persistence;

pub const TZ: Tz = chrono_tz::America::Sao_Paulo;

/// In-memory gateway double recording every send and failing on demand.
pub struct MockGateway {
    pub sent: StdMutex<Vec<(String, String)>>,
    pub failing_addresses: StdMutex<HashSet<String>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            sent: StdMutex::new(Vec::new()),
            failing_addresses: StdMutex::new(HashSet::new()),
        }
    }

    pub fn fail_address(&self, address: &str) {
        self.failing_addresses
            .lock()
            .unwrap()
            .insert(address.to_string());
    }

    pub fn clear_failures(&self) {
        self.failing_addresses.lock().unwrap().clear();
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagingGateway for MockGateway {
    async fn send_text(&self, address: &str, body: &str) -> Result<(), GatewayError> {
        let failing: bool = self.failing_addresses.lock().unwrap().contains(address);
        if failing {
            return Err(GatewayError::SendFailed {
                status: 503,
                body: String::from("mock outage"),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((address.to_string(), body.to_string()));
        Ok(())
    }
}

/// A pending commitment with only the minutes threshold enabled.
pub fn create_test_commitment(profile_id: i64) -> Commitment {
    Commitment {
        commitment_id: None,
        profile_id,
        parent_commitment_id: None,
        category: Category::Medico,
        title: String::from("Consulta"),
        description: None,
        commitment_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        commitment_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        location: None,
        provider_name: None,
        remind_days_before: 0,
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

/// A "now" that is `minutes_before` minutes ahead of the commitment's
/// scheduled local time.
pub fn now_at_diff(commitment: &Commitment, minutes_before: i64) -> DateTime<Tz> {
    let local = commitment
        .commitment_date
        .and_time(commitment.commitment_time);
    TZ.from_local_datetime(&local).unwrap() - Duration::minutes(minutes_before)
}

/// Fresh in-memory store with one profile that has a usable number.
pub fn setup_store_with_profile() -> (Persistence, i64) {
    let mut store: Persistence = Persistence::new_in_memory().unwrap();
    let profile_id: i64 = store
        .create_profile("Maria", Some("+55 11 91234-5678"))
        .unwrap();
    (store, profile_id)
}
