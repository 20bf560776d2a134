// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_commitment, setup_store_with_profile};
use crate::PersistenceError;
use chrono::NaiveDate;
use whatsping_domain::{Category, Commitment, CommitmentStatus, RecurrenceRule, ThresholdKind};

#[test]
fn test_insert_and_get_commitment_round_trip() {
    let (mut store, profile_id) = setup_store_with_profile();
    let mut commitment: Commitment = create_test_commitment(profile_id);
    commitment.notify_contact_ids = vec![3, 7];
    commitment.custom_message = Some(String::from("Oi {nome}, não esqueça {titulo}"));

    let commitment_id: i64 = store.insert_commitment(&commitment).unwrap();
    let loaded: Commitment = store.get_commitment(commitment_id).unwrap();

    assert_eq!(loaded.commitment_id, Some(commitment_id));
    assert_eq!(loaded.profile_id, profile_id);
    assert_eq!(loaded.category, Category::Dentista);
    assert_eq!(loaded.title, commitment.title);
    assert_eq!(loaded.commitment_date, commitment.commitment_date);
    assert_eq!(loaded.commitment_time, commitment.commitment_time);
    assert_eq!(loaded.notify_contact_ids, vec![3, 7]);
    assert_eq!(loaded.custom_message, commitment.custom_message);
    assert_eq!(loaded.status, CommitmentStatus::Pending);
    assert!(!loaded.fired.days);
}

#[test]
fn test_get_missing_commitment_fails() {
    let (mut store, _profile_id) = setup_store_with_profile();

    let result: Result<Commitment, PersistenceError> = store.get_commitment(42);
    assert_eq!(result, Err(PersistenceError::CommitmentNotFound(42)));
}

#[test]
fn test_list_pending_excludes_done_commitments() {
    let (mut store, profile_id) = setup_store_with_profile();

    let pending_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();
    let done_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();
    store.mark_commitment_done(done_id).unwrap();

    let pending: Vec<Commitment> = store.list_pending_commitments().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].commitment_id, Some(pending_id));
}

#[test]
fn test_set_notified_flag_is_persisted_per_kind() {
    let (mut store, profile_id) = setup_store_with_profile();
    let commitment_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();

    store
        .set_notified_flag(commitment_id, ThresholdKind::Minutes)
        .unwrap();

    let loaded: Commitment = store.get_commitment(commitment_id).unwrap();
    assert!(loaded.fired.minutes);
    assert!(!loaded.fired.days);
    assert!(!loaded.fired.hours);
    assert!(!loaded.fired.ontime);
}

#[test]
fn test_set_notified_flag_on_missing_commitment_fails() {
    let (mut store, _profile_id) = setup_store_with_profile();

    let result: Result<(), PersistenceError> =
        store.set_notified_flag(42, ThresholdKind::OnTime);
    assert_eq!(result, Err(PersistenceError::CommitmentNotFound(42)));
}

#[test]
fn test_recurrence_fields_round_trip() {
    let (mut store, profile_id) = setup_store_with_profile();
    let mut seed: Commitment = create_test_commitment(profile_id);
    seed.recurrence = RecurrenceRule::Weekly;
    seed.recurrence_end_date = NaiveDate::from_ymd_opt(2026, 12, 1);

    let seed_id: i64 = store.insert_commitment(&seed).unwrap();
    let loaded: Commitment = store.get_commitment(seed_id).unwrap();

    assert_eq!(loaded.recurrence, RecurrenceRule::Weekly);
    assert_eq!(loaded.recurrence_end_date, seed.recurrence_end_date);
}

#[test]
fn test_delete_seed_cascades_to_children() {
    let (mut store, profile_id) = setup_store_with_profile();
    let seed: Commitment = create_test_commitment(profile_id);
    let seed_id: i64 = store.insert_commitment(&seed).unwrap();

    let child: Commitment =
        seed.child_occurrence(NaiveDate::from_ymd_opt(2026, 10, 9).unwrap(), seed_id);
    let child_id: i64 = store.insert_commitment(&child).unwrap();

    store.delete_commitment(seed_id).unwrap();

    assert_eq!(
        store.get_commitment(child_id),
        Err(PersistenceError::CommitmentNotFound(child_id))
    );
}

#[test]
fn test_delete_children_keeps_seed() {
    let (mut store, profile_id) = setup_store_with_profile();
    let seed: Commitment = create_test_commitment(profile_id);
    let seed_id: i64 = store.insert_commitment(&seed).unwrap();

    for day in [9, 16, 23] {
        let child: Commitment =
            seed.child_occurrence(NaiveDate::from_ymd_opt(2026, 10, day).unwrap(), seed_id);
        store.insert_commitment(&child).unwrap();
    }

    let removed: usize = store.delete_commitment_children(seed_id).unwrap();
    assert_eq!(removed, 3);
    assert!(store.get_commitment(seed_id).is_ok());
}

#[test]
fn test_list_commitments_ordered_by_schedule() {
    let (mut store, profile_id) = setup_store_with_profile();

    let mut later: Commitment = create_test_commitment(profile_id);
    later.commitment_date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
    later.title = String::from("Depois");
    store.insert_commitment(&later).unwrap();

    let mut sooner: Commitment = create_test_commitment(profile_id);
    sooner.title = String::from("Antes");
    store.insert_commitment(&sooner).unwrap();

    let all: Vec<Commitment> = store.list_commitments(profile_id).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Antes");
    assert_eq!(all[1].title, "Depois");
}
