// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{MockGateway, TZ, create_test_commitment, now_at_diff, setup_store_with_profile};
use crate::{Dispatcher, SweepSummary};
use std::sync::Arc;
use tokio::sync::Mutex;
use whatsping_domain::Commitment;
use whatsping_persistence::{NotificationLogRecord, Persistence};

fn build_dispatcher(store: Persistence) -> (Dispatcher, Arc<MockGateway>, Arc<Mutex<Persistence>>) {
    let store: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(store));
    let gateway: Arc<MockGateway> = Arc::new(MockGateway::new());
    let dispatcher: Dispatcher = Dispatcher::new(Arc::clone(&store), gateway.clone(), TZ);
    (dispatcher, gateway, store)
}

#[tokio::test]
async fn test_due_commitment_sends_and_sets_flag() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let commitment: Commitment = create_test_commitment(profile_id);
    let commitment_id: i64 = raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&commitment, 25))
        .await;

    assert!(summary.success);
    assert_eq!(summary.processed, 1);
    assert!(summary.details[0].starts_with("Sent minutes reminder for \"Consulta\""));
    assert_eq!(gateway.sent_count(), 1);

    let mut store = store.lock().await;
    let loaded: Commitment = store.get_commitment(commitment_id).unwrap();
    assert!(loaded.fired.minutes);

    let logs: Vec<NotificationLogRecord> = store.list_notification_logs(profile_id, 100).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "sent");
    assert_eq!(logs[0].reminder_type, "minutes");
    assert_eq!(logs[0].recipient_address, "5511912345678");
}

#[tokio::test]
async fn test_sweep_is_idempotent_at_same_instant() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let commitment: Commitment = create_test_commitment(profile_id);
    raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, _store) = build_dispatcher(raw_store);

    let now = now_at_diff(&commitment, 25);
    let first: SweepSummary = dispatcher.run_sweep_at(now).await;
    let second: SweepSummary = dispatcher.run_sweep_at(now).await;

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 0);
    assert_eq!(gateway.sent_count(), 1);
}

#[tokio::test]
async fn test_not_due_commitment_produces_nothing() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let commitment: Commitment = create_test_commitment(profile_id);
    raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, _store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&commitment, 120))
        .await;

    assert!(summary.success);
    assert_eq!(summary.processed, 0);
    assert_eq!(gateway.sent_count(), 0);
}

#[tokio::test]
async fn test_fanout_reaches_delegated_contacts() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let contact_id: i64 = raw_store
        .create_contact(profile_id, "João", "5511988887777", "namorado")
        .unwrap();
    let mut commitment: Commitment = create_test_commitment(profile_id);
    commitment.notify_contact_ids = vec![contact_id];
    raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, store) = build_dispatcher(raw_store);

    dispatcher.run_sweep_at(now_at_diff(&commitment, 25)).await;

    let sent = gateway.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "5511912345678");
    assert!(sent[0].1.contains("Olá Maria!"));
    assert_eq!(sent[1].0, "5511988887777");
    assert!(sent[1].1.contains("Olá João!"));
    drop(sent);

    // One log row per recipient.
    let logs = store
        .lock()
        .await
        .list_notification_logs(profile_id, 100)
        .unwrap();
    assert_eq!(logs.len(), 2);
}

#[tokio::test]
async fn test_partial_failure_withholds_flag_and_retries_everyone() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let contact_id: i64 = raw_store
        .create_contact(profile_id, "João", "5511988887777", "namorado")
        .unwrap();
    let mut commitment: Commitment = create_test_commitment(profile_id);
    commitment.notify_contact_ids = vec![contact_id];
    let commitment_id: i64 = raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, store) = build_dispatcher(raw_store);
    gateway.fail_address("5511988887777");

    let now = now_at_diff(&commitment, 25);
    let first: SweepSummary = dispatcher.run_sweep_at(now).await;

    assert_eq!(first.processed, 2);
    assert!(first.details.iter().any(|d| d.starts_with("Failed minutes")));
    let loaded: Commitment = store.lock().await.get_commitment(commitment_id).unwrap();
    assert!(!loaded.fired.minutes, "flag must be withheld on partial failure");

    // Next sweep retries all recipients for the threshold, owner
    // included (accepted duplicate in the failure path).
    gateway.clear_failures();
    let second: SweepSummary = dispatcher.run_sweep_at(now).await;
    assert_eq!(second.processed, 2);
    assert_eq!(gateway.sent_count(), 3);

    let mut store = store.lock().await;
    let loaded: Commitment = store.get_commitment(commitment_id).unwrap();
    assert!(loaded.fired.minutes);

    // Four rows: sent + failed from the first sweep, two sent from the
    // second.
    let logs: Vec<NotificationLogRecord> = store.list_notification_logs(profile_id, 100).unwrap();
    assert_eq!(logs.len(), 4);
    assert_eq!(logs.iter().filter(|l| l.status == "failed").count(), 1);
    let failed = logs.iter().find(|l| l.status == "failed").unwrap();
    assert!(failed.error_message.as_deref().unwrap().contains("503"));
}

#[tokio::test]
async fn test_owner_without_number_is_skipped_with_reason() {
    let mut raw_store: Persistence = Persistence::new_in_memory().unwrap();
    let profile_id: i64 = raw_store.create_profile("Sem Número", None).unwrap();
    let commitment: Commitment = create_test_commitment(profile_id);
    raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&commitment, 25))
        .await;

    assert_eq!(summary.processed, 1);
    assert!(summary.details[0].contains("Skipped"));
    assert_eq!(gateway.sent_count(), 0);

    // A skip is not a failed send: no log row is written.
    let logs = store
        .lock()
        .await
        .list_notification_logs(profile_id, 100)
        .unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_ontime_fires_inside_grace_window() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let mut commitment: Commitment = create_test_commitment(profile_id);
    commitment.remind_minutes_before = 0;
    let commitment_id: i64 = raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&commitment, -2))
        .await;

    assert!(summary.details[0].starts_with("Sent ontime reminder"));
    assert_eq!(gateway.sent_count(), 1);
    let sent = gateway.sent.lock().unwrap();
    assert!(sent[0].1.contains("Seu compromisso é *agora*"));
    drop(sent);

    let loaded: Commitment = store.lock().await.get_commitment(commitment_id).unwrap();
    assert!(loaded.fired.ontime);
}

#[tokio::test]
async fn test_expired_commitment_is_left_alone() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let commitment: Commitment = create_test_commitment(profile_id);
    raw_store.insert_commitment(&commitment).unwrap();
    let (dispatcher, gateway, _store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&commitment, -10))
        .await;

    assert_eq!(summary.processed, 0);
    assert_eq!(gateway.sent_count(), 0);
}

#[tokio::test]
async fn test_one_failure_does_not_abort_the_sweep() {
    let (mut raw_store, profile_id) = setup_store_with_profile();
    let broken_profile: i64 = raw_store.create_profile("Sem Número", None).unwrap();

    let broken: Commitment = create_test_commitment(broken_profile);
    raw_store.insert_commitment(&broken).unwrap();
    let healthy: Commitment = create_test_commitment(profile_id);
    raw_store.insert_commitment(&healthy).unwrap();
    let (dispatcher, gateway, _store) = build_dispatcher(raw_store);

    let summary: SweepSummary = dispatcher
        .run_sweep_at(now_at_diff(&healthy, 25))
        .await;

    assert_eq!(summary.processed, 2);
    assert!(summary.details.iter().any(|d| d.contains("Skipped")));
    assert!(summary.details.iter().any(|d| d.starts_with("Sent")));
    assert_eq!(gateway.sent_count(), 1);
}
