// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_commitment, setup_store_with_profile};
use crate::{NewNotificationLog, NotificationLogRecord};

fn sent_entry(profile_id: i64, commitment_id: i64) -> NewNotificationLog {
    NewNotificationLog {
        profile_id,
        commitment_id: Some(commitment_id),
        reminder_type: String::from("minutes"),
        recipient_address: String::from("5511912345678"),
        message_preview: String::from("⏰ *Lembrete WhatsPing*…"),
        status: String::from("sent"),
        error_message: None,
    }
}

#[test]
fn test_append_and_list_logs_newest_first() {
    let (mut store, profile_id) = setup_store_with_profile();
    let commitment_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();

    let first: i64 = store
        .append_notification_log(&sent_entry(profile_id, commitment_id))
        .unwrap();
    let mut failed: NewNotificationLog = sent_entry(profile_id, commitment_id);
    failed.status = String::from("failed");
    failed.error_message = Some(String::from("Gateway send failed (503): unavailable"));
    let second: i64 = store.append_notification_log(&failed).unwrap();

    let logs: Vec<NotificationLogRecord> = store.list_notification_logs(profile_id, 100).unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].log_id, second);
    assert_eq!(logs[0].status, "failed");
    assert!(logs[0].error_message.as_deref().unwrap().contains("503"));
    assert_eq!(logs[1].log_id, first);
    assert_eq!(logs[1].status, "sent");
}

#[test]
fn test_logs_survive_commitment_deletion() {
    let (mut store, profile_id) = setup_store_with_profile();
    let commitment_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();
    store
        .append_notification_log(&sent_entry(profile_id, commitment_id))
        .unwrap();

    store.delete_commitment(commitment_id).unwrap();

    // History is the only user-visible trace of past sweeps; it must
    // outlive the commitment rows it refers to.
    let logs: Vec<NotificationLogRecord> = store.list_notification_logs(profile_id, 100).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].commitment_id, Some(commitment_id));
}

#[test]
fn test_list_logs_honors_limit() {
    let (mut store, profile_id) = setup_store_with_profile();
    let commitment_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();

    let mut last: i64 = 0;
    for _ in 0..5 {
        last = store
            .append_notification_log(&sent_entry(profile_id, commitment_id))
            .unwrap();
    }

    let logs: Vec<NotificationLogRecord> = store.list_notification_logs(profile_id, 3).unwrap();
    assert_eq!(logs.len(), 3);
    // Newest first even when capped.
    assert_eq!(logs[0].log_id, last);
}

#[test]
fn test_logs_are_scoped_per_profile() {
    let (mut store, profile_id) = setup_store_with_profile();
    let other_profile: i64 = store.create_profile("Outro", None).unwrap();
    let commitment_id: i64 = store
        .insert_commitment(&create_test_commitment(profile_id))
        .unwrap();

    store
        .append_notification_log(&sent_entry(profile_id, commitment_id))
        .unwrap();

    assert!(store.list_notification_logs(other_profile, 100).unwrap().is_empty());
}
