// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery log mutations.
//!
//! The log is append-only: one row per delivery attempt, never updated
//! or deleted afterwards.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewNotificationLog, stored_now};
use crate::diesel_schema::notification_logs;
use crate::error::PersistenceError;

backend_fn! {
/// Appends one delivery-attempt record and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_notification_log(
    conn: &mut _,
    entry: &NewNotificationLog,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(notification_logs::table)
        .values((
            notification_logs::profile_id.eq(entry.profile_id),
            notification_logs::commitment_id.eq(entry.commitment_id),
            notification_logs::reminder_type.eq(&entry.reminder_type),
            notification_logs::recipient_address.eq(&entry.recipient_address),
            notification_logs::message_preview.eq(&entry.message_preview),
            notification_logs::status.eq(&entry.status),
            notification_logs::error_message.eq(&entry.error_message),
            notification_logs::created_at.eq(stored_now()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}
