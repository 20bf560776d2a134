// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery log queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::NotificationLogRecord;
use crate::diesel_schema::notification_logs;
use crate::error::PersistenceError;

type LogTuple = (
    i64,
    i64,
    Option<i64>,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
);

backend_fn! {
/// Lists a profile's delivery history, newest first, up to `limit` rows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notification_logs_for_profile(
    conn: &mut _,
    profile_id: i64,
    limit: i64,
) -> Result<Vec<NotificationLogRecord>, PersistenceError> {
    let rows: Vec<LogTuple> = notification_logs::table
        .filter(notification_logs::profile_id.eq(profile_id))
        .order(notification_logs::log_id.desc())
        .limit(limit)
        .load::<LogTuple>(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                log_id,
                profile_id,
                commitment_id,
                reminder_type,
                recipient_address,
                message_preview,
                status,
                error_message,
                created_at,
            )| NotificationLogRecord {
                log_id,
                profile_id,
                commitment_id,
                reminder_type,
                recipient_address,
                message_preview,
                status,
                error_message,
                created_at,
            },
        )
        .collect())
}
}
