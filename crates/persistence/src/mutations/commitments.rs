// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commitment mutations: inserts, status changes, and fired-flag updates.
//!
//! Fired flags are strictly monotonic: the only mutation offered sets a
//! flag to true. Nothing in this module can clear one.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use whatsping_domain::{Commitment, CommitmentStatus, ThresholdKind};

use crate::backend::PersistenceBackend;
use crate::data_models::{contact_ids_to_json, date_to_stored, time_to_stored};
use crate::diesel_schema::commitments;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a commitment and returns its assigned ID.
///
/// The `commitment_id` field of the input is ignored; the database
/// assigns the identity. Used for seeds and for materialized recurrence
/// children alike.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_commitment(
    conn: &mut _,
    commitment: &Commitment,
) -> Result<i64, PersistenceError> {
    let notify_contact_ids: String = contact_ids_to_json(&commitment.notify_contact_ids)?;
    let recurrence_end_date: Option<String> =
        commitment.recurrence_end_date.map(date_to_stored);

    diesel::insert_into(commitments::table)
        .values((
            commitments::profile_id.eq(commitment.profile_id),
            commitments::parent_commitment_id.eq(commitment.parent_commitment_id),
            commitments::category.eq(commitment.category.as_str()),
            commitments::title.eq(&commitment.title),
            commitments::description.eq(&commitment.description),
            commitments::commitment_date.eq(date_to_stored(commitment.commitment_date)),
            commitments::commitment_time.eq(time_to_stored(commitment.commitment_time)),
            commitments::location.eq(&commitment.location),
            commitments::provider_name.eq(&commitment.provider_name),
            commitments::remind_days_before.eq(i32::try_from(commitment.remind_days_before).unwrap_or(i32::MAX)),
            commitments::remind_hours_before.eq(i32::try_from(commitment.remind_hours_before).unwrap_or(i32::MAX)),
            commitments::remind_minutes_before.eq(i32::try_from(commitment.remind_minutes_before).unwrap_or(i32::MAX)),
            commitments::notify_contact_ids.eq(notify_contact_ids),
            commitments::custom_message.eq(&commitment.custom_message),
            commitments::recurrence.eq(commitment.recurrence.as_str()),
            commitments::recurrence_end_date.eq(recurrence_end_date),
            commitments::status.eq(commitment.status.as_str()),
            commitments::notified_days.eq(i32::from(commitment.fired.days)),
            commitments::notified_hours.eq(i32::from(commitment.fired.hours)),
            commitments::notified_minutes.eq(i32::from(commitment.fired.minutes)),
            commitments::notified_ontime.eq(i32::from(commitment.fired.ontime)),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Marks a commitment as done, removing it from sweep evaluation.
///
/// # Errors
///
/// Returns `PersistenceError::CommitmentNotFound` if no row matches.
pub fn mark_commitment_done(
    conn: &mut _,
    commitment_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(
        commitments::table.filter(commitments::commitment_id.eq(commitment_id)),
    )
    .set(commitments::status.eq(CommitmentStatus::Done.as_str()))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::CommitmentNotFound(commitment_id));
    }
    Ok(())
}
}

backend_fn! {
/// Sets one fired flag to true.
///
/// This is the dispatcher's only progress marker; it is written after
/// every recipient of the threshold has been attempted successfully.
///
/// # Errors
///
/// Returns `PersistenceError::CommitmentNotFound` if no row matches.
pub fn set_notified_flag(
    conn: &mut _,
    commitment_id: i64,
    kind: ThresholdKind,
) -> Result<(), PersistenceError> {
    let target = commitments::table.filter(commitments::commitment_id.eq(commitment_id));
    let rows: usize = match kind {
        ThresholdKind::Days => diesel::update(target)
            .set(commitments::notified_days.eq(1))
            .execute(conn)?,
        ThresholdKind::Hours => diesel::update(target)
            .set(commitments::notified_hours.eq(1))
            .execute(conn)?,
        ThresholdKind::Minutes => diesel::update(target)
            .set(commitments::notified_minutes.eq(1))
            .execute(conn)?,
        ThresholdKind::OnTime => diesel::update(target)
            .set(commitments::notified_ontime.eq(1))
            .execute(conn)?,
    };

    if rows == 0 {
        return Err(PersistenceError::CommitmentNotFound(commitment_id));
    }
    Ok(())
}
}

backend_fn! {
/// Deletes a commitment.
///
/// Recurrence children are removed by the `parent_commitment_id`
/// cascade; `delete_commitment_children` exists for callers that want
/// to prune a series while keeping the seed.
///
/// # Errors
///
/// Returns `PersistenceError::CommitmentNotFound` if no row matches.
pub fn delete_commitment(conn: &mut _, commitment_id: i64) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(
        commitments::table.filter(commitments::commitment_id.eq(commitment_id)),
    )
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::CommitmentNotFound(commitment_id));
    }
    Ok(())
}
}

backend_fn! {
/// Deletes every materialized child of a seed commitment.
///
/// Returns the number of children removed; zero is not an error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_commitment_children(
    conn: &mut _,
    parent_commitment_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        commitments::table.filter(commitments::parent_commitment_id.eq(parent_commitment_id)),
    )
    .execute(conn)?)
}
}
