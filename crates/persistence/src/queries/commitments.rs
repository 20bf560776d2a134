// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commitment queries.
//!
//! The sweep deliberately loads every pending commitment and leaves the
//! time-window decision to the evaluator; no clock logic is pushed into
//! SQL.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use whatsping_domain::{Commitment, CommitmentStatus};

use crate::data_models::{CommitmentRow, commitment_from_row};
use crate::diesel_schema::commitments;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a commitment by ID.
///
/// # Errors
///
/// Returns `PersistenceError::CommitmentNotFound` if no row matches, or
/// `PersistenceError::InvalidRecord` if the stored row fails domain
/// parsing.
pub fn get_commitment(
    conn: &mut _,
    commitment_id: i64,
) -> Result<Commitment, PersistenceError> {
    let result = commitments::table
        .filter(commitments::commitment_id.eq(commitment_id))
        .first::<CommitmentRow>(conn);

    match result {
        Ok(row) => commitment_from_row(row),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::CommitmentNotFound(commitment_id))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}

backend_fn! {
/// Lists every commitment belonging to a profile, soonest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row fails domain
/// parsing.
pub fn list_commitments_for_profile(
    conn: &mut _,
    profile_id: i64,
) -> Result<Vec<Commitment>, PersistenceError> {
    let rows: Vec<CommitmentRow> = commitments::table
        .filter(commitments::profile_id.eq(profile_id))
        .order((
            commitments::commitment_date.asc(),
            commitments::commitment_time.asc(),
        ))
        .load::<CommitmentRow>(conn)?;

    rows.into_iter().map(commitment_from_row).collect()
}
}

backend_fn! {
/// Lists every pending commitment across all profiles.
///
/// This is the dispatcher's working set for one sweep.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row fails domain
/// parsing.
pub fn list_pending_commitments(conn: &mut _) -> Result<Vec<Commitment>, PersistenceError> {
    let rows: Vec<CommitmentRow> = commitments::table
        .filter(commitments::status.eq(CommitmentStatus::Pending.as_str()))
        .order(commitments::commitment_id.asc())
        .load::<CommitmentRow>(conn)?;

    rows.into_iter().map(commitment_from_row).collect()
}
}
