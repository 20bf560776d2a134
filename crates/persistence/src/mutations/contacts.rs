// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delegated contact mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::stored_now;
use crate::diesel_schema::contacts;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a delegated contact and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `profile_id` - The owning profile
/// * `name` - Contact display name used in message greetings
/// * `whatsapp_number` - Raw delivery number
/// * `relationship` - Relationship tag (e.g. `familia`)
///
/// # Errors
///
/// Returns an error if the insert fails, including when the profile
/// does not exist (foreign key violation).
pub fn create_contact(
    conn: &mut _,
    profile_id: i64,
    name: &str,
    whatsapp_number: &str,
    relationship: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(contacts::table)
        .values((
            contacts::profile_id.eq(profile_id),
            contacts::name.eq(name),
            contacts::whatsapp_number.eq(whatsapp_number),
            contacts::relationship.eq(relationship),
            contacts::created_at.eq(stored_now()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Deletes a delegated contact.
///
/// Commitments referencing the contact keep its ID in their
/// `notify_contact_ids` list; the resolver drops unknown IDs at sweep
/// time.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the contact does not exist.
pub fn delete_contact(conn: &mut _, contact_id: i64) -> Result<(), PersistenceError> {
    let rows: usize =
        diesel::delete(contacts::table.filter(contacts::contact_id.eq(contact_id)))
            .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Contact {contact_id} does not exist"
        )));
    }
    Ok(())
}
}
