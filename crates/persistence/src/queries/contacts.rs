// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delegated contact queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::ContactRecord;
use crate::diesel_schema::contacts;
use crate::error::PersistenceError;

type ContactTuple = (i64, i64, String, String, String, String);

fn contact_from_tuple(row: ContactTuple) -> ContactRecord {
    let (contact_id, profile_id, name, whatsapp_number, relationship, created_at) = row;
    ContactRecord {
        contact_id,
        profile_id,
        name,
        whatsapp_number,
        relationship,
        created_at,
    }
}

backend_fn! {
/// Lists every delegated contact belonging to a profile, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_contacts_for_profile(
    conn: &mut _,
    profile_id: i64,
) -> Result<Vec<ContactRecord>, PersistenceError> {
    let rows: Vec<ContactTuple> = contacts::table
        .filter(contacts::profile_id.eq(profile_id))
        .order(contacts::contact_id.asc())
        .load::<ContactTuple>(conn)?;

    Ok(rows.into_iter().map(contact_from_tuple).collect())
}
}

backend_fn! {
/// Retrieves the contacts matching the given IDs.
///
/// IDs with no matching row are silently dropped; a commitment may
/// reference a contact that has since been deleted.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_contacts_by_ids(
    conn: &mut _,
    contact_ids: &[i64],
) -> Result<Vec<ContactRecord>, PersistenceError> {
    if contact_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<ContactTuple> = contacts::table
        .filter(contacts::contact_id.eq_any(contact_ids))
        .order(contacts::contact_id.asc())
        .load::<ContactTuple>(conn)?;

    Ok(rows.into_iter().map(contact_from_tuple).collect())
}
}
