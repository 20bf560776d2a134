// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::stored_now;
use crate::diesel_schema::profiles;
use crate::error::PersistenceError;

backend_fn! {
/// Creates a profile and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - Display name used in message greetings
/// * `whatsapp_number` - Raw delivery number; may be absent
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_profile(
    conn: &mut _,
    name: &str,
    whatsapp_number: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(profiles::table)
        .values((
            profiles::name.eq(name),
            profiles::whatsapp_number.eq(whatsapp_number),
            profiles::created_at.eq(stored_now()),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}
