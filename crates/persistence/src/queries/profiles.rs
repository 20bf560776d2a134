// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::ProfileRecord;
use crate::diesel_schema::profiles;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a profile by ID.
///
/// # Errors
///
/// Returns `PersistenceError::ProfileNotFound` if no row matches.
pub fn get_profile(conn: &mut _, profile_id: i64) -> Result<ProfileRecord, PersistenceError> {
    let result = profiles::table
        .filter(profiles::profile_id.eq(profile_id))
        .first::<(i64, String, Option<String>, String)>(conn);

    match result {
        Ok((profile_id, name, whatsapp_number, created_at)) => Ok(ProfileRecord {
            profile_id,
            name,
            whatsapp_number,
            created_at,
        }),
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::ProfileNotFound(profile_id))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
}
