// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic query modules.
//!
//! Read-only operations against the reminder tables. All queries are
//! generated in backend-specific monomorphic versions (`_sqlite` and
//! `_mysql` suffixes) by the `backend_fn!` macro.

pub mod commitments;
pub mod contacts;
pub mod notifications;
pub mod profiles;

// Re-export backend-specific query functions used by lib.rs
pub use commitments::{
    get_commitment_mysql, get_commitment_sqlite, list_commitments_for_profile_mysql,
    list_commitments_for_profile_sqlite, list_pending_commitments_mysql,
    list_pending_commitments_sqlite,
};
pub use contacts::{
    get_contacts_by_ids_mysql, get_contacts_by_ids_sqlite, list_contacts_for_profile_mysql,
    list_contacts_for_profile_sqlite,
};
pub use notifications::{
    list_notification_logs_for_profile_mysql, list_notification_logs_for_profile_sqlite,
};
pub use profiles::{get_profile_mysql, get_profile_sqlite};
