// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing operations for the persistence layer. Everything
//! uses Diesel DSL, with backend-specific helpers (such as
//! `get_last_insert_rowid()`) reached through the `PersistenceBackend`
//! trait.
//!
//! ## Module Organization
//!
//! - `profiles` — Profile creation
//! - `contacts` — Delegated contact creation and removal
//! - `commitments` — Commitment inserts, status changes, fired flags
//! - `notifications` — Delivery log appends

pub mod commitments;
pub mod contacts;
pub mod notifications;
pub mod profiles;

// Re-export backend-specific mutation functions used by lib.rs
pub use commitments::{
    delete_commitment_mysql, delete_commitment_sqlite, delete_commitment_children_mysql,
    delete_commitment_children_sqlite, insert_commitment_mysql, insert_commitment_sqlite,
    mark_commitment_done_mysql, mark_commitment_done_sqlite, set_notified_flag_mysql,
    set_notified_flag_sqlite,
};
pub use contacts::{
    create_contact_mysql, create_contact_sqlite, delete_contact_mysql, delete_contact_sqlite,
};
pub use notifications::{append_notification_log_mysql, append_notification_log_sqlite};
pub use profiles::{create_profile_mysql, create_profile_sqlite};
