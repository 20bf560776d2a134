// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use whatsping_domain::{Commitment, FiredThresholds};

use crate::error::PersistenceError;

/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile_id: i64,
    pub name: String,
    /// Raw stored number; may carry formatting, may be absent.
    pub whatsapp_number: Option<String>,
    pub created_at: String,
}

/// A stored delegated contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub contact_id: i64,
    pub profile_id: i64,
    pub name: String,
    pub whatsapp_number: String,
    /// Relationship tag such as `namorado`, `familia`, `amigo`, `outro`.
    pub relationship: String,
    pub created_at: String,
}

/// An appended delivery-attempt record, as read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLogRecord {
    pub log_id: i64,
    pub profile_id: i64,
    pub commitment_id: Option<i64>,
    /// Threshold kind string: `days`, `hours`, `minutes` or `ontime`.
    pub reminder_type: String,
    pub recipient_address: String,
    pub message_preview: String,
    /// Delivery outcome: `sent` or `failed`.
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: String,
}

/// Input for appending one delivery-attempt record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotificationLog {
    pub profile_id: i64,
    pub commitment_id: Option<i64>,
    pub reminder_type: String,
    pub recipient_address: String,
    pub message_preview: String,
    pub status: String,
    pub error_message: Option<String>,
}

/// Type alias for a full commitment row as selected from the database.
pub type CommitmentRow = (
    i64,            // commitment_id
    i64,            // profile_id
    Option<i64>,    // parent_commitment_id
    String,         // category
    String,         // title
    Option<String>, // description
    String,         // commitment_date
    String,         // commitment_time
    Option<String>, // location
    Option<String>, // provider_name
    i32,            // remind_days_before
    i32,            // remind_hours_before
    i32,            // remind_minutes_before
    String,         // notify_contact_ids (JSON array)
    Option<String>, // custom_message
    String,         // recurrence
    Option<String>, // recurrence_end_date
    String,         // status
    i32,            // notified_days
    i32,            // notified_hours
    i32,            // notified_minutes
    i32,            // notified_ontime
);

fn parse_stored_date(value: &str) -> Result<NaiveDate, PersistenceError> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| PersistenceError::InvalidRecord(format!("Bad stored date '{value}': {e}")))
}

fn parse_stored_time(value: &str) -> Result<NaiveTime, PersistenceError> {
    // Stored as HH:MM:SS, but tolerate HH:MM.
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| PersistenceError::InvalidRecord(format!("Bad stored time '{value}': {e}")))
}

/// Reconstructs a domain commitment from a stored row.
///
/// # Errors
///
/// Returns `PersistenceError::InvalidRecord` if a stored enum value,
/// date, time, or contact-id list cannot be parsed.
pub fn commitment_from_row(row: CommitmentRow) -> Result<Commitment, PersistenceError> {
    let (
        commitment_id,
        profile_id,
        parent_commitment_id,
        category,
        title,
        description,
        commitment_date,
        commitment_time,
        location,
        provider_name,
        remind_days_before,
        remind_hours_before,
        remind_minutes_before,
        notify_contact_ids,
        custom_message,
        recurrence,
        recurrence_end_date,
        status,
        notified_days,
        notified_hours,
        notified_minutes,
        notified_ontime,
    ) = row;

    let notify_contact_ids: Vec<i64> = serde_json::from_str(&notify_contact_ids)?;
    let recurrence_end_date: Option<NaiveDate> = recurrence_end_date
        .as_deref()
        .map(parse_stored_date)
        .transpose()?;

    Ok(Commitment {
        commitment_id: Some(commitment_id),
        profile_id,
        parent_commitment_id,
        category: category.parse()?,
        title,
        description,
        commitment_date: parse_stored_date(&commitment_date)?,
        commitment_time: parse_stored_time(&commitment_time)?,
        location,
        provider_name,
        remind_days_before: u32::try_from(remind_days_before.max(0)).unwrap_or(0),
        remind_hours_before: u32::try_from(remind_hours_before.max(0)).unwrap_or(0),
        remind_minutes_before: u32::try_from(remind_minutes_before.max(0)).unwrap_or(0),
        notify_contact_ids,
        custom_message,
        recurrence: recurrence.parse()?,
        recurrence_end_date,
        status: status.parse()?,
        fired: FiredThresholds {
            days: notified_days != 0,
            hours: notified_hours != 0,
            minutes: notified_minutes != 0,
            ontime: notified_ontime != 0,
        },
    })
}

/// Serializes the delegated-contact id list for storage.
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if JSON encoding fails.
pub fn contact_ids_to_json(ids: &[i64]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(ids)?)
}

/// Formats a date the way commitment rows store it.
#[must_use]
pub fn date_to_stored(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a time the way commitment rows store it.
#[must_use]
pub fn time_to_stored(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Current UTC instant in the text form used by `created_at` columns.
#[must_use]
pub fn stored_now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
