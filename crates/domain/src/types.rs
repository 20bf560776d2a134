// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the category of a commitment.
///
/// Categories are display-only for the reminder engine: they select the
/// label (with emoji prefix) interpolated into outgoing messages and have
/// no scheduling semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dentista,
    Medico,
    Escola,
    Trabalho,
    Veterinario,
    Reuniao,
    Curso,
    Clinica,
    Idoso,
    Bebe,
    Exame,
    Farmacia,
    Viagem,
    #[default]
    Outro,
}

impl Category {
    /// Converts this category to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dentista => "dentista",
            Self::Medico => "medico",
            Self::Escola => "escola",
            Self::Trabalho => "trabalho",
            Self::Veterinario => "veterinario",
            Self::Reuniao => "reuniao",
            Self::Curso => "curso",
            Self::Clinica => "clinica",
            Self::Idoso => "idoso",
            Self::Bebe => "bebe",
            Self::Exame => "exame",
            Self::Farmacia => "farmacia",
            Self::Viagem => "viagem",
            Self::Outro => "outro",
        }
    }

    /// Returns the display label interpolated into outgoing messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dentista => "🦷 Dentista",
            Self::Medico => "🏥 Médico",
            Self::Escola => "🏫 Escola",
            Self::Trabalho => "💼 Trabalho",
            Self::Veterinario => "🐾 Veterinário",
            Self::Reuniao => "🤝 Reunião",
            Self::Curso => "📚 Curso",
            Self::Clinica => "🏨 Clínica",
            Self::Idoso => "👴 Pessoa Idosa",
            Self::Bebe => "👶 Mãe/Bebê",
            Self::Exame => "🩺 Exame",
            Self::Farmacia => "💊 Farmácia",
            Self::Viagem => "✈️ Viagem",
            Self::Outro => "📌 Outro",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dentista" => Ok(Self::Dentista),
            "medico" => Ok(Self::Medico),
            "escola" => Ok(Self::Escola),
            "trabalho" => Ok(Self::Trabalho),
            "veterinario" => Ok(Self::Veterinario),
            "reuniao" => Ok(Self::Reuniao),
            "curso" => Ok(Self::Curso),
            "clinica" => Ok(Self::Clinica),
            "idoso" => Ok(Self::Idoso),
            "bebe" => Ok(Self::Bebe),
            "exame" => Ok(Self::Exame),
            "farmacia" => Ok(Self::Farmacia),
            "viagem" => Ok(Self::Viagem),
            "outro" => Ok(Self::Outro),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the lifecycle status of a commitment.
///
/// Reminders only fire while the commitment is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    /// Awaiting its scheduled date/time. Eligible for reminder evaluation.
    #[default]
    Pending,
    /// Completed or dismissed by the user. Terminal for the engine.
    Done,
}

impl CommitmentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl FromStr for CommitmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the repetition rule attached to a seed commitment.
///
/// A rule is meaningful only on the seed record; materialized children
/// always carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    /// Single occurrence, no expansion.
    #[default]
    None,
    /// Repeats every day.
    Daily,
    /// Repeats every 7 days.
    Weekly,
    /// Repeats every 14 days.
    Biweekly,
    /// Repeats every calendar month, preserving the day of month when
    /// the target month is long enough (clamped otherwise).
    Monthly,
}

impl RecurrenceRule {
    /// Converts this rule to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(DomainError::InvalidRecurrence(s.to_string())),
        }
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents one of the four reminder thresholds a commitment can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdKind {
    /// Days-before lead time.
    Days,
    /// Hours-before lead time.
    Hours,
    /// Minutes-before lead time.
    Minutes,
    /// The implicit on-time threshold at the commitment's scheduled time.
    OnTime,
}

impl ThresholdKind {
    /// Converts this kind to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::OnTime => "ontime",
        }
    }
}

impl FromStr for ThresholdKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(Self::Days),
            "hours" => Ok(Self::Hours),
            "minutes" => Ok(Self::Minutes),
            "ontime" => Ok(Self::OnTime),
            _ => Err(DomainError::InvalidThresholdKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The set of thresholds that have already fired for a commitment.
///
/// This is the explicit form of the four persisted `notified_*` booleans.
/// Membership is monotonic: once a kind is inserted it is never removed,
/// which is what guarantees at-most-once delivery per threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FiredThresholds {
    /// Whether the days-before threshold has fired.
    pub days: bool,
    /// Whether the hours-before threshold has fired.
    pub hours: bool,
    /// Whether the minutes-before threshold has fired.
    pub minutes: bool,
    /// Whether the on-time threshold has fired.
    pub ontime: bool,
}

impl FiredThresholds {
    /// Creates an empty set (nothing fired yet).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            days: false,
            hours: false,
            minutes: false,
            ontime: false,
        }
    }

    /// Returns whether the given threshold kind has already fired.
    #[must_use]
    pub const fn contains(&self, kind: ThresholdKind) -> bool {
        match kind {
            ThresholdKind::Days => self.days,
            ThresholdKind::Hours => self.hours,
            ThresholdKind::Minutes => self.minutes,
            ThresholdKind::OnTime => self.ontime,
        }
    }

    /// Marks the given threshold kind as fired.
    ///
    /// Insertion is monotonic; there is no removal operation.
    pub const fn insert(&mut self, kind: ThresholdKind) {
        match kind {
            ThresholdKind::Days => self.days = true,
            ThresholdKind::Hours => self.hours = true,
            ThresholdKind::Minutes => self.minutes = true,
            ThresholdKind::OnTime => self.ontime = true,
        }
    }
}

/// A derived "before" reminder threshold, constructed from a commitment's
/// configuration for one evaluation pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderThreshold {
    /// Which of the three configurable lead times this is.
    pub kind: ThresholdKind,
    /// The lead time expressed in minutes before the event.
    pub minutes_before: i64,
    /// Human-readable lead time label (e.g. "2 hora(s)"), interpolated
    /// into messages as the `{tempo}` placeholder.
    pub unit_label: String,
}

/// A resolved delivery target: the commitment owner or a delegated contact.
///
/// Read-only projection over profile/contact records; the address has
/// already been normalized to bare digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Bare-digit WhatsApp number.
    pub address: String,
    /// Display name interpolated into the message greeting.
    pub display_name: String,
}

/// Represents a scheduled commitment with its reminder configuration.
///
/// This is the central entity of the engine. A commitment created with a
/// repetition rule is the *seed* of a series; the recurrence expander
/// materializes children that point back to it via `parent_commitment_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the commitment has not been persisted yet.
    pub commitment_id: Option<i64>,
    /// The owning profile.
    pub profile_id: i64,
    /// The seed's identifier, set on materialized recurrence children.
    pub parent_commitment_id: Option<i64>,
    /// Display category.
    pub category: Category,
    /// Title (required, non-empty).
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Calendar date of the event (civil time, no timezone field).
    pub commitment_date: NaiveDate,
    /// Local time-of-day of the event.
    pub commitment_time: NaiveTime,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Provider or professional name.
    pub provider_name: Option<String>,
    /// Days-before reminder offset. Zero disables the threshold.
    pub remind_days_before: u32,
    /// Hours-before reminder offset. Zero disables the threshold.
    pub remind_hours_before: u32,
    /// Minutes-before reminder offset. Zero disables the threshold.
    pub remind_minutes_before: u32,
    /// Ordered delegated-contact ids to fan reminders out to.
    pub notify_contact_ids: Vec<i64>,
    /// Optional custom message template with `{placeholder}` substitution.
    pub custom_message: Option<String>,
    /// Repetition rule (seed records only).
    pub recurrence: RecurrenceRule,
    /// Optional end of the repetition series.
    pub recurrence_end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: CommitmentStatus,
    /// Thresholds that have already fired.
    pub fired: FiredThresholds,
}

impl Commitment {
    /// Builds the enabled, not-yet-fired "before" thresholds for this
    /// commitment, sorted descending by lead time (largest lookahead first).
    ///
    /// A threshold is enabled when its configured offset is greater than
    /// zero; it is excluded once its fired flag is set.
    #[must_use]
    pub fn pending_before_thresholds(&self) -> Vec<ReminderThreshold> {
        let mut thresholds: Vec<ReminderThreshold> = Vec::with_capacity(3);

        if self.remind_days_before > 0 && !self.fired.contains(ThresholdKind::Days) {
            thresholds.push(ReminderThreshold {
                kind: ThresholdKind::Days,
                minutes_before: i64::from(self.remind_days_before) * 24 * 60,
                unit_label: format!("{} dia(s)", self.remind_days_before),
            });
        }
        if self.remind_hours_before > 0 && !self.fired.contains(ThresholdKind::Hours) {
            thresholds.push(ReminderThreshold {
                kind: ThresholdKind::Hours,
                minutes_before: i64::from(self.remind_hours_before) * 60,
                unit_label: format!("{} hora(s)", self.remind_hours_before),
            });
        }
        if self.remind_minutes_before > 0 && !self.fired.contains(ThresholdKind::Minutes) {
            thresholds.push(ReminderThreshold {
                kind: ThresholdKind::Minutes,
                minutes_before: i64::from(self.remind_minutes_before),
                unit_label: format!("{} minuto(s)", self.remind_minutes_before),
            });
        }

        thresholds.sort_by(|a, b| b.minutes_before.cmp(&a.minutes_before));
        thresholds
    }

    /// Builds a recurrence child of this seed for the given occurrence date.
    ///
    /// The child shares every field of the seed except the date, the status
    /// (always `Pending`), the fired flags (cleared), the recurrence rule
    /// (cleared, so children never expand again), and the parent id.
    ///
    /// # Arguments
    ///
    /// * `date` - The occurrence date produced by the expander
    /// * `parent_id` - The persisted id of this seed
    #[must_use]
    pub fn child_occurrence(&self, date: NaiveDate, parent_id: i64) -> Self {
        Self {
            commitment_id: None,
            parent_commitment_id: Some(parent_id),
            commitment_date: date,
            status: CommitmentStatus::Pending,
            fired: FiredThresholds::empty(),
            recurrence: RecurrenceRule::None,
            recurrence_end_date: None,
            ..self.clone()
        }
    }
}
