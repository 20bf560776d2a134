// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use whatsping_dispatch::{Dispatcher, SweepSummary};
use whatsping_domain::{
    Category, Commitment, CommitmentStatus, DomainError, FiredThresholds, RecurrenceRule,
    expand_occurrences, validate_commitment_fields,
};
use whatsping_gateway::{EvolutionConfig, EvolutionGateway, MessagingGateway};
use whatsping_persistence::{
    ContactRecord, NotificationLogRecord, Persistence, PersistenceError, ProfileRecord,
};

/// WhatsPing Server - HTTP server for the WhatsPing reminder engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone used to evaluate reminder windows
    #[arg(short, long, default_value = "America/Sao_Paulo")]
    timezone: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the dispatcher that runs reminder
/// sweeps against the same store.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for profiles, commitments, and delivery logs.
    persistence: Arc<Mutex<Persistence>>,
    /// The reminder sweep runner.
    dispatcher: Arc<Dispatcher>,
}

/// API request for creating a profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateProfileApiRequest {
    /// The profile owner's display name.
    name: String,
    /// The owner's WhatsApp number, if known.
    whatsapp_number: Option<String>,
}

/// API request for creating a delegated contact.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateContactApiRequest {
    /// The owning profile.
    profile_id: i64,
    /// The contact's display name.
    name: String,
    /// The contact's WhatsApp number.
    whatsapp_number: String,
    /// Relationship to the profile owner (e.g. "filho", "cuidador").
    relationship: String,
}

/// API request for creating a commitment.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateCommitmentApiRequest {
    /// The owning profile.
    profile_id: i64,
    /// The category identifier (e.g. "dentista", "medico").
    category: String,
    /// The commitment title.
    title: String,
    /// Optional free-text description.
    description: Option<String>,
    /// The event date (YYYY-MM-DD).
    commitment_date: String,
    /// The event local time (HH:MM).
    commitment_time: String,
    /// Optional location.
    location: Option<String>,
    /// Optional provider or professional name.
    provider_name: Option<String>,
    /// Days-before reminder offset. Zero disables the threshold.
    #[serde(default)]
    remind_days_before: u32,
    /// Hours-before reminder offset. Zero disables the threshold.
    #[serde(default)]
    remind_hours_before: u32,
    /// Minutes-before reminder offset. Zero disables the threshold.
    #[serde(default)]
    remind_minutes_before: u32,
    /// Delegated contact ids to fan reminders out to.
    #[serde(default)]
    notify_contact_ids: Vec<i64>,
    /// Optional custom message template.
    custom_message: Option<String>,
    /// The recurrence rule ("none", "daily", "weekly", "biweekly", "monthly").
    #[serde(default = "default_recurrence")]
    recurrence: String,
    /// Optional inclusive end of the recurrence series (YYYY-MM-DD).
    recurrence_end_date: Option<String>,
}

/// Serde default for the recurrence field.
fn default_recurrence() -> String {
    String::from("none")
}

/// Query parameters for endpoints scoped to a single profile.
#[derive(Debug, Deserialize)]
struct ProfileScopeQuery {
    /// The profile ID.
    profile_id: i64,
}

/// Query parameters for the delivery-history endpoint.
#[derive(Debug, Deserialize)]
struct ListNotificationsQuery {
    /// The profile ID.
    profile_id: i64,
    /// Maximum number of rows to return.
    #[serde(default = "default_notification_limit")]
    limit: i64,
}

/// Serde default for the delivery-history row cap.
const fn default_notification_limit() -> i64 {
    50
}

/// API response for write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// The ID of the persisted record.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

/// API response for creating a commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateCommitmentApiResponse {
    /// Success indicator.
    success: bool,
    /// The seed commitment's assigned ID.
    commitment_id: i64,
    /// Number of recurrence occurrences materialized alongside the seed.
    occurrences_created: usize,
    /// A success message.
    message: String,
}

/// Serializable representation of a profile for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileResponse {
    /// The profile ID.
    profile_id: i64,
    /// The owner's display name.
    name: String,
    /// The owner's WhatsApp number, if known.
    whatsapp_number: Option<String>,
    /// Creation timestamp.
    created_at: String,
}

/// Serializable representation of a delegated contact for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactResponse {
    /// The contact ID.
    contact_id: i64,
    /// The contact's display name.
    name: String,
    /// The contact's WhatsApp number.
    whatsapp_number: String,
    /// Relationship to the profile owner.
    relationship: String,
}

/// API response for listing contacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListContactsApiResponse {
    /// The profile ID.
    profile_id: i64,
    /// The profile's delegated contacts.
    contacts: Vec<ContactResponse>,
}

/// Serializable representation of a commitment for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CommitmentResponse {
    /// The commitment ID.
    commitment_id: Option<i64>,
    /// The seed's ID, set on materialized recurrence children.
    parent_commitment_id: Option<i64>,
    /// The category identifier.
    category: String,
    /// The commitment title.
    title: String,
    /// Optional free-text description.
    description: Option<String>,
    /// The event date (YYYY-MM-DD).
    commitment_date: String,
    /// The event local time (HH:MM).
    commitment_time: String,
    /// Optional location.
    location: Option<String>,
    /// Optional provider or professional name.
    provider_name: Option<String>,
    /// Days-before reminder offset.
    remind_days_before: u32,
    /// Hours-before reminder offset.
    remind_hours_before: u32,
    /// Minutes-before reminder offset.
    remind_minutes_before: u32,
    /// Delegated contact ids to fan reminders out to.
    notify_contact_ids: Vec<i64>,
    /// Optional custom message template.
    custom_message: Option<String>,
    /// The recurrence rule.
    recurrence: String,
    /// Optional inclusive end of the recurrence series.
    recurrence_end_date: Option<String>,
    /// Lifecycle status ("pending" or "done").
    status: String,
}

/// API response for listing commitments.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListCommitmentsApiResponse {
    /// The profile ID.
    profile_id: i64,
    /// The profile's commitments in schedule order.
    commitments: Vec<CommitmentResponse>,
}

/// Serializable representation of a delivery-log row for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NotificationLogResponse {
    /// The log row ID.
    log_id: i64,
    /// The commitment this attempt belonged to, if it still exists.
    commitment_id: Option<i64>,
    /// The threshold kind that fired ("days", "hours", "minutes", "ontime").
    reminder_type: String,
    /// The normalized recipient address.
    recipient_address: String,
    /// Truncated preview of the rendered message.
    message_preview: String,
    /// Delivery outcome ("sent" or "failed").
    status: String,
    /// Gateway error text for failed attempts.
    error_message: Option<String>,
    /// Timestamp of the attempt.
    created_at: String,
}

/// API response for listing the delivery history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListNotificationsApiResponse {
    /// The profile ID.
    profile_id: i64,
    /// The profile's delivery history, newest first.
    notifications: Vec<NotificationLogResponse>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ProfileNotFound(_)
            | PersistenceError::CommitmentNotFound(_)
            | PersistenceError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            _ => {
                error!(error = %err, "Persistence error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Persistence error: {err}"),
                }
            }
        }
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

/// Parses a category string into a `Category`.
fn parse_category(category_str: &str) -> Result<Category, HttpError> {
    Category::from_str(category_str).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })
}

/// Parses a recurrence string into a `RecurrenceRule`.
fn parse_recurrence(recurrence_str: &str) -> Result<RecurrenceRule, HttpError> {
    RecurrenceRule::from_str(recurrence_str).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })
}

/// Parses a `YYYY-MM-DD` date string.
fn parse_date(date_str: &str, field: &str) -> Result<NaiveDate, HttpError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid {field}: '{date_str}'. Expected YYYY-MM-DD"),
    })
}

/// Parses an `HH:MM` time string.
fn parse_time(time_str: &str) -> Result<NaiveTime, HttpError> {
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M:%S"))
        .map_err(|_| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid commitment_time: '{time_str}'. Expected HH:MM"),
        })
}

/// Converts a `ContactRecord` to a `ContactResponse`.
fn contact_to_response(record: ContactRecord) -> ContactResponse {
    ContactResponse {
        contact_id: record.contact_id,
        name: record.name,
        whatsapp_number: record.whatsapp_number,
        relationship: record.relationship,
    }
}

/// Converts a `Commitment` to a `CommitmentResponse`.
fn commitment_to_response(commitment: &Commitment) -> CommitmentResponse {
    CommitmentResponse {
        commitment_id: commitment.commitment_id,
        parent_commitment_id: commitment.parent_commitment_id,
        category: commitment.category.as_str().to_string(),
        title: commitment.title.clone(),
        description: commitment.description.clone(),
        commitment_date: commitment.commitment_date.format("%Y-%m-%d").to_string(),
        commitment_time: commitment.commitment_time.format("%H:%M").to_string(),
        location: commitment.location.clone(),
        provider_name: commitment.provider_name.clone(),
        remind_days_before: commitment.remind_days_before,
        remind_hours_before: commitment.remind_hours_before,
        remind_minutes_before: commitment.remind_minutes_before,
        notify_contact_ids: commitment.notify_contact_ids.clone(),
        custom_message: commitment.custom_message.clone(),
        recurrence: commitment.recurrence.as_str().to_string(),
        recurrence_end_date: commitment
            .recurrence_end_date
            .map(|d| d.format("%Y-%m-%d").to_string()),
        status: commitment.status.as_str().to_string(),
    }
}

/// Converts a `NotificationLogRecord` to a `NotificationLogResponse`.
fn notification_to_response(record: NotificationLogRecord) -> NotificationLogResponse {
    NotificationLogResponse {
        log_id: record.log_id,
        commitment_id: record.commitment_id,
        reminder_type: record.reminder_type,
        recipient_address: record.recipient_address,
        message_preview: record.message_preview,
        status: record.status,
        error_message: record.error_message,
        created_at: record.created_at,
    }
}

/// Handler for POST `/profiles` endpoint.
///
/// Creates a new profile.
async fn handle_create_profile(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProfileApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(name = %req.name, "Handling create_profile request");

    let mut persistence = app_state.persistence.lock().await;
    let profile_id: i64 =
        persistence.create_profile(&req.name, req.whatsapp_number.as_deref())?;
    drop(persistence);

    info!(profile_id = profile_id, "Successfully created profile");

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Created profile '{}'", req.name)),
        id: Some(profile_id),
    }))
}

/// Handler for GET `/profiles/{profile_id}` endpoint.
async fn handle_get_profile(
    AxumState(app_state): AxumState<AppState>,
    Path(profile_id): Path<i64>,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(profile_id = profile_id, "Handling get_profile request");

    let mut persistence = app_state.persistence.lock().await;
    let profile: ProfileRecord = persistence.get_profile(profile_id)?;
    drop(persistence);

    Ok(Json(ProfileResponse {
        profile_id: profile.profile_id,
        name: profile.name,
        whatsapp_number: profile.whatsapp_number,
        created_at: profile.created_at,
    }))
}

/// Handler for POST `/contacts` endpoint.
///
/// Creates a delegated contact under a profile.
async fn handle_create_contact(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateContactApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        profile_id = req.profile_id,
        name = %req.name,
        "Handling create_contact request"
    );

    let mut persistence = app_state.persistence.lock().await;
    // Surface a 404 rather than a foreign-key failure for unknown profiles.
    persistence.get_profile(req.profile_id)?;
    let contact_id: i64 = persistence.create_contact(
        req.profile_id,
        &req.name,
        &req.whatsapp_number,
        &req.relationship,
    )?;
    drop(persistence);

    info!(contact_id = contact_id, "Successfully created contact");

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Created contact '{}'", req.name)),
        id: Some(contact_id),
    }))
}

/// Handler for GET `/contacts` endpoint.
///
/// Lists the delegated contacts of a profile.
async fn handle_list_contacts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProfileScopeQuery>,
) -> Result<Json<ListContactsApiResponse>, HttpError> {
    info!(
        profile_id = query.profile_id,
        "Handling list_contacts request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let contacts: Vec<ContactRecord> = persistence.list_contacts(query.profile_id)?;
    drop(persistence);

    Ok(Json(ListContactsApiResponse {
        profile_id: query.profile_id,
        contacts: contacts.into_iter().map(contact_to_response).collect(),
    }))
}

/// Handler for DELETE `/contacts/{contact_id}` endpoint.
async fn handle_delete_contact(
    AxumState(app_state): AxumState<AppState>,
    Path(contact_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(contact_id = contact_id, "Handling delete_contact request");

    let mut persistence = app_state.persistence.lock().await;
    persistence.delete_contact(contact_id)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted contact {contact_id}")),
        id: Some(contact_id),
    }))
}

/// Handler for POST `/commitments` endpoint.
///
/// Validates and persists a commitment, then materializes its
/// recurrence occurrences as child rows.
async fn handle_create_commitment(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCommitmentApiRequest>,
) -> Result<Json<CreateCommitmentApiResponse>, HttpError> {
    info!(
        profile_id = req.profile_id,
        title = %req.title,
        "Handling create_commitment request"
    );

    let category: Category = parse_category(&req.category)?;
    let recurrence: RecurrenceRule = parse_recurrence(&req.recurrence)?;
    let commitment_date: NaiveDate = parse_date(&req.commitment_date, "commitment_date")?;
    let commitment_time: NaiveTime = parse_time(&req.commitment_time)?;
    let recurrence_end_date: Option<NaiveDate> = match &req.recurrence_end_date {
        Some(end) => Some(parse_date(end, "recurrence_end_date")?),
        None => None,
    };

    let commitment: Commitment = Commitment {
        commitment_id: None,
        profile_id: req.profile_id,
        parent_commitment_id: None,
        category,
        title: req.title.clone(),
        description: req.description,
        commitment_date,
        commitment_time,
        location: req.location,
        provider_name: req.provider_name,
        remind_days_before: req.remind_days_before,
        remind_hours_before: req.remind_hours_before,
        remind_minutes_before: req.remind_minutes_before,
        notify_contact_ids: req.notify_contact_ids,
        custom_message: req.custom_message,
        recurrence,
        recurrence_end_date,
        status: CommitmentStatus::Pending,
        fired: FiredThresholds::empty(),
    };

    validate_commitment_fields(&commitment)?;

    // Expand before touching the database so an invalid series leaves
    // no partial rows behind.
    let occurrence_dates: Vec<NaiveDate> =
        expand_occurrences(commitment_date, recurrence, recurrence_end_date)?;

    let mut persistence = app_state.persistence.lock().await;
    persistence.get_profile(req.profile_id)?;
    let seed_id: i64 = persistence.insert_commitment(&commitment)?;
    for date in &occurrence_dates {
        let child: Commitment = commitment.child_occurrence(*date, seed_id);
        persistence.insert_commitment(&child)?;
    }
    drop(persistence);

    info!(
        commitment_id = seed_id,
        occurrences = occurrence_dates.len(),
        "Successfully created commitment"
    );

    Ok(Json(CreateCommitmentApiResponse {
        success: true,
        commitment_id: seed_id,
        occurrences_created: occurrence_dates.len(),
        message: format!("Created commitment '{}'", req.title),
    }))
}

/// Handler for GET `/commitments` endpoint.
///
/// Lists a profile's commitments in schedule order.
async fn handle_list_commitments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProfileScopeQuery>,
) -> Result<Json<ListCommitmentsApiResponse>, HttpError> {
    info!(
        profile_id = query.profile_id,
        "Handling list_commitments request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let commitments: Vec<Commitment> = persistence.list_commitments(query.profile_id)?;
    drop(persistence);

    Ok(Json(ListCommitmentsApiResponse {
        profile_id: query.profile_id,
        commitments: commitments.iter().map(commitment_to_response).collect(),
    }))
}

/// Handler for POST `/commitments/{commitment_id}/complete` endpoint.
///
/// Marks a commitment done, ending its reminder eligibility.
async fn handle_complete_commitment(
    AxumState(app_state): AxumState<AppState>,
    Path(commitment_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        commitment_id = commitment_id,
        "Handling complete_commitment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    persistence.mark_commitment_done(commitment_id)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Marked commitment {commitment_id} done")),
        id: Some(commitment_id),
    }))
}

/// Handler for DELETE `/commitments/{commitment_id}` endpoint.
///
/// Deletes a commitment. Materialized recurrence children go with the
/// seed; delivery history is retained.
async fn handle_delete_commitment(
    AxumState(app_state): AxumState<AppState>,
    Path(commitment_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        commitment_id = commitment_id,
        "Handling delete_commitment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    persistence.delete_commitment(commitment_id)?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted commitment {commitment_id}")),
        id: Some(commitment_id),
    }))
}

/// Handler for GET `/notifications` endpoint.
///
/// Lists a profile's delivery history, newest first.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListNotificationsApiResponse>, HttpError> {
    info!(
        profile_id = query.profile_id,
        limit = query.limit,
        "Handling list_notifications request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let logs: Vec<NotificationLogRecord> =
        persistence.list_notification_logs(query.profile_id, query.limit)?;
    drop(persistence);

    Ok(Json(ListNotificationsApiResponse {
        profile_id: query.profile_id,
        notifications: logs.into_iter().map(notification_to_response).collect(),
    }))
}

/// Handler for POST `/sweep` endpoint.
///
/// Runs one reminder sweep over every pending commitment and returns
/// the per-commitment result lines.
async fn handle_run_sweep(
    AxumState(app_state): AxumState<AppState>,
) -> Json<SweepSummary> {
    info!("Handling run_sweep request");

    let summary: SweepSummary = app_state.dispatcher.run_sweep().await;

    info!(
        processed = summary.processed,
        success = summary.success,
        "Sweep finished"
    );

    Json(summary)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/profiles", post(handle_create_profile))
        .route("/profiles/{profile_id}", get(handle_get_profile))
        .route("/contacts", post(handle_create_contact))
        .route("/contacts", get(handle_list_contacts))
        .route("/contacts/{contact_id}", delete(handle_delete_contact))
        .route("/commitments", post(handle_create_commitment))
        .route("/commitments", get(handle_list_commitments))
        .route(
            "/commitments/{commitment_id}/complete",
            post(handle_complete_commitment),
        )
        .route(
            "/commitments/{commitment_id}",
            delete(handle_delete_commitment),
        )
        .route("/notifications", get(handle_list_notifications))
        .route("/sweep", post(handle_run_sweep))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing WhatsPing Server");

    // The gateway configuration is fatal at startup: a sweep with no
    // credentials could never deliver anything.
    let gateway_config: EvolutionConfig = EvolutionConfig::from_env()?;
    let gateway: EvolutionGateway = EvolutionGateway::new(gateway_config)?;

    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|_| format!("Invalid timezone: '{}'", args.timezone))?;

    // Initialize persistence based on CLI arguments
    let persistence: Persistence = if let Some(mysql_url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(mysql_url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let store: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
    let gateway: Arc<dyn MessagingGateway> = Arc::new(gateway);
    let dispatcher: Dispatcher = Dispatcher::new(Arc::clone(&store), gateway, timezone);

    let app_state: AppState = AppState {
        persistence: store,
        dispatcher: Arc::new(dispatcher),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
