// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The sweep itself: evaluate, resolve, render, send, persist.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use whatsping_domain::{
    Commitment, Recipient, ReminderThreshold, ThresholdKind, WindowState, evaluate_window,
    render_message,
};
use whatsping_gateway::MessagingGateway;
use whatsping_persistence::{NewNotificationLog, Persistence};

use crate::resolver::{Resolution, resolve_recipients};

/// Characters of the rendered message kept in each log row.
const MESSAGE_PREVIEW_MAX_CHARS: usize = 160;

/// Characters of gateway error text kept in each log row.
const ERROR_TEXT_MAX_CHARS: usize = 500;

/// Observability summary returned by one sweep.
///
/// Consumed by the trigger surface only; correctness never depends on
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    /// False only when the working set could not be loaded at all.
    pub success: bool,
    /// Number of result entries produced.
    pub processed: usize,
    /// One human-readable line per send, failure, or skip.
    pub details: Vec<String>,
    /// When the sweep ran, RFC 3339.
    pub timestamp: String,
}

/// Orchestrates sweeps over the commitment store.
///
/// Holds the store behind a mutex and the gateway behind a trait object
/// so tests can substitute an in-memory double for either.
pub struct Dispatcher {
    store: Arc<Mutex<Persistence>>,
    gateway: Arc<dyn MessagingGateway>,
    timezone: Tz,
}

/// Truncates to a character budget without splitting a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// # Arguments
    ///
    /// * `store` - The shared commitment store
    /// * `gateway` - The outbound messaging gateway
    /// * `timezone` - The civil timezone all commitment date/times are
    ///   interpreted in
    #[must_use]
    pub fn new(
        store: Arc<Mutex<Persistence>>,
        gateway: Arc<dyn MessagingGateway>,
        timezone: Tz,
    ) -> Self {
        Self {
            store,
            gateway,
            timezone,
        }
    }

    /// Runs one sweep at the current wall-clock time.
    pub async fn run_sweep(&self) -> SweepSummary {
        let now: DateTime<Tz> = Utc::now().with_timezone(&self.timezone);
        self.run_sweep_at(now).await
    }

    /// Runs one sweep at an explicit instant.
    ///
    /// Split out from [`run_sweep`](Self::run_sweep) so tests control
    /// the clock.
    pub async fn run_sweep_at(&self, now: DateTime<Tz>) -> SweepSummary {
        let timestamp: String = now.to_rfc3339();

        let pending: Vec<Commitment> = match self.store.lock().await.list_pending_commitments() {
            Ok(pending) => pending,
            Err(e) => {
                warn!("Sweep aborted, could not load pending commitments: {e}");
                return SweepSummary {
                    success: false,
                    processed: 0,
                    details: vec![format!("Failed to load pending commitments: {e}")],
                    timestamp,
                };
            }
        };

        info!("Sweep evaluating {} pending commitment(s)", pending.len());

        let mut details: Vec<String> = Vec::new();
        for commitment in &pending {
            self.process_commitment(commitment, &now, &mut details)
                .await;
        }

        SweepSummary {
            success: true,
            processed: details.len(),
            details,
            timestamp,
        }
    }

    /// Evaluates and, when due, delivers one commitment's reminder.
    ///
    /// Per (commitment, threshold) tuple the order is strict: read flags
    /// (already loaded), check window, send, log, write flag. The flag
    /// is written only when every recipient succeeded, so a partial
    /// failure retries all recipients on the next sweep.
    async fn process_commitment(
        &self,
        commitment: &Commitment,
        now: &DateTime<Tz>,
        details: &mut Vec<String>,
    ) {
        let Some(commitment_id) = commitment.commitment_id else {
            return;
        };

        let threshold: Option<ReminderThreshold> = match evaluate_window(commitment, now) {
            Ok(WindowState::DueBefore(threshold)) => Some(threshold),
            Ok(WindowState::DueOnTime) => None,
            Ok(WindowState::NotDue | WindowState::Expired | WindowState::AlreadyFired) => return,
            Err(e) => {
                details.push(format!(
                    "Failed to evaluate \"{}\": {e}",
                    commitment.title
                ));
                return;
            }
        };
        let kind: ThresholdKind = threshold
            .as_ref()
            .map_or(ThresholdKind::OnTime, |threshold| threshold.kind);

        let resolution = {
            let mut store = self.store.lock().await;
            resolve_recipients(&mut store, commitment)
        };
        let recipients: Vec<Recipient> = match resolution {
            Ok(Resolution::Recipients(recipients)) => recipients,
            Ok(Resolution::NoOwnerAddress { owner_name }) => {
                details.push(format!(
                    "Skipped \"{}\" for {owner_name}: no WhatsApp number on file",
                    commitment.title
                ));
                return;
            }
            Err(e) => {
                details.push(format!(
                    "Failed to resolve recipients for \"{}\": {e}",
                    commitment.title
                ));
                return;
            }
        };

        let mut all_sent: bool = true;
        for recipient in &recipients {
            let message: String =
                render_message(&recipient.display_name, commitment, threshold.as_ref());

            let send_result = self.gateway.send_text(&recipient.address, &message).await;

            let entry: NewNotificationLog = NewNotificationLog {
                profile_id: commitment.profile_id,
                commitment_id: Some(commitment_id),
                reminder_type: kind.as_str().to_string(),
                recipient_address: recipient.address.clone(),
                message_preview: truncate_chars(&message, MESSAGE_PREVIEW_MAX_CHARS),
                status: if send_result.is_ok() { "sent" } else { "failed" }.to_string(),
                error_message: send_result
                    .as_ref()
                    .err()
                    .map(|e| truncate_chars(&e.to_string(), ERROR_TEXT_MAX_CHARS)),
            };
            if let Err(e) = self.store.lock().await.append_notification_log(&entry) {
                // Log append is fire-and-forget: dispatch carries on.
                warn!("Could not append delivery log for commitment {commitment_id}: {e}");
            }

            match send_result {
                Ok(()) => {
                    details.push(format!(
                        "Sent {kind} reminder for \"{}\" to {}",
                        commitment.title, recipient.address
                    ));
                }
                Err(e) => {
                    all_sent = false;
                    details.push(format!("Failed {kind} for \"{}\": {e}", commitment.title));
                }
            }
        }

        if all_sent {
            if let Err(e) = self
                .store
                .lock()
                .await
                .set_notified_flag(commitment_id, kind)
            {
                warn!("Could not mark {kind} fired for commitment {commitment_id}: {e}");
                details.push(format!(
                    "Failed to mark {kind} fired for \"{}\": {e}",
                    commitment.title
                ));
            }
        }
    }
}
