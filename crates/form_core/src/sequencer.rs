//! Submission sequencing: Editing -> Submitted -> (after a fixed delay)
//! Editing. The reset deadline lives inside the sequencer and is polled by
//! the owning component, so no callback can outlive the UI.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::{FieldErrors, ReimbursementDraft};
use crate::proof::ProofFile;
use crate::validate::{parse_amount, validate};

/// How long the submitted banner is held before the form resets.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

/// Verification status of a recorded request. Requests never advance past
/// pending here; verification happens outside this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    PendingVerification,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::PendingVerification => "Pending Verification",
        }
    }
}

/// A draft frozen at the moment of a validated submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimbursementRequest {
    pub request_id: Uuid,
    pub full_name: String,
    pub whatsapp_number: String,
    pub purpose: String,
    pub amount: u64,
    pub expense_date: String,
    pub proof: ProofFile,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Local>,
}

enum Phase {
    Editing,
    Submitted {
        request: ReimbursementRequest,
        reset_at: Instant,
    },
}

pub enum SubmitOutcome {
    /// Validated and recorded; the submitted banner should show.
    Submitted,
    /// A submission is already being held; nothing changed.
    AlreadyPending,
    /// Validation failed; the map replaces the caller's error state.
    Rejected(FieldErrors),
}

pub struct SubmitSequencer {
    phase: Phase,
}

impl Default for SubmitSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Editing,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted { .. })
    }

    pub fn submitted_request(&self) -> Option<&ReimbursementRequest> {
        match &self.phase {
            Phase::Submitted { request, .. } => Some(request),
            Phase::Editing => None,
        }
    }

    /// Editing -> Submitted, but only with a clean validation report. On
    /// success the draft is frozen into a request record and the reset
    /// deadline is armed.
    pub fn submit(&mut self, draft: &ReimbursementDraft, now: Instant) -> SubmitOutcome {
        if self.is_submitted() {
            return SubmitOutcome::AlreadyPending;
        }

        let errors = validate(draft);
        match draft.proof.clone() {
            Some(proof) if errors.is_empty() => {
                let request = freeze(draft, proof);
                log_simulated_submission(&request);
                self.phase = Phase::Submitted {
                    request,
                    reset_at: now + RESET_DELAY,
                };
                SubmitOutcome::Submitted
            }
            _ => SubmitOutcome::Rejected(errors),
        }
    }

    /// Fires the pending reset once its deadline passes. Returns true when
    /// the owner should rebuild its draft with fresh defaults.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Phase::Submitted { reset_at, .. } = &self.phase {
            if now >= *reset_at {
                self.phase = Phase::Editing;
                return true;
            }
        }
        false
    }

    pub fn time_until_reset(&self, now: Instant) -> Option<Duration> {
        match &self.phase {
            Phase::Submitted { reset_at, .. } => Some(reset_at.saturating_duration_since(now)),
            Phase::Editing => None,
        }
    }
}

fn freeze(draft: &ReimbursementDraft, proof: ProofFile) -> ReimbursementRequest {
    ReimbursementRequest {
        request_id: Uuid::new_v4(),
        full_name: draft.full_name.trim().to_string(),
        whatsapp_number: draft.whatsapp_number.trim().to_string(),
        purpose: draft.purpose.trim().to_string(),
        amount: parse_amount(&draft.amount_raw),
        expense_date: draft.expense_date.trim().to_string(),
        proof,
        status: RequestStatus::PendingVerification,
        submitted_at: Local::now(),
    }
}

/// No network submission exists; the record is logged locally and held only
/// until the reset fires.
fn log_simulated_submission(request: &ReimbursementRequest) {
    match serde_json::to_string(request) {
        Ok(payload) => {
            tracing::info!(
                request_id = %request.request_id,
                payload = %payload,
                "recorded reimbursement request"
            );
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request.request_id,
                "failed to serialize request record: {err}"
            );
        }
    }
}
