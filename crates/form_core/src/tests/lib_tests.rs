use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::draft::{today_string, Field, FieldErrors, ReimbursementDraft};
use crate::proof::ProofFile;
use crate::sequencer::{RequestStatus, SubmitOutcome, SubmitSequencer, RESET_DELAY};

fn stub_proof() -> ProofFile {
    ProofFile {
        path: PathBuf::from("/tmp/receipt.png"),
        filename: "receipt.png".to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 102_400,
    }
}

fn valid_draft() -> ReimbursementDraft {
    let mut draft = ReimbursementDraft::with_today();
    draft.full_name = "  Budi Santoso ".to_string();
    draft.whatsapp_number = "081234567890".to_string();
    draft.purpose = "Consumables for the committee meeting".to_string();
    draft.amount_raw = "250000".to_string();
    draft.attach_proof(stub_proof());
    draft
}

#[test]
fn fresh_draft_defaults_to_today_and_empty_fields() {
    let draft = ReimbursementDraft::with_today();
    assert_eq!(draft.expense_date, today_string());
    assert!(draft.full_name.is_empty());
    assert!(draft.whatsapp_number.is_empty());
    assert!(draft.purpose.is_empty());
    assert!(draft.amount_raw.is_empty());
    assert!(draft.proof.is_none());
}

#[test]
fn field_errors_clear_individually() {
    let mut errors = FieldErrors::new();
    errors.insert(Field::FullName, "Full name is required");
    errors.insert(Field::Amount, "Reimbursement amount is required");
    assert_eq!(errors.len(), 2);

    errors.clear(Field::FullName);
    assert!(errors.get(Field::FullName).is_none());
    assert_eq!(
        errors.get(Field::Amount),
        Some("Reimbursement amount is required")
    );

    let listed: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(listed, vec![Field::Amount]);
}

#[test]
fn validated_submit_freezes_the_draft() {
    let mut sequencer = SubmitSequencer::new();
    let draft = valid_draft();
    let start = Instant::now();

    assert!(matches!(
        sequencer.submit(&draft, start),
        SubmitOutcome::Submitted
    ));
    assert!(sequencer.is_submitted());

    let request = sequencer.submitted_request().expect("frozen request");
    assert_eq!(request.full_name, "Budi Santoso");
    assert_eq!(request.whatsapp_number, "081234567890");
    assert_eq!(request.amount, 250_000);
    assert_eq!(request.proof.filename, "receipt.png");
    assert_eq!(request.status, RequestStatus::PendingVerification);
    assert_eq!(request.status.label(), "Pending Verification");
}

#[test]
fn invalid_submit_stays_in_editing_with_the_failing_fields() {
    let mut sequencer = SubmitSequencer::new();
    let mut draft = valid_draft();
    draft.full_name = "   ".to_string();

    let outcome = sequencer.submit(&draft, Instant::now());
    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected a rejected submit");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.get(Field::FullName).is_some());
    assert!(!sequencer.is_submitted());
    assert!(sequencer.submitted_request().is_none());
}

#[test]
fn second_submit_while_pending_is_a_no_op() {
    let mut sequencer = SubmitSequencer::new();
    let draft = valid_draft();
    let start = Instant::now();

    assert!(matches!(
        sequencer.submit(&draft, start),
        SubmitOutcome::Submitted
    ));
    assert!(matches!(
        sequencer.submit(&draft, start + Duration::from_secs(1)),
        SubmitOutcome::AlreadyPending
    ));
}

#[test]
fn reset_fires_only_after_the_full_delay() {
    let mut sequencer = SubmitSequencer::new();
    let draft = valid_draft();
    let start = Instant::now();
    sequencer.submit(&draft, start);

    assert!(!sequencer.poll(start + Duration::from_secs(4)));
    assert!(sequencer.is_submitted());

    assert!(sequencer.poll(start + RESET_DELAY));
    assert!(!sequencer.is_submitted());
    assert!(sequencer.submitted_request().is_none());

    // Fired once; later polls are quiet.
    assert!(!sequencer.poll(start + RESET_DELAY + Duration::from_secs(1)));
}

#[test]
fn time_until_reset_counts_down_and_clears() {
    let mut sequencer = SubmitSequencer::new();
    assert!(sequencer.time_until_reset(Instant::now()).is_none());

    let draft = valid_draft();
    let start = Instant::now();
    sequencer.submit(&draft, start);

    let remaining = sequencer
        .time_until_reset(start + Duration::from_secs(2))
        .expect("pending reset");
    assert_eq!(remaining, Duration::from_secs(3));

    let after = sequencer
        .time_until_reset(start + Duration::from_secs(9))
        .expect("pending reset");
    assert_eq!(after, Duration::ZERO);
}

#[test]
fn request_record_serializes_with_snake_case_status() {
    let mut sequencer = SubmitSequencer::new();
    let draft = valid_draft();
    sequencer.submit(&draft, Instant::now());

    let request = sequencer.submitted_request().expect("frozen request");
    let json = serde_json::to_string(request).expect("serialize request");
    assert!(json.contains("\"status\":\"pending_verification\""));
    assert!(json.contains("\"amount\":250000"));
}
