//! Core logic for the reimbursement request desk: draft state, field
//! validation, proof-image handling, currency display formatting, and the
//! submit-then-reset sequencer. UI-free; the desktop app drives it.

pub mod currency;
pub mod draft;
pub mod proof;
pub mod sequencer;
pub mod validate;

pub use currency::{format_amount, rupiah, strip_non_digits, CurrencyLocale};
pub use draft::{today_string, Field, FieldErrors, ReimbursementDraft};
pub use proof::{
    data_uri, decode_proof_preview, load_proof_preview, ProofError, ProofFile, ProofPreview,
    ACCEPTED_MIME_TYPES, MAX_PROOF_BYTES,
};
pub use sequencer::{
    ReimbursementRequest, RequestStatus, SubmitOutcome, SubmitSequencer, RESET_DELAY,
};
pub use validate::{parse_amount, validate, MIN_AMOUNT_RUPIAH};

#[cfg(test)]
mod tests;
