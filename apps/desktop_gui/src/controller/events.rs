//! Events flowing from the file worker back to the form UI.

use form_core::ProofPreview;

use crate::backend_bridge::commands::ProofToken;

pub enum UiEvent {
    Info(String),
    ProofPreviewLoaded {
        token: ProofToken,
        preview: Box<ProofPreview>,
    },
    ProofPreviewFailed {
        token: ProofToken,
        reason: String,
    },
}

/// Maps a raw read/decode failure onto the short guidance shown in the
/// inline preview state.
pub fn classify_preview_failure(reason: &str) -> String {
    let lower = reason.to_ascii_lowercase();
    if lower.contains("no such file")
        || lower.contains("not found")
        || lower.contains("permission denied")
    {
        "The file could not be read; it may have been moved or deleted. Pick it again.".to_string()
    } else if lower.contains("decode") || lower.contains("format") || lower.contains("unsupported")
    {
        "The image could not be decoded; the file may be corrupted.".to_string()
    } else {
        format!("Preview failed: {reason}")
    }
}
