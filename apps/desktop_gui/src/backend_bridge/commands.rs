//! Backend commands queued from UI to the file worker.

use form_core::ProofFile;

/// Identifies one proof selection. Each new pick bumps the token so a
/// completion from a superseded selection can be discarded on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofToken(pub u64);

pub enum BackendCommand {
    /// Read and decode the accepted proof image off the UI thread.
    LoadProofPreview { token: ProofToken, file: ProofFile },
}
