//! Command orchestration from UI actions to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::LoadProofPreview { .. } => "load_proof_preview",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->worker command"),
        Err(TrySendError::Full(_)) => {
            *status = "The file worker is busy; pick the file again in a moment".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "The file worker stopped; previews are unavailable until restart".to_string();
        }
    }
}
