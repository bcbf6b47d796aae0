//! Worker thread owning the async runtime for file reads and preview
//! decoding.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use form_core::load_proof_preview;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Background file worker failed to start: {err}"
                )));
                tracing::error!("failed to build worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("proof worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadProofPreview { token, file } => {
                        match load_proof_preview(&file).await {
                            Ok(preview) => {
                                let _ = ui_tx.try_send(UiEvent::ProofPreviewLoaded {
                                    token,
                                    preview: Box::new(preview),
                                });
                            }
                            Err(err) => {
                                tracing::warn!(
                                    file = %file.path.display(),
                                    "proof preview failed: {err}"
                                );
                                let _ = ui_tx.try_send(UiEvent::ProofPreviewFailed {
                                    token,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
            tracing::debug!("command channel closed; proof worker exiting");
        });
    });
}
