//! Proof-of-expense image handling: acceptance checks at pick time and the
//! asynchronous preview derivation.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard cap on an accepted proof image: 5 MiB.
pub const MAX_PROOF_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types the form accepts. ".jpg" and ".jpeg" both resolve to
/// image/jpeg.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

#[derive(Debug, Error)]
pub enum ProofError {
    /// Display text doubles as the inline field error.
    #[error("File must be a JPG, JPEG, or PNG image")]
    UnsupportedFormat { mime_type: String },
    #[error("File size must not exceed 5 MB")]
    TooLarge { size_bytes: u64 },
    #[error("failed to read proof image: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode proof image: {0}")]
    Decode(String),
}

/// An accepted file handle. Stored in the draft the moment the selection
/// passes the type and size checks; the preview arrives later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofFile {
    pub path: PathBuf,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ProofFile {
    /// Validates a picked file before it is stored. A rejected file never
    /// reaches the draft; the caller surfaces the error next to the field.
    pub fn from_path(path: &Path) -> Result<Self, ProofError> {
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(ProofError::UnsupportedFormat { mime_type });
        }

        let size_bytes = fs::metadata(path)?.len();
        if size_bytes > MAX_PROOF_BYTES {
            return Err(ProofError::TooLarge { size_bytes });
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "proof".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            mime_type,
            size_bytes,
        })
    }
}

/// Derived preview of an accepted proof image: thumbnail pixels for the GUI
/// texture plus the embeddable data URI representation.
#[derive(Clone)]
pub struct ProofPreview {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
    pub data_uri: String,
}

/// `data:<mime>;base64,<payload>` over the raw file bytes.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Decodes the proof bytes into a preview, thumbnailing to at most
/// 1024x1024.
pub fn decode_proof_preview(mime_type: &str, bytes: &[u8]) -> Result<ProofPreview, ProofError> {
    let dynamic =
        image::load_from_memory(bytes).map_err(|err| ProofError::Decode(err.to_string()))?;
    let resized = dynamic.thumbnail(1024, 1024).to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(ProofPreview {
        width,
        height,
        rgba: resized.into_raw(),
        data_uri: data_uri(mime_type, bytes),
    })
}

/// Reads and decodes the stored proof in one explicit task. A failure here
/// surfaces as a preview error state instead of a silent miss.
pub async fn load_proof_preview(file: &ProofFile) -> Result<ProofPreview, ProofError> {
    let bytes = tokio::fs::read(&file.path).await?;
    // The file may have changed on disk between pick and read.
    if bytes.len() as u64 > MAX_PROOF_BYTES {
        return Err(ProofError::TooLarge {
            size_bytes: bytes.len() as u64,
        });
    }
    tracing::debug!(
        file = %file.path.display(),
        size_bytes = bytes.len(),
        "decoding proof preview"
    );
    decode_proof_preview(&file.mime_type, &bytes)
}
