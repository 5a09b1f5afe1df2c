/// Consent gate
///
/// Runs before any audio is touched. The record must be a JSON object
/// whose `consent` field is literally `true`.
use std::io;
use std::path::{Path, PathBuf};
use stylizer_core::ConsentRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("Consent record {path} could not be read: {source}")]
    Missing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Consent record {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Consent check failed: 'consent' must be true in the consent record")]
    NotGranted,
}

/// Load the consent record at `path` and make sure consent was granted
pub fn require_consent(path: &Path) -> Result<ConsentRecord, ConsentError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConsentError::Missing {
        path: path.to_path_buf(),
        source,
    })?;

    let malformed = |source| ConsentError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(&contents).map_err(malformed)?;
    if value.get("consent").is_none() {
        return Err(ConsentError::NotGranted);
    }

    let record: ConsentRecord = serde_json::from_value(value).map_err(malformed)?;
    if !record.is_granted() {
        return Err(ConsentError::NotGranted);
    }

    tracing::info!(
        "Reference speaker: {} (scope: {})",
        record.speaker_name(),
        record.scope()
    );

    Ok(record)
}
