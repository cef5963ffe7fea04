//! Snapshot decoding

use shared::ImportSnapshot;
use thiserror::Error;

/// Errors raised while decoding a snapshot payload
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("malformed snapshot payload: {reason}")]
    MalformedPayload { reason: String },
}

/// Turns raw snapshot bytes into an `ImportSnapshot`.
///
/// The version is carried through untouched; the reconciliation service
/// decides whether it is supported.
pub struct SnapshotDecoder;

impl SnapshotDecoder {
    pub fn decode(bytes: &[u8]) -> Result<ImportSnapshot, DecodeError> {
        let mut snapshot: ImportSnapshot =
            serde_json::from_slice(bytes).map_err(|e| DecodeError::MalformedPayload {
                reason: e.to_string(),
            })?;

        snapshot.byte_size = bytes.len();
        tracing::debug!(
            "Decoded snapshot version {} with {} items ({} bytes)",
            snapshot.version,
            snapshot.items.len(),
            snapshot.byte_size
        );
        Ok(snapshot)
    }
}
