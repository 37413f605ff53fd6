//! Error types for fuzzy hash generation.

use thiserror::Error;

/// Errors surfaced by the hashing API.
///
/// The pure hashing path is total: feeding bytes never fails. Errors can
/// only arise at finalisation (too little input) or from the byte source
/// backing a streaming adapter.
#[derive(Debug, Error)]
pub enum CtphError {
    /// Finalisation was attempted on fewer bytes than a fuzzy hash can
    /// meaningfully summarise.
    #[error("input of {size} bytes is below the {min}-byte minimum", min = crate::hasher::MIN_INPUT_SIZE)]
    InputTooSmall { size: u64 },

    /// The external byte source failed mid-stream; the partial hash state
    /// is discarded.
    #[error("failed to read from byte source")]
    SourceRead(#[from] std::io::Error),
}

/// Result type alias for hashing operations.
pub type Result<T> = std::result::Result<T, CtphError>;
