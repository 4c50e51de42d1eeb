//! Error type shared by every hasher and by digest parsing.

/// Errors reported by hashers and digest parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// `update` or `finalize` was called after the digest was produced.
    #[error("hash computation already finalized")]
    Finalized,

    /// A digest literal contained a non-hexadecimal character.
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidEncoding { position: usize, character: char },

    /// A digest literal, byte slice or output buffer had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid BLAKE2b output length {0}, must be between 1 and 64")]
    InvalidOutputLength(usize),

    #[error("invalid BLAKE2b key length {0}, must be at most 64")]
    InvalidKeyLength(usize),
}
