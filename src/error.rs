use thiserror::Error;

/// Every failure the cipher can report.
///
/// Nothing is retried and nothing is coerced into a default: an operation
/// either returns its full output or one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BmdopeError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("secure randomness source unavailable")]
    EntropyUnavailable,

    #[error("ciphertext too short: need at least {minimum} bytes, got {actual}")]
    CiphertextTooShort { minimum: usize, actual: usize },

    /// Metadata failed authentication, did not parse, or does not account
    /// for exactly the block region.
    #[error("encrypted metadata failed integrity check")]
    MetadataIntegrity,

    #[error("block width mismatch or unrecoverable padding")]
    BlockWidthMismatch,

    #[error("value is not representable in the configured domain")]
    UnsupportedValueDomain,

    /// A ciphertext block does not decrypt to a value its subkey could have produced.
    #[error("ciphertext block {index} is corrupt")]
    CorruptBlock { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, BmdopeError>;
