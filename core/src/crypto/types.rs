use std::fmt;

/// Block-scoped cryptographic failures. None of these abort the run; the
/// orchestrator records the issue and drops the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Payload too short to hold the declared nonce plus the AEAD tag.
    ShortPayload { need: usize, have: usize },

    /// Header declares a nonce length the cipher does not support.
    UnsupportedNonceLen { requested: usize, supported: usize },

    /// Key lookup returned nothing for this block.
    MissingKey { block_id: u16 },

    /// AEAD tag mismatch. Fails closed: no partial plaintext, never retried.
    AuthenticationFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::ShortPayload { need, have } => {
                write!(f, "payload too short for nonce and tag: need {} bytes, have {}", need, have)
            }
            CryptoError::UnsupportedNonceLen { requested, supported } => {
                write!(f, "unsupported nonce length: requested {}, supported {}", requested, supported)
            }
            CryptoError::MissingKey { block_id } => {
                write!(f, "no key available for block id {}", block_id)
            }
            CryptoError::AuthenticationFailed => {
                write!(f, "AEAD tag verification failed (corrupt data or wrong key)")
            }
        }
    }
}

impl std::error::Error for CryptoError {}
