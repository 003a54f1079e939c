//! AEAD block decryption: AES-256-GCM, 12-byte nonce, 16-byte tag, empty
//! associated data. Mirrors the device's encryption settings exactly.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use tracing::debug;

use crate::constants::{NONCE_LEN, TAG_LEN};
use crate::crypto::keys::KeyProvider;
use crate::crypto::types::CryptoError;

/// Decryptor over a key lookup. Stateless beyond the provider, so one
/// instance serves any number of blocks from any thread.
pub struct BlockDecryptor<K: KeyProvider> {
    keys: K,
}

impl<K: KeyProvider> BlockDecryptor<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// Authenticate and decrypt one block payload.
    ///
    /// `payload` is `nonce(nonce_size) | ciphertext | tag(16)`. Tag
    /// verification is constant-time and fails closed: no partial plaintext
    /// escapes on mismatch.
    pub fn decrypt(
        &self,
        block_id: u16,
        nonce_size: usize,
        payload: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let need = nonce_size + TAG_LEN;
        if payload.len() < need {
            return Err(CryptoError::ShortPayload { need, have: payload.len() });
        }
        if nonce_size != NONCE_LEN {
            return Err(CryptoError::UnsupportedNonceLen {
                requested: nonce_size,
                supported: NONCE_LEN,
            });
        }

        let key = self
            .keys
            .key_for_block(block_id)
            .ok_or(CryptoError::MissingKey { block_id })?;

        let (nonce, ciphertext_and_tag) = payload.split_at(nonce_size);

        let cipher = Aes256Gcm::new(key.into());
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext_and_tag)
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        debug!(block_id, plaintext_len = plaintext.len(), "block authenticated and decrypted");
        Ok(plaintext)
    }
}
