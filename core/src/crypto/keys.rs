//! Key lookup for block decryption.

use crate::constants::KEY_LEN;

/// Lookup of the decryption key for one block.
///
/// Today every file is sealed with a single static key, but the lookup is
/// keyed by `block_id` so per-session key rotation slots in without touching
/// the decryptor.
pub trait KeyProvider: Send + Sync {
    fn key_for_block(&self, block_id: u16) -> Option<&[u8; KEY_LEN]>;
}

/// Single process-wide 256-bit key serving the whole file.
#[derive(Clone)]
pub struct StaticKey {
    key: [u8; KEY_LEN],
}

impl StaticKey {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }
}

impl KeyProvider for StaticKey {
    fn key_for_block(&self, _block_id: u16) -> Option<&[u8; KEY_LEN]> {
        Some(&self.key)
    }
}
