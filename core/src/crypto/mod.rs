//! Authenticated decryption of block payloads.

pub mod decrypt;
pub mod keys;
pub mod types;

pub use decrypt::BlockDecryptor;
pub use keys::{KeyProvider, StaticKey};
pub use types::CryptoError;
