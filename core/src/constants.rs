//! Wire-level constants shared across the decode pipeline.

/// Fixed encoded length of a block header (bytes).
pub const BLOCK_HEADER_LEN: usize = 12;

/// AES-256-GCM key length (bytes).
pub const KEY_LEN: usize = 32;

/// Nonce length supported by the AES-GCM construction (bytes).
pub const NONCE_LEN: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// TLV header length: u16 type + u16 length (bytes).
pub const TLV_HEADER_LEN: usize = 4;

/// Default TLV cursor alignment (bytes).
pub const DEFAULT_ALIGNMENT: usize = 4;

/// TLV record type identifiers (mirrored in device firmware).
pub mod tlv_ids {
    pub const IMU: u16 = 0x0001;
    pub const TEMPERATURE: u16 = 0x0002;
    pub const HEALTH: u16 = 0x0003;
    pub const SESSION_METADATA: u16 = 0x0004;
    pub const TIMESTAMP: u16 = 0x0005;
}
