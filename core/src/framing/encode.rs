//! Block header encoding, the exact inverse of [`crate::framing::decode`].
//!
//! The device is the only real producer of this layout; the encoder exists
//! for fixture construction in tests and tooling.

use byteorder::{ByteOrder, LittleEndian};

use crate::framing::types::BlockHeader;

/// Encode a block header into its fixed 12-byte wire form.
pub fn encode_block_header(header: &BlockHeader) -> [u8; BlockHeader::LEN] {
    let mut out = [0u8; BlockHeader::LEN];

    LittleEndian::write_u32(&mut out[0..4], header.raw_size);
    LittleEndian::write_u32(&mut out[4..8], header.compressed_size);
    out[8] = header.flags.bits();
    out[9] = header.nonce_size;
    LittleEndian::write_u16(&mut out[10..12], header.block_id);

    out
}
