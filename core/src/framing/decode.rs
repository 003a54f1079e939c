use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, warn};

use crate::config::FramingPolicy;
use crate::framing::types::{
    BlockFlags, BlockHeader, FramingError, FramingWarning, RawBlock, ScanOutcome,
};

/// Parse one 12-byte block header.
#[inline]
pub fn parse_block_header(wire: &[u8]) -> Result<BlockHeader, FramingError> {
    if wire.len() < BlockHeader::LEN {
        return Err(FramingError::ShortHeader { have: wire.len() });
    }

    // --- fixed offsets ---
    let mut off = 0;

    let raw_size = LittleEndian::read_u32(&wire[off..off + 4]);
    off += 4;

    let compressed_size = LittleEndian::read_u32(&wire[off..off + 4]);
    off += 4;

    // Unknown bits are retained, not rejected: the field is reserved for
    // future negotiation.
    let flags = BlockFlags::from_bits_retain(wire[off]);
    off += 1;

    let nonce_size = wire[off];
    off += 1;

    let block_id = LittleEndian::read_u16(&wire[off..off + 2]);

    Ok(BlockHeader {
        raw_size,
        compressed_size,
        flags,
        nonce_size,
        block_id,
    })
}

/// Scan the full buffer into block descriptors, forward-only.
///
/// The cursor always advances by the *declared* payload length, never the
/// truncated one, so later offsets stay consistent with what the device
/// wrote even when a block is cut short.
///
/// Under [`FramingPolicy::Lenient`] malformed boundaries degrade to
/// warnings; under [`FramingPolicy::Strict`] they stop the scan, since every
/// later offset chains through the corrupt length field.
pub fn scan_blocks(data: &[u8], policy: FramingPolicy) -> Result<ScanOutcome<'_>, FramingError> {
    let mut blocks = Vec::new();
    let mut warnings = Vec::new();
    let mut offset = 0usize;
    let mut index = 0usize;

    while offset < data.len() {
        let remaining = data.len() - offset;
        if remaining < BlockHeader::LEN {
            if policy == FramingPolicy::Strict {
                return Err(FramingError::TrailingBytes { offset, len: remaining });
            }
            warn!(offset, len = remaining, "discarding trailing fragment shorter than a block header");
            warnings.push(FramingWarning::TrailingBytes { offset, len: remaining });
            break;
        }

        let header = parse_block_header(&data[offset..])?;
        let declared = header.payload_len();
        let payload_start = offset + BlockHeader::LEN;
        let available = data.len() - payload_start;

        let payload = if declared <= available {
            &data[payload_start..payload_start + declared]
        } else {
            if policy == FramingPolicy::Strict {
                return Err(FramingError::PayloadOverrun { index, offset, declared, available });
            }
            warn!(index, declared, available, "block payload overruns the buffer, truncating");
            warnings.push(FramingWarning::TruncatedPayload { index, declared, available });
            &data[payload_start..]
        };

        debug!(
            index,
            offset,
            block_id = header.block_id,
            payload_len = payload.len(),
            "framed block"
        );
        blocks.push(RawBlock { index, offset, header, payload });

        // Advance by the declared length, not the truncated one.
        offset = payload_start + declared;
        index += 1;
    }

    Ok(ScanOutcome { blocks, warnings })
}
