mod common;

#[cfg(test)]
mod tests {
    use crate::common;
    use sbw_core::framing::{
        encode_block_header, parse_block_header, scan_blocks, BlockFlags, BlockHeader,
        FramingError, FramingWarning,
    };
    use sbw_core::FramingPolicy;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            raw_size: 4096,
            compressed_size: 100,
            flags: BlockFlags::COMPRESSED,
            nonce_size: 12,
            block_id: 7,
        }
    }

    /// Header + payload of exactly the declared length.
    fn synthetic_block(header: &BlockHeader, fill: u8) -> Vec<u8> {
        let mut out = encode_block_header(header).to_vec();
        out.extend(std::iter::repeat(fill).take(header.payload_len()));
        out
    }

    #[test]
    fn header_roundtrip() {
        let header = sample_header();
        let wire = encode_block_header(&header);
        assert_eq!(parse_block_header(&wire).unwrap(), header);
    }

    #[test]
    fn header_layout_is_bit_exact() {
        let wire = encode_block_header(&sample_header());
        assert_eq!(&wire[0..4], &4096u32.to_le_bytes());
        assert_eq!(&wire[4..8], &100u32.to_le_bytes());
        assert_eq!(wire[8], 0x01);
        assert_eq!(wire[9], 12);
        assert_eq!(&wire[10..12], &7u16.to_le_bytes());
    }

    #[test]
    fn short_header_is_rejected() {
        let buf = vec![0u8; BlockHeader::LEN - 1];
        assert!(matches!(
            parse_block_header(&buf),
            Err(FramingError::ShortHeader { have: 11 })
        ));
    }

    #[test]
    fn payload_len_includes_nonce_and_tag() {
        assert_eq!(sample_header().payload_len(), 100 + 12 + 16);
    }

    #[test]
    fn unknown_flag_bits_are_retained() {
        let mut wire = encode_block_header(&sample_header());
        wire[8] = 0x83;
        let header = parse_block_header(&wire).unwrap();
        assert_eq!(header.flags.bits(), 0x83);
        assert!(header.flags.contains(BlockFlags::COMPRESSED));
    }

    #[test]
    fn scan_empty_buffer_yields_nothing() {
        let outcome = scan_blocks(&[], FramingPolicy::Lenient).unwrap();
        assert!(outcome.blocks.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn scan_two_blocks_sequential_offsets() {
        let a = sample_header();
        let b = BlockHeader { block_id: 8, compressed_size: 40, ..a };
        let mut file = synthetic_block(&a, 0xAA);
        file.extend(synthetic_block(&b, 0xBB));

        let outcome = scan_blocks(&file, FramingPolicy::Lenient).unwrap();
        assert_eq!(outcome.blocks.len(), 2);
        assert!(outcome.warnings.is_empty());

        let first = &outcome.blocks[0];
        let second = &outcome.blocks[1];
        assert_eq!(first.index, 0);
        assert_eq!(first.offset, 0);
        assert_eq!(first.payload.len(), a.payload_len());
        assert_eq!(second.index, 1);
        assert_eq!(second.offset, BlockHeader::LEN + a.payload_len());
        assert_eq!(second.header.block_id, 8);
        assert!(second.payload.iter().all(|&b| b == 0xBB));
    }

    #[test]
    fn trailing_fragment_warns_under_lenient() {
        let mut file = synthetic_block(&sample_header(), 0xAA);
        file.extend_from_slice(&[1, 2, 3, 4, 5]);

        let outcome = scan_blocks(&file, FramingPolicy::Lenient).unwrap();
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec![FramingWarning::TrailingBytes {
                offset: BlockHeader::LEN + sample_header().payload_len(),
                len: 5,
            }]
        );
    }

    #[test]
    fn trailing_fragment_errors_under_strict() {
        let mut file = synthetic_block(&sample_header(), 0xAA);
        file.extend_from_slice(&[1, 2, 3]);

        assert!(matches!(
            scan_blocks(&file, FramingPolicy::Strict),
            Err(FramingError::TrailingBytes { len: 3, .. })
        ));
    }

    #[test]
    fn overrun_truncates_and_warns_under_lenient() {
        let header = sample_header();
        let mut file = encode_block_header(&header).to_vec();
        // Only half of the declared payload is present.
        file.extend(std::iter::repeat(0xCC).take(header.payload_len() / 2));

        let outcome = scan_blocks(&file, FramingPolicy::Lenient).unwrap();
        assert_eq!(outcome.blocks.len(), 1);
        assert!(outcome.blocks[0].is_truncated());
        assert_eq!(outcome.blocks[0].payload.len(), header.payload_len() / 2);
        assert_eq!(
            outcome.warnings,
            vec![FramingWarning::TruncatedPayload {
                index: 0,
                declared: header.payload_len(),
                available: header.payload_len() / 2,
            }]
        );
    }

    #[test]
    fn overrun_errors_under_strict() {
        let header = sample_header();
        let mut file = encode_block_header(&header).to_vec();
        file.extend_from_slice(&[0u8; 16]);

        let err = scan_blocks(&file, FramingPolicy::Strict).unwrap_err();
        assert!(matches!(err, FramingError::PayloadOverrun { index: 0, offset: 0, .. }));
        assert_eq!(err.block_index(), Some(0));
    }

    #[test]
    fn trailing_error_has_no_block_index() {
        let err = FramingError::TrailingBytes { offset: 128, len: 3 };
        assert_eq!(err.block_index(), None);
    }

    #[test]
    fn scan_accepts_real_built_block() {
        let file = common::build_block(3, b"record bytes", &common::TEST_KEY);
        let outcome = scan_blocks(&file, FramingPolicy::Strict).unwrap();
        assert_eq!(outcome.blocks.len(), 1);
        assert_eq!(outcome.blocks[0].header.block_id, 3);
        assert!(!outcome.blocks[0].is_truncated());
    }
}
