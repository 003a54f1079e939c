mod common;

#[cfg(test)]
mod tests {
    use crate::common;
    use sbw_core::compression::{decompress_block, CompressionError};
    use sbw_core::CompressionAlgorithm;

    #[test]
    fn lz4_frame_roundtrips() {
        let raw: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let compressed = common::compress(&raw);

        let out = decompress_block(CompressionAlgorithm::Lz4, &compressed).unwrap();
        assert_eq!(out.data, raw);
        assert!(!out.passthrough);
    }

    #[test]
    fn lz4_empty_input_roundtrips() {
        let compressed = common::compress(&[]);
        let out = decompress_block(CompressionAlgorithm::Lz4, &compressed).unwrap();
        assert!(out.data.is_empty());
    }

    #[test]
    fn corrupt_frame_is_rejected() {
        let result = decompress_block(CompressionAlgorithm::Lz4, b"definitely not an lz4 frame");
        assert!(matches!(
            result,
            Err(CompressionError::CodecFailed { codec: "lz4", .. })
        ));
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let compressed = common::compress(b"some payload worth compressing, repeated a few times over");
        let truncated = &compressed[..compressed.len() / 2];
        assert!(decompress_block(CompressionAlgorithm::Lz4, truncated).is_err());
    }

    #[test]
    fn heatshrink_passes_data_through_unchanged() {
        let raw = b"not actually compressed";
        let out = decompress_block(CompressionAlgorithm::Heatshrink, raw).unwrap();
        assert_eq!(out.data, raw);
        assert!(out.passthrough);
    }
}
