//! Shared fixture builders: the encode path the device firmware implements.
#![allow(dead_code)]

use std::io::Write;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use lz4_flex::frame::FrameEncoder;
use rand::RngCore;

use sbw_core::constants::{KEY_LEN, NONCE_LEN, TAG_LEN};
use sbw_core::framing::{encode_block_header, BlockFlags, BlockHeader};

pub const TEST_KEY: [u8; KEY_LEN] = [0x42; KEY_LEN];

/// LZ4-frame compress `raw`.
pub fn compress(raw: &[u8]) -> Vec<u8> {
    let mut encoder = FrameEncoder::new(Vec::new());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

/// Seal `plaintext` as `nonce | ciphertext | tag` with a random nonce.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Vec<u8> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    seal_with_nonce(key, &nonce, plaintext)
}

pub fn seal_with_nonce(key: &[u8; KEY_LEN], nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256Gcm::new(key.into());
    let ciphertext = cipher.encrypt(Nonce::from_slice(nonce), plaintext).unwrap();

    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(nonce);
    payload.extend_from_slice(&ciphertext);
    payload
}

/// Build one complete framed block (header + sealed, compressed payload)
/// from raw record bytes.
pub fn build_block(block_id: u16, raw: &[u8], key: &[u8; KEY_LEN]) -> Vec<u8> {
    let compressed = compress(raw);
    let payload = seal(key, &compressed);

    let header = BlockHeader {
        raw_size: raw.len() as u32,
        compressed_size: (payload.len() - NONCE_LEN - TAG_LEN) as u32,
        flags: BlockFlags::COMPRESSED,
        nonce_size: NONCE_LEN as u8,
        block_id,
    };

    let mut out = encode_block_header(&header).to_vec();
    out.extend_from_slice(&payload);
    out
}

/// Build a framed block whose payload is sealed but *not* compressed, as a
/// device using the placeholder algorithm would produce.
pub fn build_uncompressed_block(block_id: u16, raw: &[u8], key: &[u8; KEY_LEN]) -> Vec<u8> {
    let payload = seal(key, raw);

    let header = BlockHeader {
        raw_size: raw.len() as u32,
        compressed_size: (payload.len() - NONCE_LEN - TAG_LEN) as u32,
        flags: BlockFlags::empty(),
        nonce_size: NONCE_LEN as u8,
        block_id,
    };

    let mut out = encode_block_header(&header).to_vec();
    out.extend_from_slice(&payload);
    out
}

/// Encode one TLV record, zero-padded to a 4-byte boundary from its own
/// start (concatenating outputs keeps every header aligned).
pub fn tlv(tlv_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + payload.len() + 3);
    out.extend_from_slice(&tlv_type.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

/// A timestamp TLV payload for the given microsecond epoch value.
pub fn timestamp_tlv(timestamp_us: u64) -> Vec<u8> {
    tlv(0x0005, &timestamp_us.to_le_bytes())
}

/// An IMU TLV payload from six little-endian floats.
pub fn imu_tlv(values: [f32; 6]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(24);
    for v in values {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    tlv(0x0001, &payload)
}
