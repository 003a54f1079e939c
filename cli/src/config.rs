//! Configuration file loading and key resolution.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;

use sbw_core::constants::KEY_LEN;
use sbw_core::DecoderConfig;

/// On-disk configuration: decoder knobs plus optional key material. Every
/// field falls back to its default, so a partial file is fine.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(flatten)]
    pub decoder: DecoderConfig,
    pub key_hex: Option<String>,
}

impl FileConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// Resolve key material: command line first, then the config file, then the
/// all-zero development key the device prototypes ship with.
pub fn resolve_key(flag: Option<&str>, config: &FileConfig) -> Result<[u8; KEY_LEN]> {
    let Some(hex_str) = flag.or(config.key_hex.as_deref()) else {
        warn!("no key provided, using the all-zero development key");
        return Ok([0u8; KEY_LEN]);
    };

    let bytes = hex::decode(hex_str.trim()).context("key must be hex")?;
    if bytes.len() != KEY_LEN {
        bail!(
            "key must be {} bytes ({} hex characters), got {} bytes",
            KEY_LEN,
            KEY_LEN * 2,
            bytes.len()
        );
    }

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbw_core::{CompressionAlgorithm, Endianness};

    #[test]
    fn key_from_hex_flag() {
        let config = FileConfig::default();
        let key = resolve_key(Some(&"ab".repeat(32)), &config).unwrap();
        assert_eq!(key, [0xAB; KEY_LEN]);
    }

    #[test]
    fn key_falls_back_to_zero() {
        let config = FileConfig::default();
        let key = resolve_key(None, &config).unwrap();
        assert_eq!(key, [0u8; KEY_LEN]);
    }

    #[test]
    fn key_wrong_length_rejected() {
        let config = FileConfig::default();
        assert!(resolve_key(Some("abcd"), &config).is_err());
    }

    #[test]
    fn key_invalid_hex_rejected() {
        let config = FileConfig::default();
        assert!(resolve_key(Some(&"zz".repeat(32)), &config).is_err());
    }

    #[test]
    fn partial_config_parses_with_defaults() {
        let parsed: FileConfig =
            serde_json::from_str(r#"{"compression": "heatshrink", "key_hex": "00"}"#).unwrap();
        assert_eq!(parsed.decoder.compression, CompressionAlgorithm::Heatshrink);
        assert_eq!(parsed.decoder.byte_order, Endianness::Little);
        assert_eq!(parsed.decoder.alignment, 4);
        assert_eq!(parsed.key_hex.as_deref(), Some("00"));
    }
}
