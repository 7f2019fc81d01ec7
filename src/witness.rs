//! Determinism witness for one solve.
//!
//! A witness entry captures the SHA-256 digests of the input buffer and
//! the produced mask together with the flow value and the configuration,
//! serialized as one JSONL line. Two runs over the same input and config
//! must produce identical entries; diverging entries point at
//! nondeterminism. Purely diagnostic, off by default.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::SegmentConfig;
use crate::image::{MaskBuffer, PixelBuffer};

/// A single witness entry for determinism verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveWitness {
    /// SHA-256 hex digest of the input samples.
    pub image_hash: String,
    /// SHA-256 hex digest of the output mask bytes.
    pub mask_hash: String,
    /// Total max-flow value of the solve.
    pub max_flow: f64,
    /// Configuration the solve ran with.
    pub config: SegmentConfig,
}

impl SolveWitness {
    /// Build the witness of one completed solve.
    pub fn record(
        image: &PixelBuffer,
        mask: &MaskBuffer,
        max_flow: f64,
        config: &SegmentConfig,
    ) -> Self {
        Self {
            image_hash: hash_bytes(image.data()),
            mask_hash: hash_bytes(mask.data()),
            max_flow,
            config: config.clone(),
        }
    }
}

/// Serialize a witness entry to a single JSONL line.
pub fn witness_line(entry: &SolveWitness) -> String {
    serde_json::to_string(entry).unwrap_or_else(|_| "{}".to_string())
}

/// SHA-256 hash of a byte buffer, returned as a hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex_encode(&hasher.finalize())
}

/// Simple hex encoding without pulling in the `hex` crate.
fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = vec![1u8, 2, 3];
        assert_eq!(hash_bytes(&data), hash_bytes(&data));
        assert_eq!(hash_bytes(&data).len(), 64);
    }

    #[test]
    fn test_hash_different_data() {
        assert_ne!(hash_bytes(&[1, 2]), hash_bytes(&[1, 3]));
    }

    #[test]
    fn test_witness_roundtrip() {
        let image = PixelBuffer::new(2, 1, 1, vec![7, 9]).unwrap();
        let mut mask = MaskBuffer::new(2, 1);
        mask.set_foreground(0, 0);
        let entry = SolveWitness::record(&image, &mask, 3.5, &SegmentConfig::default());
        let line = witness_line(&entry);
        let restored: SolveWitness = serde_json::from_str(&line).unwrap();
        assert_eq!(restored.image_hash, entry.image_hash);
        assert_eq!(restored.mask_hash, entry.mask_hash);
        assert!((restored.max_flow - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_solve_same_witness() {
        let image = PixelBuffer::new(2, 1, 1, vec![7, 9]).unwrap();
        let mask = MaskBuffer::new(2, 1);
        let config = SegmentConfig::default();
        let a = SolveWitness::record(&image, &mask, 1.0, &config);
        let b = SolveWitness::record(&image, &mask, 1.0, &config);
        assert_eq!(witness_line(&a), witness_line(&b));
    }
}
