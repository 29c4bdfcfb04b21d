//! Content fingerprints for change detection.

/// Compute a 64-bit fingerprint of `bytes` (leading bytes of a blake3 digest).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}
