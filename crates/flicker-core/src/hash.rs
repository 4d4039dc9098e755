//! Content hashing for reproducibility checks.
//!
//! Produces SHA-256 digests of indexed animations and encoded byte streams so
//! that identical inputs can be verified to yield bit-identical output.

use sha2::{Digest, Sha256};

use crate::frame::{Animation, IndexedFrame};

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn finish(hasher: Sha256) -> ContentHash {
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    ContentHash::from_bytes(bytes)
}

fn update_frame(hasher: &mut Sha256, frame: &IndexedFrame) {
    // Dimensions, delay and palette all change what a viewer sees.
    hasher.update(frame.width.to_le_bytes());
    hasher.update(frame.height.to_le_bytes());
    hasher.update(frame.delay.to_le_bytes());
    hasher.update(frame.palette.to_rgb_bytes());
    hasher.update(&frame.indices);
}

/// Compute the content hash of a single indexed frame.
pub fn hash_frame(frame: &IndexedFrame) -> ContentHash {
    let mut hasher = Sha256::new();
    update_frame(&mut hasher, frame);
    finish(hasher)
}

/// Compute the content hash of a whole animation.
pub fn hash_animation(animation: &Animation) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((animation.frames.len() as u64).to_le_bytes());
    for frame in &animation.frames {
        update_frame(&mut hasher, frame);
    }
    finish(hasher)
}

/// Compute the content hash of an encoded byte stream.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    finish(hasher)
}
