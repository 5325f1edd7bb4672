//! Domain separated SHA-256 Merkle hashing.
//!
//! * Leaves hash as `SHA-256(0x00 || item)`.
//! * Inner nodes hash as `SHA-256(0x01 || left || right)`.
//! * A list of items is split at the largest power of two strictly below its
//!   length; the left part takes that many items.
//!
//! The one byte tags keep an inner node from being replayed as a leaf.

use sha2::{Digest, Sha256};

/// Width of every digest produced by this module.
pub const HASH_SIZE: usize = 32;

/// Tag prepended to leaf preimages.
pub const LEAF_PREFIX: u8 = 0x00;

/// Tag prepended to inner node preimages.
pub const BRANCH_PREFIX: u8 = 0x01;

/// Plain SHA-256 of `bytes`.
pub fn tmhash(bytes: &[u8]) -> [u8; HASH_SIZE] {
    Sha256::digest(bytes).into()
}

/// Hashes a leaf item: `SHA-256(0x00 || item)`.
pub fn leaf_hash(item: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(item);
    hasher.finalize().into()
}

/// Hashes an inner node: `SHA-256(0x01 || left || right)`.
pub fn branch_hash(left: &[u8], right: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update([BRANCH_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Merkle root over `items`, hashing each item as a leaf.
///
/// An empty list hashes to `SHA-256("")`.
pub fn simple_hash_from_byte_slices<B: AsRef<[u8]>>(items: &[B]) -> [u8; HASH_SIZE] {
    match items.len() {
        0 => tmhash(&[]),
        1 => leaf_hash(items[0].as_ref()),
        len => {
            let split = split_point(len);
            let left = simple_hash_from_byte_slices(&items[..split]);
            let right = simple_hash_from_byte_slices(&items[split..]);
            branch_hash(&left, &right)
        }
    }
}

/// Largest power of two strictly less than `len` (`len >= 2`).
fn split_point(len: usize) -> usize {
    debug_assert!(len >= 2);
    let mut split = 1usize;
    while split << 1 < len {
        split <<= 1;
    }
    split
}
