//! IAVL node preimages.
//!
//! Every node hash commits to the node height, subtree size and the version
//! at which the node was last written, all as zig-zag signed varints,
//! followed by the length-prefixed children (inner nodes) or the
//! length-prefixed key and value hash (leaves).
//!
//! Sizes and versions are `int64` in the tree; callers holding `u64` values
//! convert them with a range check before hashing.

use sha2::{Digest, Sha256};

use super::tendermint::{tmhash, HASH_SIZE};
use super::varint::{encode_length_prefixed, encode_svarint};

/// Hash of an IAVL inner node.
pub fn iavl_inner_hash(
    height: u8,
    size: i64,
    version: i64,
    left: &[u8; HASH_SIZE],
    right: &[u8; HASH_SIZE],
) -> [u8; HASH_SIZE] {
    let mut preimage = Vec::with_capacity(3 * 10 + 2 * (HASH_SIZE + 1));
    encode_svarint(&mut preimage, i64::from(height));
    encode_svarint(&mut preimage, size);
    encode_svarint(&mut preimage, version);
    encode_length_prefixed(&mut preimage, left);
    encode_length_prefixed(&mut preimage, right);
    Sha256::digest(&preimage).into()
}

/// Hash of an IAVL leaf holding `key -> value` written at `version`.
pub fn iavl_leaf_hash(key: &[u8], value: &[u8], version: i64) -> [u8; HASH_SIZE] {
    let mut preimage = Vec::with_capacity(key.len() + HASH_SIZE + 16);
    encode_svarint(&mut preimage, 0);
    encode_svarint(&mut preimage, 1);
    encode_svarint(&mut preimage, version);
    encode_length_prefixed(&mut preimage, key);
    encode_length_prefixed(&mut preimage, &tmhash(value));
    Sha256::digest(&preimage).into()
}
