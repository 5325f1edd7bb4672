//! Hash primitives shared by the proof encoders and the local recomputation
//! helpers.
//!
//! * [`tendermint`]: the domain separated SHA-256 leaf/branch hashes and the
//!   simple Merkle tree used for block headers and the multi-store.
//! * [`iavl`]: preimage layout of IAVL inner and leaf nodes.
//! * [`varint`]: the varint and length-prefix framing embedded in leaf
//!   preimages.
//!
//! The encoders never call these functions: hashes travel as raw 32-byte
//! words and the verifier recomputes them. The helpers exist so callers can
//! check a proof locally before shipping it.

pub mod iavl;
pub mod tendermint;
pub mod varint;

pub use iavl::{iavl_inner_hash, iavl_leaf_hash};
pub use tendermint::{
    branch_hash, leaf_hash, simple_hash_from_byte_slices, tmhash, BRANCH_PREFIX, HASH_SIZE,
    LEAF_PREFIX,
};
pub use varint::{encode_length_prefixed, encode_svarint, encode_uvarint};
