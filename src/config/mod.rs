//! Protocol constants and encoder limits shared by every proof encoder.
//!
//! The constants in this module are part of the wire contract with the
//! light-client verifier. Field orders listed here are the orders in which
//! the values appear inside the encoded tuples; changing any of them is a
//! protocol version bump.

use serde::{Deserialize, Serialize};

/// Offset added to the secp256k1 recovery id to obtain the EVM `v` value.
pub const RECOVERY_ID_OFFSET: u8 = 27;

/// Store name of the oracle module inside the multi-store.
pub const ORACLE_STORE_NAME: &str = "oracle";

/// Canonical order of the multi-store sub-roots.
pub const MULTI_STORE_FIELDS: [&str; 5] = [
    "acc_to_gov_stores_merkle_hash",
    "main_and_mint_stores_merkle_hash",
    "oracle_iavl_state_hash",
    "params_stores_merkle_hash",
    "slashing_to_upgrade_stores_merkle_hash",
];

/// Canonical order of the block header Merkle leaves.
pub const HEADER_FIELDS: [&str; 8] = [
    "version_and_chain_id_hash",
    "height",
    "time_second",
    "time_nano_second",
    "last_block_id_and_other",
    "next_validator_hash_and_consensus_hash",
    "last_results_hash",
    "evidence_and_proposer_hash",
];

/// Store names committed by the multi-store, sorted as the store commits them.
pub const COMMITTED_STORES: [&str; 12] = [
    "acc",
    "distribution",
    "evidence",
    "gov",
    "main",
    "mint",
    "oracle",
    "params",
    "slashing",
    "staking",
    "supply",
    "upgrade",
];

/// Default cap on validator signatures carried by a relay proof.
pub const DEFAULT_MAX_SIGNATURES: usize = 256;

/// Default cap on IAVL path steps carried by an oracle data proof.
pub const DEFAULT_MAX_MERKLE_PATHS: usize = 64;

/// Default cap on a single length or count word (1 MiB).
pub const DEFAULT_MAX_DYNAMIC_LEN: usize = 1 << 20;

/// Bounds enforced while encoding and decoding proofs.
///
/// Encoders reject proofs whose sequences or byte strings exceed the limits
/// instead of emitting bytes the decoder would refuse. This covers the
/// envelope packers too, where each encoded proof and the data proof count
/// must fit `max_dynamic_len`. The decoder checks every length and
/// element-count word against `max_dynamic_len` before allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderLimits {
    /// Maximum number of validator signatures in a block relay proof.
    pub max_signatures: usize,
    /// Maximum number of IAVL path steps in an oracle data proof.
    pub max_merkle_paths: usize,
    /// Maximum byte length or element count of one dynamic field.
    pub max_dynamic_len: usize,
}

impl EncoderLimits {
    /// Limits applied when the caller does not supply any.
    pub const DEFAULT: EncoderLimits = EncoderLimits {
        max_signatures: DEFAULT_MAX_SIGNATURES,
        max_merkle_paths: DEFAULT_MAX_MERKLE_PATHS,
        max_dynamic_len: DEFAULT_MAX_DYNAMIC_LEN,
    };

    /// Limits that never reject a well-formed input.
    pub const UNBOUNDED: EncoderLimits = EncoderLimits {
        max_signatures: usize::MAX,
        max_merkle_paths: usize::MAX,
        max_dynamic_len: usize::MAX,
    };
}

impl Default for EncoderLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
