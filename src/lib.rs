//! Core library entry point for `oracle-bridge-proof`.
//!
//! The crate packs oracle results and the block that committed them into
//! the byte layout an EVM light-client bridge verifies. A relay consists of
//! two halves:
//!
//! * [`BlockRelayProof`]: multi-store sub-roots, block header parts and the
//!   validator signatures over the block.
//! * [`OracleDataProof`]: the request/response packets and the IAVL path
//!   from the result leaf to the oracle store root.
//!
//! Both encode through the shared [`abi`] tuple encoder. Hash recomputation
//! ([`MultiStoreProof::app_hash`], [`BlockHeaderMerkleParts::block_hash`],
//! [`OracleDataProof::compute_root`], [`TmSignature::recover_signer`]) is
//! available for local checks; encoding never depends on it.

pub mod abi;
pub mod config;
pub mod hash;
pub mod proof;

pub use config::EncoderLimits;
pub use proof::{
    BlockHeaderMerkleParts, BlockRelayProof, Bytes32, ErrorClass, EvmProof, IavlMerklePath,
    JsonProof, MultiStoreProof, OracleDataProof, ProofError, ProofResult, RequestPacket,
    ResponsePacket, TmSignature,
};

/// Encodes a block relay proof under the default limits.
pub fn encode_block_relay(proof: &BlockRelayProof) -> ProofResult<Vec<u8>> {
    proof.encode_eth_data()
}

/// Encodes an oracle data proof against `target_version` under the default
/// limits.
pub fn encode_oracle_data(proof: &OracleDataProof, target_version: u64) -> ProofResult<Vec<u8>> {
    proof.encode_eth_data(target_version)
}

/// Encodes both halves of a relay and packs them for a single bridge call.
pub fn encode_relay_and_verify(
    block: &BlockRelayProof,
    data: &OracleDataProof,
    target_version: u64,
    limits: &EncoderLimits,
) -> ProofResult<Vec<u8>> {
    proof::relay_and_verify_with(block, data, target_version, limits)
}
