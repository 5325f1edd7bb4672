//! Relay envelopes handed to the bridge contract.
//!
//! The bridge takes the encoded block relay proof and one or more encoded
//! oracle data proofs as opaque `bytes` arguments. The helpers here encode
//! both halves and pack them, and [`EvmProof`] bundles the structured proof
//! with the resulting bytes for query responses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_dynamic_len;
use super::errors::{ProofError, ProofResult};
use super::oracle::OracleDataProof;
use super::relay::BlockRelayProof;
use crate::abi::{self, Token};
use crate::config::EncoderLimits;

/// Encodes `(bytes blockRelay, bytes oracleData)`.
pub fn relay_and_verify(
    block: &BlockRelayProof,
    data: &OracleDataProof,
    target_version: u64,
) -> ProofResult<Vec<u8>> {
    relay_and_verify_with(block, data, target_version, &EncoderLimits::DEFAULT)
}

/// [`relay_and_verify`] under caller-supplied limits.
pub fn relay_and_verify_with(
    block: &BlockRelayProof,
    data: &OracleDataProof,
    target_version: u64,
    limits: &EncoderLimits,
) -> ProofResult<Vec<u8>> {
    let block_bytes = block.encode_eth_data_with(limits)?;
    let data_bytes = data.encode_eth_data_with(target_version, limits)?;
    ensure_dynamic_len(block_bytes.len(), limits)?;
    ensure_dynamic_len(data_bytes.len(), limits)?;
    Ok(abi::encode(&[
        Token::bytes(block_bytes),
        Token::bytes(data_bytes),
    ]))
}

/// Encodes `(bytes blockRelay, bytes[] oracleData)`.
pub fn relay_and_multi_verify(
    block: &BlockRelayProof,
    data: &[OracleDataProof],
    target_version: u64,
) -> ProofResult<Vec<u8>> {
    relay_and_multi_verify_with(block, data, target_version, &EncoderLimits::DEFAULT)
}

/// [`relay_and_multi_verify`] under caller-supplied limits.
pub fn relay_and_multi_verify_with(
    block: &BlockRelayProof,
    data: &[OracleDataProof],
    target_version: u64,
    limits: &EncoderLimits,
) -> ProofResult<Vec<u8>> {
    if data.is_empty() {
        return Err(ProofError::EmptyDataProofs);
    }
    ensure_dynamic_len(data.len(), limits)?;
    let block_bytes = block.encode_eth_data_with(limits)?;
    ensure_dynamic_len(block_bytes.len(), limits)?;
    let data_tokens = data
        .iter()
        .map(|proof| {
            let bytes = proof.encode_eth_data_with(target_version, limits)?;
            ensure_dynamic_len(bytes.len(), limits)?;
            Ok(Token::bytes(bytes))
        })
        .collect::<ProofResult<Vec<_>>>()?;
    debug!(proofs = data_tokens.len(), "packed multi verify envelope");
    Ok(abi::encode(&[
        Token::bytes(block_bytes),
        Token::Array(data_tokens),
    ]))
}

/// Structured proof of one oracle result at `block_height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonProof {
    /// Height passed to the verifier as the target version.
    pub block_height: u64,
    pub oracle_data_proof: OracleDataProof,
    pub block_relay_proof: BlockRelayProof,
}

/// Structured proof of several oracle results relayed with one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMultiProof {
    pub block_height: u64,
    pub oracle_data_multi_proof: Vec<OracleDataProof>,
    pub block_relay_proof: BlockRelayProof,
}

/// A structured proof together with its encoded envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmProof<P> {
    pub json_proof: P,
    #[serde(with = "hex::serde")]
    pub evm_proof_bytes: Vec<u8>,
}

impl EvmProof<JsonProof> {
    /// Encodes `json_proof` against its own block height.
    pub fn new(json_proof: JsonProof) -> ProofResult<Self> {
        let evm_proof_bytes = relay_and_verify(
            &json_proof.block_relay_proof,
            &json_proof.oracle_data_proof,
            json_proof.block_height,
        )?;
        Ok(Self {
            json_proof,
            evm_proof_bytes,
        })
    }
}

impl EvmProof<JsonMultiProof> {
    /// Encodes every data proof of `json_proof` against its block height.
    pub fn new_multi(json_proof: JsonMultiProof) -> ProofResult<Self> {
        let evm_proof_bytes = relay_and_multi_verify(
            &json_proof.block_relay_proof,
            &json_proof.oracle_data_multi_proof,
            json_proof.block_height,
        )?;
        Ok(Self {
            json_proof,
            evm_proof_bytes,
        })
    }
}
