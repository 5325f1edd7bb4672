use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_dynamic_len;
use super::errors::{ProofError, ProofResult};
use super::iavl::{fold_path, tree_int, IavlMerklePath};
use super::packet::{RequestPacket, ResponsePacket};
use super::types::Bytes32;
use crate::abi::{self, word_to_u64, ParamType, Token};
use crate::config::EncoderLimits;

static ORACLE_SCHEMA: Lazy<Vec<ParamType>> = Lazy::new(|| {
    vec![
        ParamType::Uint(256),
        RequestPacket::param_type(),
        ResponsePacket::param_type(),
        ParamType::Uint(256),
        ParamType::Array(Box::new(IavlMerklePath::param_type())),
    ]
});

/// Inclusion proof of one oracle result in the oracle store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleDataProof {
    /// Tree version at which the result leaf was written.
    pub version: u64,
    pub request_packet: RequestPacket,
    pub response_packet: ResponsePacket,
    /// Steps from the leaf sibling up to the store root.
    pub merkle_paths: Vec<IavlMerklePath>,
}

impl OracleDataProof {
    /// Encodes `(target_version, request, response, version, paths[])`.
    ///
    /// `target_version` is the version the verifier proves against and is
    /// embedded as given.
    pub fn encode_eth_data(&self, target_version: u64) -> ProofResult<Vec<u8>> {
        self.encode_eth_data_with(target_version, &EncoderLimits::DEFAULT)
    }

    /// Encodes under caller-supplied limits.
    pub fn encode_eth_data_with(
        &self,
        target_version: u64,
        limits: &EncoderLimits,
    ) -> ProofResult<Vec<u8>> {
        self.validate(limits)?;
        let encoded = abi::encode(&self.encode_tokens(target_version));
        debug!(
            target_version,
            paths = self.merkle_paths.len(),
            bytes = encoded.len(),
            "encoded oracle data proof"
        );
        Ok(encoded)
    }

    /// Top-level arguments in wire order.
    pub fn encode_tokens(&self, target_version: u64) -> Vec<Token> {
        vec![
            Token::uint(target_version),
            self.request_packet.encode_token(),
            self.response_packet.encode_token(),
            Token::uint(self.version),
            Token::Array(
                self.merkle_paths
                    .iter()
                    .map(IavlMerklePath::encode_token)
                    .collect(),
            ),
        ]
    }

    /// Decodes under the default limits.
    pub fn decode_eth_data(bytes: &[u8]) -> ProofResult<(u64, Self)> {
        Self::decode_eth_data_with(bytes, &EncoderLimits::DEFAULT)
    }

    /// Decodes canonical encoder output into the target version and proof.
    pub fn decode_eth_data_with(bytes: &[u8], limits: &EncoderLimits) -> ProofResult<(u64, Self)> {
        let tokens = abi::decode_canonical(&ORACLE_SCHEMA, bytes, limits)?;
        let [target_version, request, response, version, paths] = <[Token; 5]>::try_from(tokens)
            .map_err(|_| ProofError::UnexpectedLayout {
                field: "oracle_data_proof",
            })?;
        let target_version = word_to_u64(target_version.as_word()?)?;
        let proof = Self {
            version: word_to_u64(version.as_word()?)?,
            request_packet: RequestPacket::from_token(request)?,
            response_packet: ResponsePacket::from_token(response)?,
            merkle_paths: paths
                .into_array()?
                .into_iter()
                .map(IavlMerklePath::from_token)
                .collect::<ProofResult<_>>()?,
        };
        proof.validate(limits)?;
        Ok((target_version, proof))
    }

    /// Structural checks applied before any byte is emitted.
    pub fn validate(&self, limits: &EncoderLimits) -> ProofResult<()> {
        if self.merkle_paths.is_empty() {
            return Err(ProofError::EmptyMerklePaths);
        }
        if self.merkle_paths.len() > limits.max_merkle_paths {
            return Err(ProofError::TooManyMerklePaths {
                len: self.merkle_paths.len(),
                max: limits.max_merkle_paths,
            });
        }
        for field in [
            self.request_packet.client_id.as_bytes(),
            self.request_packet.calldata.as_slice(),
            self.response_packet.client_id.as_bytes(),
            self.response_packet.result.as_slice(),
        ] {
            ensure_dynamic_len(field.len(), limits)?;
        }
        tree_int("version", self.version)?;
        for step in &self.merkle_paths {
            step.check_range()?;
        }
        Ok(())
    }

    /// Root reached by folding `leaf` through the Merkle path.
    ///
    /// A valid proof yields the `oracle_iavl_state_hash` of the multi-store
    /// proof committed at the same height.
    pub fn compute_root(&self, leaf: &Bytes32) -> ProofResult<Bytes32> {
        fold_path(leaf, &self.merkle_paths)
    }
}
