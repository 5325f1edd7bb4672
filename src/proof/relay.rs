use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ensure_dynamic_len;
use super::errors::{ProofError, ProofResult};
use super::header::BlockHeaderMerkleParts;
use super::multistore::MultiStoreProof;
use super::signature::TmSignature;
use super::types::{Bytes32, EvmAddress};
use crate::abi::{self, ParamType, Token};
use crate::config::EncoderLimits;

static RELAY_SCHEMA: Lazy<Vec<ParamType>> = Lazy::new(|| {
    vec![
        MultiStoreProof::param_type(),
        BlockHeaderMerkleParts::param_type(),
        ParamType::Array(Box::new(TmSignature::param_type())),
    ]
});

/// Everything the verifier needs to accept a new block: the multi-store
/// sub-roots, the header parts and the validator signatures, in the order
/// the validators were iterated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRelayProof {
    pub multi_store_proof: MultiStoreProof,
    pub block_header_merkle_parts: BlockHeaderMerkleParts,
    pub signatures: Vec<TmSignature>,
}

impl BlockRelayProof {
    /// Encodes the proof as `(MultiStore, Header, Signature[])` under the
    /// default limits.
    pub fn encode_eth_data(&self) -> ProofResult<Vec<u8>> {
        self.encode_eth_data_with(&EncoderLimits::DEFAULT)
    }

    /// Encodes under caller-supplied limits.
    pub fn encode_eth_data_with(&self, limits: &EncoderLimits) -> ProofResult<Vec<u8>> {
        self.validate(limits)?;
        let encoded = abi::encode(&self.encode_tokens());
        debug!(
            signatures = self.signatures.len(),
            bytes = encoded.len(),
            "encoded block relay proof"
        );
        Ok(encoded)
    }

    /// Top-level arguments in wire order.
    pub fn encode_tokens(&self) -> Vec<Token> {
        vec![
            self.multi_store_proof.encode_token(),
            self.block_header_merkle_parts.encode_token(),
            Token::Array(self.signatures.iter().map(TmSignature::encode_token).collect()),
        ]
    }

    /// Decodes under the default limits.
    pub fn decode_eth_data(bytes: &[u8]) -> ProofResult<Self> {
        Self::decode_eth_data_with(bytes, &EncoderLimits::DEFAULT)
    }

    /// Decodes canonical encoder output back into a proof.
    pub fn decode_eth_data_with(bytes: &[u8], limits: &EncoderLimits) -> ProofResult<Self> {
        let tokens = abi::decode_canonical(&RELAY_SCHEMA, bytes, limits)?;
        let [multi_store, header, signatures]: [Token; 3] =
            tokens
                .try_into()
                .map_err(|_| ProofError::UnexpectedLayout {
                    field: "block_relay_proof",
                })?;
        let proof = Self {
            multi_store_proof: MultiStoreProof::from_token(multi_store)?,
            block_header_merkle_parts: BlockHeaderMerkleParts::from_token(header)?,
            signatures: signatures
                .into_array()?
                .into_iter()
                .map(TmSignature::from_token)
                .collect::<ProofResult<_>>()?,
        };
        proof.validate(limits)?;
        debug!(signatures = proof.signatures.len(), "decoded block relay proof");
        Ok(proof)
    }

    /// Structural checks applied before any byte is emitted.
    pub fn validate(&self, limits: &EncoderLimits) -> ProofResult<()> {
        if self.signatures.is_empty() {
            return Err(ProofError::EmptySignatures);
        }
        if self.signatures.len() > limits.max_signatures {
            return Err(ProofError::TooManySignatures {
                len: self.signatures.len(),
                max: limits.max_signatures,
            });
        }
        for (index, signature) in self.signatures.iter().enumerate() {
            signature.ensure_recovery_id(index)?;
            ensure_dynamic_len(signature.signed_data_prefix.len(), limits)?;
            ensure_dynamic_len(signature.signed_data_suffix.len(), limits)?;
        }
        Ok(())
    }

    /// Block hash implied by the header parts and the multi-store proof.
    pub fn block_hash(&self) -> Bytes32 {
        self.block_header_merkle_parts
            .block_hash(&self.multi_store_proof.app_hash())
    }

    /// Recovers every signer over [`BlockRelayProof::block_hash`], in order.
    pub fn recover_signers(&self) -> ProofResult<Vec<EvmAddress>> {
        let block_hash = self.block_hash();
        self.signatures
            .iter()
            .map(|signature| signature.recover_signer(&block_hash))
            .collect()
    }
}
