use prost::Message;
use serde::{Deserialize, Serialize};

use super::amino;
use super::errors::{ProofError, ProofResult};
use super::types::Bytes32;
use crate::abi::{word_to_u64, ParamType, Token};
use crate::hash::{
    branch_hash, encode_length_prefixed, encode_uvarint, leaf_hash, simple_hash_from_byte_slices,
};

/// Identifier of a block: its hash and the header of its part set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId {
    pub hash: Bytes32,
    pub part_set_total: u32,
    pub part_set_hash: Bytes32,
}

/// The fourteen committed fields of a block header.
///
/// `last_commit_hash`, `data_hash`, `last_results_hash` and `evidence_hash`
/// are empty when the block carries no commit, transactions, results or
/// evidence; an empty value hashes as an empty leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version_block: u64,
    pub version_app: u64,
    pub chain_id: String,
    pub height: u64,
    pub time_second: u64,
    pub time_nano_second: u32,
    pub last_block_id: BlockId,
    #[serde(with = "hex::serde")]
    pub last_commit_hash: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub data_hash: Vec<u8>,
    pub validators_hash: Bytes32,
    pub next_validators_hash: Bytes32,
    pub consensus_hash: Bytes32,
    pub app_hash: Bytes32,
    #[serde(with = "hex::serde")]
    pub last_results_hash: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub evidence_hash: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub proposer_address: Vec<u8>,
}

impl BlockHeader {
    /// Encoded header fields in commit order, one Merkle leaf each.
    pub fn leaves(&self) -> [Vec<u8>; 14] {
        let version = amino::ConsensusVersion {
            block: self.version_block,
            app: self.version_app,
        };
        let last_block_id = amino::BlockId {
            hash: self.last_block_id.hash.as_bytes().to_vec(),
            parts: Some(amino::PartSetHeader {
                total: self.last_block_id.part_set_total,
                hash: self.last_block_id.part_set_hash.as_bytes().to_vec(),
            }),
        };
        [
            version.encode_to_vec(),
            bytes_leaf(self.chain_id.as_bytes()),
            height_leaf(self.height),
            time_leaf(self.time_second, self.time_nano_second),
            last_block_id.encode_to_vec(),
            bytes_leaf(&self.last_commit_hash),
            bytes_leaf(&self.data_hash),
            bytes_leaf(self.validators_hash.as_bytes()),
            bytes_leaf(self.next_validators_hash.as_bytes()),
            bytes_leaf(self.consensus_hash.as_bytes()),
            bytes_leaf(self.app_hash.as_bytes()),
            bytes_leaf(&self.last_results_hash),
            bytes_leaf(&self.evidence_hash),
            bytes_leaf(&self.proposer_address),
        ]
    }

    /// Block hash: simple Merkle root over [`BlockHeader::leaves`].
    pub fn hash(&self) -> Bytes32 {
        Bytes32::new(simple_hash_from_byte_slices(&self.leaves()))
    }
}

/// Header leaves the verifier cannot derive, plus the raw height and time.
///
/// Height and time travel unhashed so the verifier can check them against
/// its own bounds before hashing them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHeaderMerkleParts {
    pub version_and_chain_id_hash: Bytes32,
    pub height: u64,
    pub time_second: u64,
    pub time_nano_second: u32,
    pub last_block_id_and_other: Bytes32,
    pub next_validator_hash_and_consensus_hash: Bytes32,
    pub last_results_hash: Bytes32,
    pub evidence_and_proposer_hash: Bytes32,
}

impl BlockHeaderMerkleParts {
    /// Collapses a full header into its eight parts.
    pub fn from_header(header: &BlockHeader) -> Self {
        let leaves = header.leaves();
        let leaf = |index: usize| leaf_hash(&leaves[index]);
        let pair = |left: usize, right: usize| branch_hash(&leaf(left), &leaf(right));
        Self {
            version_and_chain_id_hash: Bytes32::new(pair(0, 1)),
            height: header.height,
            time_second: header.time_second,
            time_nano_second: header.time_nano_second,
            last_block_id_and_other: Bytes32::new(branch_hash(&pair(4, 5), &pair(6, 7))),
            next_validator_hash_and_consensus_hash: Bytes32::new(pair(8, 9)),
            last_results_hash: Bytes32::new(leaf(11)),
            evidence_and_proposer_hash: Bytes32::new(pair(12, 13)),
        }
    }

    /// Members of the static header tuple, in wire order.
    pub fn encode_tokens(&self) -> Vec<Token> {
        vec![
            self.version_and_chain_id_hash.to_token(),
            Token::uint(self.height),
            Token::uint(self.time_second),
            Token::uint(self.time_nano_second),
            self.last_block_id_and_other.to_token(),
            self.next_validator_hash_and_consensus_hash.to_token(),
            self.last_results_hash.to_token(),
            self.evidence_and_proposer_hash.to_token(),
        ]
    }

    /// Static tuple of the eight parts in wire order.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(self.encode_tokens())
    }

    /// Decode schema matching [`BlockHeaderMerkleParts::encode_token`].
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::FixedBytes(32),
            ParamType::Uint(64),
            ParamType::Uint(64),
            ParamType::Uint(32),
            ParamType::FixedBytes(32),
            ParamType::FixedBytes(32),
            ParamType::FixedBytes(32),
            ParamType::FixedBytes(32),
        ])
    }

    /// Rebuilds the parts from a decoded header tuple.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let [version_and_chain_id, height, time_second, time_nano, last_block_id, next_validator, last_results, evidence] =
            <[Token; 8]>::try_from(members).map_err(|_| ProofError::UnexpectedLayout {
                field: "block_header_merkle_parts",
            })?;
        let time_nano_second = u32::try_from(word_to_u64(time_nano.as_word()?)?).map_err(|_| {
            ProofError::UnexpectedLayout {
                field: "time_nano_second",
            }
        })?;
        Ok(Self {
            version_and_chain_id_hash: Bytes32::from_word(version_and_chain_id.as_word()?),
            height: word_to_u64(height.as_word()?)?,
            time_second: word_to_u64(time_second.as_word()?)?,
            time_nano_second,
            last_block_id_and_other: Bytes32::from_word(last_block_id.as_word()?),
            next_validator_hash_and_consensus_hash: Bytes32::from_word(next_validator.as_word()?),
            last_results_hash: Bytes32::from_word(last_results.as_word()?),
            evidence_and_proposer_hash: Bytes32::from_word(evidence.as_word()?),
        })
    }

    /// Recomputes the block hash given the application hash.
    pub fn block_hash(&self, app_hash: &Bytes32) -> Bytes32 {
        let height_and_time = branch_hash(
            &leaf_hash(&height_leaf(self.height)),
            &leaf_hash(&time_leaf(self.time_second, self.time_nano_second)),
        );
        let left = branch_hash(
            &branch_hash(self.version_and_chain_id_hash.as_bytes(), &height_and_time),
            self.last_block_id_and_other.as_bytes(),
        );
        let app_and_results = branch_hash(
            &leaf_hash(&bytes_leaf(app_hash.as_bytes())),
            self.last_results_hash.as_bytes(),
        );
        let right = branch_hash(
            &branch_hash(
                self.next_validator_hash_and_consensus_hash.as_bytes(),
                &app_and_results,
            ),
            self.evidence_and_proposer_hash.as_bytes(),
        );
        Bytes32::new(branch_hash(&left, &right))
    }
}

fn height_leaf(height: u64) -> Vec<u8> {
    let mut leaf = Vec::with_capacity(10);
    encode_uvarint(&mut leaf, height);
    leaf
}

fn time_leaf(second: u64, nano_second: u32) -> Vec<u8> {
    amino::Timestamp {
        seconds: second,
        nanos: nano_second,
    }
    .encode_to_vec()
}

/// Length-prefixed bytes; empty values hash as an empty leaf.
fn bytes_leaf(bytes: &[u8]) -> Vec<u8> {
    let mut leaf = Vec::with_capacity(bytes.len() + 1);
    if !bytes.is_empty() {
        encode_length_prefixed(&mut leaf, bytes);
    }
    leaf
}
