use prost::Message;
use serde::{Deserialize, Serialize};

use super::amino;
use super::header::BlockId;

/// A precommit vote in the canonical form validators sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalVote {
    pub height: u64,
    pub round: u64,
    pub block_id: BlockId,
    pub timestamp_second: u64,
    pub timestamp_nano_second: u32,
    pub chain_id: String,
}

impl CanonicalVote {
    /// Message type tag of a precommit.
    pub const PRECOMMIT_TYPE: u32 = 2;

    /// Length-delimited bytes covered by the validator signature.
    pub fn sign_bytes(&self) -> Vec<u8> {
        let vote = amino::CanonicalVote {
            vote_type: Self::PRECOMMIT_TYPE,
            height: self.height,
            round: self.round,
            block_id: Some(amino::CanonicalBlockId {
                hash: self.block_id.hash.as_bytes().to_vec(),
                parts: Some(amino::CanonicalPartSetHeader {
                    hash: self.block_id.part_set_hash.as_bytes().to_vec(),
                    total: self.block_id.part_set_total,
                }),
            }),
            timestamp: Some(amino::Timestamp {
                seconds: self.timestamp_second,
                nanos: self.timestamp_nano_second,
            }),
            chain_id: self.chain_id.clone(),
        };
        vote.encode_length_delimited_to_vec()
    }
}
