//! Protobuf-compatible messages for the amino encodings the source chain
//! hashes and signs.
//!
//! Unsigned scalars are declared as `uint64`/`uint32` and signed fixed
//! fields as `fixed64`; both produce the same wire bytes as the signed
//! declarations used by the chain for every in-range value.

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub(crate) struct ConsensusVersion {
    #[prost(uint64, tag = "1")]
    pub block: u64,
    #[prost(uint64, tag = "2")]
    pub app: u64,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct Timestamp {
    #[prost(uint64, tag = "1")]
    pub seconds: u64,
    #[prost(uint32, tag = "2")]
    pub nanos: u32,
}

/// Part set header as committed in the block header: total first.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct PartSetHeader {
    #[prost(uint32, tag = "1")]
    pub total: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct BlockId {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub parts: Option<PartSetHeader>,
}

/// Part set header as signed in a vote: hash first.
#[derive(Clone, PartialEq, Message)]
pub(crate) struct CanonicalPartSetHeader {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub total: u32,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct CanonicalBlockId {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub parts: Option<CanonicalPartSetHeader>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct CanonicalVote {
    #[prost(uint32, tag = "1")]
    pub vote_type: u32,
    #[prost(fixed64, tag = "2")]
    pub height: u64,
    #[prost(fixed64, tag = "3")]
    pub round: u64,
    #[prost(message, optional, tag = "4")]
    pub block_id: Option<CanonicalBlockId>,
    #[prost(message, optional, tag = "5")]
    pub timestamp: Option<Timestamp>,
    #[prost(string, tag = "6")]
    pub chain_id: String,
}
