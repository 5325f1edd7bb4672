//! # Proof module overview
//!
//! ```text
//! proof
//! ├── types         Bytes32 and address aliases
//! ├── multistore    multi-store sub-roots and the application hash
//! ├── header        block header parts and the block hash
//! ├── signature     validator signatures, vote splitting and recovery
//! ├── vote          canonical precommit sign bytes
//! ├── relay         BlockRelayProof encoder/decoder
//! ├── iavl          IAVL path steps
//! ├── packet        oracle request/response packets
//! ├── oracle        OracleDataProof encoder/decoder
//! └── envelope      bridge call packing
//! ```
//!
//! Proofs are immutable value objects. Encoding validates the structure,
//! builds an ABI token tree and hands it to [`crate::abi::encode`]; the
//! hash recomputation helpers are never called on the encode path.

mod amino;
pub mod envelope;
pub mod errors;
pub mod header;
pub mod iavl;
pub mod multistore;
pub mod oracle;
pub mod packet;
pub mod relay;
pub mod signature;
pub mod types;
pub mod vote;

pub use envelope::{
    relay_and_multi_verify, relay_and_multi_verify_with, relay_and_verify, relay_and_verify_with,
    EvmProof, JsonMultiProof, JsonProof,
};
pub use errors::{ErrorClass, ProofError, ProofResult};
pub use header::{BlockHeader, BlockHeaderMerkleParts, BlockId};
pub use iavl::{fold_path, IavlMerklePath};
pub use multistore::{store_leaf, MultiStoreProof};
pub use oracle::OracleDataProof;
pub use packet::{RequestPacket, ResponsePacket};
pub use relay::BlockRelayProof;
pub use signature::{evm_address, split_sign_bytes, TmSignature};
pub use types::{Bytes32, EvmAddress, HASH_LEN};
pub use vote::CanonicalVote;

use crate::abi::AbiError;
use crate::config::EncoderLimits;

/// Rejects a dynamic field the decoder would refuse under `limits`.
pub(crate) fn ensure_dynamic_len(len: usize, limits: &EncoderLimits) -> ProofResult<()> {
    if len > limits.max_dynamic_len {
        return Err(ProofError::Abi(AbiError::LengthLimit {
            len,
            max: limits.max_dynamic_len,
        }));
    }
    Ok(())
}
