//! Validator signatures over a block vote.
//!
//! A validator signs `prefix || block_hash || suffix`. Only the two
//! fragments travel in a proof: the verifier recomputes the block hash from
//! the header parts and splices it back in before recovering the signer.
//! The encoders in this crate therefore never rebuild the signed message;
//! [`TmSignature::signed_message`] exists for local checks and tooling only.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};
use tracing::debug;

use super::errors::{ProofError, ProofResult};
use super::types::{Bytes32, EvmAddress};
use crate::abi::{word_to_u8, ParamType, Token};
use crate::config::RECOVERY_ID_OFFSET;
use crate::hash::tmhash;

/// One validator signature with the vote bytes surrounding the block hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmSignature {
    pub r: Bytes32,
    pub s: Bytes32,
    pub v: u8,
    #[serde(with = "hex::serde")]
    pub signed_data_prefix: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub signed_data_suffix: Vec<u8>,
}

impl TmSignature {
    /// Builds a signature from raw parts, checking every width.
    pub fn new(
        r: &[u8],
        s: &[u8],
        v: u8,
        signed_data_prefix: Vec<u8>,
        signed_data_suffix: Vec<u8>,
    ) -> ProofResult<Self> {
        let signature = Self {
            r: Bytes32::from_slice("r", r)?,
            s: Bytes32::from_slice("s", s)?,
            v,
            signed_data_prefix,
            signed_data_suffix,
        };
        signature.ensure_recovery_id(0)?;
        Ok(signature)
    }

    /// Splits `sign_bytes` around `block_hash` and picks the `v` under
    /// which the 64-byte `r || s` signature recovers to `signer`.
    pub fn from_vote(
        sign_bytes: &[u8],
        block_hash: &Bytes32,
        signature: &[u8],
        signer: &EvmAddress,
    ) -> ProofResult<Self> {
        if signature.len() != 64 {
            return Err(ProofError::InvalidLength {
                field: "signature",
                expected: 64,
                got: signature.len(),
            });
        }
        let (prefix, suffix) = split_sign_bytes(sign_bytes, block_hash)?;
        let (r, s) = signature.split_at(32);
        let mut candidate = Self::new(r, s, RECOVERY_ID_OFFSET, prefix, suffix)?;
        for recovery_id in 0..2u8 {
            candidate.v = RECOVERY_ID_OFFSET + recovery_id;
            match candidate.recover_signer(block_hash) {
                Ok(address) if &address == signer => {
                    debug!(v = candidate.v, "selected recovery id");
                    return Ok(candidate);
                }
                Ok(_) => {}
                Err(ProofError::InvalidSignature) => {}
                Err(err) => return Err(err),
            }
        }
        Err(ProofError::SignerNotRecovered)
    }

    /// `prefix || block_hash || suffix`, the message the validator signed.
    pub fn signed_message(&self, block_hash: &Bytes32) -> Vec<u8> {
        let mut message = Vec::with_capacity(
            self.signed_data_prefix.len() + 32 + self.signed_data_suffix.len(),
        );
        message.extend_from_slice(&self.signed_data_prefix);
        message.extend_from_slice(block_hash.as_bytes());
        message.extend_from_slice(&self.signed_data_suffix);
        message
    }

    /// Recovers the EVM address of the signer.
    pub fn recover_signer(&self, block_hash: &Bytes32) -> ProofResult<EvmAddress> {
        self.ensure_recovery_id(0)?;
        let recovery_id = RecoveryId::from_byte(self.v - RECOVERY_ID_OFFSET)
            .ok_or(ProofError::InvalidRecoveryId { index: 0, v: self.v })?;
        let signature = Signature::from_scalars(self.r.into_bytes(), self.s.into_bytes())
            .map_err(|_| ProofError::InvalidSignature)?;
        let digest = tmhash(&self.signed_message(block_hash));
        let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
            .map_err(|_| ProofError::InvalidSignature)?;
        Ok(evm_address(&key))
    }

    /// Tuple `(bytes32 r, bytes32 s, uint8 v, bytes prefix, bytes suffix)`.
    pub fn encode_token(&self) -> Token {
        Token::Tuple(vec![
            self.r.to_token(),
            self.s.to_token(),
            Token::uint(self.v),
            Token::bytes(self.signed_data_prefix.clone()),
            Token::bytes(self.signed_data_suffix.clone()),
        ])
    }

    /// Decode schema matching [`TmSignature::encode_token`].
    pub fn param_type() -> ParamType {
        ParamType::Tuple(vec![
            ParamType::FixedBytes(32),
            ParamType::FixedBytes(32),
            ParamType::Uint(8),
            ParamType::Bytes,
            ParamType::Bytes,
        ])
    }

    /// Rebuilds a signature from a decoded tuple; `v` is checked later.
    pub fn from_token(token: Token) -> ProofResult<Self> {
        let members = token.into_tuple()?;
        let [r, s, v, prefix, suffix] = <[Token; 5]>::try_from(members)
            .map_err(|_| ProofError::UnexpectedLayout { field: "signature" })?;
        Ok(Self {
            r: Bytes32::from_word(r.as_word()?),
            s: Bytes32::from_word(s.as_word()?),
            v: word_to_u8(v.as_word()?)?,
            signed_data_prefix: prefix.into_bytes()?,
            signed_data_suffix: suffix.into_bytes()?,
        })
    }

    /// Rejects any `v` other than 27 or 28; `index` is reported back.
    pub(crate) fn ensure_recovery_id(&self, index: usize) -> ProofResult<()> {
        match self.v.checked_sub(RECOVERY_ID_OFFSET) {
            Some(0 | 1) => Ok(()),
            _ => Err(ProofError::InvalidRecoveryId { index, v: self.v }),
        }
    }
}

/// Splits vote sign bytes around the single occurrence of `block_hash`.
pub fn split_sign_bytes(sign_bytes: &[u8], block_hash: &Bytes32) -> ProofResult<(Vec<u8>, Vec<u8>)> {
    let needle = block_hash.as_bytes();
    let positions: Vec<usize> = sign_bytes
        .windows(needle.len())
        .enumerate()
        .filter(|(_, window)| *window == needle.as_slice())
        .map(|(position, _)| position)
        .collect();
    match positions.as_slice() {
        [] => Err(ProofError::BlockHashNotFound),
        [at] => Ok((
            sign_bytes[..*at].to_vec(),
            sign_bytes[at + needle.len()..].to_vec(),
        )),
        many => Err(ProofError::AmbiguousBlockHash {
            occurrences: many.len(),
        }),
    }
}

/// Address of a secp256k1 key: the last 20 bytes of the Keccak-256 hash of
/// the uncompressed point without its tag byte.
pub fn evm_address(key: &VerifyingKey) -> EvmAddress {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(bytes);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}
