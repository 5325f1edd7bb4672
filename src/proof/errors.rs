//! Failures surfaced while building, encoding or decoding proofs.
//!
//! Every failure is terminal for the call that raised it and no partially
//! encoded buffer is ever returned. Verification failures are not part of
//! this taxonomy; they only surface in the on-chain verifier.

use core::fmt;

use crate::abi::AbiError;

/// Coarse classification of a [`ProofError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A field violates its fixed-width contract.
    Malformed,
    /// A required sequence is empty, too long or incomplete.
    Structural,
    /// Signature reassembly or recovery failed.
    Signature,
    /// Encoded bytes could not be decoded back into a proof.
    Encoding,
}

/// Errors emitted by the proof layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// A fixed-width byte field has the wrong length.
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        got: usize,
    },
    /// A hex string could not be parsed.
    InvalidHex {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A string field does not hold valid UTF-8.
    InvalidString {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A signature carries a `v` other than 27 or 28.
    InvalidRecoveryId {
        /// Position of the signature in the relay proof.
        index: usize,
        /// Value found.
        v: u8,
    },
    /// A relay proof without any validator signature.
    EmptySignatures,
    /// An oracle data proof without any Merkle path step.
    EmptyMerklePaths,
    /// A relay envelope without any oracle data proof.
    EmptyDataProofs,
    /// More signatures than the configured limit.
    TooManySignatures {
        /// Number of signatures carried.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
    /// More Merkle path steps than the configured limit.
    TooManyMerklePaths {
        /// Number of steps carried.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A store required to build the multi-store proof is absent.
    MissingStore {
        /// Store name.
        name: &'static str,
    },
    /// The store map holds stores outside the committed layout.
    UnexpectedStoreCount {
        /// Number of committed stores.
        expected: usize,
        /// Number of stores supplied.
        got: usize,
    },
    /// The block hash does not occur in the signed vote bytes.
    BlockHashNotFound,
    /// The block hash occurs more than once in the signed vote bytes.
    AmbiguousBlockHash {
        /// Number of occurrences found.
        occurrences: usize,
    },
    /// Neither recovery id yields the expected signer.
    SignerNotRecovered,
    /// The `(r, s)` pair is not a valid secp256k1 signature.
    InvalidSignature,
    /// Decoded tokens do not match the proof layout.
    UnexpectedLayout {
        /// Structure being rebuilt.
        field: &'static str,
    },
    /// An IAVL node field exceeds the signed 64-bit range of its preimage.
    ValueOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value found.
        value: u64,
    },
    /// ABI encoding or decoding failure.
    Abi(AbiError),
}

impl ProofError {
    /// Returns the class the error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ProofError::InvalidLength { .. }
            | ProofError::InvalidHex { .. }
            | ProofError::InvalidString { .. }
            | ProofError::InvalidRecoveryId { .. }
            | ProofError::ValueOutOfRange { .. } => ErrorClass::Malformed,
            ProofError::EmptySignatures
            | ProofError::EmptyMerklePaths
            | ProofError::EmptyDataProofs
            | ProofError::TooManySignatures { .. }
            | ProofError::TooManyMerklePaths { .. }
            | ProofError::MissingStore { .. }
            | ProofError::UnexpectedStoreCount { .. } => ErrorClass::Structural,
            ProofError::BlockHashNotFound
            | ProofError::AmbiguousBlockHash { .. }
            | ProofError::SignerNotRecovered
            | ProofError::InvalidSignature => ErrorClass::Signature,
            ProofError::UnexpectedLayout { .. } => ErrorClass::Encoding,
            ProofError::Abi(err) => match err {
                AbiError::IntegerOverflow { .. }
                | AbiError::InvalidTypeWidth { .. }
                | AbiError::InvalidFixedLength { .. } => ErrorClass::Malformed,
                _ => ErrorClass::Encoding,
            },
        }
    }
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofError::InvalidLength {
                field,
                expected,
                got,
            } => write!(f, "{field}: expected {expected} bytes, got {got}"),
            ProofError::InvalidHex { field } => write!(f, "{field}: invalid hex string"),
            ProofError::InvalidString { field } => write!(f, "{field}: invalid utf-8"),
            ProofError::InvalidRecoveryId { index, v } => {
                write!(f, "signature {index}: v must be 27 or 28, got {v}")
            }
            ProofError::EmptySignatures => write!(f, "relay proof carries no signatures"),
            ProofError::EmptyMerklePaths => write!(f, "data proof carries no merkle path"),
            ProofError::EmptyDataProofs => write!(f, "no oracle data proof supplied"),
            ProofError::TooManySignatures { len, max } => {
                write!(f, "{len} signatures exceed the limit of {max}")
            }
            ProofError::TooManyMerklePaths { len, max } => {
                write!(f, "{len} merkle path steps exceed the limit of {max}")
            }
            ProofError::MissingStore { name } => write!(f, "store {name} missing"),
            ProofError::UnexpectedStoreCount { expected, got } => {
                write!(f, "expected {expected} stores, got {got}")
            }
            ProofError::BlockHashNotFound => write!(f, "block hash not found in vote bytes"),
            ProofError::AmbiguousBlockHash { occurrences } => {
                write!(f, "block hash occurs {occurrences} times in vote bytes")
            }
            ProofError::SignerNotRecovered => {
                write!(f, "no recovery id yields the expected signer")
            }
            ProofError::InvalidSignature => write!(f, "invalid secp256k1 signature"),
            ProofError::UnexpectedLayout { field } => {
                write!(f, "{field}: unexpected encoded layout")
            }
            ProofError::ValueOutOfRange { field, value } => {
                write!(f, "{field}: {value} exceeds the int64 range")
            }
            ProofError::Abi(err) => write!(f, "abi: {err}"),
        }
    }
}

impl std::error::Error for ProofError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProofError::Abi(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AbiError> for ProofError {
    fn from(err: AbiError) -> Self {
        ProofError::Abi(err)
    }
}

/// Convenient alias for proof results.
pub type ProofResult<T> = core::result::Result<T, ProofError>;
