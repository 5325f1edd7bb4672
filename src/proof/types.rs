use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{ProofError, ProofResult};
use crate::abi::{Token, Word};

/// Width of every hash carried by a proof.
pub const HASH_LEN: usize = 32;

/// 20-byte EVM account address.
pub type EvmAddress = [u8; 20];

/// A 32-byte hash or signature scalar.
///
/// The only ways in are an exact `[u8; 32]` or a checked conversion, so a
/// proof can never hold a hash that is shorter or longer than one word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes32([u8; HASH_LEN]);

impl Bytes32 {
    /// The all-zero value.
    pub const ZERO: Bytes32 = Bytes32([0u8; HASH_LEN]);

    /// Wraps raw bytes.
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Converts a slice, reporting `field` when the length is not 32.
    pub fn from_slice(field: &'static str, bytes: &[u8]) -> ProofResult<Self> {
        let array: [u8; HASH_LEN] = bytes.try_into().map_err(|_| ProofError::InvalidLength {
            field,
            expected: HASH_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Parses a hex string (either case, optional `0x` prefix).
    pub fn from_hex(field: &'static str, value: &str) -> ProofResult<Self> {
        let trimmed = value.strip_prefix("0x").unwrap_or(value);
        let raw = hex::decode(trimmed).map_err(|_| ProofError::InvalidHex { field })?;
        Self::from_slice(field, &raw)
    }

    /// Returns the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Consumes the value and returns the underlying bytes.
    pub const fn into_bytes(self) -> [u8; HASH_LEN] {
        self.0
    }

    /// Lowercase hex rendering without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// ABI `bytes32` token.
    pub fn to_token(&self) -> Token {
        Token::bytes32(&self.0)
    }

    pub(crate) fn from_word(word: &Word) -> Self {
        Self(*word)
    }
}

impl From<[u8; HASH_LEN]> for Bytes32 {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Bytes32> for [u8; HASH_LEN] {
    fn from(value: Bytes32) -> Self {
        value.0
    }
}

impl TryFrom<&[u8]> for Bytes32 {
    type Error = ProofError;

    fn try_from(bytes: &[u8]) -> ProofResult<Self> {
        Self::from_slice("bytes32", bytes)
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32(0x{})", self.to_hex())
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Errors name the value `bytes32` whatever field holds it; the position
/// within the document is left to the deserializer.
impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Bytes32::from_hex("bytes32", &value).map_err(D::Error::custom)
    }
}
