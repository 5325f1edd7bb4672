use super::error::{AbiError, AbiResult};

/// Width of one ABI word.
pub const WORD_SIZE: usize = 32;

/// A single 32-byte ABI word.
pub type Word = [u8; WORD_SIZE];

/// Value tree handed to the encoder.
///
/// Scalars of every static type collapse into a [`Token::Word`]; the type
/// only matters when the word is built (left padding for numbers, right
/// padding for `bytesN`). A `Tuple` or `FixedArray` is static exactly when
/// all of its members are static, in which case it is inlined into the head
/// of the enclosing tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Static scalar already laid out as a word.
    Word(Word),
    /// `bytes` or `string`, stored out-of-line with a length word.
    Bytes(Vec<u8>),
    /// Struct or argument list.
    Tuple(Vec<Token>),
    /// Dynamic-length list `T[]`, stored out-of-line with a count word.
    Array(Vec<Token>),
    /// Fixed-length list `T[k]`, laid out like a tuple.
    FixedArray(Vec<Token>),
}

impl Token {
    /// Unsigned integer of at most 128 bits, left padded.
    pub fn uint(value: impl Into<u128>) -> Self {
        let mut word = [0u8; WORD_SIZE];
        word[16..].copy_from_slice(&value.into().to_be_bytes());
        Token::Word(word)
    }

    /// Unsigned integer checked against a declared `uint<bits>` width.
    pub fn uint_sized(value: u128, bits: usize) -> AbiResult<Self> {
        ensure_uint_width(bits)?;
        if bits < 128 && value >> bits != 0 {
            return Err(AbiError::IntegerOverflow { bits });
        }
        Ok(Token::uint(value))
    }

    /// Unsigned integer given as big-endian bytes of any length.
    ///
    /// Leading zero bytes are ignored; anything left that is wider than one
    /// word is rejected instead of truncated.
    pub fn uint_be(bytes: &[u8]) -> AbiResult<Self> {
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let significant = &bytes[first..];
        if significant.len() > WORD_SIZE {
            return Err(AbiError::IntegerOverflow { bits: 256 });
        }
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - significant.len()..].copy_from_slice(significant);
        Ok(Token::Word(word))
    }

    /// Boolean encoded as `0` or `1`.
    pub fn bool(value: bool) -> Self {
        Token::uint(u8::from(value))
    }

    /// 20-byte address, left padded.
    pub fn address(address: &[u8; 20]) -> Self {
        let mut word = [0u8; WORD_SIZE];
        word[12..].copy_from_slice(address);
        Token::Word(word)
    }

    /// `bytes<size>` value, right padded.
    ///
    /// `bytes` must be exactly `size` long.
    pub fn fixed_bytes(bytes: &[u8], size: usize) -> AbiResult<Self> {
        if size == 0 || size > WORD_SIZE {
            return Err(AbiError::InvalidTypeWidth { width: size });
        }
        if bytes.len() != size {
            return Err(AbiError::InvalidFixedLength {
                expected: size,
                got: bytes.len(),
            });
        }
        let mut word = [0u8; WORD_SIZE];
        word[..size].copy_from_slice(bytes);
        Ok(Token::Word(word))
    }

    /// `bytes32` value.
    pub fn bytes32(bytes: &[u8; WORD_SIZE]) -> Self {
        Token::Word(*bytes)
    }

    /// Dynamic `bytes` value.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Token::Bytes(bytes.into())
    }

    /// Dynamic `string` value, encoded as its UTF-8 bytes.
    pub fn string(value: &str) -> Self {
        Token::Bytes(value.as_bytes().to_vec())
    }

    /// Whether the token is stored out-of-line behind an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::Word(_) => false,
            Token::Bytes(_) | Token::Array(_) => true,
            Token::Tuple(members) | Token::FixedArray(members) => {
                members.iter().any(Token::is_dynamic)
            }
        }
    }

    /// Bytes the token occupies in the head of its enclosing tuple.
    pub fn head_len(&self) -> usize {
        match self {
            Token::Tuple(members) | Token::FixedArray(members) if !self.is_dynamic() => {
                members.iter().map(Token::head_len).sum()
            }
            _ => WORD_SIZE,
        }
    }

    /// Returns the word of a static scalar.
    pub fn as_word(&self) -> AbiResult<&Word> {
        match self {
            Token::Word(word) => Ok(word),
            _ => Err(AbiError::TokenMismatch { expected: "word" }),
        }
    }

    /// Consumes a `bytes`/`string` token.
    pub fn into_bytes(self) -> AbiResult<Vec<u8>> {
        match self {
            Token::Bytes(bytes) => Ok(bytes),
            _ => Err(AbiError::TokenMismatch { expected: "bytes" }),
        }
    }

    /// Consumes a tuple token and returns its members.
    pub fn into_tuple(self) -> AbiResult<Vec<Token>> {
        match self {
            Token::Tuple(members) => Ok(members),
            _ => Err(AbiError::TokenMismatch { expected: "tuple" }),
        }
    }

    /// Consumes an array token (dynamic or fixed) and returns its elements.
    pub fn into_array(self) -> AbiResult<Vec<Token>> {
        match self {
            Token::Array(items) | Token::FixedArray(items) => Ok(items),
            _ => Err(AbiError::TokenMismatch { expected: "array" }),
        }
    }
}

/// Ensures `bits` names a valid `uintN` type.
pub(crate) fn ensure_uint_width(bits: usize) -> AbiResult<()> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidTypeWidth { width: bits });
    }
    Ok(())
}

/// Reads a word as an unsigned integer no wider than `u64`.
pub fn word_to_u64(word: &Word) -> AbiResult<u64> {
    if word[..WORD_SIZE - 8].iter().any(|b| *b != 0) {
        return Err(AbiError::IntegerOverflow { bits: 64 });
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[WORD_SIZE - 8..]);
    Ok(u64::from_be_bytes(bytes))
}

/// Reads a word as an unsigned integer no wider than `u128`.
pub fn word_to_u128(word: &Word) -> AbiResult<u128> {
    if word[..WORD_SIZE - 16].iter().any(|b| *b != 0) {
        return Err(AbiError::IntegerOverflow { bits: 128 });
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&word[WORD_SIZE - 16..]);
    Ok(u128::from_be_bytes(bytes))
}

/// Reads a word as an unsigned integer no wider than `u8`.
pub fn word_to_u8(word: &Word) -> AbiResult<u8> {
    let value = word_to_u64(word)?;
    u8::try_from(value).map_err(|_| AbiError::IntegerOverflow { bits: 8 })
}

/// Reads a word holding `0` or `1`.
pub fn word_to_bool(word: &Word) -> AbiResult<bool> {
    match word_to_u64(word) {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(AbiError::TokenMismatch { expected: "bool" }),
    }
}
