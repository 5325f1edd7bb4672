use super::error::{AbiError, AbiResult};
use super::token::{Word, WORD_SIZE};

/// Random-access view over an encoded buffer.
///
/// ABI offsets are relative to the start of the enclosing tuple, so the
/// reader never keeps a running position; callers pass absolute positions
/// and the reader bounds-checks every access.
#[derive(Debug, Clone, Copy)]
pub struct WordReader<'a> {
    bytes: &'a [u8],
}

impl<'a> WordReader<'a> {
    /// Creates a reader over the provided buffer.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads exactly `len` bytes starting at `offset`.
    pub fn read_exact(&self, offset: usize, len: usize) -> AbiResult<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .ok_or(AbiError::UnexpectedEnd { offset, needed: len })?;
        self.bytes
            .get(offset..end)
            .ok_or(AbiError::UnexpectedEnd { offset, needed: len })
    }

    /// Reads the word starting at `offset`.
    pub fn read_word(&self, offset: usize) -> AbiResult<Word> {
        let bytes = self.read_exact(offset, WORD_SIZE)?;
        let mut word = [0u8; WORD_SIZE];
        word.copy_from_slice(bytes);
        Ok(word)
    }

    /// Reads a word holding an offset or length and converts it to `usize`.
    ///
    /// Values that cannot address the buffer are rejected.
    pub fn read_usize(&self, offset: usize) -> AbiResult<usize> {
        let word = self.read_word(offset)?;
        if word[..WORD_SIZE - 8].iter().any(|b| *b != 0) {
            return Err(AbiError::OffsetOutOfBounds { offset });
        }
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&word[WORD_SIZE - 8..]);
        let value = u64::from_be_bytes(raw);
        usize::try_from(value).map_err(|_| AbiError::OffsetOutOfBounds { offset })
    }
}

impl<'a> From<&'a [u8]> for WordReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        WordReader::new(bytes)
    }
}
