//! Schema-driven decoder for head/tail encoded tuples.
//!
//! Offsets are followed relative to the start of the tuple that holds them.
//! Every length and element count is checked against the configured limit
//! and against the bytes actually present before anything is allocated.

use tracing::trace;

use super::cursor::WordReader;
use super::encode::{encode, padding};
use super::error::{AbiError, AbiResult};
use super::token::{ensure_uint_width, Token, WORD_SIZE};
use super::types::ParamType;
use crate::config::EncoderLimits;

/// Decodes an argument list described by `types`.
pub fn decode(types: &[ParamType], data: &[u8], limits: &EncoderLimits) -> AbiResult<Vec<Token>> {
    let decoder = Decoder {
        reader: WordReader::new(data),
        max_len: limits.max_dynamic_len,
    };
    let tokens = decoder.sequence(types.iter(), types.len(), 0)?;
    trace!(members = tokens.len(), bytes = data.len(), "decoded abi tuple");
    Ok(tokens)
}

/// Decodes `data` and rejects it unless re-encoding yields the same bytes.
///
/// This catches inputs with gaps between tails, overlapping tails or offsets
/// that point backwards, all of which [`decode`] tolerates.
pub fn decode_canonical(
    types: &[ParamType],
    data: &[u8],
    limits: &EncoderLimits,
) -> AbiResult<Vec<Token>> {
    let tokens = decode(types, data, limits)?;
    if encode(&tokens) != data {
        return Err(AbiError::NonCanonical);
    }
    Ok(tokens)
}

struct Decoder<'a> {
    reader: WordReader<'a>,
    max_len: usize,
}

impl<'a> Decoder<'a> {
    fn sequence<'t, I>(&self, types: I, count: usize, base: usize) -> AbiResult<Vec<Token>>
    where
        I: Iterator<Item = &'t ParamType>,
    {
        let mut out = Vec::with_capacity(count);
        let mut head = base;
        for ty in types {
            if ty.is_dynamic() {
                let relative = self.reader.read_usize(head)?;
                let target = base
                    .checked_add(relative)
                    .filter(|target| *target <= self.reader.len())
                    .ok_or(AbiError::OffsetOutOfBounds { offset: head })?;
                out.push(self.dynamic(ty, target)?);
            } else {
                out.push(self.fixed(ty, head)?);
            }
            head = head
                .checked_add(ty.head_len())
                .ok_or(AbiError::OffsetOutOfBounds { offset: head })?;
        }
        Ok(out)
    }

    fn repeated(&self, inner: &ParamType, count: usize, base: usize) -> AbiResult<Vec<Token>> {
        self.sequence(core::iter::repeat(inner).take(count), count, base)
    }

    fn dynamic(&self, ty: &ParamType, at: usize) -> AbiResult<Token> {
        match ty {
            ParamType::Bytes | ParamType::String => {
                let len = self.checked_len(at)?;
                let payload = self.reader.read_exact(at + WORD_SIZE, len)?;
                let pad_at = at + WORD_SIZE + len;
                let pad = self.reader.read_exact(pad_at, padding(len))?;
                if pad.iter().any(|b| *b != 0) {
                    return Err(AbiError::DirtyPadding { offset: pad_at });
                }
                Ok(Token::Bytes(payload.to_vec()))
            }
            ParamType::Array(inner) => {
                let count = self.checked_len(at)?;
                let start = at + WORD_SIZE;
                self.ensure_room(start, count, inner.head_len())?;
                Ok(Token::Array(self.repeated(inner, count, start)?))
            }
            ParamType::FixedArray(inner, len) => {
                self.ensure_room(at, *len, inner.head_len())?;
                Ok(Token::FixedArray(self.repeated(inner, *len, at)?))
            }
            ParamType::Tuple(members) => Ok(Token::Tuple(self.sequence(
                members.iter(),
                members.len(),
                at,
            )?)),
            _ => Err(AbiError::TokenMismatch {
                expected: "dynamic type",
            }),
        }
    }

    fn fixed(&self, ty: &ParamType, at: usize) -> AbiResult<Token> {
        match ty {
            ParamType::Uint(bits) => {
                ensure_uint_width(*bits)?;
                let word = self.reader.read_word(at)?;
                let unused = WORD_SIZE - bits / 8;
                if word[..unused].iter().any(|b| *b != 0) {
                    return Err(AbiError::IntegerOverflow { bits: *bits });
                }
                Ok(Token::Word(word))
            }
            ParamType::Bool => {
                let word = self.reader.read_word(at)?;
                if word[..WORD_SIZE - 1].iter().any(|b| *b != 0) || word[WORD_SIZE - 1] > 1 {
                    return Err(AbiError::InvalidBool { offset: at });
                }
                Ok(Token::Word(word))
            }
            ParamType::Address => {
                let word = self.reader.read_word(at)?;
                if word[..12].iter().any(|b| *b != 0) {
                    return Err(AbiError::DirtyPadding { offset: at });
                }
                Ok(Token::Word(word))
            }
            ParamType::FixedBytes(size) => {
                if *size == 0 || *size > WORD_SIZE {
                    return Err(AbiError::InvalidTypeWidth { width: *size });
                }
                let word = self.reader.read_word(at)?;
                if word[*size..].iter().any(|b| *b != 0) {
                    return Err(AbiError::DirtyPadding { offset: at });
                }
                Ok(Token::Word(word))
            }
            ParamType::FixedArray(inner, len) => {
                Ok(Token::FixedArray(self.repeated(inner, *len, at)?))
            }
            ParamType::Tuple(members) => Ok(Token::Tuple(self.sequence(
                members.iter(),
                members.len(),
                at,
            )?)),
            _ => Err(AbiError::TokenMismatch {
                expected: "static type",
            }),
        }
    }

    /// Reads a length or count word and applies the configured limit.
    fn checked_len(&self, at: usize) -> AbiResult<usize> {
        let len = self.reader.read_usize(at)?;
        if len > self.max_len {
            return Err(AbiError::LengthLimit {
                len,
                max: self.max_len,
            });
        }
        Ok(len)
    }

    /// Ensures `count` heads of `head_len` bytes fit after `start`.
    fn ensure_room(&self, start: usize, count: usize, head_len: usize) -> AbiResult<()> {
        let needed = count
            .checked_mul(head_len)
            .ok_or(AbiError::OffsetOutOfBounds { offset: start })?;
        self.reader.read_exact(start, needed).map(|_| ())
    }
}
