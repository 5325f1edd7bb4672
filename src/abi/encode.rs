//! Head/tail tuple encoding.
//!
//! Every tuple is written as a head section followed by a tail section. A
//! static member is written into the head directly. A dynamic member puts a
//! 32-byte offset into the head, measured from the first byte of the head,
//! and its own encoding into the tail. The rule applies again inside every
//! dynamic member, so a list of structs that hold `bytes` fields carries
//! offsets at three levels.

use super::token::{Token, WORD_SIZE};

/// Encodes an argument list, laid out exactly like a tuple.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let (mut head, tail) = encode_head_tail(tokens);
    head.extend_from_slice(&tail);
    head
}

/// Encodes a single token as a one-member argument list.
pub fn encode_single(token: &Token) -> Vec<u8> {
    encode(core::slice::from_ref(token))
}

/// Splits the encoding of `tokens` into its head and tail sections.
pub fn encode_head_tail(tokens: &[Token]) -> (Vec<u8>, Vec<u8>) {
    let head_len: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            write_usize(&mut head, head_len + tail.len());
            encode_dynamic(token, &mut tail);
        } else {
            encode_static(token, &mut head);
        }
    }
    debug_assert_eq!(head.len(), head_len);
    (head, tail)
}

fn encode_static(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::Word(word) => out.extend_from_slice(word),
        Token::Tuple(members) | Token::FixedArray(members) => {
            for member in members {
                encode_static(member, out);
            }
        }
        Token::Bytes(_) | Token::Array(_) => {
            unreachable!("dynamic token passed to the static encoder")
        }
    }
}

fn encode_dynamic(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::Bytes(bytes) => {
            write_usize(out, bytes.len());
            out.extend_from_slice(bytes);
            out.resize(out.len() + padding(bytes.len()), 0);
        }
        Token::Array(items) => {
            write_usize(out, items.len());
            append_sequence(items, out);
        }
        Token::Tuple(members) | Token::FixedArray(members) => append_sequence(members, out),
        Token::Word(_) => unreachable!("static token passed to the dynamic encoder"),
    }
}

fn append_sequence(tokens: &[Token], out: &mut Vec<u8>) {
    let (head, tail) = encode_head_tail(tokens);
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
}

/// Writes `value` as a left padded word.
fn write_usize(out: &mut Vec<u8>, value: usize) {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    out.extend_from_slice(&word);
}

/// Zero bytes needed to round `len` up to a word boundary.
pub(crate) fn padding(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}
