//! Ethereum contract ABI tuple encoding.
//!
//! The proof encoders describe their payloads as [`Token`] trees and hand them
//! to [`encode`]; the offset arithmetic lives in one place for both proof
//! types. Layout rules:
//!
//! * Static scalars occupy one 32-byte word. Integers are left padded,
//!   `bytesN` values are right padded.
//! * `bytes` and `string` are stored out-of-line as a length word followed
//!   by the payload, zero padded to the next word boundary.
//! * `T[]` is stored out-of-line as a count word followed by the elements
//!   encoded as a tuple.
//! * A tuple is a head followed by a tail. Static members sit in the head;
//!   dynamic members put an offset into the head (relative to the start of
//!   that head) and their data into the tail, in member order.
//!
//! [`decode`] walks the same layout back given a [`ParamType`] schema.

mod cursor;
mod decode;
mod encode;
mod error;
mod token;
mod types;

pub use cursor::WordReader;
pub use decode::{decode, decode_canonical};
pub use encode::{encode, encode_head_tail, encode_single};
pub use error::{AbiError, AbiResult};
pub use token::{word_to_bool, word_to_u128, word_to_u64, word_to_u8, Token, Word, WORD_SIZE};
pub use types::ParamType;
