//! Varint framing used inside leaf and node preimages.

use prost::encoding::encode_varint;

/// Appends `value` as an unsigned LEB128 varint.
pub fn encode_uvarint(out: &mut Vec<u8>, value: u64) {
    encode_varint(value, out);
}

/// Appends `value` as a zig-zag signed varint.
pub fn encode_svarint(out: &mut Vec<u8>, value: i64) {
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    encode_varint(zigzag, out);
}

/// Appends a uvarint length prefix followed by `bytes`.
pub fn encode_length_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    encode_uvarint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}
