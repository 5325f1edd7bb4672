use super::token::WORD_SIZE;

/// Schema describing how to decode a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// `uint<bits>`.
    Uint(usize),
    /// `bool`.
    Bool,
    /// `address`.
    Address,
    /// `bytes<size>` with `1 <= size <= 32`.
    FixedBytes(usize),
    /// `bytes`.
    Bytes,
    /// `string`.
    String,
    /// `T[]`.
    Array(Box<ParamType>),
    /// `T[k]`.
    FixedArray(Box<ParamType>, usize),
    /// `(T1, T2, ...)`.
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Whether values of this type are stored out-of-line behind an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Uint(_) | ParamType::Bool | ParamType::Address | ParamType::FixedBytes(_) => {
                false
            }
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, len) => *len > 0 && inner.is_dynamic(),
            ParamType::Tuple(members) => members.iter().any(ParamType::is_dynamic),
        }
    }

    /// Bytes a value of this type occupies in the head of its enclosing tuple.
    pub fn head_len(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            ParamType::FixedArray(inner, len) => inner.head_len() * len,
            ParamType::Tuple(members) => members.iter().map(ParamType::head_len).sum(),
            _ => WORD_SIZE,
        }
    }
}
