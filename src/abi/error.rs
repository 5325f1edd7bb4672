use core::fmt;

/// Failure raised while building, encoding or decoding ABI tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// An integer does not fit into its declared bit width.
    IntegerOverflow {
        /// Declared width in bits.
        bits: usize,
    },
    /// A `uintN`/`bytesN` width is not supported by the ABI.
    InvalidTypeWidth {
        /// Requested width (bits for integers, bytes for fixed arrays).
        width: usize,
    },
    /// A fixed-length byte value has the wrong length.
    InvalidFixedLength {
        /// Declared length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
    /// The input ended before a word or payload could be read.
    UnexpectedEnd {
        /// Absolute position of the read.
        offset: usize,
        /// Number of bytes requested.
        needed: usize,
    },
    /// An offset or length word points outside the input.
    OffsetOutOfBounds {
        /// Absolute position of the offending word.
        offset: usize,
    },
    /// A boolean word holds something other than zero or one.
    InvalidBool {
        /// Absolute position of the word.
        offset: usize,
    },
    /// Padding bytes around a value are not zero.
    DirtyPadding {
        /// Absolute position of the word.
        offset: usize,
    },
    /// A length or element count exceeds the configured maximum.
    LengthLimit {
        /// Length read from the input.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The input decodes but is not the canonical encoding of its value.
    NonCanonical,
    /// A token does not have the shape required by the caller.
    TokenMismatch {
        /// Shape that was expected.
        expected: &'static str,
    },
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::IntegerOverflow { bits } => {
                write!(f, "integer does not fit into uint{bits}")
            }
            AbiError::InvalidTypeWidth { width } => write!(f, "unsupported type width {width}"),
            AbiError::InvalidFixedLength { expected, got } => {
                write!(f, "fixed-length value must be {expected} bytes, got {got}")
            }
            AbiError::UnexpectedEnd { offset, needed } => {
                write!(f, "input ended reading {needed} bytes at offset {offset}")
            }
            AbiError::OffsetOutOfBounds { offset } => {
                write!(f, "word at offset {offset} points outside the input")
            }
            AbiError::InvalidBool { offset } => write!(f, "invalid bool word at offset {offset}"),
            AbiError::DirtyPadding { offset } => {
                write!(f, "non-zero padding in word at offset {offset}")
            }
            AbiError::LengthLimit { len, max } => {
                write!(f, "length {len} exceeds limit {max}")
            }
            AbiError::NonCanonical => write!(f, "input is not canonically encoded"),
            AbiError::TokenMismatch { expected } => write!(f, "expected {expected} token"),
        }
    }
}

impl std::error::Error for AbiError {}

/// Convenient alias for ABI results.
pub type AbiResult<T> = core::result::Result<T, AbiError>;
