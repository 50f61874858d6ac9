//! Function and event param types.

use std::fmt;

/// Canonical descriptor of an ABI value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// 20-byte account address, left-padded on the wire.
    Address,
    /// Dynamic byte sequence.
    Bytes,
    /// Signed integer of the given bit width (a multiple of 8, up to 256).
    Int(usize),
    /// Unsigned integer of the given bit width (a multiple of 8, up to 256).
    Uint(usize),
    /// Boolean.
    Bool,
    /// Dynamic UTF-8 string.
    String,
    /// Array of unknown size.
    Array(Box<ParamType>),
    /// Byte sequence with fixed size, 1 to 32 bytes, right-padded.
    FixedBytes(usize),
    /// Array with fixed size, at least one element.
    FixedArray(Box<ParamType>, usize),
    /// Raw hash word of the given byte width. Internal type; event topics
    /// of unrecoverable indexed values are surfaced as 32-byte hashes.
    Hash(usize),
    /// External function reference: an address and a selector, 24 bytes.
    Function,
}

impl ParamType {
    /// Returns whether the type is encoded through a tail offset.
    ///
    /// A fixed array is dynamic exactly when its element type is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(elem, _) => elem.is_dynamic(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::Int(width) => write!(f, "int{width}"),
            ParamType::Uint(width) => write!(f, "uint{width}"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(elem) => write!(f, "{elem}[]"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            ParamType::Hash(len) => write!(f, "hash{}", len * 8),
            ParamType::Function => f.write_str("function"),
        }
    }
}
