//! Tagged ABI values.

use super::{Error, ParamType};
use crate::types::{Address, H256, U256};

/// A host value tagged with the ABI kind it travels as.
///
/// Signed integers are carried as raw two's complement words; conversion
/// to and from native signed types happens in the [`Tokenizable`]
/// adapters.
///
/// [`Tokenizable`]: super::Tokenizable
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// 20-byte account address.
    Address(Address),
    /// Fixed byte sequence.
    FixedBytes(Vec<u8>),
    /// Dynamic byte sequence.
    Bytes(Vec<u8>),
    /// Signed integer, raw two's complement.
    Int(U256),
    /// Unsigned integer.
    Uint(U256),
    /// Boolean.
    Bool(bool),
    /// Dynamic UTF-8 string.
    String(String),
    /// Fixed-length array of identically typed values.
    FixedArray(Vec<Token>),
    /// Dynamically sized array of identically typed values.
    Array(Vec<Token>),
    /// Raw hash word; also the shape of unrecoverable indexed topics.
    Hash(H256),
}

impl Token {
    /// Short kind name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::FixedBytes(_) => "fixed bytes",
            Token::Bytes(_) => "bytes",
            Token::Int(_) => "int",
            Token::Uint(_) => "uint",
            Token::Bool(_) => "bool",
            Token::String(_) => "string",
            Token::FixedArray(_) => "fixed array",
            Token::Array(_) => "array",
            Token::Hash(_) => "hash",
        }
    }

    /// Returns whether the encoded form goes through a tail offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::Bytes(_) | Token::String(_) | Token::Array(_) => true,
            Token::FixedArray(tokens) => tokens.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    /// Validates the token against a declared type, distinguishing values
    /// outside their integer range from outright kind mismatches.
    pub fn check(&self, kind: &ParamType) -> Result<(), Error> {
        match (self, kind) {
            (Token::Address(_), ParamType::Address)
            | (Token::Bytes(_), ParamType::Bytes)
            | (Token::Bool(_), ParamType::Bool)
            | (Token::String(_), ParamType::String) => Ok(()),
            (Token::Hash(hash), ParamType::Hash(len)) => {
                // sub-word hashes keep their value in the leading bytes;
                // the rest of the word must be zero, as on decode
                if hash.as_bytes()[*len..].iter().all(|byte| *byte == 0) {
                    Ok(())
                } else {
                    Err(Error::OutOfRange(kind.clone()))
                }
            }
            (Token::FixedBytes(bytes), ParamType::FixedBytes(len)) if bytes.len() == *len => Ok(()),
            (Token::FixedBytes(bytes), ParamType::Function) if bytes.len() == 24 => Ok(()),
            (Token::Uint(value), ParamType::Uint(width)) => {
                if uint_fits(*value, *width) {
                    Ok(())
                } else {
                    Err(Error::OutOfRange(kind.clone()))
                }
            }
            (Token::Int(value), ParamType::Int(width)) => {
                if int_fits(*value, *width) {
                    Ok(())
                } else {
                    Err(Error::OutOfRange(kind.clone()))
                }
            }
            (Token::Array(tokens), ParamType::Array(elem)) => {
                tokens.iter().try_for_each(|token| token.check(elem))
            }
            (Token::FixedArray(tokens), ParamType::FixedArray(elem, len))
                if tokens.len() == *len =>
            {
                tokens.iter().try_for_each(|token| token.check(elem))
            }
            _ => Err(Error::TypeMismatch { expected: kind.clone(), got: self.type_name() }),
        }
    }

    /// Convenience boolean form of [`Token::check`].
    pub fn type_check(&self, kind: &ParamType) -> bool {
        self.check(kind).is_ok()
    }
}

/// True when `value` fits in an unsigned integer of `width` bits.
pub(crate) fn uint_fits(value: U256, width: usize) -> bool {
    width >= 256 || value.bits() <= width
}

/// True when the raw two's complement `value` is a valid sign extension of
/// a `width`-bit signed integer.
pub(crate) fn int_fits(value: U256, width: usize) -> bool {
    if width >= 256 {
        return true;
    }
    let upper = value >> (width - 1);
    upper.is_zero() || upper == U256::MAX >> (width - 1)
}
