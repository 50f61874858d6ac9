//! ABI decoder: unpacks a byte stream driven by a type schema.

use super::token::{int_fits, uint_fits};
use super::{Error, ParamType, Token, Word};
use crate::types::{Address, H256, U256};

/// Decodes a byte buffer against an ordered list of types.
///
/// The schema walks the head left to right; dynamic values are chased
/// through their tail offsets. Trailing bytes beyond what the schema
/// requires are ignored; missing bytes yield [`Error::Truncated`].
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::with_capacity(types.len());
    let mut offset = 0;
    for kind in types {
        let result = decode_param(kind, data, offset)?;
        offset = result.new_offset;
        tokens.push(result.token);
    }
    Ok(tokens)
}

struct DecodeResult {
    token: Token,
    new_offset: usize,
}

fn peek(data: &[u8], offset: usize, len: usize) -> Result<&[u8], Error> {
    let end = offset.checked_add(len).ok_or(Error::Truncated(usize::MAX))?;
    data.get(offset..end).ok_or(Error::Truncated(end))
}

fn peek_word(data: &[u8], offset: usize) -> Result<Word, Error> {
    let slice = peek(data, offset, 32)?;
    let mut word = [0u8; 32];
    word.copy_from_slice(slice);
    Ok(word)
}

/// Reads an offset or length word; the top 28 bytes must be zero.
fn as_usize(word: &Word) -> Result<usize, Error> {
    if word[..28].iter().any(|byte| *byte != 0) {
        return Err(Error::InvalidData("offset or length does not fit usize"));
    }
    let mut value = 0usize;
    for byte in &word[28..] {
        value = (value << 8) | *byte as usize;
    }
    Ok(value)
}

fn decode_param(kind: &ParamType, data: &[u8], offset: usize) -> Result<DecodeResult, Error> {
    match kind {
        ParamType::Address => {
            let word = peek_word(data, offset)?;
            Ok(DecodeResult {
                token: Token::Address(Address::from_slice(&word[12..])),
                new_offset: offset + 32,
            })
        }
        ParamType::Uint(width) => {
            let word = peek_word(data, offset)?;
            let value = U256::from_big_endian(&word);
            if !uint_fits(value, *width) {
                return Err(Error::OutOfRange(kind.clone()));
            }
            Ok(DecodeResult { token: Token::Uint(value), new_offset: offset + 32 })
        }
        ParamType::Int(width) => {
            let word = peek_word(data, offset)?;
            let value = U256::from_big_endian(&word);
            if !int_fits(value, *width) {
                return Err(Error::OutOfRange(kind.clone()));
            }
            Ok(DecodeResult { token: Token::Int(value), new_offset: offset + 32 })
        }
        ParamType::Bool => {
            let word = peek_word(data, offset)?;
            if word[..31].iter().any(|byte| *byte != 0) || word[31] > 1 {
                return Err(Error::InvalidData("boolean word is not 0 or 1"));
            }
            Ok(DecodeResult { token: Token::Bool(word[31] == 1), new_offset: offset + 32 })
        }
        ParamType::FixedBytes(len) => {
            let word = peek_word(data, offset)?;
            Ok(DecodeResult {
                token: Token::FixedBytes(word[..*len].to_vec()),
                new_offset: offset + 32,
            })
        }
        ParamType::Function => {
            let word = peek_word(data, offset)?;
            Ok(DecodeResult {
                token: Token::FixedBytes(word[..24].to_vec()),
                new_offset: offset + 32,
            })
        }
        ParamType::Hash(len) => {
            let word = peek_word(data, offset)?;
            if word[*len..].iter().any(|byte| *byte != 0) {
                return Err(Error::InvalidData("hash word has nonzero padding"));
            }
            Ok(DecodeResult { token: Token::Hash(H256::from(word)), new_offset: offset + 32 })
        }
        ParamType::Bytes => {
            let payload = decode_byte_seq(data, offset)?;
            Ok(DecodeResult { token: Token::Bytes(payload), new_offset: offset + 32 })
        }
        ParamType::String => {
            let payload = decode_byte_seq(data, offset)?;
            Ok(DecodeResult { token: Token::String(String::from_utf8(payload)?), new_offset: offset + 32 })
        }
        ParamType::Array(elem) => {
            let tail = as_usize(&peek_word(data, offset)?)?;
            let count = as_usize(&peek_word(data, tail)?)?;
            // elements live in their own frame starting after the count;
            // offsets of dynamic elements are relative to that frame
            let frame = peek(data, tail + 32, data.len().saturating_sub(tail + 32))?;
            let mut tokens = Vec::new();
            let mut cursor = 0;
            for _ in 0..count {
                let result = decode_param(elem, frame, cursor)?;
                cursor = result.new_offset;
                tokens.push(result.token);
            }
            Ok(DecodeResult { token: Token::Array(tokens), new_offset: offset + 32 })
        }
        ParamType::FixedArray(elem, count) => {
            if kind.is_dynamic() {
                let tail = as_usize(&peek_word(data, offset)?)?;
                let frame = peek(data, tail, data.len().saturating_sub(tail))?;
                let mut tokens = Vec::with_capacity(*count);
                let mut cursor = 0;
                for _ in 0..*count {
                    let result = decode_param(elem, frame, cursor)?;
                    cursor = result.new_offset;
                    tokens.push(result.token);
                }
                Ok(DecodeResult { token: Token::FixedArray(tokens), new_offset: offset + 32 })
            } else {
                // static elements occupy consecutive head slots; the
                // cursor moves past all of them
                let mut tokens = Vec::with_capacity(*count);
                let mut cursor = offset;
                for _ in 0..*count {
                    let result = decode_param(elem, data, cursor)?;
                    cursor = result.new_offset;
                    tokens.push(result.token);
                }
                Ok(DecodeResult { token: Token::FixedArray(tokens), new_offset: cursor })
            }
        }
    }
}

/// Reads a length-prefixed payload through its tail offset.
fn decode_byte_seq(data: &[u8], offset: usize) -> Result<Vec<u8>, Error> {
    let tail = as_usize(&peek_word(data, offset)?)?;
    let len = as_usize(&peek_word(data, tail)?)?;
    Ok(peek(data, tail + 32, len)?.to_vec())
}
