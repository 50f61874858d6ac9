//! ABI encoder: packs token tuples into the head/tail wire layout.

use super::{Bytes, Token, Word};
use crate::types::U256;

/// Encodes an ordered tuple of tokens.
///
/// Static values are emitted directly into the head; dynamic values leave
/// a 32-byte offset behind and append their payload to the tail. The
/// result length is always a multiple of 32.
///
/// Tokens are assumed to conform to their schema; use
/// [`Token::check`] (or the `Function`/`Constructor` packers, which do)
/// before encoding untrusted input.
pub fn encode(tokens: &[Token]) -> Bytes {
    let head_len: usize = tokens.iter().map(head_width).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&pad_usize(head_len + tail.len()));
            tail.append(&mut encode_token(token));
        } else {
            head.append(&mut encode_token(token));
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Number of head bytes the token occupies: one word, except for fixed
/// arrays of static elements which spread over consecutive slots.
fn head_width(token: &Token) -> usize {
    match token {
        _ if token.is_dynamic() => 32,
        Token::FixedArray(tokens) => tokens.iter().map(head_width).sum(),
        _ => 32,
    }
}

/// Direct encoding of a single token; for dynamic tokens this is the tail
/// payload the head offset points at.
fn encode_token(token: &Token) -> Bytes {
    match token {
        Token::Address(address) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(address.as_bytes());
            word.to_vec()
        }
        Token::Int(value) | Token::Uint(value) => {
            let mut word = [0u8; 32];
            value.to_big_endian(&mut word);
            word.to_vec()
        }
        Token::Bool(value) => {
            let mut word = [0u8; 32];
            word[31] = *value as u8;
            word.to_vec()
        }
        Token::FixedBytes(bytes) => pad_bytes(bytes),
        Token::Hash(hash) => hash.as_bytes().to_vec(),
        Token::Bytes(bytes) => encode_byte_seq(bytes),
        Token::String(value) => encode_byte_seq(value.as_bytes()),
        Token::Array(tokens) => {
            let mut out = pad_usize(tokens.len()).to_vec();
            out.extend_from_slice(&encode(tokens));
            out
        }
        // a fixed array is itself a tuple of its elements: static elements
        // concatenate, dynamic elements get their own head/tail frame
        Token::FixedArray(tokens) => encode(tokens),
    }
}

/// Length-prefixed payload, right-padded to a word boundary.
fn encode_byte_seq(bytes: &[u8]) -> Bytes {
    let mut out = pad_usize(bytes.len()).to_vec();
    out.extend_from_slice(&pad_bytes(bytes));
    out
}

/// Right-pads raw bytes with zeros up to the next word boundary.
fn pad_bytes(bytes: &[u8]) -> Bytes {
    let padded_len = (bytes.len() + 31) / 32 * 32;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(bytes);
    out.resize(padded_len, 0);
    out
}

/// A word holding a big-endian unsigned count or offset.
fn pad_usize(value: usize) -> Word {
    let mut word = [0u8; 32];
    U256::from(value).to_big_endian(&mut word);
    word
}
