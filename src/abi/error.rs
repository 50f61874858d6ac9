//! Boilerplate error definitions.

use super::{InvalidOutputType, ParamType};
use thiserror::Error;

/// A type alias for std's Result with the Error as our error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while parsing schemas, packing arguments or unpacking
/// results.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed ABI type string or schema.
    #[error("could not parse ABI type `{0}`")]
    InvalidType(String),

    /// Argument count differs from the schema arity.
    #[error("argument count mismatch: got {got}, expected {expected}")]
    ArgumentCount {
        /// Number of values supplied.
        got: usize,
        /// Schema arity.
        expected: usize,
    },

    /// Integer value outside the declared bit width or sign range.
    #[error("value out of range for `{0}`")]
    OutOfRange(ParamType),

    /// Host value kind incompatible with the declared ABI type.
    #[error("type mismatch: cannot pack {got} into `{expected}`")]
    TypeMismatch {
        /// Declared ABI type.
        expected: ParamType,
        /// Kind of the supplied token.
        got: &'static str,
    },

    /// Input buffer shorter than the schema requires.
    #[error("truncated input: need at least {0} bytes")]
    Truncated(usize),

    /// Structurally invalid word content.
    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    /// Decoded string payload is not UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    /// First topic of a non-anonymous log does not match the event id.
    #[error("topic mismatch for event `{0}`")]
    TopicMismatch(String),

    /// More than one decoded value for a single-slot destination.
    #[error("cannot unpack {0} values into a single destination")]
    SingleDestination(usize),

    /// Destination sequence shorter than the schema arity.
    #[error("insufficient number of elements in destination, want {want}, got {got}")]
    InsufficientElements {
        /// Schema arity.
        want: usize,
        /// Slots supplied.
        got: usize,
    },

    /// Key/value mappings cannot receive unpacked tuples.
    #[error("cannot unmarshal into a map destination")]
    MapDestination,

    /// A decoded value could not be cast into the destination type.
    #[error(transparent)]
    InvalidOutputType(#[from] InvalidOutputType),

    /// Unknown method or event name.
    #[error("abi item `{0}` does not exist")]
    NotFound(String),

    /// Malformed ABI JSON.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Invalid hex input.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
