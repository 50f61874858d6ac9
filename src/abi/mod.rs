//! Ethereum contract ABI.
//!
//! The pieces compose bottom-up: [`Reader`] parses type strings into
//! [`ParamType`]s, [`encode`]/[`decode`] move [`Token`]s across the 32-byte
//! word head/tail wire layout, and [`Function`]/[`Event`]/[`Abi`] provide
//! the method and log model on top. Decoded values land either in typed
//! host values via [`Tokenizable`] or in a dynamically shaped [`Dest`].

mod error;
pub use error::{Error, Result};

mod param_type;
pub use param_type::ParamType;

mod reader;
pub use reader::Reader;

mod token;
pub use token::Token;

mod encoder;
pub use encoder::encode;

mod decoder;
pub use decoder::decode;

mod tokens;
pub use tokens::{Detokenize, InvalidOutputType, Tokenizable, TokenizableItem, Tokenize};

mod dest;
pub use dest::{Dest, Record, Slot};

mod param;
pub use param::Param;

mod function;
pub use function::{Constructor, Function};

mod event;
pub use event::{Event, RawLog};

mod contract;
pub use contract::Abi;

mod codec;
pub use codec::{AbiArrayType, AbiDecode, AbiEncode, AbiType};

/// A 32-byte ABI wire word.
pub type Word = [u8; 32];

/// A dynamic byte payload.
pub type Bytes = Vec<u8>;
