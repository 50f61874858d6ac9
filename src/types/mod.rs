//! Primitive Ethereum value types used throughout the codec.

/// A 4-byte method selector.
pub type Selector = [u8; 4];

pub use ethereum_types::{Address, H160, H256, U128, U256, U64};

mod i256;
pub use i256::{ParseI256Error, Sign, I256};
