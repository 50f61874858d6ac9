//! Keccak-256 helpers for signatures and identifiers.

use crate::types::Selector;
use tiny_keccak::{Hasher, Keccak};

/// Compute the Keccak-256 hash of input bytes.
///
/// This is the original Keccak submission as used by Ethereum, not the
/// NIST SHA3-256 padding variant.
pub fn keccak256<S>(bytes: S) -> [u8; 32]
where
    S: AsRef<[u8]>,
{
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    hasher.finalize(&mut output);
    output
}

/// Calculate the function selector as per the contract ABI specification.
/// This is defined as the first 4 bytes of the Keccak256 hash of the
/// function signature.
pub fn id<S: AsRef<str>>(signature: S) -> Selector {
    let mut output = [0u8; 4];

    let mut hasher = Keccak::v256();
    hasher.update(signature.as_ref().as_bytes());
    hasher.finalize(&mut output);

    output
}
