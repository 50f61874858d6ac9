//! One-shot ABI encode/decode for host values.

use super::{
    decode, encode, Detokenize, Error, ParamType, Tokenizable, TokenizableItem, Tokenize,
};
use crate::types::{Address, H256, I256, U128, U256};

/// Types with a statically known ABI kind.
pub trait AbiType {
    /// The ABI type this host type maps to.
    fn param_type() -> ParamType;
}

/// Marker for [`AbiType`]s that may appear as array elements.
///
/// Needed to keep the special case `Vec<u8>` ⇒ `bytes` from colliding
/// with generic element vectors.
pub trait AbiArrayType: AbiType {}

macro_rules! impl_abi_type {
    ($($name:ty => $var:ident $(($value:expr))?),*) => {
        $(
            impl AbiType for $name {
                fn param_type() -> ParamType {
                    ParamType::$var $( ($value) )?
                }
            }

            impl AbiArrayType for $name {}
        )*
    };
}

// `u8` is deliberately not an `AbiArrayType`: `Vec<u8>` and `[u8; N]`
// carry their own byte-oriented impls below
impl AbiType for u8 {
    fn param_type() -> ParamType {
        ParamType::Uint(8)
    }
}

impl_abi_type!(
    Vec<u8> => Bytes,
    Address => Address,
    bool => Bool,
    String => String,
    H256 => FixedBytes(32),
    U128 => Uint(128),
    U256 => Uint(256),
    u16 => Uint(16),
    u32 => Uint(32),
    u64 => Uint(64),
    u128 => Uint(128),
    i8 => Int(8),
    i16 => Int(16),
    i32 => Int(32),
    i64 => Int(64),
    i128 => Int(128),
    I256 => Int(256)
);

impl<T: AbiArrayType> AbiType for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::Array(Box::new(T::param_type()))
    }
}
impl<T: AbiArrayType> AbiArrayType for Vec<T> {}

impl<const N: usize> AbiType for [u8; N] {
    fn param_type() -> ParamType {
        ParamType::FixedBytes(N)
    }
}
impl<const N: usize> AbiArrayType for [u8; N] {}

impl<T: AbiArrayType, const N: usize> AbiType for [T; N] {
    fn param_type() -> ParamType {
        ParamType::FixedArray(Box::new(T::param_type()), N)
    }
}
impl<T: AbiArrayType, const N: usize> AbiArrayType for [T; N] {}

/// Trait for ABI encoding.
pub trait AbiEncode {
    /// ABI encode the value.
    fn encode(self) -> Vec<u8>;

    /// Returns the encoded value as a hex string, with a `0x` prefix.
    fn encode_hex(self) -> String
    where
        Self: Sized,
    {
        format!("0x{}", hex::encode(self.encode()))
    }
}

/// Trait for ABI decoding.
pub trait AbiDecode: Sized {
    /// Decodes the ABI encoded data.
    fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error>;

    /// Decodes hex encoded ABI data, with an optional `0x` prefix.
    fn decode_hex(data: impl AsRef<str>) -> Result<Self, Error> {
        let data = data.as_ref();
        let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;
        Self::decode(bytes)
    }
}

macro_rules! impl_abi_codec {
    ($($name:ty),*) => {
        $(
            impl AbiEncode for $name {
                fn encode(self) -> Vec<u8> {
                    encode(&[self.into_token()])
                }
            }

            impl AbiDecode for $name {
                fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
                    let mut tokens = decode(&[Self::param_type()], bytes.as_ref())?;
                    let token =
                        tokens.pop().ok_or(Error::InvalidData("empty decode result"))?;
                    Ok(Self::from_token(token)?)
                }
            }
        )*
    };
}

impl_abi_codec!(
    Vec<u8>,
    Address,
    bool,
    String,
    H256,
    U128,
    U256,
    I256,
    u8,
    u16,
    u32,
    u64,
    u128,
    i8,
    i16,
    i32,
    i64,
    i128
);

impl<T: TokenizableItem + AbiArrayType> AbiEncode for Vec<T> {
    fn encode(self) -> Vec<u8> {
        encode(&[self.into_token()])
    }
}

impl<T: TokenizableItem + AbiArrayType> AbiDecode for Vec<T> {
    fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let mut tokens = decode(&[Self::param_type()], bytes.as_ref())?;
        let token = tokens.pop().ok_or(Error::InvalidData("empty decode result"))?;
        Ok(Self::from_token(token)?)
    }
}

impl<const N: usize> AbiEncode for [u8; N] {
    fn encode(self) -> Vec<u8> {
        encode(&[self.into_token()])
    }
}

impl<const N: usize> AbiDecode for [u8; N] {
    fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let mut tokens = decode(&[Self::param_type()], bytes.as_ref())?;
        let token = tokens.pop().ok_or(Error::InvalidData("empty decode result"))?;
        Ok(Self::from_token(token)?)
    }
}

impl<T: TokenizableItem + AbiArrayType + Clone, const N: usize> AbiEncode for [T; N] {
    fn encode(self) -> Vec<u8> {
        encode(&[self.into_token()])
    }
}

impl<T: TokenizableItem + AbiArrayType + Clone, const N: usize> AbiDecode for [T; N] {
    fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let mut tokens = decode(&[Self::param_type()], bytes.as_ref())?;
        let token = tokens.pop().ok_or(Error::InvalidData("empty decode result"))?;
        Ok(Self::from_token(token)?)
    }
}

macro_rules! impl_abi_codec_tuple {
    ($num:expr, $( $ty:ident ),+) => {
        impl<$($ty, )+> AbiEncode for ($($ty,)+)
        where
            $( $ty: Tokenizable, )+
        {
            fn encode(self) -> Vec<u8> {
                encode(&self.into_tokens())
            }
        }

        impl<$($ty, )+> AbiDecode for ($($ty,)+)
        where
            $( $ty: AbiType + Tokenizable, )+
        {
            fn decode(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
                let tokens = decode(&[$( <$ty as AbiType>::param_type(), )+], bytes.as_ref())?;
                Ok(<Self as Detokenize>::from_tokens(tokens)?)
            }
        }
    };
}

impl_abi_codec_tuple!(1, A);
impl_abi_codec_tuple!(2, A, B);
impl_abi_codec_tuple!(3, A, B, C);
impl_abi_codec_tuple!(4, A, B, C, D);
impl_abi_codec_tuple!(5, A, B, C, D, E);
impl_abi_codec_tuple!(6, A, B, C, D, E, F);
impl_abi_codec_tuple!(7, A, B, C, D, E, F, G);
impl_abi_codec_tuple!(8, A, B, C, D, E, F, G, H);
