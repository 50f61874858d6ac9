//! Conversions between host values and ABI [`Token`]s.

use super::Token;
use crate::types::{Address, H256, I256, U128, U256};
use arrayvec::ArrayVec;
use thiserror::Error;

/// Error produced when a decoded token cannot be cast into the requested
/// host type.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct InvalidOutputType(pub String);

fn unmarshal_err(token: &Token, target: &str) -> InvalidOutputType {
    InvalidOutputType(format!("cannot unmarshal {} into {}", token.type_name(), target))
}

/// A single host value convertible to and from a [`Token`].
pub trait Tokenizable {
    /// Converts a token into the expected type.
    fn from_token(token: Token) -> Result<Self, InvalidOutputType>
    where
        Self: Sized;

    /// Converts the value back into a token.
    fn into_token(self) -> Token;
}

/// Output shapes constructible from a decoded token list.
pub trait Detokenize {
    /// Creates an instance from parsed ABI tokens.
    fn from_tokens(tokens: Vec<Token>) -> Result<Self, InvalidOutputType>
    where
        Self: Sized;
}

impl Detokenize for () {
    fn from_tokens(_: Vec<Token>) -> Result<Self, InvalidOutputType> {
        Ok(())
    }
}

/// Argument shapes convertible into a token list.
pub trait Tokenize {
    /// Converts `self` into a `Vec<Token>`.
    fn into_tokens(self) -> Vec<Token>;
}

impl Tokenize for () {
    fn into_tokens(self) -> Vec<Token> {
        vec![]
    }
}

impl<'a> Tokenize for &'a [Token] {
    fn into_tokens(self) -> Vec<Token> {
        self.to_vec()
    }
}

macro_rules! impl_tuples {
    ($num:expr, $( $ty:ident : $no:tt ),+ $(,)?) => {
        impl<$( $ty ),+> Detokenize for ($( $ty, )+)
        where
            $( $ty: Tokenizable, )+
        {
            fn from_tokens(tokens: Vec<Token>) -> Result<Self, InvalidOutputType> {
                if tokens.len() != $num {
                    return Err(InvalidOutputType(format!(
                        concat!("expected ", stringify!($num), " tokens, got {}"),
                        tokens.len()
                    )));
                }
                let mut it = tokens.into_iter();
                Ok(($(
                    <$ty as Tokenizable>::from_token(
                        it.next().ok_or_else(|| InvalidOutputType("missing token".into()))?,
                    )?,
                )+))
            }
        }

        impl<$( $ty ),+> Tokenize for ($( $ty, )+)
        where
            $( $ty: Tokenizable, )+
        {
            fn into_tokens(self) -> Vec<Token> {
                vec![$( self.$no.into_token(), )+]
            }
        }
    }
}

impl_tuples!(1, A:0, );
impl_tuples!(2, A:0, B:1, );
impl_tuples!(3, A:0, B:1, C:2, );
impl_tuples!(4, A:0, B:1, C:2, D:3, );
impl_tuples!(5, A:0, B:1, C:2, D:3, E:4, );
impl_tuples!(6, A:0, B:1, C:2, D:3, E:4, F:5, );
impl_tuples!(7, A:0, B:1, C:2, D:3, E:4, F:5, G:6, );
impl_tuples!(8, A:0, B:1, C:2, D:3, E:4, F:5, G:6, H:7, );

impl Tokenizable for Token {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        Ok(token)
    }

    fn into_token(self) -> Token {
        self
    }
}

impl Tokenizable for String {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::String(s) => Ok(s),
            other => Err(unmarshal_err(&other, "string")),
        }
    }

    fn into_token(self) -> Token {
        Token::String(self)
    }
}

impl Tokenizable for H256 {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::Hash(hash) => Ok(hash),
            Token::FixedBytes(bytes) if bytes.len() == 32 => {
                let mut data = [0u8; 32];
                data.copy_from_slice(&bytes);
                Ok(data.into())
            }
            other => Err(unmarshal_err(&other, "hash")),
        }
    }

    fn into_token(self) -> Token {
        Token::FixedBytes(self.as_bytes().to_vec())
    }
}

impl Tokenizable for Address {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::Address(address) => Ok(address),
            other => Err(unmarshal_err(&other, "address")),
        }
    }

    fn into_token(self) -> Token {
        Token::Address(self)
    }
}

impl Tokenizable for bool {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::Bool(value) => Ok(value),
            other => Err(unmarshal_err(&other, "bool")),
        }
    }

    fn into_token(self) -> Token {
        Token::Bool(self)
    }
}

macro_rules! eth_uint_tokenizable {
    ($uint:ident, $name:expr) => {
        impl Tokenizable for $uint {
            fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
                match token {
                    Token::Int(value) | Token::Uint(value) => Ok(value
                        .try_into()
                        .map_err(|_| InvalidOutputType(format!("value too large for {}", $name)))?),
                    other => Err(unmarshal_err(&other, $name)),
                }
            }

            fn into_token(self) -> Token {
                Token::Uint(self.into())
            }
        }
    };
}

eth_uint_tokenizable!(U256, "U256");
eth_uint_tokenizable!(U128, "U128");

impl Tokenizable for I256 {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::Int(raw) | Token::Uint(raw) => Ok(I256::from_raw(raw)),
            other => Err(unmarshal_err(&other, "I256")),
        }
    }

    fn into_token(self) -> Token {
        Token::Int(self.into_raw())
    }
}

macro_rules! int_tokenizable {
    ($int:ident, $token:ident) => {
        impl Tokenizable for $int {
            fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
                match token {
                    Token::Int(value) | Token::Uint(value) => Ok(value.low_u128() as _),
                    other => Err(unmarshal_err(&other, stringify!($int))),
                }
            }

            fn into_token(self) -> Token {
                // Rust sign-extends when widening a signed integer into an
                // unsigned one, so the low 128 bits come out right and only
                // the upper half needs patching for negative values
                #[allow(unused_comparisons)]
                let value = if self < 0 {
                    U256::from(self as i128 as u128) | U256([0, 0, u64::MAX, u64::MAX])
                } else {
                    U256::from(self as u128)
                };
                Token::$token(value)
            }
        }
    };
}

int_tokenizable!(i8, Int);
int_tokenizable!(i16, Int);
int_tokenizable!(i32, Int);
int_tokenizable!(i64, Int);
int_tokenizable!(i128, Int);
int_tokenizable!(u8, Uint);
int_tokenizable!(u16, Uint);
int_tokenizable!(u32, Uint);
int_tokenizable!(u64, Uint);
int_tokenizable!(u128, Uint);

impl Tokenizable for Vec<u8> {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::Bytes(data) | Token::FixedBytes(data) => Ok(data),
            Token::Array(data) => data.into_iter().map(u8::from_token).collect(),
            other => Err(unmarshal_err(&other, "bytes")),
        }
    }

    fn into_token(self) -> Token {
        Token::Bytes(self)
    }
}

impl<T: TokenizableItem> Tokenizable for Vec<T> {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::FixedArray(tokens) | Token::Array(tokens) => {
                tokens.into_iter().map(Tokenizable::from_token).collect()
            }
            other => Err(unmarshal_err(&other, "array")),
        }
    }

    fn into_token(self) -> Token {
        Token::Array(self.into_iter().map(Tokenizable::into_token).collect())
    }
}

impl<const N: usize> Tokenizable for [u8; N] {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::FixedBytes(bytes) => {
                if bytes.len() != N {
                    return Err(InvalidOutputType(format!(
                        "cannot unmarshal {} bytes into {N}-byte array",
                        bytes.len()
                    )));
                }
                let mut arr = [0u8; N];
                arr.copy_from_slice(&bytes);
                Ok(arr)
            }
            other => Err(unmarshal_err(&other, "fixed bytes")),
        }
    }

    fn into_token(self) -> Token {
        Token::FixedBytes(self.to_vec())
    }
}

impl<T: TokenizableItem + Clone, const N: usize> Tokenizable for [T; N] {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        match token {
            Token::FixedArray(tokens) => {
                if tokens.len() != N {
                    return Err(InvalidOutputType(format!(
                        "cannot unmarshal {}-element array into {N}-element array",
                        tokens.len()
                    )));
                }
                let mut arr = ArrayVec::<T, N>::new();
                for token in tokens {
                    arr.push(T::from_token(token)?);
                }
                // all N elements were pushed above
                match arr.into_inner() {
                    Ok(arr) => Ok(arr),
                    Err(_) => unreachable!("length validated above"),
                }
            }
            other => Err(unmarshal_err(&other, "fixed array")),
        }
    }

    fn into_token(self) -> Token {
        Token::FixedArray(ArrayVec::from(self).into_iter().map(T::into_token).collect())
    }
}

/// Marker trait for [`Tokenizable`] types usable as array elements.
///
/// Needed to keep the special case `Vec<u8>` ⇒ `bytes` from colliding
/// with generic element vectors.
pub trait TokenizableItem: Tokenizable {}

macro_rules! tokenizable_item {
    ($($type:ty,)*) => {
        $( impl TokenizableItem for $type {} )*
    };
}

tokenizable_item! {
    Token, String, Address, H256, U256, I256, U128, bool, Vec<u8>,
    i8, i16, i32, i64, i128, u16, u32, u64, u128,
}

impl<T: TokenizableItem> TokenizableItem for Vec<T> {}

impl<const N: usize> TokenizableItem for [u8; N] {}

impl<T: TokenizableItem + Clone, const N: usize> TokenizableItem for [T; N] {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_sign_extend_negative_integers() {
        assert_eq!((-1i8).into_token(), Token::Int(U256::MAX));
        assert_eq!((-2i16).into_token(), Token::Int(U256::MAX - 1));
        assert_eq!((-3i32).into_token(), Token::Int(U256::MAX - 2));
        assert_eq!((-4i64).into_token(), Token::Int(U256::MAX - 3));
        assert_eq!((-5i128).into_token(), Token::Int(U256::MAX - 4));
    }

    #[test]
    fn should_detokenize_tuples() {
        let tokens = vec![Token::Bool(false), Token::Uint(U256::from(13u8))];
        let data: (bool, u8) = Detokenize::from_tokens(tokens).unwrap();
        assert!(!data.0);
        assert_eq!(data.1, 13u8);

        let tokens = vec![Token::FixedBytes(vec![1, 2, 3, 4]), Token::Bool(true)];
        let data: ([u8; 4], bool) = Detokenize::from_tokens(tokens).unwrap();
        assert_eq!(data.0, [1, 2, 3, 4]);
        assert!(data.1);

        // arity mismatch
        let tokens = vec![Token::Bool(false)];
        let data: Result<(bool, u8), _> = Detokenize::from_tokens(tokens);
        assert!(data.is_err());
    }

    #[test]
    fn should_decode_array_of_fixed_bytes() {
        // bytes1[8]
        let tokens = vec![Token::FixedArray(vec![
            Token::FixedBytes(vec![1]),
            Token::FixedBytes(vec![2]),
            Token::FixedBytes(vec![3]),
            Token::FixedBytes(vec![4]),
            Token::FixedBytes(vec![5]),
            Token::FixedBytes(vec![6]),
            Token::FixedBytes(vec![7]),
            Token::FixedBytes(vec![8]),
        ])];
        let data: ([[u8; 1]; 8],) = Detokenize::from_tokens(tokens).unwrap();
        assert_eq!(data.0[0][0], 1);
        assert_eq!(data.0[1][0], 2);
        assert_eq!(data.0[7][0], 8);
    }

    #[test]
    fn wrong_kind_reports_unmarshal_error() {
        let err = i64::from_token(Token::Address(Address::zero())).unwrap_err();
        assert_eq!(err.to_string(), "cannot unmarshal address into i64");

        let err = String::from_token(Token::Address(Address::zero())).unwrap_err();
        assert_eq!(err.to_string(), "cannot unmarshal address into string");
    }

    #[test]
    fn nested_tokenization() {
        let tokens = (1u64, "two".to_owned(), vec![3u32]).into_tokens();
        assert_eq!(
            tokens,
            vec![
                Token::Uint(1u64.into()),
                Token::String("two".to_owned()),
                Token::Array(vec![Token::Uint(3u32.into())]),
            ]
        );
    }
}
