//! A signed 256-bit integer carried as raw two's complement over [`U256`].

use ethereum_types::{FromDecStrErr, U256};
use std::{cmp, fmt, ops, str};

/// The error type returned when parsing an [`I256`] from a string fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseI256Error {
    /// The string contains an invalid digit for the radix.
    #[error("invalid digit found in string")]
    InvalidDigit,
    /// The value does not fit the 256-bit signed range.
    #[error("number does not fit in 256 bits")]
    IntegerOverflow,
}

impl From<FromDecStrErr> for ParseI256Error {
    fn from(err: FromDecStrErr) -> Self {
        match err {
            FromDecStrErr::InvalidCharacter => ParseI256Error::InvalidDigit,
            FromDecStrErr::InvalidLength => ParseI256Error::IntegerOverflow,
        }
    }
}

/// The sign of an [`I256`]; zero counts as positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    /// Greater than or equal to zero.
    Positive,
    /// Less than zero.
    Negative,
}

impl Sign {
    /// Returns whether the sign is positive.
    pub const fn is_positive(&self) -> bool {
        matches!(self, Sign::Positive)
    }

    /// Returns whether the sign is negative.
    pub const fn is_negative(&self) -> bool {
        matches!(self, Sign::Negative)
    }
}

/// The highest bit of a 256-bit word, i.e. the sign bit.
const SIGN_BIT: U256 = U256([0, 0, 0, 0x8000_0000_0000_0000]);

/// Computes the two's complement of a 256-bit word.
fn twos_complement(value: U256) -> U256 {
    (!value).overflowing_add(U256::one()).0
}

/// A 256-bit signed integer in two's complement representation.
///
/// The wire form produced and consumed by the ABI codec is the raw
/// two's complement word, available through [`I256::from_raw`] and
/// [`I256::into_raw`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct I256(U256);

impl I256 {
    /// Maximum value.
    pub const MAX: Self = Self(U256([u64::MAX, u64::MAX, u64::MAX, i64::MAX as _]));

    /// Minimum value.
    pub const MIN: Self = Self(U256([0, 0, 0, i64::MIN as _]));

    /// Zero value.
    pub const fn zero() -> Self {
        Self(U256([0, 0, 0, 0]))
    }

    /// One value.
    pub const fn one() -> Self {
        Self(U256([1, 0, 0, 0]))
    }

    /// Minus one.
    pub const fn minus_one() -> Self {
        Self(U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]))
    }

    /// Interprets a raw two's complement word as a signed integer.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw two's complement word.
    pub const fn into_raw(self) -> U256 {
        self.0
    }

    /// Returns the sign of the value.
    pub fn sign(self) -> Sign {
        if (self.0 & SIGN_BIT).is_zero() {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    /// Returns whether the value is negative.
    pub fn is_negative(self) -> bool {
        self.sign().is_negative()
    }

    /// Returns whether the value is zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Builds a value from a sign and an unsigned magnitude, returning
    /// `None` when the magnitude does not fit the signed range.
    pub fn checked_from_sign_and_abs(sign: Sign, abs: U256) -> Option<Self> {
        if abs.is_zero() {
            return Some(Self::zero());
        }
        match sign {
            Sign::Positive => (abs <= Self::MAX.0).then(|| Self(abs)),
            Sign::Negative => (abs <= Self::MIN.0).then(|| Self(twos_complement(abs))),
        }
    }

    /// Splits the value into its sign and unsigned magnitude.
    pub fn into_sign_and_abs(self) -> (Sign, U256) {
        let sign = self.sign();
        let abs = match sign {
            Sign::Positive => self.0,
            Sign::Negative => twos_complement(self.0),
        };
        (sign, abs)
    }

    /// Unsigned magnitude of the value.
    pub fn unsigned_abs(self) -> U256 {
        self.into_sign_and_abs().1
    }

    /// Negation, returning `None` on overflow (negating [`I256::MIN`]).
    pub fn checked_neg(self) -> Option<Self> {
        if self == Self::MIN {
            None
        } else {
            Some(Self(twos_complement(self.0)))
        }
    }

    /// Wrapping negation; [`I256::MIN`] maps to itself.
    pub fn wrapping_neg(self) -> Self {
        Self(twos_complement(self.0))
    }

    /// Parses a decimal string, with an optional leading sign.
    pub fn from_dec_str(value: &str) -> Result<Self, ParseI256Error> {
        let (sign, digits) = match value.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::Positive, value.strip_prefix('+').unwrap_or(value)),
        };
        let abs = U256::from_dec_str(digits)?;
        Self::checked_from_sign_and_abs(sign, abs).ok_or(ParseI256Error::IntegerOverflow)
    }
}

macro_rules! impl_from_signed {
    ($($int:ty),*) => {$(
        impl From<$int> for I256 {
            fn from(value: $int) -> Self {
                let raw = if value < 0 {
                    // sign extension when widening to u128 keeps the low
                    // bits; the high half must be all ones
                    U256::from(value as i128 as u128) | U256([0, 0, u64::MAX, u64::MAX])
                } else {
                    U256::from(value as i128 as u128)
                };
                Self(raw)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, i128);

impl ops::Neg for I256 {
    type Output = Self;

    fn neg(self) -> Self {
        self.checked_neg().expect("attempt to negate with overflow")
    }
}

impl cmp::Ord for I256 {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        // flipping the sign bit makes two's complement sort as unsigned
        (self.0 ^ SIGN_BIT).cmp(&(other.0 ^ SIGN_BIT))
    }
}

impl cmp::PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl str::FromStr for I256 {
    type Err = ParseI256Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(value)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, abs) = self.into_sign_and_abs();
        if sign.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{abs}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities() {
        assert_eq!(I256::zero().to_string(), "0");
        assert_eq!(I256::one().to_string(), "1");
        assert_eq!(I256::minus_one().to_string(), "-1");
        assert_eq!(
            I256::MIN.to_string(),
            "-57896044618658097711785492504343953926634992332820282019728792003956564819968"
        );
        assert_eq!(
            I256::MAX.to_string(),
            "57896044618658097711785492504343953926634992332820282019728792003956564819967"
        );
    }

    #[test]
    fn twos_complement_round_trip() {
        for value in ["-57", "0", "57", "-1"] {
            let parsed: I256 = value.parse().unwrap();
            assert_eq!(I256::from_raw(parsed.into_raw()), parsed);
            assert_eq!(parsed.to_string(), value);
        }
        assert_eq!(I256::from(-1i8).into_raw(), U256::MAX);
        assert_eq!(I256::from(-2i64).into_raw(), U256::MAX - 1);
    }

    #[test]
    fn parsing() {
        assert_eq!(I256::from_dec_str("+42").unwrap(), I256::from(42i32));
        assert_eq!(I256::from_dec_str("-42").unwrap(), I256::from(-42i32));
        assert_eq!(I256::from_dec_str("x"), Err(ParseI256Error::InvalidDigit));
        assert_eq!(
            I256::from_dec_str(
                "57896044618658097711785492504343953926634992332820282019728792003956564819968"
            ),
            Err(ParseI256Error::IntegerOverflow),
        );
    }

    #[test]
    fn ordering() {
        let mut values: Vec<I256> =
            ["1", "-1", "0", "-100", "100"].iter().map(|v| v.parse().unwrap()).collect();
        values.sort();
        let sorted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, ["-100", "-1", "0", "1", "100"]);
    }

    #[test]
    fn negation() {
        assert_eq!(-I256::from(5i32), I256::from(-5i32));
        assert_eq!(I256::MIN.checked_neg(), None);
        assert_eq!(I256::MIN.wrapping_neg(), I256::MIN);
    }
}
