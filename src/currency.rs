//! Exact currency arithmetic
//!
//! Amounts are unsigned 256-bit integers. Nothing here wraps: additions and
//! subtractions are checked, and sums over many outputs accumulate in a
//! 512-bit [`CurrencySum`] so they stay exact no matter how many terms are
//! added.

use primitive_types::{U256, U512};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of bytes in the widest encodable amount.
pub const CURRENCY_BYTES: usize = 32;

/// A non-negative amount of either asset class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(U256);

impl Currency {
    pub const ZERO: Currency = Currency(U256([0; 4]));

    pub fn new(value: U256) -> Self {
        Currency(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_sub(self, other: Currency) -> Option<Currency> {
        self.0.checked_sub(other.0).map(Currency)
    }

    /// floor(self * num / den), or `None` if `den` is zero or the result
    /// does not fit.
    pub fn mul_ratio_floor(self, num: u64, den: u64) -> Option<Currency> {
        if den == 0 {
            return None;
        }
        let den = U256::from(den);
        let num = U256::from(num);
        let (quotient, remainder) = self.0.div_mod(den);
        // remainder < den <= u64::MAX, so remainder * num fits in 128 bits.
        let high = quotient.checked_mul(num)?;
        let low = (remainder * num) / den;
        high.checked_add(low).map(Currency)
    }

    /// Largest multiple of `step` not above `self`. A zero step leaves the
    /// value unchanged.
    pub fn round_down(self, step: u64) -> Currency {
        if step == 0 {
            return self;
        }
        Currency(self.0 - self.0 % U256::from(step))
    }

    /// Minimal big-endian bytes; zero encodes as the empty string.
    pub fn to_be_bytes_trimmed(&self) -> Vec<u8> {
        let mut buf = [0u8; CURRENCY_BYTES];
        self.0.to_big_endian(&mut buf);
        let first = buf.iter().position(|&b| b != 0).unwrap_or(CURRENCY_BYTES);
        buf[first..].to_vec()
    }
}

impl From<u64> for Currency {
    fn from(value: u64) -> Self {
        Currency(U256::from(value))
    }
}

impl From<u128> for Currency {
    fn from(value: u128) -> Self {
        Currency(U256::from(value))
    }
}

impl From<U256> for Currency {
    fn from(value: U256) -> Self {
        Currency(value)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        U256::from_dec_str(s)
            .map(Currency)
            .map_err(|e| format!("invalid currency {:?}: {:?}", s, e))
    }
}

// Amounts travel as decimal strings so JSON consumers never lose precision.
impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CurrencyVisitor;

        impl<'de> Visitor<'de> for CurrencyVisitor {
            type Value = Currency;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal string or unsigned integer")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Currency, E>
            where
                E: de::Error,
            {
                Currency::from_str(value).map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Currency, E>
            where
                E: de::Error,
            {
                Ok(Currency::from(value))
            }
        }

        deserializer.deserialize_any(CurrencyVisitor)
    }
}

/// Exact running total of many [`Currency`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CurrencySum(U512);

impl CurrencySum {
    pub fn add(&mut self, value: &Currency) {
        // Saturation needs more than 2^256 terms, so this never happens.
        self.0 = self.0.saturating_add(U512::from(value.0));
    }

    pub fn equals(&self, value: &Currency) -> bool {
        self.0 == U512::from(value.0)
    }
}
