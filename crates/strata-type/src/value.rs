// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use num_bigint::BigInt;

/// Days since the Unix epoch. The getter surfaces this as a date; the
/// wire representation is a plain `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub i32);

/// A decoded timestamp: milliseconds since the Unix epoch plus any
/// sub-millisecond nanoseconds. Compact timestamps (precision <= 3)
/// always have `nano_of_millis == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub epoch_millis: i64,
    pub nano_of_millis: i32,
}

impl Timestamp {
    pub fn from_millis(epoch_millis: i64) -> Self {
        Timestamp { epoch_millis, nano_of_millis: 0 }
    }
}

/// An arbitrary-precision decimal: an unscaled integer plus a scale
/// (number of digits after the decimal point), following the same
/// `unscaled / 10^scale` convention as the reference implementation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal {
    pub unscaled: BigInt,
    pub precision: u32,
    pub scale: u32,
}

impl Decimal {
    pub fn new(unscaled: BigInt, precision: u32, scale: u32) -> Self {
        Decimal { unscaled, precision, scale }
    }

    /// Big-endian two's-complement bytes, matching Java's
    /// `BigInteger.toByteArray()` semantics: the minimal byte sequence
    /// that round-trips through [`Self::from_unscaled_bytes`].
    pub fn to_unscaled_bytes(&self) -> Vec<u8> {
        self.unscaled.to_signed_bytes_be()
    }

    pub fn from_unscaled_bytes(bytes: &[u8], precision: u32, scale: u32) -> Self {
        Decimal { unscaled: BigInt::from_signed_bytes_be(bytes), precision, scale }
    }

    pub fn is_compact(&self) -> bool {
        self.precision <= 18
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn decimal_byte_round_trip() {
        for unscaled in [0i64, 1, -1, 123456789, -123456789, i64::MAX, i64::MIN] {
            let d = Decimal::new(BigInt::from(unscaled), 20, 4);
            let bytes = d.to_unscaled_bytes();
            let back = Decimal::from_unscaled_bytes(&bytes, 20, 4);
            assert_eq!(back.unscaled, BigInt::from(unscaled));
        }
    }

    #[test]
    fn zero_round_trips() {
        let d = Decimal::new(BigInt::zero(), 10, 2);
        let bytes = d.to_unscaled_bytes();
        let back = Decimal::from_unscaled_bytes(&bytes, 10, 2);
        assert!(back.unscaled.is_zero());
    }
}
