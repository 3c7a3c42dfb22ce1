// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Golden-fixture coverage for decimal encoding: each file names one
//! `precision,scale,unscaled,expected_hex` case, where `expected_hex` is
//! the big-endian two's-complement byte sequence independently derived
//! from `unscaled` (not produced by this crate's own code). Checking
//! `to_unscaled_bytes()` against that fixed reference catches wire-format
//! drift that a self-referential round trip through this crate's own
//! writer and reader cannot: a writer/reader pair that agree with each
//! other but disagree with the documented `BigInteger.toByteArray()`
//! layout would still pass a round-trip-only test.

use num_bigint::BigInt;
use std::str::FromStr;
use strata_row::BinaryRowWriter;
use strata_type::Decimal;

test_each_file::test_each_file! { in "./crates/strata-row/tests/decimal_corpus" as decimal_corpus => test }

fn parse_hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn test(content: &str) {
    let line = content.trim();
    let mut parts = line.split(',');
    let precision: u32 = parts.next().unwrap().parse().unwrap();
    let scale: u32 = parts.next().unwrap().parse().unwrap();
    let unscaled = BigInt::from_str(parts.next().unwrap()).unwrap();
    let expected_bytes = parse_hex(parts.next().unwrap());

    let decimal = Decimal::new(unscaled.clone(), precision, scale);

    let actual_bytes = decimal.to_unscaled_bytes();
    assert_eq!(actual_bytes, expected_bytes, "byte codec does not match the reference encoding");

    let back = Decimal::from_unscaled_bytes(&expected_bytes, precision, scale);
    assert_eq!(back.unscaled, unscaled, "reference bytes did not decode back to the source value");

    let mut w = BinaryRowWriter::new(1);
    w.write_decimal(0, &decimal);
    let row = w.complete();
    let reread = row.get_decimal(0, precision, scale);
    assert_eq!(reread.unscaled, unscaled, "row round trip did not preserve unscaled value");
    assert_eq!(reread.precision, precision);
    assert_eq!(reread.scale, scale);
}
