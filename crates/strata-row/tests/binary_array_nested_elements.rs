// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use num_bigint::BigInt;
use strata_row::{BinaryArrayWriter, BinaryRowWriter};
use strata_type::{Decimal, Timestamp};

#[test]
fn array_round_trips_compact_and_expanded_decimal_elements() {
    let mut w = BinaryArrayWriter::new(2, 8);
    w.write_decimal(&Decimal::new(BigInt::from(42), 5, 1));
    w.write_decimal(&Decimal::new(BigInt::from(123456789012345678_i64), 25, 6));
    let arr = w.complete();

    assert_eq!(arr.get_decimal(0, 5, 1).unscaled, BigInt::from(42));
    assert_eq!(arr.get_decimal(1, 25, 6).unscaled, BigInt::from(123456789012345678_i64));
}

#[test]
fn array_round_trips_compact_and_expanded_timestamp_elements() {
    let mut w = BinaryArrayWriter::new(2, 8);
    w.write_timestamp(&Timestamp::from_millis(1_700_000_000_000), 3);
    w.write_timestamp(&Timestamp { epoch_millis: 1_700_000_000_000, nano_of_millis: 123 }, 6);
    let arr = w.complete();

    assert_eq!(arr.get_timestamp(0, 3).epoch_millis, 1_700_000_000_000);
    let expanded = arr.get_timestamp(1, 6);
    assert_eq!(expanded.epoch_millis, 1_700_000_000_000);
    assert_eq!(expanded.nano_of_millis, 123);
}

#[test]
fn array_holds_nested_rows_and_arrays() {
    let mut inner_row_w = BinaryRowWriter::new(2);
    inner_row_w.write_i32(0, 7);
    inner_row_w.write_string(1, "nested");
    let inner_row = inner_row_w.complete();

    let mut inner_arr_w = BinaryArrayWriter::new(3, 8);
    inner_arr_w.write_i64(10);
    inner_arr_w.write_i64(20);
    inner_arr_w.write_i64(30);
    let inner_arr = inner_arr_w.complete();

    let mut outer = BinaryArrayWriter::new(2, 8);
    outer.write_row(&inner_row);
    outer.write_array(&inner_arr);
    let arr = outer.complete();

    let back_row = arr.get_row(0, 2);
    assert_eq!(back_row.get_i32(0), 7);
    assert_eq!(back_row.get_string(1), "nested");

    let back_arr = arr.get_array(1, 8);
    assert_eq!(back_arr.num_elements(), 3);
    assert_eq!(back_arr.get_i64(0), 10);
    assert_eq!(back_arr.get_i64(1), 20);
    assert_eq!(back_arr.get_i64(2), 30);
}

#[test]
fn null_decimal_and_timestamp_elements_reserve_tail_space_without_panicking() {
    let mut w = BinaryArrayWriter::new(2, 8);
    w.write_decimal_null(25);
    w.write_timestamp_null(6);
    let arr = w.complete();

    assert!(arr.is_null_at(0));
    assert!(arr.is_null_at(1));
}
