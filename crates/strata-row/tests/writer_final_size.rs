// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Checks the writer's final-size invariant directly against
//! `layout::row_fixed_part_size`/`round_up`: the completed section must
//! be exactly the fixed part plus every variable payload padded up to
//! the next 8-byte word, in write order.

use strata_row::BinaryRowWriter;

fn round_up_8(n: usize) -> usize {
    (n + 7) / 8 * 8
}

#[test]
fn row_with_no_variable_fields_is_exactly_the_fixed_part() {
    let mut w = BinaryRowWriter::new(4);
    w.write_i32(0, 1);
    w.write_i64(1, 2);
    w.write_bool(2, true);
    w.write_f64(3, 1.5);
    let row = w.complete();

    assert_eq!(row.section().size_in_bytes, strata_row::layout::row_fixed_part_size(4));
}

#[test]
fn row_with_short_strings_stays_inline_and_adds_no_tail() {
    let mut w = BinaryRowWriter::new(2);
    w.write_string(0, "short");
    w.write_string(1, "ok");
    let row = w.complete();

    assert_eq!(row.section().size_in_bytes, strata_row::layout::row_fixed_part_size(2));
    assert_eq!(row.get_string(0), "short");
    assert_eq!(row.get_string(1), "ok");
}

#[test]
fn row_with_long_variable_fields_grows_by_the_padded_tail_size() {
    let fixed = strata_row::layout::row_fixed_part_size(2);
    let a = "a".repeat(20);
    let b = "b".repeat(9);

    let mut w = BinaryRowWriter::new(2);
    w.write_string(0, &a);
    w.write_string(1, &b);
    let row = w.complete();

    let expected = fixed + round_up_8(a.len()) + round_up_8(b.len());
    assert_eq!(row.section().size_in_bytes, expected);
    assert_eq!(row.get_string(0), a);
    assert_eq!(row.get_string(1), b);
}

#[test]
fn mixed_inline_and_out_of_line_fields_only_pad_the_out_of_line_ones() {
    let fixed = strata_row::layout::row_fixed_part_size(3);
    let long_value = "z".repeat(33);

    let mut w = BinaryRowWriter::new(3);
    w.write_string(0, "tiny");
    w.write_string(1, &long_value);
    w.write_binary(2, b"abcdefg");
    let row = w.complete();

    let expected = fixed + round_up_8(long_value.len());
    assert_eq!(row.section().size_in_bytes, expected);
}
