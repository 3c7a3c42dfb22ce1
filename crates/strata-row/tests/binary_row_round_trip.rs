// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use strata_memory::stream::{ByteReader, ByteWriter};
use strata_row::{BinaryRowWriter, RowSerializer};

#[test]
fn mixed_field_row_rereads_every_field_and_hashes_deterministically() {
    let mut w = BinaryRowWriter::new(6);
    w.write_bool(0, true);
    w.write_i32(1, 3);
    w.write_i64(2, 4);
    w.write_f64(3, 6.12);
    w.write_string(4, "abcd");
    w.write_binary(5, b"efgh");
    let row = w.complete();

    assert!(row.get_bool(0));
    assert_eq!(row.get_i32(1), 3);
    assert_eq!(row.get_i64(2), 4);
    assert_eq!(row.get_f64(3), 6.12);
    assert_eq!(row.get_string(4), "abcd");
    assert_eq!(row.get_binary(5), b"efgh");
    assert!(!row.any_null());
    assert_eq!(row.hash(), row.hash());
}

#[test]
fn serializing_and_deserializing_preserves_fields_and_hash() {
    let mut w = BinaryRowWriter::new(3);
    w.write_i32(0, 42);
    w.write_string(1, "a longer string than seven bytes to force out-of-line storage");
    w.set_null_at(2);
    let row = w.complete();

    let serializer = RowSerializer::new(3);
    let mut out = ByteWriter::new();
    serializer.serialize(&row, &mut out);
    let bytes = out.into_bytes();
    let mut reader = ByteReader::new(&bytes);
    let back = serializer.deserialize(&mut reader).unwrap();

    assert_eq!(back.get_i32(0), 42);
    assert_eq!(back.get_string(1), row.get_string(1));
    assert!(back.is_null_at(2));
    assert_eq!(back.hash(), row.hash());
}

#[test]
fn equal_values_at_the_same_position_hash_identically() {
    let mut a = BinaryRowWriter::new(2);
    a.write_i64(0, 99);
    a.write_string(1, "match");
    let row_a = a.complete();

    let mut b = BinaryRowWriter::new(2);
    b.write_i64(0, 99);
    b.write_string(1, "match");
    let row_b = b.complete();

    assert_eq!(row_a.hash(), row_b.hash());
}
