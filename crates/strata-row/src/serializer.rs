// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Serializer (C10): length-prefixed binary-row (de)serialization over the
//! stream layer.

use crate::row::BinaryRow;
use crate::section::BinarySection;
use strata_memory::stream::{ByteReader, ByteWriter};
use strata_memory::MemorySegment;
use strata_type::Result;

/// Serializer for rows of a single, constructor-known arity.
pub struct RowSerializer {
    arity: usize,
}

impl RowSerializer {
    pub fn new(arity: usize) -> Self {
        RowSerializer { arity }
    }

    pub fn serialize(&self, row: &BinaryRow, out: &mut ByteWriter) {
        out.write_i32(row.section().size_in_bytes as i32);
        self.serialize_without_length(row, out);
    }

    pub fn serialize_without_length(&self, row: &BinaryRow, out: &mut ByteWriter) {
        let section = row.section();
        let bytes = section.copy_bytes(0, section.size_in_bytes);
        out.write_bytes(&bytes);
    }

    pub fn deserialize(&self, input: &mut ByteReader) -> Result<BinaryRow> {
        let size = input.read_i32()? as usize;
        let bytes = input.read_bytes(size)?.to_vec();
        Ok(BinaryRow::new(BinarySection::single(MemorySegment::new(bytes), 0, size), self.arity))
    }
}

/// A companion serializer that also writes the arity as a prefix, so a
/// reader with no external schema can still reconstruct the row.
pub struct SchemalessRowSerializer;

impl SchemalessRowSerializer {
    pub fn serialize(row: &BinaryRow, out: &mut ByteWriter) {
        out.write_i32(row.arity() as i32);
        RowSerializer::new(row.arity()).serialize(row, out);
    }

    pub fn deserialize(input: &mut ByteReader) -> Result<BinaryRow> {
        let arity = input.read_i32()? as usize;
        RowSerializer::new(arity).deserialize(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::BinaryRowWriter;

    #[test]
    fn round_trips_through_streams() {
        let mut w = BinaryRowWriter::new(2);
        w.write_i32(0, 42);
        w.write_string(1, "hello");
        let row = w.complete();

        let mut out = ByteWriter::new();
        RowSerializer::new(2).serialize(&row, &mut out);
        let bytes = out.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let back = RowSerializer::new(2).deserialize(&mut reader).unwrap();
        assert_eq!(back.get_i32(0), 42);
        assert_eq!(back.get_string(1), "hello");
        assert_eq!(back.hash(), row.hash());
    }

    #[test]
    fn schemaless_round_trip_recovers_arity() {
        let mut w = BinaryRowWriter::new(1);
        w.write_i64(0, -7);
        let row = w.complete();

        let mut out = ByteWriter::new();
        SchemalessRowSerializer::serialize(&row, &mut out);
        let bytes = out.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let back = SchemalessRowSerializer::deserialize(&mut reader).unwrap();
        assert_eq!(back.arity(), 1);
        assert_eq!(back.get_i64(0), -7);
    }
}
