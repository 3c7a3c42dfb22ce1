// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Binary row (C4): fixed-header + null-bitset + fixed-slot + variable-tail
//! row with typed getters.

use crate::layout::{row_bitset_width_bytes, row_field_offset, row_fixed_part_size};
use crate::section::{decode_var_len_slot, BinarySection, VarLenSlot};
use num_bigint::BigInt;
use std::sync::OnceLock;
use strata_type::{Date, Decimal, RowKind, Timestamp};

/// Mask that, AND'd with the first 8-byte word of the bitset, isolates
/// every field-null bit while zeroing the row-kind header byte — used by
/// `any_null`. Endian-dependent because the header byte occupies the
/// low-order byte of that word on a little-endian host and the
/// high-order byte on a big-endian host (DESIGN.md "first byte zero
/// mask").
#[cfg(target_endian = "little")]
const FIRST_WORD_HEADER_MASK: u64 = 0xFFFF_FFFF_FFFF_FF00;
#[cfg(target_endian = "big")]
const FIRST_WORD_HEADER_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;

#[derive(Debug, Clone)]
pub struct BinaryRow {
    pub(crate) section: BinarySection,
    arity: usize,
}

impl BinaryRow {
    pub fn new(section: BinarySection, arity: usize) -> Self {
        debug_assert!(
            section.size_in_bytes >= row_fixed_part_size(arity),
            "section size smaller than declared fixed part"
        );
        BinaryRow { section, arity }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn section(&self) -> &BinarySection {
        &self.section
    }

    /// A process-wide, zero-arity empty row singleton, reused rather
    /// than constructed fresh per call (see DESIGN.md's "empty-row
    /// hash / identity" entry).
    pub fn empty() -> BinaryRow {
        static EMPTY: OnceLock<BinaryRow> = OnceLock::new();
        EMPTY
            .get_or_init(|| {
                let bytes = vec![0u8; row_bitset_width_bytes(0)];
                BinaryRow::new(
                    BinarySection::single(
                        strata_memory::MemorySegment::new(bytes),
                        0,
                        row_bitset_width_bytes(0),
                    ),
                    0,
                )
            })
            .clone()
    }

    pub fn row_kind(&self) -> RowKind {
        RowKind::from_byte(self.section.get_i8(0) as u8).unwrap_or(RowKind::Insert)
    }

    pub fn is_null_at(&self, i: usize) -> bool {
        self.section.bit_get(0, i + 8)
    }

    fn field_offset(&self, i: usize) -> usize {
        row_field_offset(self.arity, i)
    }

    pub fn get_bool(&self, i: usize) -> bool {
        self.section.get_bool(self.field_offset(i))
    }
    pub fn get_i8(&self, i: usize) -> i8 {
        self.section.get_i8(self.field_offset(i))
    }
    pub fn get_i16(&self, i: usize) -> i16 {
        self.section.get_i16(self.field_offset(i))
    }
    pub fn get_i32(&self, i: usize) -> i32 {
        self.section.get_i32(self.field_offset(i))
    }
    pub fn get_i64(&self, i: usize) -> i64 {
        self.section.get_i64(self.field_offset(i))
    }
    pub fn get_f32(&self, i: usize) -> f32 {
        self.section.get_f32(self.field_offset(i))
    }
    pub fn get_f64(&self, i: usize) -> f64 {
        self.section.get_f64(self.field_offset(i))
    }
    pub fn get_date(&self, i: usize) -> Date {
        Date(self.get_i32(i))
    }

    fn raw_slot(&self, i: usize) -> u64 {
        self.section.get_i64(self.field_offset(i)) as u64
    }

    /// Shared by `get_string`/`get_binary`: the binary layer doesn't
    /// distinguish strings from blobs at the byte level, only at the
    /// logical-type layer above it.
    fn get_var_len_bytes(&self, i: usize) -> Vec<u8> {
        match decode_var_len_slot(self.raw_slot(i)) {
            VarLenSlot::Inline { len, bytes } => bytes[..len].to_vec(),
            VarLenSlot::OutOfLine { offset, size } => {
                self.section.copy_bytes(offset as usize, size as usize)
            }
        }
    }

    pub fn get_string(&self, i: usize) -> String {
        String::from_utf8_lossy(&self.get_var_len_bytes(i)).into_owned()
    }

    pub fn get_binary(&self, i: usize) -> Vec<u8> {
        self.get_var_len_bytes(i)
    }

    pub fn get_decimal(&self, i: usize, precision: u32, scale: u32) -> Decimal {
        if precision <= 18 {
            Decimal::new(BigInt::from(self.get_i64(i)), precision, scale)
        } else {
            match decode_var_len_slot(self.raw_slot(i)) {
                VarLenSlot::OutOfLine { offset, size } => {
                    let bytes = self.section.copy_bytes(offset as usize, size as usize);
                    Decimal::from_unscaled_bytes(&bytes, precision, scale)
                }
                VarLenSlot::Inline { .. } => {
                    unreachable!("non-compact decimal slot is always out-of-line")
                }
            }
        }
    }

    pub fn get_timestamp(&self, i: usize, precision: u32) -> Timestamp {
        if precision <= 3 {
            Timestamp::from_millis(self.get_i64(i))
        } else {
            match decode_var_len_slot(self.raw_slot(i)) {
                VarLenSlot::OutOfLine { offset, size: nano_of_millis } => {
                    let epoch_millis = self.section.get_i64(offset as usize);
                    Timestamp { epoch_millis, nano_of_millis: nano_of_millis as i32 }
                }
                VarLenSlot::Inline { .. } => {
                    unreachable!("non-compact timestamp slot is always out-of-line")
                }
            }
        }
    }

    /// OR-scan the bitset 8 bytes at a time, masking the header byte out
    /// of the first word.
    pub fn any_null(&self) -> bool {
        let bitset_words = row_bitset_width_bytes(self.arity) / 8;
        for w in 0..bitset_words {
            let word = self.section.get_i64(w * 8) as u64;
            let masked = if w == 0 { word & FIRST_WORD_HEADER_MASK } else { word };
            if masked != 0 {
                return true;
            }
        }
        false
    }

    pub fn hash(&self) -> u32 {
        self.section.hash()
    }
}

impl PartialEq for BinaryRow {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity && self.section == other.section
    }
}
impl Eq for BinaryRow {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_row_has_no_nulls_and_zero_arity() {
        let row = BinaryRow::empty();
        assert_eq!(row.arity(), 0);
        assert!(!row.any_null());
    }
}
