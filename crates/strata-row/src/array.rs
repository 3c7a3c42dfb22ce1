// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Binary array (C5): count-prefixed, null-bitset-guarded packed array.

use crate::layout::{array_bitset_width_bytes, array_element_offset, ARRAY_BITSET_OFFSET};
use crate::row::BinaryRow;
use crate::section::{decode_var_len_slot, BinarySection, VarLenSlot};
use num_bigint::BigInt;
use strata_memory::MemorySegment;
use strata_type::{Decimal, Error, Result, Timestamp};

#[derive(Debug, Clone)]
pub struct BinaryArray {
    pub(crate) section: BinarySection,
    element_size: usize,
}

impl BinaryArray {
    pub fn new(section: BinarySection, element_size: usize) -> Self {
        BinaryArray { section, element_size }
    }

    pub fn num_elements(&self) -> usize {
        self.section.get_i32(0) as usize
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn section(&self) -> &BinarySection {
        &self.section
    }

    pub fn is_null_at(&self, i: usize) -> bool {
        self.section.bit_get(ARRAY_BITSET_OFFSET, i)
    }

    fn element_offset(&self, i: usize) -> usize {
        array_element_offset(self.num_elements(), self.element_size, i)
    }

    pub fn get_bool(&self, i: usize) -> bool {
        self.section.get_bool(self.element_offset(i))
    }
    pub fn get_i8(&self, i: usize) -> i8 {
        self.section.get_i8(self.element_offset(i))
    }
    pub fn get_i16(&self, i: usize) -> i16 {
        self.section.get_i16(self.element_offset(i))
    }
    pub fn get_i32(&self, i: usize) -> i32 {
        self.section.get_i32(self.element_offset(i))
    }
    pub fn get_i64(&self, i: usize) -> i64 {
        self.section.get_i64(self.element_offset(i))
    }
    pub fn get_f32(&self, i: usize) -> f32 {
        self.section.get_f32(self.element_offset(i))
    }
    pub fn get_f64(&self, i: usize) -> f64 {
        self.section.get_f64(self.element_offset(i))
    }

    fn raw_slot(&self, i: usize) -> u64 {
        self.section.get_i64(self.element_offset(i)) as u64
    }

    pub fn get_binary(&self, i: usize) -> Vec<u8> {
        match decode_var_len_slot(self.raw_slot(i)) {
            VarLenSlot::Inline { len, bytes } => bytes[..len].to_vec(),
            VarLenSlot::OutOfLine { offset, size } => {
                self.section.copy_bytes(offset as usize, size as usize)
            }
        }
    }

    pub fn get_string(&self, i: usize) -> String {
        String::from_utf8_lossy(&self.get_binary(i)).into_owned()
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

    /// Nested rows/arrays are stored as raw copies of their own backing
    /// bytes in the var-len tail (same mechanism as `get_binary`), so the
    /// caller supplies the element type's own shape (`arity`/element size)
    /// the same way `get_decimal`/`get_timestamp` take precision/scale —
    /// this binary layer carries no type tags of its own.
    pub fn get_row(&self, i: usize, arity: usize) -> BinaryRow {
        let bytes = self.get_var_len_section_bytes(i);
        let len = bytes.len();
        BinaryRow::new(BinarySection::single(MemorySegment::new(bytes), 0, len), arity)
    }

    pub fn get_array(&self, i: usize, element_size: usize) -> BinaryArray {
        let bytes = self.get_var_len_section_bytes(i);
        let len = bytes.len();
        BinaryArray::new(BinarySection::single(MemorySegment::new(bytes), 0, len), element_size)
    }

    fn get_var_len_section_bytes(&self, i: usize) -> Vec<u8> {
        match decode_var_len_slot(self.raw_slot(i)) {
            VarLenSlot::Inline { len, bytes } => bytes[..len].to_vec(),
            VarLenSlot::OutOfLine { offset, size } => {
                self.section.copy_bytes(offset as usize, size as usize)
            }
        }
    }

    /// OR-scan the bitset an `i32` word at a time, matching the
    /// reference implementation's `AnyNull()` loop granularity.
    pub fn any_null(&self) -> bool {
        let bitset_words = array_bitset_width_bytes(self.num_elements()) / 4;
        for w in 0..bitset_words {
            if self.section.get_i32(ARRAY_BITSET_OFFSET + w * 4) != 0 {
                return true;
            }
        }
        false
    }

    fn check_no_null(&self) -> Result<()> {
        if self.any_null() {
            Err(Error::invalid("Primitive array must not contain a null value."))
        } else {
            Ok(())
        }
    }

    pub fn to_long_array(&self) -> Result<Vec<i64>> {
        self.check_no_null()?;
        Ok((0..self.num_elements()).map(|i| self.get_i64(i)).collect())
    }

    pub fn to_int_array(&self) -> Result<Vec<i32>> {
        self.check_no_null()?;
        Ok((0..self.num_elements()).map(|i| self.get_i32(i)).collect())
    }

    pub fn to_double_array(&self) -> Result<Vec<f64>> {
        self.check_no_null()?;
        Ok((0..self.num_elements()).map(|i| self.get_f64(i)).collect())
    }

    pub fn hash(&self) -> u32 {
        self.section.hash()
    }
}

impl PartialEq for BinaryArray {
    fn eq(&self, other: &Self) -> bool {
        self.element_size == other.element_size && self.section == other.section
    }
}
impl Eq for BinaryArray {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::BinaryArrayWriter;

    #[test]
    fn any_null_detects_set_bit_and_blocks_bulk_extract() {
        let mut w = BinaryArrayWriter::new(7, 8);
        for v in [1i64, 2, 3, 4, 5] {
            w.write_i64(v);
        }
        w.set_null_value_i64(5);
        w.set_null_at(6);
        let arr = w.complete();
        assert!(arr.any_null());
        let err = arr.to_long_array().unwrap_err();
        assert!(err.to_string().contains("Primitive array must not contain a null value."));
    }
}
