// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Writers (C6): growable builders for binary rows and binary arrays.
//!
//! Both writers share the same tail-allocation policy: a single owned,
//! growable segment; a `cursor` marking where the next variable-length
//! payload goes; 8-byte-word padding after every variable emission; and
//! `ensure_capacity`'s 1.5x growth factor when the cursor would run past
//! the segment.

use crate::array::BinaryArray;
use crate::layout::{round_up, row_field_offset, row_fixed_part_size};
use crate::row::BinaryRow;
use crate::section::{encode_inline_slot, encode_out_of_line_slot, BinarySection};
use num_traits::ToPrimitive;
use strata_memory::MemorySegment;
use strata_type::{Decimal, RowKind, Timestamp};

struct GrowableSegment {
    segment: MemorySegment,
    cursor: usize,
}

impl GrowableSegment {
    fn new(fixed_size: usize) -> Self {
        GrowableSegment { segment: MemorySegment::zeroed(fixed_size), cursor: fixed_size }
    }

    fn reset(&mut self, fixed_size: usize) {
        let buf = self.segment.as_mut_vec();
        let end = fixed_size.min(buf.len());
        buf[..end].fill(0);
        self.cursor = fixed_size;
    }

    /// Grow so at least `additional` more bytes are writable past
    /// `cursor`. New capacity is `max(needed, old * 3 / 2)`, matching
    /// the reference implementation's growth policy.
    fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.cursor + additional;
        let old_len = self.segment.len();
        if needed > old_len {
            let new_len = needed.max(old_len + old_len / 2).max(needed);
            self.segment.as_mut_vec().resize(new_len, 0);
            tracing::trace!(old_len, new_len, "grew writer segment");
        }
    }

    /// Append `bytes`, zero-pad to the next 8-byte word, return the
    /// offset the payload was written at.
    fn append_padded(&mut self, bytes: &[u8]) -> usize {
        let padded_len = round_up(bytes.len(), 8);
        self.ensure_capacity(padded_len);
        let offset = self.cursor;
        let buf = self.segment.as_mut_vec();
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        buf[offset + bytes.len()..offset + padded_len].fill(0);
        self.cursor += padded_len;
        offset
    }

    fn set_slot_u64(&mut self, offset: usize, raw: u64) {
        self.segment.set_i64(offset, raw as i64);
    }

    /// Reserve a fixed 16-byte, zero-filled tail slot and left-justify
    /// `bytes` at its start, leaving the remainder zero. Unlike
    /// `append_padded`, the cursor always advances by exactly 16
    /// regardless of `bytes.len()` — the reservation is fixed-width even
    /// though the payload it holds (a decimal's unscaled bytes) is not,
    /// matching the reference writer's decimal tail layout.
    fn append_decimal_tail(&mut self, bytes: &[u8]) -> usize {
        debug_assert!(bytes.len() <= 16, "unscaled decimal exceeds the 16-byte tail reservation");
        self.ensure_capacity(16);
        let offset = self.cursor;
        let buf = self.segment.as_mut_vec();
        buf[offset..offset + 16].fill(0);
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.cursor += 16;
        offset
    }
}

pub struct BinaryRowWriter {
    base: GrowableSegment,
    arity: usize,
}

impl BinaryRowWriter {
    pub fn new(arity: usize) -> Self {
        BinaryRowWriter { base: GrowableSegment::new(row_fixed_part_size(arity)), arity }
    }

    /// Rewind to the end of the fixed part and zero the bitset, so the
    /// writer can be reused across rows of the same arity.
    pub fn reset(&mut self) {
        self.base.reset(row_fixed_part_size(self.arity));
    }

    pub fn write_row_kind(&mut self, kind: RowKind) {
        self.base.segment.as_mut_vec()[0] = kind.to_byte();
    }

    pub fn set_null_at(&mut self, i: usize) {
        let offset = row_field_offset(self.arity, i);
        strata_memory::segment_ops::bit_set(
            std::slice::from_mut(&mut self.base.segment),
            0,
            i + 8,
        );
        self.base.set_slot_u64(offset, 0);
    }

    fn field_offset(&self, i: usize) -> usize {
        row_field_offset(self.arity, i)
    }

    pub fn write_bool(&mut self, i: usize, v: bool) {
        let off = self.field_offset(i);
        self.base.segment.as_mut_vec()[off] = v as u8;
    }
    pub fn write_i8(&mut self, i: usize, v: i8) {
        let off = self.field_offset(i);
        self.base.segment.as_mut_vec()[off] = v as u8;
    }
    pub fn write_i16(&mut self, i: usize, v: i16) {
        let off = self.field_offset(i);
        self.base.segment.as_mut_vec()[off..off + 2].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_i32(&mut self, i: usize, v: i32) {
        let off = self.field_offset(i);
        self.base.segment.as_mut_vec()[off..off + 4].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_i64(&mut self, i: usize, v: i64) {
        self.base.set_slot_u64(self.field_offset(i), v as u64);
    }
    pub fn write_f32(&mut self, i: usize, v: f32) {
        let off = self.field_offset(i);
        self.base.segment.as_mut_vec()[off..off + 4].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_f64(&mut self, i: usize, v: f64) {
        self.base.set_slot_u64(self.field_offset(i), v.to_bits());
    }
    pub fn write_date(&mut self, i: usize, days_since_epoch: i32) {
        self.write_i32(i, days_since_epoch);
    }

    fn write_var_len(&mut self, i: usize, bytes: &[u8]) {
        let raw = if bytes.len() <= crate::section::MAX_FIX_PART_DATA_SIZE {
            encode_inline_slot(bytes)
        } else {
            let offset = self.base.append_padded(bytes);
            encode_out_of_line_slot(offset as u32, bytes.len() as u32)
        };
        self.base.set_slot_u64(self.field_offset(i), raw);
    }

    pub fn write_string(&mut self, i: usize, s: &str) {
        self.write_var_len(i, s.as_bytes());
    }
    pub fn write_binary(&mut self, i: usize, bytes: &[u8]) {
        self.write_var_len(i, bytes);
    }

    pub fn write_decimal(&mut self, i: usize, value: &Decimal) {
        if value.precision <= 18 {
            self.write_i64(i, value.unscaled.to_i64().unwrap_or(0));
        } else {
            let bytes = value.to_unscaled_bytes();
            let offset = self.base.append_decimal_tail(&bytes);
            let raw = encode_out_of_line_slot(offset as u32, bytes.len() as u32);
            self.base.set_slot_u64(self.field_offset(i), raw);
        }
    }

    /// Non-compact decimal null: the tail reservation still happens so
    /// the record image is bit-identical regardless of whether the
    /// field is null.
    pub fn write_decimal_null(&mut self, i: usize, precision: u32) {
        if precision <= 18 {
            self.set_null_at(i);
        } else {
            let offset = self.base.append_decimal_tail(&[]);
            let raw = encode_out_of_line_slot(offset as u32, 0);
            self.base.set_slot_u64(self.field_offset(i), raw);
            self.set_null_at(i);
        }
    }

    pub fn write_timestamp(&mut self, i: usize, value: &Timestamp, precision: u32) {
        if precision <= 3 {
            self.write_i64(i, value.epoch_millis);
        } else {
            let offset = self.base.append_padded(&value.epoch_millis.to_ne_bytes());
            let raw = encode_out_of_line_slot(offset as u32, value.nano_of_millis as u32);
            self.base.set_slot_u64(self.field_offset(i), raw);
        }
    }

    pub fn write_timestamp_null(&mut self, i: usize, precision: u32) {
        if precision <= 3 {
            self.set_null_at(i);
        } else {
            let offset = self.base.append_padded(&0i64.to_ne_bytes());
            let raw = encode_out_of_line_slot(offset as u32, 0);
            self.base.set_slot_u64(self.field_offset(i), raw);
            self.set_null_at(i);
        }
    }

    /// Finalize the row: the section window is exactly `[0, cursor)` of
    /// the underlying segment. The returned row shares the writer's
    /// segment, so `reset`/further writes on this writer must not be
    /// called while that row (or any clone of it) is still alive.
    pub fn complete(&self) -> BinaryRow {
        BinaryRow::new(
            BinarySection::single(self.base.segment.clone(), 0, self.base.cursor),
            self.arity,
        )
    }
}

pub struct BinaryArrayWriter {
    base: GrowableSegment,
    num_elements: usize,
    element_size: usize,
    next_index: usize,
}

impl BinaryArrayWriter {
    pub fn new(num_elements: usize, element_size: usize) -> Self {
        let fixed_size = crate::layout::array_fixed_part_size(num_elements, element_size);
        let mut base = GrowableSegment::new(fixed_size);
        base.segment.set_i32(0, num_elements as i32);
        BinaryArrayWriter { base, num_elements, element_size, next_index: 0 }
    }

    fn element_offset(&self, i: usize) -> usize {
        crate::layout::array_element_offset(self.num_elements, self.element_size, i)
    }

    pub fn set_null_at(&mut self, i: usize) {
        strata_memory::segment_ops::bit_set(
            std::slice::from_mut(&mut self.base.segment),
            crate::layout::ARRAY_BITSET_OFFSET,
            i,
        );
    }

    pub fn write_bool(&mut self, v: bool) {
        let i = self.next_index;
        self.next_index += 1;
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off] = v as u8;
    }
    pub fn write_i8(&mut self, v: i8) {
        let i = self.next_index;
        self.next_index += 1;
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off] = v as u8;
    }
    pub fn write_i16(&mut self, v: i16) {
        let i = self.next_index;
        self.next_index += 1;
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off..off + 2].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_i32(&mut self, v: i32) {
        let i = self.next_index;
        self.next_index += 1;
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off..off + 4].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_i64(&mut self, v: i64) {
        let i = self.next_index;
        self.next_index += 1;
        self.base.set_slot_u64(self.element_offset(i), v as u64);
    }
    pub fn write_f32(&mut self, v: f32) {
        let i = self.next_index;
        self.next_index += 1;
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off..off + 4].copy_from_slice(&v.to_ne_bytes());
    }
    pub fn write_f64(&mut self, v: f64) {
        let i = self.next_index;
        self.next_index += 1;
        self.base.set_slot_u64(self.element_offset(i), v.to_bits());
    }

    pub fn set_null_value_i64(&mut self, i: usize) {
        self.base.set_slot_u64(self.element_offset(i), 0);
        self.set_null_at(i);
    }
    pub fn set_null_value_i32(&mut self, i: usize) {
        let off = self.element_offset(i);
        self.base.segment.as_mut_vec()[off..off + 4].fill(0);
        self.set_null_at(i);
    }
    pub fn set_null_value_f64(&mut self, i: usize) {
        self.base.set_slot_u64(self.element_offset(i), 0);
        self.set_null_at(i);
    }

    fn write_var_len_at(&mut self, i: usize, bytes: &[u8]) {
        let raw = if bytes.len() <= crate::section::MAX_FIX_PART_DATA_SIZE {
            encode_inline_slot(bytes)
        } else {
            let offset = self.base.append_padded(bytes);
            encode_out_of_line_slot(offset as u32, bytes.len() as u32)
        };
        self.base.set_slot_u64(self.element_offset(i), raw);
    }

    pub fn write_binary(&mut self, bytes: &[u8]) {
        let i = self.next_index;
        self.next_index += 1;
        self.write_var_len_at(i, bytes);
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_binary(s.as_bytes());
    }

    pub fn write_decimal(&mut self, value: &Decimal) {
        let i = self.next_index;
        self.next_index += 1;
        if value.precision <= 18 {
            self.base.set_slot_u64(self.element_offset(i), value.unscaled.to_i64().unwrap_or(0) as u64);
        } else {
            let bytes = value.to_unscaled_bytes();
            let offset = self.base.append_decimal_tail(&bytes);
            let raw = encode_out_of_line_slot(offset as u32, bytes.len() as u32);
            self.base.set_slot_u64(self.element_offset(i), raw);
        }
    }

    pub fn write_decimal_null(&mut self, precision: u32) {
        let i = self.next_index;
        self.next_index += 1;
        if precision <= 18 {
            self.set_null_value_i64(i);
        } else {
            let offset = self.base.append_decimal_tail(&[]);
            let raw = encode_out_of_line_slot(offset as u32, 0);
            self.base.set_slot_u64(self.element_offset(i), raw);
            self.set_null_at(i);
        }
    }

    pub fn write_timestamp(&mut self, value: &Timestamp, precision: u32) {
        let i = self.next_index;
        self.next_index += 1;
        if precision <= 3 {
            self.base.set_slot_u64(self.element_offset(i), value.epoch_millis as u64);
        } else {
            let offset = self.base.append_padded(&value.epoch_millis.to_ne_bytes());
            let raw = encode_out_of_line_slot(offset as u32, value.nano_of_millis as u32);
            self.base.set_slot_u64(self.element_offset(i), raw);
        }
    }

    pub fn write_timestamp_null(&mut self, precision: u32) {
        let i = self.next_index;
        self.next_index += 1;
        if precision <= 3 {
            self.set_null_value_i64(i);
        } else {
            let offset = self.base.append_padded(&0i64.to_ne_bytes());
            let raw = encode_out_of_line_slot(offset as u32, 0);
            self.base.set_slot_u64(self.element_offset(i), raw);
            self.set_null_at(i);
        }
    }

    /// Nested row/array elements are stored the same way as strings and
    /// binary: the element's own backing bytes are copied into the var-len
    /// tail (or inlined, if short enough) and the slot records offset+size,
    /// mirroring `WriteRow`/`WriteArray` in the reference writer.
    pub fn write_row(&mut self, row: &BinaryRow) {
        let i = self.next_index;
        self.next_index += 1;
        let section = row.section();
        let bytes = section.copy_bytes(0, section.size_in_bytes);
        self.write_var_len_at(i, &bytes);
    }

    pub fn write_array(&mut self, array: &BinaryArray) {
        let i = self.next_index;
        self.next_index += 1;
        let section = array.section();
        let bytes = section.copy_bytes(0, section.size_in_bytes);
        self.write_var_len_at(i, &bytes);
    }

    /// Re-points the whole array at the finished buffer; unlike the row
    /// writer, there is no separate "final size" field stored inside the
    /// image itself — the window bound (`cursor`) carries it.
    pub fn complete(&self) -> BinaryArray {
        BinaryArray::new(
            BinarySection::single(self.base.segment.clone(), 0, self.base.cursor),
            self.element_size,
        )
    }
}
