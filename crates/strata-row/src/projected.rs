// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Data-evolution and projected views (C9): zero-copy index-remap readers
//! over one or more underlying rows.

use crate::reader::RowAccessor;
use strata_type::{Date, Decimal, Error, Result, RowKind, Timestamp};

/// Remaps field `i` to `underlying.get_*(remap[i])`, treating `remap[i]
/// == -1` as "always null" regardless of what the underlying row holds.
pub struct ProjectedRow<R: RowAccessor> {
    underlying: R,
    remap: Vec<i32>,
}

impl<R: RowAccessor> ProjectedRow<R> {
    pub fn new(underlying: R, remap: Vec<i32>) -> Self {
        ProjectedRow { underlying, remap }
    }

    fn source(&self, i: usize) -> Result<Option<usize>> {
        let slot = *self
            .remap
            .get(i)
            .ok_or_else(|| Error::invalid(format!("projected field index {i} out of bounds")))?;
        Ok(if slot < 0 { None } else { Some(slot as usize) })
    }
}

impl<R: RowAccessor> RowAccessor for ProjectedRow<R> {
    fn arity(&self) -> usize {
        self.remap.len()
    }
    fn row_kind(&self) -> RowKind {
        self.underlying.row_kind()
    }
    fn is_null_at(&self, i: usize) -> bool {
        match self.source(i) {
            Ok(Some(src)) => self.underlying.is_null_at(src),
            Ok(None) => true,
            Err(_) => true,
        }
    }
    fn get_bool(&self, i: usize) -> bool {
        self.source(i).ok().flatten().map(|s| self.underlying.get_bool(s)).unwrap_or_default()
    }
    fn get_i8(&self, i: usize) -> i8 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_i8(s)).unwrap_or_default()
    }
    fn get_i16(&self, i: usize) -> i16 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_i16(s)).unwrap_or_default()
    }
    fn get_i32(&self, i: usize) -> i32 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_i32(s)).unwrap_or_default()
    }
    fn get_i64(&self, i: usize) -> i64 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_i64(s)).unwrap_or_default()
    }
    fn get_f32(&self, i: usize) -> f32 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_f32(s)).unwrap_or_default()
    }
    fn get_f64(&self, i: usize) -> f64 {
        self.source(i).ok().flatten().map(|s| self.underlying.get_f64(s)).unwrap_or_default()
    }
    fn get_date(&self, i: usize) -> Date {
        self.source(i).ok().flatten().map(|s| self.underlying.get_date(s)).unwrap_or(Date(0))
    }
    fn get_string(&self, i: usize) -> String {
        self.source(i).ok().flatten().map(|s| self.underlying.get_string(s)).unwrap_or_default()
    }
    fn get_binary(&self, i: usize) -> Vec<u8> {
        self.source(i).ok().flatten().map(|s| self.underlying.get_binary(s)).unwrap_or_default()
    }
    fn get_decimal(&self, i: usize, precision: u32, scale: u32) -> Decimal {
        self.source(i)
            .ok()
            .flatten()
            .map(|s| self.underlying.get_decimal(s, precision, scale))
            .unwrap_or_else(|| Decimal::new(num_bigint::BigInt::from(0), precision, scale))
    }
    fn get_timestamp(&self, i: usize, precision: u32) -> Timestamp {
        self.source(i)
            .ok()
            .flatten()
            .map(|s| self.underlying.get_timestamp(s, precision))
            .unwrap_or_else(|| Timestamp::from_millis(0))
    }
}

/// One output field's provenance: which underlying row (oldest schema
/// first) and which field of it supplies the value.
#[derive(Debug, Clone, Copy)]
pub struct FieldSource {
    pub source_index: usize,
    pub field_index: usize,
}

/// Overlays several underlying rows — typically successive schema
/// versions of the same logical record — through a per-output-field
/// `(source_index, field_index)` map, so older files can be read under a
/// newer schema without rewriting them.
pub struct DataEvolutionRow<R: RowAccessor> {
    underlying: Vec<R>,
    sources: Vec<FieldSource>,
    kind: RowKind,
}

impl<R: RowAccessor> DataEvolutionRow<R> {
    pub fn new(underlying: Vec<R>, sources: Vec<FieldSource>, kind: RowKind) -> Self {
        DataEvolutionRow { underlying, sources, kind }
    }

    fn resolve(&self, i: usize) -> Result<&R> {
        let src = self
            .sources
            .get(i)
            .ok_or_else(|| Error::invalid(format!("data-evolution field index {i} out of bounds")))?;
        self.underlying.get(src.source_index).ok_or_else(|| {
            Error::invalid(format!("data-evolution source row {} out of bounds", src.source_index))
        })
    }

    fn field(&self, i: usize) -> usize {
        self.sources[i].field_index
    }
}

impl<R: RowAccessor> RowAccessor for DataEvolutionRow<R> {
    fn arity(&self) -> usize {
        self.sources.len()
    }
    fn row_kind(&self) -> RowKind {
        self.kind
    }
    fn is_null_at(&self, i: usize) -> bool {
        self.resolve(i).map(|r| r.is_null_at(self.field(i))).unwrap_or(true)
    }
    fn get_bool(&self, i: usize) -> bool {
        self.resolve(i).map(|r| r.get_bool(self.field(i))).unwrap_or_default()
    }
    fn get_i8(&self, i: usize) -> i8 {
        self.resolve(i).map(|r| r.get_i8(self.field(i))).unwrap_or_default()
    }
    fn get_i16(&self, i: usize) -> i16 {
        self.resolve(i).map(|r| r.get_i16(self.field(i))).unwrap_or_default()
    }
    fn get_i32(&self, i: usize) -> i32 {
        self.resolve(i).map(|r| r.get_i32(self.field(i))).unwrap_or_default()
    }
    fn get_i64(&self, i: usize) -> i64 {
        self.resolve(i).map(|r| r.get_i64(self.field(i))).unwrap_or_default()
    }
    fn get_f32(&self, i: usize) -> f32 {
        self.resolve(i).map(|r| r.get_f32(self.field(i))).unwrap_or_default()
    }
    fn get_f64(&self, i: usize) -> f64 {
        self.resolve(i).map(|r| r.get_f64(self.field(i))).unwrap_or_default()
    }
    fn get_date(&self, i: usize) -> Date {
        self.resolve(i).map(|r| r.get_date(self.field(i))).unwrap_or(Date(0))
    }
    fn get_string(&self, i: usize) -> String {
        self.resolve(i).map(|r| r.get_string(self.field(i))).unwrap_or_default()
    }
    fn get_binary(&self, i: usize) -> Vec<u8> {
        self.resolve(i).map(|r| r.get_binary(self.field(i))).unwrap_or_default()
    }
    fn get_decimal(&self, i: usize, precision: u32, scale: u32) -> Decimal {
        self.resolve(i)
            .map(|r| r.get_decimal(self.field(i), precision, scale))
            .unwrap_or_else(|_| Decimal::new(num_bigint::BigInt::from(0), precision, scale))
    }
    fn get_timestamp(&self, i: usize, precision: u32) -> Timestamp {
        self.resolve(i)
            .map(|r| r.get_timestamp(self.field(i), precision))
            .unwrap_or_else(|_| Timestamp::from_millis(0))
    }
}
