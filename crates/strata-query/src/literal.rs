// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Typed predicate literals: comparisons are only defined within the
//! same variant; nulls of the same type compare equal.

use std::cmp::Ordering;
use strata_type::{Date, Decimal, Error, PhysicalType, Result, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null(PhysicalType),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Date(Date),
    Timestamp(Timestamp),
    Decimal(Decimal),
    String(String),
    Binary(Vec<u8>),
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null(_))
    }

    /// Partial order within a variant; nulls of the same type are equal
    /// to each other and incomparable to everything else. Cross-variant
    /// comparisons are a caller error.
    pub fn compare(&self, other: &Literal) -> Result<Ordering> {
        use Literal::*;
        match (self, other) {
            (Null(_), Null(_)) => Ok(Ordering::Equal),
            (Bool(a), Bool(b)) => Ok(a.cmp(b)),
            (I8(a), I8(b)) => Ok(a.cmp(b)),
            (I16(a), I16(b)) => Ok(a.cmp(b)),
            (I32(a), I32(b)) => Ok(a.cmp(b)),
            (I64(a), I64(b)) => Ok(a.cmp(b)),
            (F32(a), F32(b)) => {
                a.partial_cmp(b).ok_or_else(|| Error::invalid("NaN has no total order"))
            }
            (F64(a), F64(b)) => {
                a.partial_cmp(b).ok_or_else(|| Error::invalid("NaN has no total order"))
            }
            (Date(a), Date(b)) => Ok(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Ok(a.cmp(b)),
            (Decimal(a), Decimal(b)) if a.scale == b.scale => Ok(a.unscaled.cmp(&b.unscaled)),
            (String(a), String(b)) => Ok(a.cmp(b)),
            (Binary(a), Binary(b)) => Ok(a.cmp(b)),
            _ => Err(Error::invalid("cannot compare literals of different types")),
        }
    }

    pub fn equals(&self, other: &Literal) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }
}
