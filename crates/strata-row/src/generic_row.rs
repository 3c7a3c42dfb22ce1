// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Generic row (C8): a `Vec<Value>`-backed row for test fixtures and for
//! values that have not yet been written through a binary writer.

use crate::reader::RowAccessor;
use std::sync::Arc;
use strata_type::{Date, Decimal, RowKind, Timestamp};

/// A string-like payload that remembers whether it owns its bytes or
/// borrows them from elsewhere. Both variants
/// deref to the same byte view; the distinction only matters to callers
/// deciding whether a copy is needed before the source is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringView {
    Owned(Vec<u8>),
    Borrowed(Arc<[u8]>),
}

impl StringView {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            StringView::Owned(b) => b,
            StringView::Borrowed(b) => b,
        }
    }

    pub fn owned(bytes: impl Into<Vec<u8>>) -> Self {
        StringView::Owned(bytes.into())
    }
}

/// A tagged value, covering every type a generic row field can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
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
    String(StringView),
    Bytes(StringView),
    InnerRow(Arc<GenericRow>),
    InnerArray(Arc<Vec<Value>>),
    InnerMap(Arc<Vec<(Value, Value)>>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericRow {
    pub values: Vec<Value>,
    pub kind: RowKind,
}

impl GenericRow {
    pub fn new(arity: usize) -> Self {
        GenericRow { values: vec![Value::Null; arity], kind: RowKind::Insert }
    }

    pub fn of(values: Vec<Value>) -> Self {
        GenericRow { values, kind: RowKind::Insert }
    }

    pub fn set_field(&mut self, i: usize, value: Value) {
        self.values[i] = value;
    }
}

macro_rules! get_numeric {
    ($name:ident, $variant:ident, $ty:ty) => {
        fn $name(&self, i: usize) -> $ty {
            match &self.values[i] {
                Value::$variant(v) => *v,
                Value::Null => <$ty>::default(),
                other => panic!("field {i} is not a {}: {other:?}", stringify!($variant)),
            }
        }
    };
}

impl RowAccessor for GenericRow {
    fn arity(&self) -> usize {
        self.values.len()
    }
    fn row_kind(&self) -> RowKind {
        self.kind
    }
    fn is_null_at(&self, i: usize) -> bool {
        self.values[i].is_null()
    }

    get_numeric!(get_bool, Bool, bool);
    get_numeric!(get_i8, I8, i8);
    get_numeric!(get_i16, I16, i16);
    get_numeric!(get_i32, I32, i32);
    get_numeric!(get_i64, I64, i64);
    get_numeric!(get_f32, F32, f32);
    get_numeric!(get_f64, F64, f64);

    fn get_date(&self, i: usize) -> Date {
        match &self.values[i] {
            Value::Date(d) => *d,
            Value::Null => Date(0),
            other => panic!("field {i} is not a date: {other:?}"),
        }
    }

    fn get_string(&self, i: usize) -> String {
        match &self.values[i] {
            Value::String(s) => String::from_utf8_lossy(s.as_bytes()).into_owned(),
            Value::Null => String::new(),
            other => panic!("field {i} is not a string: {other:?}"),
        }
    }

    fn get_binary(&self, i: usize) -> Vec<u8> {
        match &self.values[i] {
            Value::Bytes(b) | Value::String(b) => b.as_bytes().to_vec(),
            Value::Null => Vec::new(),
            other => panic!("field {i} is not bytes: {other:?}"),
        }
    }

    fn get_decimal(&self, i: usize, precision: u32, scale: u32) -> Decimal {
        match &self.values[i] {
            Value::Decimal(d) => d.clone(),
            Value::Null => Decimal::new(num_bigint::BigInt::from(0), precision, scale),
            other => panic!("field {i} is not a decimal: {other:?}"),
        }
    }

    fn get_timestamp(&self, i: usize, _precision: u32) -> Timestamp {
        match &self.values[i] {
            Value::Timestamp(t) => *t,
            Value::Null => Timestamp::from_millis(0),
            other => panic!("field {i} is not a timestamp: {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_default_and_set_fields_round_trip() {
        let mut row = GenericRow::new(2);
        assert!(row.is_null_at(0));
        row.set_field(0, Value::I32(7));
        row.set_field(1, Value::String(StringView::owned(b"hi".to_vec())));
        assert_eq!(row.get_i32(0), 7);
        assert_eq!(row.get_string(1), "hi");
    }
}
