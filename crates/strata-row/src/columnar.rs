// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Columnar view adapters (C7): a struct-of-arrays columnar buffer viewed
//! row-by-row through the same capability trait as a binary row, with no
//! copying. Used as the columnar substrate for predicate evaluation.

use crate::reader::RowAccessor;
use strata_type::{Date, Decimal, RowKind, Timestamp};

/// One field's backing storage. Dictionary columns hold an index array
/// plus a reference to an external dictionary of strings; a value at row
/// `r` resolves as `dictionary[indices[r]]`.
#[derive(Debug, Clone)]
pub enum ColumnData {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    String(Vec<String>),
    Binary(Vec<Vec<u8>>),
    DictionaryString { indices: Vec<i32>, dictionary: Vec<String> },
}

/// A column: one validity bit per row plus the backing data array.
#[derive(Debug, Clone)]
pub struct ColumnVector {
    pub validity: Vec<bool>,
    pub data: ColumnData,
}

impl ColumnVector {
    pub fn primitive(validity: Vec<bool>, data: ColumnData) -> Self {
        ColumnVector { validity, data }
    }

    pub fn is_null_at(&self, row: usize) -> bool {
        !self.validity[row]
    }

    fn get_string_at(&self, row: usize) -> String {
        match &self.data {
            ColumnData::String(v) => v[row].clone(),
            ColumnData::DictionaryString { indices, dictionary } => {
                dictionary[indices[row] as usize].clone()
            }
            other => panic!("column is not string-typed: {other:?}"),
        }
    }
}

/// A struct-array of columns, all the same length, forming the
/// columnar substrate predicates evaluate over directly.
#[derive(Debug, Clone)]
pub struct ColumnarBatch {
    pub columns: Vec<ColumnVector>,
    pub num_rows: usize,
}

impl ColumnarBatch {
    pub fn new(columns: Vec<ColumnVector>, num_rows: usize) -> Self {
        ColumnarBatch { columns, num_rows }
    }

    pub fn row(&self, index: usize) -> ColumnarRow<'_> {
        ColumnarRow { batch: self, row: index }
    }
}

/// A zero-copy row view indexing a single row of a [`ColumnarBatch`].
pub struct ColumnarRow<'a> {
    batch: &'a ColumnarBatch,
    row: usize,
}

macro_rules! get_numeric {
    ($name:ident, $variant:ident, $ty:ty) => {
        fn $name(&self, i: usize) -> $ty {
            match &self.batch.columns[i].data {
                ColumnData::$variant(v) => v[self.row],
                other => panic!("column {i} is not a {}: {other:?}", stringify!($variant)),
            }
        }
    };
}

impl<'a> RowAccessor for ColumnarRow<'a> {
    fn arity(&self) -> usize {
        self.batch.columns.len()
    }
    fn row_kind(&self) -> RowKind {
        RowKind::Insert
    }
    fn is_null_at(&self, i: usize) -> bool {
        self.batch.columns[i].is_null_at(self.row)
    }

    get_numeric!(get_bool, Bool, bool);
    get_numeric!(get_i8, I8, i8);
    get_numeric!(get_i16, I16, i16);
    get_numeric!(get_i32, I32, i32);
    get_numeric!(get_i64, I64, i64);
    get_numeric!(get_f32, F32, f32);
    get_numeric!(get_f64, F64, f64);

    fn get_date(&self, i: usize) -> Date {
        Date(self.get_i32(i))
    }
    fn get_string(&self, i: usize) -> String {
        self.batch.columns[i].get_string_at(self.row)
    }
    fn get_binary(&self, i: usize) -> Vec<u8> {
        match &self.batch.columns[i].data {
            ColumnData::Binary(v) => v[self.row].clone(),
            ColumnData::String(_) | ColumnData::DictionaryString { .. } => {
                self.get_string(i).into_bytes()
            }
            other => panic!("column {i} is not binary: {other:?}"),
        }
    }
    fn get_decimal(&self, i: usize, precision: u32, scale: u32) -> Decimal {
        Decimal::new(num_bigint::BigInt::from(self.get_i64(i)), precision, scale)
    }
    fn get_timestamp(&self, i: usize, _precision: u32) -> Timestamp {
        Timestamp::from_millis(self.get_i64(i))
    }
}
