// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Predicate algebra & evaluator (C13): leaf predicates bound to one
//! field, compound And/Or, evaluated over three substrates — a columnar
//! batch (mask), a single row (bool), and column statistics
//! ("could match").

use crate::literal::Literal;
use crate::stats::StatsSummary;
use std::cmp::Ordering;
use strata_row::{ColumnarBatch, RowAccessor};
use strata_type::{Error, PhysicalType, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    IsNull,
    IsNotNull,
    In,
    NotIn,
    Between,
}

#[derive(Debug, Clone)]
pub struct Leaf {
    pub field_index: usize,
    pub field_type: PhysicalType,
    pub op: Op,
    /// `Equal`/ordering ops use `[0]`; `In`/`NotIn` use the whole list;
    /// `Between` uses `[lo, hi]`.
    pub literals: Vec<Literal>,
}

impl Leaf {
    pub fn new(field_index: usize, field_type: PhysicalType, op: Op, literals: Vec<Literal>) -> Self {
        Leaf { field_index, field_type, op, literals }
    }

    /// Equal<->NotEqual, Lt<->Ge, Le<->Gt, IsNull<->IsNotNull, In<->NotIn
    /// are leaf-to-leaf. Between negates to `Or(Lt(lo), Gt(hi))`, so this
    /// returns a full [`Predicate`], not another leaf.
    pub fn negate(&self) -> Predicate {
        let dual = match self.op {
            Op::Equal => Some(Op::NotEqual),
            Op::NotEqual => Some(Op::Equal),
            Op::LessThan => Some(Op::GreaterOrEqual),
            Op::GreaterOrEqual => Some(Op::LessThan),
            Op::LessOrEqual => Some(Op::GreaterThan),
            Op::GreaterThan => Some(Op::LessOrEqual),
            Op::IsNull => Some(Op::IsNotNull),
            Op::IsNotNull => Some(Op::IsNull),
            Op::In => Some(Op::NotIn),
            Op::NotIn => Some(Op::In),
            Op::Between => None,
        };
        match dual {
            Some(op) => Predicate::Leaf(Leaf::new(self.field_index, self.field_type, op, self.literals.clone())),
            None => {
                let lo = self.literals[0].clone();
                let hi = self.literals[1].clone();
                Predicate::Or(vec![
                    Predicate::Leaf(Leaf::new(self.field_index, self.field_type, Op::LessThan, vec![lo])),
                    Predicate::Leaf(Leaf::new(self.field_index, self.field_type, Op::GreaterThan, vec![hi])),
                ])
            }
        }
    }

    fn bounds_check(&self, arity: usize) -> Result<()> {
        if self.field_index >= arity {
            return Err(Error::invalid(format!(
                "predicate field index {} out of bounds for {} fields",
                self.field_index, arity
            )));
        }
        Ok(())
    }

    fn read_literal(&self, row: &dyn RowAccessor) -> Literal {
        use PhysicalType::*;
        let i = self.field_index;
        match self.field_type {
            Boolean => Literal::Bool(row.get_bool(i)),
            TinyInt => Literal::I8(row.get_i8(i)),
            SmallInt => Literal::I16(row.get_i16(i)),
            Int => Literal::I32(row.get_i32(i)),
            BigInt => Literal::I64(row.get_i64(i)),
            Float => Literal::F32(row.get_f32(i)),
            Double => Literal::F64(row.get_f64(i)),
            Date => Literal::Date(row.get_date(i)),
            Timestamp { precision } => Literal::Timestamp(row.get_timestamp(i, precision)),
            Decimal { precision, scale } => Literal::Decimal(row.get_decimal(i, precision, scale)),
            Time => Literal::I32(row.get_i32(i)),
            Varchar => Literal::String(row.get_string(i)),
            Binary => Literal::Binary(row.get_binary(i)),
        }
    }

    pub fn test_row(&self, row: &dyn RowAccessor) -> Result<bool> {
        self.bounds_check(row.arity())?;
        let is_null = row.is_null_at(self.field_index);
        match self.op {
            Op::IsNull => return Ok(is_null),
            Op::IsNotNull => return Ok(!is_null),
            _ if is_null => return Ok(false),
            _ => {}
        }
        let value = self.read_literal(row);
        self.eval_value(&value)
    }

    fn eval_value(&self, value: &Literal) -> Result<bool> {
        match self.op {
            Op::Equal => {
                if self.literals[0].is_null() {
                    return Ok(false);
                }
                value.equals(&self.literals[0])
            }
            Op::NotEqual => {
                if self.literals[0].is_null() {
                    return Ok(false);
                }
                Ok(!value.equals(&self.literals[0])?)
            }
            Op::LessThan => Ok(value.compare(&self.literals[0])? == Ordering::Less),
            Op::LessOrEqual => Ok(value.compare(&self.literals[0])? != Ordering::Greater),
            Op::GreaterThan => Ok(value.compare(&self.literals[0])? == Ordering::Greater),
            Op::GreaterOrEqual => Ok(value.compare(&self.literals[0])? != Ordering::Less),
            Op::In => {
                for lit in &self.literals {
                    if lit.is_null() {
                        continue;
                    }
                    if value.equals(lit)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Op::NotIn => {
                for lit in &self.literals {
                    if lit.is_null() {
                        continue;
                    }
                    if value.equals(lit)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Op::Between => {
                let (lo, hi) = (&self.literals[0], &self.literals[1]);
                if lo.is_null() || hi.is_null() {
                    return Ok(false);
                }
                Ok(value.compare(lo)? != Ordering::Less && value.compare(hi)? != Ordering::Greater)
            }
            Op::IsNull | Op::IsNotNull => unreachable!("handled in test_row"),
        }
    }

    pub fn test_stats(&self, stats: &StatsSummary, row_count: u64) -> Result<bool> {
        match self.op {
            Op::IsNull => return Ok(stats.null_count > 0),
            Op::IsNotNull => return Ok(stats.null_count < row_count),
            _ => {}
        }
        let (min, max) = match (&stats.min, &stats.max) {
            (Some(min), Some(max)) => (min, max),
            _ => return Ok(false),
        };
        match self.op {
            Op::Equal => {
                let v = &self.literals[0];
                if v.is_null() {
                    return Ok(false);
                }
                Ok(min.compare(v)? != Ordering::Greater
                    && max.compare(v)? != Ordering::Less
                    && stats.null_count < row_count)
            }
            Op::NotEqual => {
                let v = &self.literals[0];
                if v.is_null() {
                    return Ok(false);
                }
                let both_equal_v =
                    min.equals(max)? && min.equals(v)?;
                Ok(!both_equal_v && stats.null_count < row_count)
            }
            Op::LessThan => Ok(min.compare(&self.literals[0])? == Ordering::Less),
            Op::LessOrEqual => Ok(min.compare(&self.literals[0])? != Ordering::Greater),
            Op::GreaterThan => Ok(max.compare(&self.literals[0])? == Ordering::Greater),
            Op::GreaterOrEqual => Ok(max.compare(&self.literals[0])? != Ordering::Less),
            Op::In => {
                for lit in &self.literals {
                    if lit.is_null() {
                        continue;
                    }
                    if min.compare(lit)? != Ordering::Greater && max.compare(lit)? != Ordering::Less {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Op::NotIn => Ok(min.compare(max)? == Ordering::Less || {
                !self.literals.iter().any(|lit| min.equals(max).unwrap_or(false) && min.equals(lit).unwrap_or(false))
            }),
            Op::Between => {
                let (lo, hi) = (&self.literals[0], &self.literals[1]);
                if lo.is_null() || hi.is_null() {
                    return Ok(false);
                }
                Ok(min.compare(hi)? != Ordering::Greater && max.compare(lo)? != Ordering::Less)
            }
            Op::IsNull | Op::IsNotNull => unreachable!("handled above"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    Leaf(Leaf),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn and(children: Vec<Predicate>) -> Result<Predicate> {
        Self::compound(children, Predicate::And)
    }

    pub fn or(children: Vec<Predicate>) -> Result<Predicate> {
        Self::compound(children, Predicate::Or)
    }

    fn compound(mut children: Vec<Predicate>, make: impl FnOnce(Vec<Predicate>) -> Predicate) -> Result<Predicate> {
        if children.is_empty() {
            return Err(Error::invalid("compound predicate requires at least one child"));
        }
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(make(children))
    }

    pub fn negate(&self) -> Predicate {
        match self {
            Predicate::Leaf(l) => l.negate(),
            Predicate::And(cs) => Predicate::Or(cs.iter().map(Predicate::negate).collect()),
            Predicate::Or(cs) => Predicate::And(cs.iter().map(Predicate::negate).collect()),
        }
    }

    pub fn test_row(&self, row: &dyn RowAccessor) -> Result<bool> {
        match self {
            Predicate::Leaf(l) => l.test_row(row),
            Predicate::And(cs) => {
                for c in cs {
                    if !c.test_row(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(cs) => {
                for c in cs {
                    if c.test_row(row)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    pub fn test_columnar(&self, batch: &ColumnarBatch) -> Result<Vec<bool>> {
        (0..batch.num_rows).map(|i| self.test_row(&batch.row(i))).collect()
    }

    pub fn test_stats(&self, stats: &[StatsSummary], row_count: u64) -> Result<bool> {
        match self {
            Predicate::Leaf(l) => {
                let s = stats.get(l.field_index).ok_or_else(|| {
                    Error::invalid(format!(
                        "predicate field index {} out of bounds for {} stat columns",
                        l.field_index,
                        stats.len()
                    ))
                })?;
                l.test_stats(s, row_count)
            }
            Predicate::And(cs) => {
                for c in cs {
                    if !c.test_stats(stats, row_count)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Predicate::Or(cs) => {
                for c in cs {
                    if c.test_stats(stats, row_count)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsSummary;
    use strata_row::{BinaryRowWriter, GenericRow, Value};

    fn leaf(field: usize, op: Op, lit: Literal) -> Predicate {
        Predicate::Leaf(Leaf::new(field, PhysicalType::Int, op, vec![lit]))
    }

    #[test]
    fn negation_is_consistent_with_direct_evaluation() {
        let mut w = BinaryRowWriter::new(1);
        w.write_i32(0, 7);
        let row = w.complete();
        let p = leaf(0, Op::GreaterThan, Literal::I32(5));
        assert!(p.test_row(&row).unwrap());
        assert!(!p.negate().test_row(&row).unwrap());
    }

    #[test]
    fn columnar_mask_matches_row_semantics_with_nulls_false() {
        use strata_row::{ColumnData, ColumnVector, ColumnarBatch};
        let col = ColumnVector::primitive(vec![true, true, true, false], ColumnData::I32(vec![4, 5, 6, 0]));
        let batch = ColumnarBatch::new(vec![col], 4);
        let p = leaf(0, Op::GreaterThan, Literal::I32(5));
        assert_eq!(p.test_columnar(&batch).unwrap(), vec![false, false, true, false]);
        let neg = p.negate();
        assert_eq!(neg.test_columnar(&batch).unwrap(), vec![true, true, false, false]);
    }

    #[test]
    fn and_over_generic_rows_matches_stats_could_match() {
        let rows = [(4, 5), (3, 6), (3, 5), (0, 5)];
        let mut nulls = [false, false, false, true];
        let p = Predicate::and(vec![
            leaf(0, Op::Equal, Literal::I32(3)),
            Predicate::Leaf(Leaf::new(1, PhysicalType::Int, Op::Equal, vec![Literal::I32(5)])),
        ])
        .unwrap();
        let results: Vec<bool> = rows
            .iter()
            .zip(nulls.iter_mut())
            .map(|((a, b), is_null)| {
                let mut row = GenericRow::new(2);
                if *is_null {
                    row.set_field(0, Value::Null);
                } else {
                    row.set_field(0, Value::I32(*a));
                }
                row.set_field(1, Value::I32(*b));
                p.test_row(&row).unwrap()
            })
            .collect();
        assert_eq!(results, vec![false, false, true, false]);

        let stats = vec![
            StatsSummary { min: Some(Literal::I32(3)), max: Some(Literal::I32(6)), null_count: 0 },
            StatsSummary { min: Some(Literal::I32(4)), max: Some(Literal::I32(6)), null_count: 0 },
        ];
        assert!(p.test_stats(&stats, 3).unwrap());
    }
}
