// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Column statistics (C12): per-type min/max/null-count accumulators and
//! their canonical string rendering.

use crate::format::format_float;
use crate::literal::Literal;
use strata_type::PhysicalType;

/// The `{min, max, null_count}` triple a predicate's stats-based "could
/// match" evaluation consults.
#[derive(Debug, Clone)]
pub struct StatsSummary {
    pub min: Option<Literal>,
    pub max: Option<Literal>,
    pub null_count: u64,
}

/// Monotonic accumulator: `collect` tightens `min`/`max` and bumps
/// `null_count`, never loosens them.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    field_type: PhysicalType,
    min: Option<Literal>,
    max: Option<Literal>,
    null_count: Option<u64>,
}

impl ColumnStats {
    pub fn new(field_type: PhysicalType) -> Self {
        ColumnStats { field_type, min: None, max: None, null_count: None }
    }

    pub fn collect(&mut self, value: Option<&Literal>) {
        match value {
            None => {
                self.null_count = Some(self.null_count.unwrap_or(0) + 1);
            }
            Some(v) => {
                self.null_count = Some(self.null_count.unwrap_or(0));
                match &self.min {
                    None => self.min = Some(v.clone()),
                    Some(m) if v.compare(m).map(|o| o.is_lt()).unwrap_or(false) => {
                        self.min = Some(v.clone())
                    }
                    _ => {}
                }
                match &self.max {
                    None => self.max = Some(v.clone()),
                    Some(m) if v.compare(m).map(|o| o.is_gt()).unwrap_or(false) => {
                        self.max = Some(v.clone())
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary { min: self.min.clone(), max: self.max.clone(), null_count: self.null_count.unwrap_or(0) }
    }

    fn render_literal(lit: &Literal) -> String {
        match lit {
            Literal::Null(_) => "null".to_string(),
            Literal::Bool(v) => v.to_string(),
            Literal::I8(v) => v.to_string(),
            Literal::I16(v) => v.to_string(),
            Literal::I32(v) => v.to_string(),
            Literal::I64(v) => v.to_string(),
            Literal::F32(v) => format_float(*v as f64),
            Literal::F64(v) => format_float(*v),
            Literal::Date(v) => v.0.to_string(),
            Literal::Timestamp(t) => format!("{}.{:03}", t.epoch_millis, t.nano_of_millis),
            Literal::Decimal(d) => crate::format::format_decimal(d),
            Literal::String(s) => s.clone(),
            Literal::Binary(b) => format!("{b:?}"),
        }
    }

    pub fn to_string(&self) -> String {
        let min = self.min.as_ref().map(Self::render_literal).unwrap_or_else(|| "null".into());
        let max = self.max.as_ref().map(Self::render_literal).unwrap_or_else(|| "null".into());
        let null_count =
            self.null_count.map(|c| c.to_string()).unwrap_or_else(|| "null".into());
        format!("min {min}, max {max}, null count {null_count}")
    }

    pub fn field_type(&self) -> PhysicalType {
        self.field_type
    }
}

/// Records only `null_count` and the nested field's type tag — nested
/// (row/array/map) columns don't carry min/max.
#[derive(Debug, Clone)]
pub struct NestedColumnStats {
    pub null_count: u64,
    pub nested_type: PhysicalType,
}
