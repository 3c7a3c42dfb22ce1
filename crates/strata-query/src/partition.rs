// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Partition computer (C14): converts between a `{field -> value string}`
//! map and a binary row carrying the partition tuple, plus a concurrent
//! intern map for reusing materialized tuples across threads.

use crate::date::{format_iso_date, parse_iso_date};
use crate::format::format_float;
use dashmap::DashMap;
use std::collections::HashMap;
use strata_row::{BinaryRow, BinaryRowWriter, RowAccessor};
use strata_type::{Error, PartitionConfig, PhysicalType, Result};

#[derive(Debug, Clone)]
pub struct PartitionField {
    pub name: String,
    pub field_type: PhysicalType,
}

pub struct PartitionComputer {
    fields: Vec<PartitionField>,
    config: PartitionConfig,
}

impl PartitionComputer {
    pub fn new(fields: Vec<PartitionField>, config: PartitionConfig) -> Self {
        PartitionComputer { fields, config }
    }

    pub fn to_row(&self, values: &HashMap<String, String>) -> Result<BinaryRow> {
        let mut w = BinaryRowWriter::new(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            let raw = values.get(&field.name).ok_or_else(|| {
                Error::invalid(format!("missing partition value for field '{}'", field.name))
            })?;
            if raw == &self.config.default_partition_value {
                write_null(&mut w, i, field.field_type)?;
            } else {
                write_value(&mut w, i, field.field_type, raw, self.config.legacy_partition_name)?;
            }
        }
        Ok(w.complete())
    }

    pub fn to_map(&self, row: &BinaryRow) -> Result<HashMap<String, String>> {
        let mut out = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            let rendered = if row.is_null_at(i) {
                self.config.default_partition_value.clone()
            } else {
                read_value(row, i, field.field_type, self.config.legacy_partition_name)?
            };
            out.insert(field.name.clone(), rendered);
        }
        Ok(out)
    }
}

fn write_null(w: &mut BinaryRowWriter, i: usize, ty: PhysicalType) -> Result<()> {
    match ty {
        PhysicalType::Decimal { precision, .. } => w.write_decimal_null(i, precision),
        PhysicalType::Timestamp { precision } => w.write_timestamp_null(i, precision),
        _ => w.set_null_at(i),
    }
    Ok(())
}

fn write_value(
    w: &mut BinaryRowWriter,
    i: usize,
    ty: PhysicalType,
    raw: &str,
    legacy_partition_name: bool,
) -> Result<()> {
    let parse_err = |e: std::num::ParseIntError| Error::invalid(format!("cannot parse '{raw}': {e}"));
    match ty {
        PhysicalType::Boolean => {
            let v = match raw.to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                other => return Err(Error::invalid(format!("not a boolean: '{other}'"))),
            };
            w.write_bool(i, v);
        }
        PhysicalType::TinyInt => w.write_i8(i, raw.parse().map_err(parse_err)?),
        PhysicalType::SmallInt => w.write_i16(i, raw.parse().map_err(parse_err)?),
        PhysicalType::Int => w.write_i32(i, raw.parse().map_err(parse_err)?),
        PhysicalType::BigInt => w.write_i64(i, raw.parse().map_err(parse_err)?),
        PhysicalType::Float => {
            w.write_f32(i, raw.parse().map_err(|_| Error::invalid(format!("not a float: '{raw}'")))?)
        }
        PhysicalType::Double => {
            w.write_f64(i, raw.parse().map_err(|_| Error::invalid(format!("not a double: '{raw}'")))?)
        }
        PhysicalType::Date => {
            let days = if legacy_partition_name {
                raw.parse().map_err(parse_err)?
            } else {
                parse_iso_date(raw).ok_or_else(|| Error::invalid(format!("not an ISO date: '{raw}'")))?
            };
            w.write_date(i, days);
        }
        PhysicalType::Varchar => w.write_string(i, raw),
        other => return Err(Error::not_implemented(format!("partition value type {other:?} unsupported"))),
    }
    Ok(())
}

fn read_value(
    row: &BinaryRow,
    i: usize,
    ty: PhysicalType,
    legacy_partition_name: bool,
) -> Result<String> {
    Ok(match ty {
        PhysicalType::Boolean => row.get_bool(i).to_string(),
        PhysicalType::TinyInt => row.get_i8(i).to_string(),
        PhysicalType::SmallInt => row.get_i16(i).to_string(),
        PhysicalType::Int => row.get_i32(i).to_string(),
        PhysicalType::BigInt => row.get_i64(i).to_string(),
        PhysicalType::Float => format_float(row.get_f32(i) as f64),
        PhysicalType::Double => format_float(row.get_f64(i)),
        PhysicalType::Date => {
            let days = row.get_date(i).0;
            if legacy_partition_name { days.to_string() } else { format_iso_date(days) }
        }
        PhysicalType::Varchar => row.get_string(i),
        other => return Err(Error::not_implemented(format!("partition value type {other:?} unsupported"))),
    })
}

/// Cross-thread intern map for `partition keys -> materialized row`:
/// fine-grained locking via `dashmap`, last-writer-wins on `insert`.
pub struct PartitionTupleMap {
    map: DashMap<Vec<String>, BinaryRow>,
}

impl PartitionTupleMap {
    pub fn new() -> Self {
        PartitionTupleMap { map: DashMap::new() }
    }

    pub fn find(&self, key: &[String]) -> Option<BinaryRow> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: Vec<String>, row: BinaryRow) {
        self.map.insert(key, row);
    }

    pub fn erase(&self, key: &[String]) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.map.len()
    }
}

impl Default for PartitionTupleMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_type::TableKind;

    fn computer(legacy: bool) -> PartitionComputer {
        let config = PartitionConfig::builder()
            .partition_keys(vec!["dt".to_string()])
            .default_partition_value("__DEFAULT__".to_string())
            .legacy_partition_name(legacy)
            .num_buckets(1)
            .table_kind(TableKind::PrimaryKey)
            .build()
            .unwrap();
        PartitionComputer::new(vec![PartitionField { name: "dt".to_string(), field_type: PhysicalType::Date }], config)
    }

    #[test]
    fn iso_date_round_trips_through_row() {
        let c = computer(false);
        let mut values = HashMap::new();
        values.insert("dt".to_string(), "1998-08-02".to_string());
        let row = c.to_row(&values).unwrap();
        assert_eq!(row.get_date(0).0, 10440);
        let back = c.to_map(&row).unwrap();
        assert_eq!(back.get("dt").unwrap(), "1998-08-02");
    }

    #[test]
    fn default_partition_value_maps_to_null_and_back() {
        let c = computer(false);
        let mut values = HashMap::new();
        values.insert("dt".to_string(), "__DEFAULT__".to_string());
        let row = c.to_row(&values).unwrap();
        assert!(row.is_null_at(0));
        let back = c.to_map(&row).unwrap();
        assert_eq!(back.get("dt").unwrap(), "__DEFAULT__");
    }

    #[test]
    fn intern_map_overwrites_and_erases() {
        let map = PartitionTupleMap::new();
        let c = computer(false);
        let mut values = HashMap::new();
        values.insert("dt".to_string(), "1998-08-02".to_string());
        let row = c.to_row(&values).unwrap();
        map.insert(vec!["1998-08-02".to_string()], row.clone());
        assert_eq!(map.size(), 1);
        assert!(map.find(&["1998-08-02".to_string()]).is_some());
        assert!(map.erase(&["1998-08-02".to_string()]));
        assert_eq!(map.size(), 0);
    }
}
