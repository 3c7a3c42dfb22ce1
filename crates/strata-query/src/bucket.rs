// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Bucket-id calculator (C14): hashes a projected bucket-key row modulo
//! the configured bucket count, with sentinel dispatch for single/dynamic/
//! postponed modes.

use strata_row::{BinaryRowWriter, ColumnarBatch, RowAccessor};
use strata_type::{BucketSentinel, PartitionConfig, PhysicalType, Result};

pub struct BucketCalculator {
    config: PartitionConfig,
}

impl BucketCalculator {
    /// Construction fails for the same reasons [`PartitionConfig`]
    /// validation does: `num_buckets` in `{0, <-2}`, or `-1` on a
    /// primary-key table, or `-2` on an append-only table.
    pub fn new(config: PartitionConfig) -> Result<Self> {
        config.bucket_sentinel()?;
        Ok(BucketCalculator { config })
    }

    pub fn compute(&self, batch: &ColumnarBatch, bucket_key_types: &[PhysicalType]) -> Result<Vec<i32>> {
        match self.config.bucket_sentinel()? {
            BucketSentinel::Single | BucketSentinel::Dynamic => Ok(vec![0; batch.num_rows]),
            BucketSentinel::Postponed => {
                tracing::trace!("bucket assignment postponed, emitting sentinel -2 for every row");
                Ok(vec![-2; batch.num_rows])
            }
            BucketSentinel::Fixed(num_buckets) => {
                let mut out = Vec::with_capacity(batch.num_rows);
                for r in 0..batch.num_rows {
                    let row = batch.row(r);
                    let mut w = BinaryRowWriter::new(bucket_key_types.len());
                    for (i, ty) in bucket_key_types.iter().enumerate() {
                        write_bucket_field(&mut w, i, *ty, &row);
                    }
                    let projected = w.complete();
                    let hash = projected.hash() as i64;
                    out.push((hash % num_buckets as i64).unsigned_abs() as i32);
                }
                Ok(out)
            }
        }
    }
}

fn write_bucket_field(w: &mut BinaryRowWriter, i: usize, ty: PhysicalType, row: &impl RowAccessor) {
    if row.is_null_at(i) {
        w.set_null_at(i);
        return;
    }
    match ty {
        PhysicalType::Boolean => w.write_bool(i, row.get_bool(i)),
        PhysicalType::TinyInt => w.write_i8(i, row.get_i8(i)),
        PhysicalType::SmallInt => w.write_i16(i, row.get_i16(i)),
        PhysicalType::Int | PhysicalType::Date => w.write_i32(i, row.get_i32(i)),
        PhysicalType::BigInt => w.write_i64(i, row.get_i64(i)),
        PhysicalType::Float => w.write_f32(i, row.get_f32(i)),
        PhysicalType::Double => w.write_f64(i, row.get_f64(i)),
        PhysicalType::Timestamp { precision } => w.write_timestamp(i, &row.get_timestamp(i, precision), precision),
        PhysicalType::Decimal { precision, scale } => w.write_decimal(i, &row.get_decimal(i, precision, scale)),
        PhysicalType::Varchar => w.write_string(i, &row.get_string(i)),
        PhysicalType::Binary | PhysicalType::Time => w.write_binary(i, &row.get_binary(i)),
    }
}
