// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use crate::error::{Error, Result};

/// Whether a table enforces primary-key uniqueness or is append-only.
/// Constrains which `num_buckets` sentinels are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    PrimaryKey,
    Append,
}

/// The well-known sentinel values `num_buckets` may carry, distinguished
/// from an ordinary positive bucket count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSentinel {
    /// `num_buckets == 1`: single bucket, every row maps to 0.
    Single,
    /// `num_buckets == -1`: dynamic/cross-partition bucketing, every row
    /// maps to 0. Not valid for primary-key tables.
    Dynamic,
    /// `num_buckets == -2`: postponed bucket assignment, every row maps
    /// to -2. Not valid for append-only tables.
    Postponed,
    /// Any other positive count: real hash-based bucketing.
    Fixed(u32),
}

impl BucketSentinel {
    pub fn from_num_buckets(num_buckets: i32, table_kind: TableKind) -> Result<Self> {
        match num_buckets {
            1 => Ok(BucketSentinel::Single),
            -1 => {
                if table_kind == TableKind::PrimaryKey {
                    Err(Error::invalid("num_buckets = -1 (dynamic) is not valid for primary-key tables"))
                } else {
                    Ok(BucketSentinel::Dynamic)
                }
            }
            -2 => {
                if table_kind == TableKind::Append {
                    Err(Error::invalid("num_buckets = -2 (postponed) is not valid for append-only tables"))
                } else {
                    Ok(BucketSentinel::Postponed)
                }
            }
            0 => Err(Error::invalid("num_buckets = 0 is not a valid bucket count")),
            n if n < -2 => Err(Error::invalid(format!("num_buckets = {n} is not a valid bucket count"))),
            n => Ok(BucketSentinel::Fixed(n as u32)),
        }
    }
}

/// Validated configuration for partitioning and bucketing. Constructed
/// once via [`PartitionConfigBuilder`]; every field has already been
/// checked for internal consistency by the time a [`PartitionConfig`]
/// exists.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    pub partition_keys: Vec<String>,
    pub default_partition_value: String,
    pub legacy_partition_name: bool,
    pub num_buckets: i32,
    pub table_kind: TableKind,
}

impl PartitionConfig {
    pub fn builder() -> PartitionConfigBuilder {
        PartitionConfigBuilder::default()
    }

    pub fn bucket_sentinel(&self) -> Result<BucketSentinel> {
        BucketSentinel::from_num_buckets(self.num_buckets, self.table_kind)
    }
}

#[derive(Debug, Default)]
pub struct PartitionConfigBuilder {
    partition_keys: Vec<String>,
    default_partition_value: Option<String>,
    legacy_partition_name: bool,
    num_buckets: Option<i32>,
    table_kind: Option<TableKind>,
}

impl PartitionConfigBuilder {
    pub fn partition_keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.partition_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_partition_value(mut self, value: impl Into<String>) -> Self {
        self.default_partition_value = Some(value.into());
        self
    }

    pub fn legacy_partition_name(mut self, legacy: bool) -> Self {
        self.legacy_partition_name = legacy;
        self
    }

    pub fn num_buckets(mut self, n: i32) -> Self {
        self.num_buckets = Some(n);
        self
    }

    pub fn table_kind(mut self, kind: TableKind) -> Self {
        self.table_kind = Some(kind);
        self
    }

    pub fn build(self) -> Result<PartitionConfig> {
        let num_buckets = self.num_buckets.unwrap_or(1);
        let table_kind = self.table_kind.unwrap_or(TableKind::PrimaryKey);
        // Validate eagerly so a misconfigured caller fails at construction,
        // not on the first row write.
        BucketSentinel::from_num_buckets(num_buckets, table_kind)?;
        Ok(PartitionConfig {
            partition_keys: self.partition_keys,
            default_partition_value: self
                .default_partition_value
                .unwrap_or_else(|| "__DEFAULT_PARTITION__".to_string()),
            legacy_partition_name: self.legacy_partition_name,
            num_buckets,
            table_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_bucket_count() {
        let err = PartitionConfig::builder().num_buckets(0).build();
        assert!(err.is_err());
    }

    #[test]
    fn rejects_dynamic_sentinel_for_primary_key_table() {
        let err = PartitionConfig::builder()
            .num_buckets(-1)
            .table_kind(TableKind::PrimaryKey)
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn accepts_postponed_sentinel_for_primary_key_table() {
        let cfg = PartitionConfig::builder()
            .num_buckets(-2)
            .table_kind(TableKind::PrimaryKey)
            .build()
            .unwrap();
        assert_eq!(cfg.bucket_sentinel().unwrap(), BucketSentinel::Postponed);
    }

    #[test]
    fn default_sentinel_value() {
        let cfg = PartitionConfig::builder().build().unwrap();
        assert_eq!(cfg.default_partition_value, "__DEFAULT_PARTITION__");
    }
}
