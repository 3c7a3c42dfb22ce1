// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

/// The physical types a binary row or binary array field can hold.
///
/// This is deliberately a closed, non-nested set: the binary layer encodes
/// scalars (and opaque bytes standing in for nested rows/arrays/maps via
/// the generic-row path) — schema evolution and logical type resolution
/// live above this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal { precision: u32, scale: u32 },
    Date,
    /// Timestamp at a given fractional-second precision (0-9).
    Timestamp { precision: u32 },
    Time,
    Varchar,
    Binary,
}

impl PhysicalType {
    /// Whether this type's fixed slot holds the value directly (`true`)
    /// or an `(offset, size)` pointer into the variable tail (`false`).
    pub fn is_fixed_width(self) -> bool {
        match self {
            PhysicalType::Varchar | PhysicalType::Binary => false,
            PhysicalType::Decimal { precision, .. } => precision <= 18,
            PhysicalType::Timestamp { precision } => precision <= 3,
            _ => true,
        }
    }

    /// Element size in bytes when this type is stored in a binary array:
    /// primitives of size in `{1,2,4,8}` are stored inline; everything
    /// else uses an 8-byte slot (inline-7 or offset+size).
    pub fn array_element_size(self) -> usize {
        match self {
            PhysicalType::Boolean | PhysicalType::TinyInt => 1,
            PhysicalType::SmallInt => 2,
            PhysicalType::Int | PhysicalType::Float | PhysicalType::Date => 4,
            PhysicalType::BigInt | PhysicalType::Double => 8,
            PhysicalType::Decimal { precision, .. } if precision <= 18 => 8,
            PhysicalType::Timestamp { precision } if precision <= 3 => 8,
            _ => 8,
        }
    }

    /// `true` for decimal/timestamp variants whose value fits in a single
    /// inline 8-byte slot, as opposed to spilling into the variable tail.
    pub fn is_compact(self) -> bool {
        match self {
            PhysicalType::Decimal { precision, .. } => precision <= 18,
            PhysicalType::Timestamp { precision } => precision <= 3,
            _ => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhysicalType::Boolean => "boolean",
            PhysicalType::TinyInt => "tinyint",
            PhysicalType::SmallInt => "smallint",
            PhysicalType::Int => "int",
            PhysicalType::BigInt => "bigint",
            PhysicalType::Float => "float",
            PhysicalType::Double => "double",
            PhysicalType::Decimal { .. } => "decimal",
            PhysicalType::Date => "date",
            PhysicalType::Timestamp { .. } => "timestamp",
            PhysicalType::Time => "time",
            PhysicalType::Varchar => "varchar",
            PhysicalType::Binary => "binary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_compactness_follows_precision() {
        assert!(PhysicalType::Decimal { precision: 18, scale: 2 }.is_compact());
        assert!(!PhysicalType::Decimal { precision: 19, scale: 2 }.is_compact());
    }

    #[test]
    fn timestamp_compactness_follows_precision() {
        assert!(PhysicalType::Timestamp { precision: 3 }.is_compact());
        assert!(!PhysicalType::Timestamp { precision: 6 }.is_compact());
    }

    #[test]
    fn fixed_width_excludes_variable_length_types() {
        assert!(!PhysicalType::Varchar.is_fixed_width());
        assert!(!PhysicalType::Binary.is_fixed_width());
        assert!(PhysicalType::Int.is_fixed_width());
    }
}
