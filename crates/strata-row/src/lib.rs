// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Packed binary row/array data layer (C3-C10): the fixed-header,
//! null-bitset-guarded, inline-or-offset variable-tail layout shared by
//! rows and arrays, the writers that build them, and the alternate row
//! representations (columnar, generic, projected) that share the same
//! reader capability trait.

pub mod array;
pub mod columnar;
pub mod generic_row;
pub mod layout;
pub mod projected;
pub mod reader;
pub mod row;
pub mod section;
pub mod serializer;
pub mod writer;

pub use array::BinaryArray;
pub use columnar::{ColumnData, ColumnVector, ColumnarBatch, ColumnarRow};
pub use generic_row::{GenericRow, StringView, Value};
pub use projected::{DataEvolutionRow, FieldSource, ProjectedRow};
pub use reader::RowAccessor;
pub use row::BinaryRow;
pub use section::BinarySection;
pub use serializer::{RowSerializer, SchemalessRowSerializer};
pub use writer::{BinaryArrayWriter, BinaryRowWriter};
