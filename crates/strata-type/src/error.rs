// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::fmt;

/// The single error surface shared by every crate in this workspace.
///
/// Every fallible operation in the binary row/array data layer returns
/// [`Result<T>`], so callers match on one enum regardless of which
/// component — writer, reader, stream, predicate, partition computer —
/// produced the failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input: schema/type mismatch, out-of-range index, a
    /// null literal handed to an operator that cannot accept one, a
    /// write that would run past a declared boundary.
    #[error("invalid: {0}")]
    Invalid(String),

    /// A type or construct that is recognized but has no converter
    /// coverage yet (e.g. a list-typed partition key).
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A stream read could not be satisfied. Carries the number of
    /// bytes requested and the number actually available so callers
    /// can log or retry meaningfully.
    #[error("end of stream: requested {requested} bytes, {available} available")]
    EndOfStream { requested: usize, available: usize },
}

impl Error {
    pub fn invalid(msg: impl fmt::Display) -> Self {
        Error::Invalid(msg.to_string())
    }

    pub fn not_implemented(msg: impl fmt::Display) -> Self {
        Error::NotImplemented(msg.to_string())
    }

    pub fn end_of_stream(requested: usize, available: usize) -> Self {
        Error::EndOfStream { requested, available }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
