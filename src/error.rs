//! Error types for the index's build and (de)serialization paths.
//!
//! Per the spec's error-handling design (§7), `search` itself never returns
//! an error type — invalid queries and allocation failure both collapse to
//! `false`, and this module intentionally has no `SearchError`.

use thiserror::Error;

/// Errors that can occur while building an index in memory.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A keyword id would exceed the 20-bit id space (`N > 2^20`).
    #[error("dictionary too large: keyword id {0} exceeds 2^20 - 1")]
    TooManyKeywords(u32),

    /// Allocation failed while sizing a CSR table or the keyword array.
    #[error("allocation failed: {0}")]
    AllocationFailed(String),
}

/// Errors that can occur while reading the on-disk format (§6.2).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The source ended before a fixed-size field could be read.
    #[error("unexpected end of input while reading {field} (needed {needed} bytes)")]
    ShortRead { field: &'static str, needed: usize },

    /// `cwA`/`cwB` was neither 16 nor 32.
    #[error("invalid count width byte: {0} (expected 16 or 32)")]
    InvalidCountWidth(u8),

    /// The stored total payload length disagreed with `sum(counts)`.
    #[error(
        "{block} payload length mismatch: header says {stored}, counts sum to {computed}"
    )]
    PayloadLengthMismatch {
        block: &'static str,
        stored: u64,
        computed: u64,
    },

    /// `KA`/`P`/`KB` in the file did not match this build's compile-time constants.
    #[error("{field} mismatch: file has {found}, expected {expected}")]
    ConstantMismatch {
        field: &'static str,
        found: u32,
        expected: u32,
    },

    /// Propagated I/O failure from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BuildResult<T> = Result<T, BuildError>;
pub type FormatResult<T> = Result<T, FormatError>;
