//! Error types for the Mendelian library.

use thiserror::Error;

/// Errors that can occur during Mendelian operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A parse error occurred while reading genotype, contig or mode text.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// The pedigree is structurally invalid (duplicate ids, unknown or mis-sexed parents).
    /// No partially-built pedigree is ever returned alongside this error.
    #[error("invalid pedigree: {0}")]
    Pedigree(String),

    /// Genotype sample columns could not be bound to the pedigree.
    #[error("sample mismatch: {0}")]
    Sample(String),
}
