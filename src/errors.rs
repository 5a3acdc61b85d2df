use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for source loading, configuration, and output failures.
///
/// Malformed rows and unclassifiable names are deliberately not errors:
/// the former are skipped during normalization, the latter resolve through
/// the default classification tier.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input table is absent. Fatal; raised before any output
    /// is written.
    #[error("required source '{source_id}' is missing at {}", .path.display())]
    MissingSource {
        /// Identifier of the missing source.
        source_id: SourceId,
        /// Path that was probed.
        path: PathBuf,
    },
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Table parse or serialization failure.
    #[error("table read/write failure: {0}")]
    Csv(#[from] csv::Error),
    /// Invalid engine configuration (duplicate service labels, blank
    /// keywords, zero report limits).
    #[error("configuration error: {0}")]
    Configuration(String),
}
