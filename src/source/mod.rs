//! Tabular source interfaces.
//!
//! Ownership model:
//! - `SubjectSource` is the pipeline-facing interface that produces
//!   normalized candidates in stable row order.
//! - `CsvSubjectSource` reads a UTF-8 CSV through a `SourceSchema`.
//! - `InMemorySource` serves tests and prebuilt candidate lists.

use crate::data::CostSubjectCandidate;
use crate::errors::PipelineError;
use crate::types::SourceId;

/// CSV-backed source implementations.
pub mod csv_table;
pub use csv_table::{read_canonical_table, read_service_list, CsvSubjectSource};

/// Pipeline-facing source interface.
///
/// For a fixed table state, `candidates` must be deterministic and preserve
/// row order: the merger's fill-missing-only policy is order-sensitive.
pub trait SubjectSource {
    /// Stable source identifier used in provenance and error reporting.
    fn id(&self) -> &str;
    /// Produce all candidates of this source, in row order. Rows that do
    /// not yield a usable name are skipped, never fatal; an absent table
    /// is a fatal [`PipelineError::MissingSource`].
    fn candidates(&self) -> Result<Vec<CostSubjectCandidate>, PipelineError>;
}

/// In-memory source for tests and small prebuilt datasets.
pub struct InMemorySource {
    id: SourceId,
    candidates: Vec<CostSubjectCandidate>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt candidates.
    pub fn new(id: impl Into<SourceId>, candidates: Vec<CostSubjectCandidate>) -> Self {
        Self {
            id: id.into(),
            candidates,
        }
    }
}

impl SubjectSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn candidates(&self) -> Result<Vec<CostSubjectCandidate>, PipelineError> {
        Ok(self.candidates.clone())
    }
}
