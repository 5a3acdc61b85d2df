#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Classification Engine: the four-tier cascade.
pub mod classify;
/// Ordered configuration objects for the engines.
pub mod config;
/// Centralized constants used across registry, classification, and output.
pub mod constants;
/// Core record and subject types.
pub mod data;
mod errors;
/// Built-in default knowledge base.
pub mod knowledge;
/// Identity Resolver & Merger.
pub mod merge;
/// Record Normalizer: raw rows into candidates.
pub mod normalize;
/// Batch orchestration and the enhancement pass.
pub mod pipeline;
/// Registry Builder and the canonical output tables.
pub mod registry;
/// Aggregate statistics and report rendering.
pub mod report;
/// Service-Tag Matcher.
pub mod services;
/// Tabular source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// Cell-cleaning helpers.
pub mod utils;

pub use classify::Classifier;
pub use config::{
    CategoryRule, CategoryRuleTable, ConceptBook, ConceptEntry, PipelineConfig, ServiceRule,
    ServiceRuleSet,
};
pub use data::{
    Classification, CostCategory, CostSubject, CostSubjectCandidate, MatchTier, RouteLegFlags,
    ServiceTaxonomyEntry, SourceAttributes,
};
pub use errors::PipelineError;
pub use merge::SubjectMerger;
pub use normalize::{candidate_from_row, RawRow, SourceSchema};
pub use pipeline::{enhance_canonical_rows, Pipeline, PipelineOutput};
pub use registry::{Registry, RegistryEntry, RegistryRow};
pub use report::{summarize, summarize_rows, RegistrySummary};
pub use services::ServiceMatcher;
pub use source::{CsvSubjectSource, InMemorySource, SubjectSource};
pub use types::{ServiceLabel, SourceId, SubjectId, SubjectName};
