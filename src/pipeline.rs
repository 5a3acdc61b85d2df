//! Batch orchestration: sources in, tables and report out.
//!
//! All sources are loaded into memory before merging begins; classification
//! and matching run in one synchronous pass; files are written only after
//! every stage has completed, so there is no partial-output state. A failed
//! source load aborts the run before anything touches the output directory.

use std::fs;
use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::config::PipelineConfig;
use crate::constants::output as output_files;
use crate::constants::report::{ENHANCEMENT_TITLE, SUMMARY_TITLE};
use crate::data::ServiceTaxonomyEntry;
use crate::errors::PipelineError;
use crate::merge::SubjectMerger;
use crate::registry::{write_rows_csv, write_service_table, Registry, RegistryRow};
use crate::report::{render_report, summarize, summarize_rows, RegistrySummary};
use crate::services::ServiceMatcher;
use crate::source::SubjectSource;

/// Everything one pipeline run produces.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Canonical registry in identifier order.
    pub registry: Registry,
    /// Statistics over the registry.
    pub summary: RegistrySummary,
    /// Service taxonomy entries for the pass-through table.
    pub services: Vec<ServiceTaxonomyEntry>,
    /// Run timestamp, stamped on the report header only. The registry
    /// table itself carries no timestamps so identical inputs produce
    /// byte-identical tables.
    pub generated_at: DateTime<Utc>,
}

/// The batch pipeline: configuration plus registered sources.
///
/// Sources are processed fully, one after another, in registration order;
/// that order is the precedence order of the fill-missing-only merge.
pub struct Pipeline {
    config: PipelineConfig,
    sources: Vec<Box<dyn SubjectSource>>,
    service_entries: Vec<ServiceTaxonomyEntry>,
}

impl Pipeline {
    /// Create a pipeline with no sources registered yet.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            sources: Vec::new(),
            service_entries: Vec::new(),
        }
    }

    /// Register a source at the end of the precedence order.
    pub fn with_source(mut self, source: impl SubjectSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Attach the service taxonomy for the pass-through table.
    pub fn with_service_taxonomy(mut self, entries: Vec<ServiceTaxonomyEntry>) -> Self {
        self.service_entries = entries;
        self
    }

    /// Run every stage and return the assembled output. Nothing is written
    /// to disk here; see [`Pipeline::write_outputs`].
    pub fn run(&self) -> Result<PipelineOutput, PipelineError> {
        let config = self.config.clone().validated()?;

        // Load every source up front; a missing table aborts the whole run.
        let mut merger = SubjectMerger::new();
        for source in &self.sources {
            let candidates = source.candidates()?;
            info!(source = source.id(), candidates = candidates.len(), "loaded source");
            merger.absorb_all(candidates);
        }
        let subjects = merger.into_subjects();
        debug!(subjects = subjects.len(), "identity resolution complete");

        let classifier = Classifier::new(config.concepts.clone(), config.category_rules.clone());
        let matcher = ServiceMatcher::new(config.service_rules.clone());

        let registry = Registry::build(subjects.into_values().map(|subject| {
            let classification = classifier.classify(&subject.canonical_name);
            let services = matcher.match_name(&subject.canonical_name);
            (subject, classification, services)
        }));
        let summary = summarize(&registry, config.top_services_limit);
        info!(
            subjects = registry.len(),
            matched = summary.with_services,
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            registry,
            summary,
            services: self.service_entries.clone(),
            generated_at: Utc::now(),
        })
    }

    /// Write the canonical table, the annotated service table, and the
    /// summary report into `dir`, creating it when needed.
    pub fn write_outputs(
        &self,
        output: &PipelineOutput,
        dir: impl AsRef<Path>,
    ) -> Result<(), PipelineError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        output
            .registry
            .write_csv(File::create(dir.join(output_files::REGISTRY_FILE))?)?;
        write_service_table(&output.services, File::create(dir.join(output_files::SERVICE_FILE))?)?;
        fs::write(
            dir.join(output_files::REPORT_FILE),
            render_report(SUMMARY_TITLE, &output.summary, output.generated_at),
        )?;
        info!(dir = %dir.display(), "outputs written");
        Ok(())
    }
}

/// Result of the enhancement pass over an existing canonical table.
#[derive(Clone, Debug)]
pub struct EnhancedOutput {
    /// Rewritten rows, same count and identifiers as the input.
    pub rows: Vec<RegistryRow>,
    /// Statistics over the rewritten rows.
    pub summary: RegistrySummary,
    /// Run timestamp, stamped on the report header only.
    pub generated_at: DateTime<Utc>,
}

/// Re-run the classification cascade and service matcher over rows loaded
/// from a previously written canonical table.
///
/// Identity columns (identifier, names, codes, provenance, leg marks) are
/// preserved verbatim; descriptive fields are rewritten from the current
/// knowledge base. Freshly matched services replace the stored column;
/// when nothing matches the previous value is kept.
pub fn enhance_canonical_rows(
    config: &PipelineConfig,
    rows: Vec<RegistryRow>,
) -> Result<EnhancedOutput, PipelineError> {
    let config = config.clone().validated()?;
    let classifier = Classifier::new(config.concepts.clone(), config.category_rules.clone());
    let matcher = ServiceMatcher::new(config.service_rules.clone());

    let rows: Vec<RegistryRow> = rows
        .into_iter()
        .map(|mut row| {
            let classification = classifier.classify(&row.name_zh);
            let services = matcher.match_name(&row.name_zh);
            row.category = classification.category.label_zh().to_string();
            row.description_zh = classification.description_zh;
            row.description_en = classification.description_en;
            row.supplier_type = classification.supplier_type;
            row.usage_scenario = classification.usage_scenario;
            if !services.is_empty() {
                row.services = services.join(crate::constants::registry::SERVICE_DELIMITER);
            }
            row
        })
        .collect();

    let summary = summarize_rows(&rows, config.top_services_limit);
    info!(rows = rows.len(), "enhancement pass complete");
    Ok(EnhancedOutput {
        rows,
        summary,
        generated_at: Utc::now(),
    })
}

/// Write the enhanced table and its report into `dir`.
pub fn write_enhanced_outputs(
    output: &EnhancedOutput,
    dir: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_rows_csv(
        &output.rows,
        File::create(dir.join(output_files::ENHANCED_REGISTRY_FILE))?,
    )?;
    fs::write(
        dir.join(output_files::ENHANCEMENT_REPORT_FILE),
        render_report(ENHANCEMENT_TITLE, &output.summary, output.generated_at),
    )?;
    Ok(())
}
