//! CSV-backed table readers.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::columns;
use crate::config::ServiceRuleSet;
use crate::data::{CostSubjectCandidate, ServiceTaxonomyEntry};
use crate::errors::PipelineError;
use crate::normalize::{candidate_from_row, RawRow, SourceSchema};
use crate::registry::RegistryRow;
use crate::source::SubjectSource;
use crate::types::SourceId;

fn open_table(source_id: &str, path: &Path) -> Result<File, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingSource {
            source_id: source_id.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

/// A cost-subject source backed by one UTF-8 CSV file.
///
/// Column wiring comes from the embedded [`SourceSchema`]; rows without a
/// usable name are skipped with a debug log.
pub struct CsvSubjectSource {
    schema: SourceSchema,
    path: PathBuf,
}

impl CsvSubjectSource {
    /// Create a source reading `path` through `schema`.
    pub fn new(schema: SourceSchema, path: impl Into<PathBuf>) -> Self {
        Self {
            schema,
            path: path.into(),
        }
    }
}

impl SubjectSource for CsvSubjectSource {
    fn id(&self) -> &str {
        &self.schema.source_id
    }

    fn candidates(&self) -> Result<Vec<CostSubjectCandidate>, PipelineError> {
        let file = open_table(&self.schema.source_id, &self.path)?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.clone();

        let mut candidates = Vec::new();
        let mut skipped = 0usize;
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    // A single unreadable row never aborts the run.
                    debug!(source = %self.schema.source_id, %error, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };
            let row = RawRow::from_headers(headers.iter(), record.iter());
            match candidate_from_row(&self.schema, &row) {
                Some(candidate) => candidates.push(candidate),
                None => skipped += 1,
            }
        }
        debug!(
            source = %self.schema.source_id,
            rows = candidates.len(),
            skipped,
            "loaded source table"
        );
        Ok(candidates)
    }
}

/// Read the service-taxonomy list (`服务段`/`服务` columns), attaching each
/// label's keyword set from the configured rules. Labels without a rule get
/// an empty keyword set and simply never match.
pub fn read_service_list(
    source_id: impl Into<SourceId>,
    path: &Path,
    rules: &ServiceRuleSet,
) -> Result<Vec<ServiceTaxonomyEntry>, PipelineError> {
    let source_id = source_id.into();
    let file = open_table(&source_id, path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers()?.clone();
    let segment_idx = headers.iter().position(|h| h.trim() == columns::SERVICE_SEGMENT);
    let label_idx = headers
        .iter()
        .position(|h| h.trim() == columns::SERVICE_LABEL)
        .ok_or_else(|| {
            PipelineError::Configuration(format!(
                "service list '{source_id}' has no '{}' column",
                columns::SERVICE_LABEL
            ))
        })?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let label = match record.get(label_idx).map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => continue,
        };
        let leg_segment = segment_idx
            .and_then(|idx| record.get(idx))
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let keywords = rules.keywords_for(&label).unwrap_or_default().to_vec();
        entries.push(ServiceTaxonomyEntry {
            leg_segment,
            service_label: label,
            keywords,
        });
    }
    Ok(entries)
}

/// Read a previously written canonical table for the enhancement pass.
pub fn read_canonical_table(
    source_id: impl Into<SourceId>,
    path: &Path,
) -> Result<Vec<RegistryRow>, PipelineError> {
    let source_id = source_id.into();
    let file = open_table(&source_id, path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for row in reader.deserialize::<RegistryRow>() {
        rows.push(row?);
    }
    Ok(rows)
}
