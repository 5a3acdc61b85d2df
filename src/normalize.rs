//! Record Normalizer: raw source rows into uniform candidates.
//!
//! Normalization is pure and never fatal: rows that fail to yield a usable
//! name (header artifacts, blank cells, export placeholders) are skipped
//! and only lower the processed-row count.

use indexmap::IndexMap;

use crate::data::{CostSubjectCandidate, RouteLegFlags, SourceAttributes};
use crate::types::{ColumnName, SourceId};
use crate::utils::{clean_cell, is_checked, is_header_artifact};

/// One raw table row: column name → cell text, in column order.
#[derive(Clone, Debug, Default)]
pub struct RawRow {
    cells: IndexMap<ColumnName, String>,
}

impl RawRow {
    /// Build a row from parallel header/value sequences. Extra values
    /// beyond the header count are dropped; missing values stay absent.
    pub fn from_headers<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let cells = headers
            .into_iter()
            .zip(values)
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        Self { cells }
    }

    /// Insert or replace one cell.
    pub fn set(&mut self, column: impl Into<ColumnName>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Raw cell text for a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Column wiring for one source table: which column holds the subject name
/// and which optional columns feed which attributes.
#[derive(Clone, Debug)]
pub struct SourceSchema {
    /// Stable identifier of the source this schema describes.
    pub source_id: SourceId,
    /// Column holding the cost-subject name.
    pub name_column: ColumnName,
    /// Column holding the settlement code, when present.
    pub settlement_code_column: Option<ColumnName>,
    /// Column holding the English name, when present.
    pub english_name_column: Option<ColumnName>,
    /// Column holding the abbreviation, when present.
    pub abbreviation_column: Option<ColumnName>,
    /// Column holding the raw supplier text, when present.
    pub supplier_column: Option<ColumnName>,
    /// Column holding the parent grouping record, when present.
    pub parent_category_column: Option<ColumnName>,
    /// Check-mark columns for the origin-port / sea-leg / destination-port
    /// flags, when present.
    pub leg_columns: Option<LegColumns>,
}

/// Check-mark column names for the three route legs.
#[derive(Clone, Debug)]
pub struct LegColumns {
    /// Origin-port flag column.
    pub origin_port: ColumnName,
    /// Sea-leg flag column.
    pub sea_leg: ColumnName,
    /// Destination-port flag column.
    pub dest_port: ColumnName,
}

impl SourceSchema {
    /// Minimal schema: just a source id and the name column.
    pub fn new(source_id: impl Into<SourceId>, name_column: impl Into<ColumnName>) -> Self {
        Self {
            source_id: source_id.into(),
            name_column: name_column.into(),
            settlement_code_column: None,
            english_name_column: None,
            abbreviation_column: None,
            supplier_column: None,
            parent_category_column: None,
            leg_columns: None,
        }
    }

    /// Wire the settlement-code column.
    pub fn with_settlement_code(mut self, column: impl Into<ColumnName>) -> Self {
        self.settlement_code_column = Some(column.into());
        self
    }

    /// Wire the English-name column.
    pub fn with_english_name(mut self, column: impl Into<ColumnName>) -> Self {
        self.english_name_column = Some(column.into());
        self
    }

    /// Wire the abbreviation column.
    pub fn with_abbreviation(mut self, column: impl Into<ColumnName>) -> Self {
        self.abbreviation_column = Some(column.into());
        self
    }

    /// Wire the supplier column.
    pub fn with_supplier(mut self, column: impl Into<ColumnName>) -> Self {
        self.supplier_column = Some(column.into());
        self
    }

    /// Wire the parent-category column.
    pub fn with_parent_category(mut self, column: impl Into<ColumnName>) -> Self {
        self.parent_category_column = Some(column.into());
        self
    }

    /// Wire the route-leg check-mark columns.
    pub fn with_leg_columns(
        mut self,
        origin_port: impl Into<ColumnName>,
        sea_leg: impl Into<ColumnName>,
        dest_port: impl Into<ColumnName>,
    ) -> Self {
        self.leg_columns = Some(LegColumns {
            origin_port: origin_port.into(),
            sea_leg: sea_leg.into(),
            dest_port: dest_port.into(),
        });
        self
    }

    /// Column wiring of the frequency-classified list export.
    pub fn frequency_list() -> Self {
        Self::new("frequency_list", "标准化费用名称")
            .with_settlement_code("费用代码")
            .with_leg_columns("起运港", "海运段", "目的港")
    }

    /// Column wiring of the comprehensive master-list export.
    pub fn master_list() -> Self {
        Self::new("master_list", "费用名称（中）")
            .with_settlement_code("对应的结算费用编码")
            .with_english_name("费用名称（英文）")
            .with_abbreviation("缩写")
            .with_supplier("最终由谁收取（供应商)")
            .with_parent_category("父记录")
    }
}

/// Turn one raw row into a candidate, or `None` when the row carries no
/// usable name.
pub fn candidate_from_row(schema: &SourceSchema, row: &RawRow) -> Option<CostSubjectCandidate> {
    let raw_cell = row.get(&schema.name_column)?;
    let name = clean_cell(raw_cell)?;
    if is_header_artifact(&name, &schema.name_column) {
        return None;
    }

    let attribute = |column: &Option<ColumnName>| {
        column
            .as_deref()
            .and_then(|column| row.get(column))
            .and_then(clean_cell)
    };

    let route_legs = schema.leg_columns.as_ref().and_then(|legs| {
        let flags = RouteLegFlags {
            origin_port: row.get(&legs.origin_port).is_some_and(is_checked),
            sea_leg: row.get(&legs.sea_leg).is_some_and(is_checked),
            dest_port: row.get(&legs.dest_port).is_some_and(is_checked),
        };
        flags.any().then_some(flags)
    });

    Some(CostSubjectCandidate {
        raw_name: name,
        source_id: schema.source_id.clone(),
        attributes: SourceAttributes {
            settlement_code: attribute(&schema.settlement_code_column),
            english_name: attribute(&schema.english_name_column),
            abbreviation: attribute(&schema.abbreviation_column),
            supplier_hint: attribute(&schema.supplier_column),
            parent_category: attribute(&schema.parent_category_column),
            route_legs,
        },
    })
}
