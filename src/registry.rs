//! Registry Builder: stable identifiers and the canonical output tables.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::constants::registry::{
    DEFAULT_CURRENCY, DEFAULT_TAX_STATUS, ID_DIGITS, ID_PREFIX, INVOICE_TYPES, LEG_FLAG_MARK,
    PAY_DIRECTION, PROVENANCE_DELIMITER, SERVICE_DELIMITER,
};
use crate::data::{Classification, CostSubject, ServiceTaxonomyEntry};
use crate::errors::PipelineError;
use crate::knowledge;
use crate::types::{ServiceLabel, SubjectId};

/// One finalized registry entry: subject, classification, service links,
/// and the assigned identifier.
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    /// Stable sequential identifier (`FC0001`, …).
    pub id: SubjectId,
    /// Merged subject identity and attributes.
    pub subject: CostSubject,
    /// Cascade-assigned classification fields.
    pub classification: Classification,
    /// Matched service labels in rule-set order.
    pub services: Vec<ServiceLabel>,
}

/// The canonical cost-subject registry, in subject creation order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

/// Sequential identifier for the zero-based `index`.
pub fn subject_id(index: usize) -> SubjectId {
    format!("{ID_PREFIX}{:0width$}", index + 1, width = ID_DIGITS)
}

impl Registry {
    /// Assign identifiers in input order and assemble the registry.
    ///
    /// Input order must be the merger's creation order; identifiers are
    /// stable across runs because that order is deterministic.
    pub fn build(
        items: impl IntoIterator<Item = (CostSubject, Classification, Vec<ServiceLabel>)>,
    ) -> Self {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, (subject, classification, services))| RegistryEntry {
                id: subject_id(index),
                subject,
                classification,
                services,
            })
            .collect();
        Self { entries }
    }

    /// Finalized entries in identifier order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of registered subjects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the registry holds no subjects.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten entries into serializable output rows.
    pub fn to_rows(&self) -> Vec<RegistryRow> {
        self.entries.iter().map(RegistryRow::from_entry).collect()
    }

    /// Write the canonical table as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), PipelineError> {
        write_rows_csv(&self.to_rows(), writer)
    }
}

/// One row of the canonical output table. Field order is column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRow {
    /// Registry identifier.
    #[serde(rename = "全局费用编码")]
    pub id: SubjectId,
    /// Chinese fee name (the canonical identity).
    #[serde(rename = "中文费用名称")]
    pub name_zh: String,
    /// English fee name, blank when no source supplied one.
    #[serde(rename = "英文费用名称", default)]
    pub name_en: String,
    /// Mnemonic/abbreviation.
    #[serde(rename = "助记符", default)]
    pub mnemonic: String,
    /// Default settlement currency.
    #[serde(rename = "默认币种", default)]
    pub currency: String,
    /// Default tax status.
    #[serde(rename = "默认应/免税", default)]
    pub tax_status: String,
    /// Accepted invoice types.
    #[serde(rename = "可选开票类型", default)]
    pub invoice_types: String,
    /// Chinese category label.
    #[serde(rename = "所属费用分类", default)]
    pub category: String,
    /// Matched services, comma-joined.
    #[serde(rename = "对应的服务", default)]
    pub services: String,
    /// Classifier-assigned supplier type.
    #[serde(rename = "对应的供应商类型", default)]
    pub supplier_type: String,
    /// Finance ledger account; curated manually downstream.
    #[serde(rename = "对应的财务科目", default)]
    pub finance_account: String,
    /// Required supporting documents; curated manually downstream.
    #[serde(rename = "需提供的单据", default)]
    pub required_documents: String,
    /// Chinese concept description.
    #[serde(rename = "科目说明", default)]
    pub description_zh: String,
    /// Payment direction.
    #[serde(rename = "收付方向", default)]
    pub pay_direction: String,
    /// Legacy settlement-system code.
    #[serde(rename = "原系统编码", default)]
    pub legacy_code: String,
    /// English concept description.
    #[serde(rename = "科目说明英文", default)]
    pub description_en: String,
    /// Usage scenario note.
    #[serde(rename = "使用场景", default)]
    pub usage_scenario: String,
    /// Raw supplier text from the sources.
    #[serde(rename = "原供应商信息", default)]
    pub supplier_hint: String,
    /// Parent grouping record from the master list.
    #[serde(rename = "父记录", default)]
    pub parent_category: String,
    /// Contributing sources, comma-joined in contribution order.
    #[serde(rename = "数据来源", default)]
    pub provenance: String,
    /// Origin-port leg mark.
    #[serde(rename = "起运港", default)]
    pub origin_port: String,
    /// Sea-leg mark.
    #[serde(rename = "海运段", default)]
    pub sea_leg: String,
    /// Destination-port leg mark.
    #[serde(rename = "目的港", default)]
    pub dest_port: String,
}

fn leg_mark(set: bool) -> String {
    if set {
        LEG_FLAG_MARK.to_string()
    } else {
        String::new()
    }
}

impl RegistryRow {
    /// Flatten one registry entry into a row.
    pub fn from_entry(entry: &RegistryEntry) -> Self {
        let subject = &entry.subject;
        let classification = &entry.classification;
        let legs = subject.route_legs.unwrap_or_default();
        Self {
            id: entry.id.clone(),
            name_zh: subject.canonical_name.clone(),
            name_en: subject.english_name.clone().unwrap_or_default(),
            mnemonic: subject.abbreviation.clone().unwrap_or_default(),
            currency: DEFAULT_CURRENCY.to_string(),
            tax_status: DEFAULT_TAX_STATUS.to_string(),
            invoice_types: INVOICE_TYPES.to_string(),
            category: classification.category.label_zh().to_string(),
            services: entry.services.join(SERVICE_DELIMITER),
            supplier_type: classification.supplier_type.clone(),
            finance_account: String::new(),
            required_documents: String::new(),
            description_zh: classification.description_zh.clone(),
            pay_direction: PAY_DIRECTION.to_string(),
            legacy_code: subject.settlement_code.clone().unwrap_or_default(),
            description_en: classification.description_en.clone(),
            usage_scenario: classification.usage_scenario.clone(),
            supplier_hint: subject.supplier_hint.clone().unwrap_or_default(),
            parent_category: subject.parent_category.clone().unwrap_or_default(),
            provenance: subject.provenance.join(PROVENANCE_DELIMITER),
            origin_port: leg_mark(legs.origin_port),
            sea_leg: leg_mark(legs.sea_leg),
            dest_port: leg_mark(legs.dest_port),
        }
    }
}

/// Write registry rows as CSV, header included.
pub fn write_rows_csv<W: Write>(rows: &[RegistryRow], writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One row of the annotated service pass-through table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServicePassRow {
    /// Leg segment.
    #[serde(rename = "服务段")]
    pub leg_segment: String,
    /// Service label.
    #[serde(rename = "服务")]
    pub service_label: String,
    /// Human-readable description.
    #[serde(rename = "服务描述")]
    pub description: String,
}

/// Write the service taxonomy pass-through, annotating every entry with a
/// description. The taxonomy itself is never mutated.
pub fn write_service_table<W: Write>(
    entries: &[ServiceTaxonomyEntry],
    writer: W,
) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(ServicePassRow {
            leg_segment: entry.leg_segment.clone(),
            service_label: entry.service_label.clone(),
            description: knowledge::service_description(&entry.service_label),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CostCategory, MatchTier, SourceAttributes};

    fn subject(name: &str) -> CostSubject {
        CostSubject::from_candidate(crate::data::CostSubjectCandidate {
            raw_name: name.to_string(),
            source_id: "frequency_list".to_string(),
            attributes: SourceAttributes::default(),
        })
    }

    fn classification() -> Classification {
        Classification {
            tier: MatchTier::Exact,
            category: CostCategory::CrossBorderTransport,
            description_zh: "说明".to_string(),
            description_en: "description".to_string(),
            supplier_type: "船公司".to_string(),
            usage_scenario: "场景".to_string(),
        }
    }

    #[test]
    fn ids_are_sequential_and_zero_padded() {
        assert_eq!(subject_id(0), "FC0001");
        assert_eq!(subject_id(41), "FC0042");
        assert_eq!(subject_id(9999), "FC10000");
    }

    #[test]
    fn registry_assigns_ids_in_input_order() {
        let registry = Registry::build(vec![
            (subject("海运费"), classification(), vec!["订舱".to_string()]),
            (subject("报关费"), classification(), Vec::new()),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.entries()[0].id, "FC0001");
        assert_eq!(registry.entries()[1].id, "FC0002");
        assert_eq!(registry.entries()[1].subject.canonical_name, "报关费");
    }

    #[test]
    fn rows_carry_fixed_defaults_and_joined_services() {
        let registry = Registry::build(vec![(
            subject("海运费"),
            classification(),
            vec!["订舱".to_string(), "MBL".to_string()],
        )]);
        let rows = registry.to_rows();
        assert_eq!(rows[0].currency, DEFAULT_CURRENCY);
        assert_eq!(rows[0].pay_direction, PAY_DIRECTION);
        assert_eq!(rows[0].services, "订舱,MBL");
        assert_eq!(rows[0].category, "跨境运输费用");
        assert_eq!(rows[0].provenance, "frequency_list");
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let registry = Registry::build(vec![(
            subject("海运费"),
            classification(),
            vec!["订舱".to_string()],
        )]);
        let mut buffer = Vec::new();
        registry.write_csv(&mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let parsed: Vec<RegistryRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(parsed, registry.to_rows());
    }

    #[test]
    fn service_table_annotates_known_and_unknown_labels() {
        let entries = vec![
            ServiceTaxonomyEntry {
                leg_segment: "启运地".to_string(),
                service_label: "报关".to_string(),
                keywords: Vec::new(),
            },
            ServiceTaxonomyEntry {
                leg_segment: "增值".to_string(),
                service_label: "无人机配送".to_string(),
                keywords: Vec::new(),
            },
        ];
        let mut buffer = Vec::new();
        write_service_table(&entries, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("报关行"));
        assert!(text.contains("待补充"));
    }
}
