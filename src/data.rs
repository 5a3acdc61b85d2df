use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Keyword, LegSegment, ServiceLabel, SourceId, SubjectName, SupplierType};

/// Route-leg applicability flags carried by the frequency source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLegFlags {
    /// Fee applies at the origin port.
    pub origin_port: bool,
    /// Fee applies on the sea leg.
    pub sea_leg: bool,
    /// Fee applies at the destination port.
    pub dest_port: bool,
}

impl RouteLegFlags {
    /// True when at least one leg is flagged.
    pub fn any(&self) -> bool {
        self.origin_port || self.sea_leg || self.dest_port
    }
}

/// Optional attributes a source row may supply alongside the fee name.
///
/// Every field participates in the fill-missing-only merge: once a field is
/// populated by one source, later sources never overwrite it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceAttributes {
    /// Settlement system fee code.
    pub settlement_code: Option<String>,
    /// English fee name.
    pub english_name: Option<String>,
    /// Short mnemonic / abbreviation.
    pub abbreviation: Option<String>,
    /// Raw supplier text as given by the source. Distinct from the
    /// classifier-assigned supplier type.
    pub supplier_hint: Option<String>,
    /// Parent grouping record referenced by the master list.
    pub parent_category: Option<String>,
    /// Route-leg flag set; treated as one attribute under the merge policy.
    pub route_legs: Option<RouteLegFlags>,
}

/// A single observation of a fee/cost name from one source row.
///
/// Created once during normalization, immutable, consumed by the merger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostSubjectCandidate {
    /// Trimmed fee name as observed in the source row.
    pub raw_name: String,
    /// Originating table.
    pub source_id: SourceId,
    /// Optional attributes present on this row.
    pub attributes: SourceAttributes,
}

impl CostSubjectCandidate {
    /// Identity key for merging: the trimmed name, compared byte-for-byte.
    pub fn normalized_name(&self) -> SubjectName {
        self.raw_name.trim().to_string()
    }
}

/// Fixed cost-category set. Every subject ends up in exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    /// 跨境运输费用
    CrossBorderTransport,
    /// 集装箱费用
    Container,
    /// 码头/港口/场站费用
    TerminalPortYard,
    /// 装卸费用
    Handling,
    /// 境内运输费用
    InlandTransport,
    /// 货物附加费用
    CargoSurcharge,
    /// 关检费用
    CustomsInspection,
    /// 单证文件费用
    Documentation,
    /// 仓储费用
    Warehousing,
    /// 增值服务费用
    ValueAddedService,
    /// 保险费用
    Insurance,
    /// 设备使用及租赁费用
    EquipmentLease,
    /// 人工费用
    Labor,
    /// 利润分配
    ProfitDistribution,
    /// 特殊科目 — the unclassified bucket surfaced for human follow-up.
    Special,
}

impl CostCategory {
    /// Canonical iteration order over all categories; this is also the
    /// evaluation order of the default keyword rule table.
    pub const ALL: [CostCategory; 15] = [
        CostCategory::CrossBorderTransport,
        CostCategory::Container,
        CostCategory::TerminalPortYard,
        CostCategory::Handling,
        CostCategory::InlandTransport,
        CostCategory::CargoSurcharge,
        CostCategory::Insurance,
        CostCategory::CustomsInspection,
        CostCategory::Warehousing,
        CostCategory::Documentation,
        CostCategory::EquipmentLease,
        CostCategory::ValueAddedService,
        CostCategory::Labor,
        CostCategory::ProfitDistribution,
        CostCategory::Special,
    ];

    /// Chinese label used in source tables and output columns.
    pub fn label_zh(&self) -> &'static str {
        match self {
            CostCategory::CrossBorderTransport => "跨境运输费用",
            CostCategory::Container => "集装箱费用",
            CostCategory::TerminalPortYard => "码头/港口/场站费用",
            CostCategory::Handling => "装卸费用",
            CostCategory::InlandTransport => "境内运输费用",
            CostCategory::CargoSurcharge => "货物附加费用",
            CostCategory::CustomsInspection => "关检费用",
            CostCategory::Documentation => "单证文件费用",
            CostCategory::Warehousing => "仓储费用",
            CostCategory::ValueAddedService => "增值服务费用",
            CostCategory::Insurance => "保险费用",
            CostCategory::EquipmentLease => "设备使用及租赁费用",
            CostCategory::Labor => "人工费用",
            CostCategory::ProfitDistribution => "利润分配",
            CostCategory::Special => "特殊科目",
        }
    }

    /// Parse a Chinese category label back into the enum.
    pub fn from_label_zh(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label_zh() == label.trim())
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_zh())
    }
}

/// Cascade tier that produced a classification. Exactly one tier fires
/// per subject; the engine never combines partial results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Name is an exact concept-book key.
    Exact,
    /// A concept-book key (or one of its tokens) appears inside the name.
    Fuzzy,
    /// A category keyword rule matched a substring of the name.
    Keyword,
    /// Nothing matched; the unclassified fallback fired.
    Default,
}

/// Classification fields assigned by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Classification {
    /// Tier that produced these fields.
    pub tier: MatchTier,
    /// Assigned cost category.
    pub category: CostCategory,
    /// Chinese concept description; non-empty after classification.
    pub description_zh: String,
    /// English concept description; non-empty after classification.
    pub description_en: String,
    /// Typical payee role.
    pub supplier_type: SupplierType,
    /// Free-text applicability note.
    pub usage_scenario: String,
}

/// Canonical merged cost subject, keyed by its trimmed name.
///
/// Produced by the merger; classification and service matches are attached
/// downstream when the registry is assembled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostSubject {
    /// First-seen raw name for this identity.
    pub canonical_name: SubjectName,
    /// English fee name, first non-empty value wins.
    pub english_name: Option<String>,
    /// Mnemonic/abbreviation, first non-empty value wins.
    pub abbreviation: Option<String>,
    /// Settlement system code, first non-empty value wins.
    pub settlement_code: Option<String>,
    /// Raw supplier text from the sources, first non-empty value wins.
    pub supplier_hint: Option<String>,
    /// Parent grouping record, first non-empty value wins.
    pub parent_category: Option<String>,
    /// Route-leg flag set, first flag-bearing source wins as a whole.
    pub route_legs: Option<RouteLegFlags>,
    /// Every source that contributed, in contribution order. The first
    /// entry is the source that created this subject.
    pub provenance: Vec<SourceId>,
}

impl CostSubject {
    /// Seed a new subject from its first candidate.
    pub fn from_candidate(candidate: CostSubjectCandidate) -> Self {
        let CostSubjectCandidate {
            raw_name,
            source_id,
            attributes,
        } = candidate;
        Self {
            canonical_name: raw_name,
            english_name: attributes.english_name,
            abbreviation: attributes.abbreviation,
            settlement_code: attributes.settlement_code,
            supplier_hint: attributes.supplier_hint,
            parent_category: attributes.parent_category,
            route_legs: attributes.route_legs,
            provenance: vec![source_id],
        }
    }
}

/// One entry of the external service taxonomy. Read-only for the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceTaxonomyEntry {
    /// Leg segment the service belongs to.
    pub leg_segment: LegSegment,
    /// Service label cost subjects are matched against.
    pub service_label: ServiceLabel,
    /// Keywords whose presence in a subject name links it to this service.
    pub keywords: Vec<Keyword>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in CostCategory::ALL {
            assert_eq!(CostCategory::from_label_zh(category.label_zh()), Some(category));
        }
        assert_eq!(CostCategory::from_label_zh("不存在的分类"), None);
    }

    #[test]
    fn candidate_identity_is_trimmed() {
        let candidate = CostSubjectCandidate {
            raw_name: "海运费".to_string(),
            source_id: "master_list".to_string(),
            attributes: SourceAttributes::default(),
        };
        assert_eq!(candidate.normalized_name(), "海运费");
    }

    #[test]
    fn subject_seeds_provenance_from_first_candidate() {
        let candidate = CostSubjectCandidate {
            raw_name: "报关费".to_string(),
            source_id: "frequency_list".to_string(),
            attributes: SourceAttributes {
                settlement_code: Some("FEE001".to_string()),
                ..SourceAttributes::default()
            },
        };
        let subject = CostSubject::from_candidate(candidate);
        assert_eq!(subject.canonical_name, "报关费");
        assert_eq!(subject.provenance, vec!["frequency_list".to_string()]);
        assert_eq!(subject.settlement_code.as_deref(), Some("FEE001"));
        assert!(subject.english_name.is_none());
    }
}
