//! Ordered configuration objects injected into the engines.
//!
//! The classification and tag-matching cascades resolve ties by iteration
//! order, so every table here is an explicit insertion-ordered structure:
//! "first match wins" is a contract, not an accident of map ordering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::CostCategory;
use crate::errors::PipelineError;
use crate::knowledge;
use crate::types::{Keyword, ServiceLabel, SubjectName, SupplierType};

/// One concept knowledge-base entry: the curated meaning of a fee name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConceptEntry {
    /// Chinese concept description.
    pub description_zh: String,
    /// English concept description.
    pub description_en: String,
    /// Category the concept belongs to.
    pub category: CostCategory,
    /// Typical payee role.
    pub supplier_type: SupplierType,
    /// Applicability note.
    pub usage_scenario: String,
}

/// Insertion-ordered concept knowledge base.
///
/// Exact lookups hit the map; the fuzzy tier iterates entries in insertion
/// order and the first matching key wins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConceptBook {
    entries: IndexMap<SubjectName, ConceptEntry>,
}

impl ConceptBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a concept, replacing any previous entry under the same name
    /// while keeping its original position.
    pub fn insert(&mut self, name: impl Into<SubjectName>, entry: ConceptEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Exact-key lookup.
    pub fn get(&self, name: &str) -> Option<&ConceptEntry> {
        self.entries.get(name)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SubjectName, &ConceptEntry)> {
        self.entries.iter()
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the book holds no concepts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One keyword rule binding substrings to a category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category assigned when a keyword hits.
    pub category: CostCategory,
    /// Substring keywords, checked in order.
    pub keywords: Vec<Keyword>,
    /// Default supplier type for subjects landing in this category.
    pub supplier_type: SupplierType,
    /// Chinese description stem for the templated description.
    pub base_description_zh: String,
    /// English description stem for the templated description.
    pub base_description_en: String,
}

/// Ordered category rule table; the first rule with a matching keyword wins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CategoryRuleTable {
    rules: Vec<CategoryRule>,
}

impl CategoryRuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the end of the evaluation order.
    pub fn push(&mut self, rule: CategoryRule) {
        self.rules.push(rule);
    }

    /// Iterate rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One service-taxonomy matching rule: label plus its keyword set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceRule {
    /// Service label emitted on a hit.
    pub label: ServiceLabel,
    /// Substring keywords; scanning stops at the first hit per label.
    pub keywords: Vec<Keyword>,
}

/// Ordered service rule set. Output order of matched labels follows this
/// order, keeping the serialized services column byte-stable across runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceRuleSet {
    rules: Vec<ServiceRule>,
}

impl ServiceRuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the end of the evaluation order.
    pub fn push(&mut self, rule: ServiceRule) {
        self.rules.push(rule);
    }

    /// Iterate rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceRule> {
        self.rules.iter()
    }

    /// Keywords configured for `label`, if the label is known.
    pub fn keywords_for(&self, label: &str) -> Option<&[Keyword]> {
        self.rules
            .iter()
            .find(|rule| rule.label == label)
            .map(|rule| rule.keywords.as_slice())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Top-level pipeline configuration: every table the engines consult.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Concept knowledge base for the exact and fuzzy tiers.
    pub concepts: ConceptBook,
    /// Keyword rules for the category tier.
    pub category_rules: CategoryRuleTable,
    /// Keyword rules for service-taxonomy matching.
    pub service_rules: ServiceRuleSet,
    /// Number of service labels listed in the report frequency table.
    pub top_services_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concepts: knowledge::default_concepts(),
            category_rules: knowledge::default_category_rules(),
            service_rules: knowledge::default_service_rules(),
            top_services_limit: crate::constants::report::TOP_SERVICES_LIMIT,
        }
    }
}

impl PipelineConfig {
    /// Validate structural soundness of the rule tables.
    ///
    /// Blank keywords would turn substring matching into match-everything;
    /// duplicate service labels would silently shadow each other.
    pub fn validated(self) -> Result<Self, PipelineError> {
        if self.top_services_limit == 0 {
            return Err(PipelineError::Configuration(
                "top_services_limit must be at least 1".to_string(),
            ));
        }
        for rule in self.category_rules.iter() {
            if rule.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(PipelineError::Configuration(format!(
                    "category rule '{}' contains a blank keyword",
                    rule.category
                )));
            }
        }
        let mut seen_labels: Vec<&str> = Vec::new();
        for rule in self.service_rules.iter() {
            if rule.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(PipelineError::Configuration(format!(
                    "service rule '{}' contains a blank keyword",
                    rule.label
                )));
            }
            if seen_labels.contains(&rule.label.as_str()) {
                return Err(PipelineError::Configuration(format!(
                    "duplicate service label '{}'",
                    rule.label
                )));
            }
            seen_labels.push(rule.label.as_str());
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(category: CostCategory) -> ConceptEntry {
        ConceptEntry {
            description_zh: "说明".to_string(),
            description_en: "description".to_string(),
            category,
            supplier_type: "供应商".to_string(),
            usage_scenario: "场景".to_string(),
        }
    }

    #[test]
    fn concept_book_preserves_insertion_order() {
        let mut book = ConceptBook::new();
        book.insert("乙", concept(CostCategory::Container));
        book.insert("甲", concept(CostCategory::Insurance));
        let keys: Vec<&str> = book.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(keys, vec!["乙", "甲"]);
        assert_eq!(book.get("甲").map(|entry| entry.category), Some(CostCategory::Insurance));
    }

    #[test]
    fn reinsert_keeps_original_position() {
        let mut book = ConceptBook::new();
        book.insert("乙", concept(CostCategory::Container));
        book.insert("甲", concept(CostCategory::Insurance));
        book.insert("乙", concept(CostCategory::Labor));
        let keys: Vec<&str> = book.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(keys, vec!["乙", "甲"]);
        assert_eq!(book.get("乙").map(|entry| entry.category), Some(CostCategory::Labor));
    }

    #[test]
    fn validation_rejects_duplicate_service_labels() {
        let mut rules = ServiceRuleSet::new();
        rules.push(ServiceRule {
            label: "报关".to_string(),
            keywords: vec!["报关".to_string()],
        });
        rules.push(ServiceRule {
            label: "报关".to_string(),
            keywords: vec!["清关".to_string()],
        });
        let config = PipelineConfig {
            service_rules: rules,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn validation_rejects_blank_keywords() {
        let mut table = CategoryRuleTable::new();
        table.push(CategoryRule {
            category: CostCategory::Insurance,
            keywords: vec!["  ".to_string()],
            supplier_type: "保险公司".to_string(),
            base_description_zh: "保险".to_string(),
            base_description_en: "insurance".to_string(),
        });
        let config = PipelineConfig {
            category_rules: table,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(PipelineConfig::default().validated().is_ok());
    }
}
