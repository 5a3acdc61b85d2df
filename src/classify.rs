//! Classification Engine: the four-tier cascade.
//!
//! Tiers are evaluated in a fixed order and exactly one fires per subject:
//! exact concept lookup, fuzzy/substring concept match, keyword-to-category
//! rule, then the unclassified fallback. Substring containment is the only
//! similarity measure; tie-breaks follow table insertion order.

use crate::config::{CategoryRuleTable, ConceptBook, ConceptEntry};
use crate::constants::classify::{
    DEFAULT_DESC_HEAD_EN, DEFAULT_DESC_TAIL_EN, DEFAULT_DESC_TAIL_ZH, KEYWORD_DESC_TAIL_EN,
    KEYWORD_DESC_TAIL_ZH, KEYWORD_SCENARIO, UNRESOLVED_SCENARIO, UNRESOLVED_SUPPLIER,
};
use crate::data::{Classification, CostCategory, MatchTier};

/// Cascade engine configured with a concept book and a category rule table.
#[derive(Clone, Debug)]
pub struct Classifier {
    concepts: ConceptBook,
    rules: CategoryRuleTable,
}

impl Classifier {
    /// Build an engine over the given knowledge tables.
    pub fn new(concepts: ConceptBook, rules: CategoryRuleTable) -> Self {
        Self { concepts, rules }
    }

    /// Classify one subject name. Total: every name yields a result.
    pub fn classify(&self, name: &str) -> Classification {
        if let Some(entry) = self.concepts.get(name) {
            return exact_classification(entry);
        }
        if let Some(classification) = self.fuzzy_match(name) {
            return classification;
        }
        if let Some(classification) = self.keyword_match(name) {
            return classification;
        }
        default_classification(name)
    }

    /// First concept-book key (insertion order) that is a substring of the
    /// name, or any of whose whitespace-delimited tokens appears in it.
    fn fuzzy_match(&self, name: &str) -> Option<Classification> {
        for (key, entry) in self.concepts.iter() {
            let key_hits = name.contains(key.as_str());
            let token_hits = key.split_whitespace().any(|token| name.contains(token));
            if key_hits || token_hits {
                return Some(Classification {
                    tier: MatchTier::Fuzzy,
                    category: entry.category,
                    description_zh: format!("{name}，{}", entry.description_zh),
                    description_en: format!("{name}, {}", entry.description_en),
                    supplier_type: entry.supplier_type.clone(),
                    usage_scenario: entry.usage_scenario.clone(),
                });
            }
        }
        None
    }

    /// First category rule (table order) with a keyword contained in the
    /// name.
    fn keyword_match(&self, name: &str) -> Option<Classification> {
        for rule in self.rules.iter() {
            if rule.keywords.iter().any(|keyword| name.contains(keyword.as_str())) {
                return Some(Classification {
                    tier: MatchTier::Keyword,
                    category: rule.category,
                    description_zh: format!(
                        "{name}，{}，{KEYWORD_DESC_TAIL_ZH}",
                        rule.base_description_zh
                    ),
                    description_en: format!(
                        "{name}, charges related to {}; {KEYWORD_DESC_TAIL_EN}",
                        rule.base_description_en
                    ),
                    supplier_type: rule.supplier_type.clone(),
                    usage_scenario: KEYWORD_SCENARIO.to_string(),
                });
            }
        }
        None
    }
}

fn exact_classification(entry: &ConceptEntry) -> Classification {
    Classification {
        tier: MatchTier::Exact,
        category: entry.category,
        description_zh: entry.description_zh.clone(),
        description_en: entry.description_en.clone(),
        supplier_type: entry.supplier_type.clone(),
        usage_scenario: entry.usage_scenario.clone(),
    }
}

fn default_classification(name: &str) -> Classification {
    Classification {
        tier: MatchTier::Default,
        category: CostCategory::Special,
        description_zh: format!("{name}{DEFAULT_DESC_TAIL_ZH}"),
        description_en: format!("{DEFAULT_DESC_HEAD_EN}{name}{DEFAULT_DESC_TAIL_EN}"),
        supplier_type: UNRESOLVED_SUPPLIER.to_string(),
        usage_scenario: UNRESOLVED_SCENARIO.to_string(),
    }
}
