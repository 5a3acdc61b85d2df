//! Service-Tag Matcher.
//!
//! Links a cost subject to every service label whose keyword set contains
//! at least one substring of the subject name. Labels are emitted at most
//! once, in rule-set order; per label, keyword scanning stops at the first
//! hit.

use crate::config::ServiceRuleSet;
use crate::types::ServiceLabel;

/// Matcher configured with an ordered service rule set.
#[derive(Clone, Debug)]
pub struct ServiceMatcher {
    rules: ServiceRuleSet,
}

impl ServiceMatcher {
    /// Build a matcher over the given rule set.
    pub fn new(rules: ServiceRuleSet) -> Self {
        Self { rules }
    }

    /// Service labels applicable to `name`. Possibly empty; an unmatched
    /// subject is a valid outcome, not an error.
    pub fn match_name(&self, name: &str) -> Vec<ServiceLabel> {
        let mut matched: Vec<ServiceLabel> = Vec::new();
        for rule in self.rules.iter() {
            let hit = rule
                .keywords
                .iter()
                .any(|keyword| name.contains(keyword.as_str()));
            if hit && !matched.contains(&rule.label) {
                matched.push(rule.label.clone());
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceRule;
    use crate::knowledge;

    fn default_matcher() -> ServiceMatcher {
        ServiceMatcher::new(knowledge::default_service_rules())
    }

    #[test]
    fn customs_fee_matches_customs_service() {
        let matched = default_matcher().match_name("报关费");
        assert!(matched.contains(&"报关".to_string()));
    }

    #[test]
    fn no_keyword_overlap_matches_nothing() {
        assert!(default_matcher().match_name("某某某新奇收款").is_empty());
    }

    #[test]
    fn one_subject_can_match_many_services() {
        // 申报 belongs to both 报关 and 舱单 keyword sets.
        let matched = default_matcher().match_name("舱单申报费");
        assert!(matched.contains(&"报关".to_string()));
        assert!(matched.contains(&"舱单".to_string()));
        assert!(matched.len() >= 2);
    }

    #[test]
    fn label_appears_once_even_with_multiple_keyword_hits() {
        // 拖车 rule lists 送货 and 提货; both hit here.
        let matched = default_matcher().match_name("送货提货附加");
        assert_eq!(
            matched.iter().filter(|label| label.as_str() == "拖车").count(),
            1
        );
    }

    #[test]
    fn output_follows_rule_set_order() {
        let mut rules = ServiceRuleSet::new();
        rules.push(ServiceRule {
            label: "乙".to_string(),
            keywords: vec!["费".to_string()],
        });
        rules.push(ServiceRule {
            label: "甲".to_string(),
            keywords: vec!["费".to_string()],
        });
        let matched = ServiceMatcher::new(rules).match_name("杂费");
        assert_eq!(matched, vec!["乙".to_string(), "甲".to_string()]);
    }
}
