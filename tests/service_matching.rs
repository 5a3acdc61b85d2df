use fee_registry::config::PipelineConfig;
use fee_registry::data::{CostSubjectCandidate, SourceAttributes};
use fee_registry::knowledge;
use fee_registry::pipeline::Pipeline;
use fee_registry::services::ServiceMatcher;
use fee_registry::source::InMemorySource;

fn candidate(name: &str) -> CostSubjectCandidate {
    CostSubjectCandidate {
        raw_name: name.to_string(),
        source_id: "frequency_list".to_string(),
        attributes: SourceAttributes::default(),
    }
}

#[test]
fn customs_declaration_fee_matches_customs_service() {
    let matcher = ServiceMatcher::new(knowledge::default_service_rules());
    let matched = matcher.match_name("报关费");
    assert!(matched.contains(&"报关".to_string()));
}

#[test]
fn unmatched_subject_still_lands_in_the_registry() {
    let pipeline = Pipeline::new(PipelineConfig::default()).with_source(InMemorySource::new(
        "frequency_list",
        vec![candidate("某某某新奇收款")],
    ));
    let output = pipeline.run().unwrap();
    assert_eq!(output.registry.len(), 1);
    let row = &output.registry.to_rows()[0];
    assert!(row.services.is_empty());
    assert_eq!(output.summary.without_services, 1);
    assert_eq!(output.summary.with_services, 0);
}

#[test]
fn subject_may_match_multiple_labels_each_once() {
    let matcher = ServiceMatcher::new(knowledge::default_service_rules());
    // 送货 appears in the keyword sets of both 拖车 and 派送.
    let matched = matcher.match_name("目的港送货费");
    assert!(matched.contains(&"拖车".to_string()));
    assert!(matched.contains(&"派送".to_string()));
    assert!(matched.contains(&"清关".to_string()));
    let mut deduped = matched.clone();
    deduped.dedup();
    assert_eq!(matched, deduped);
}

#[test]
fn matched_column_serializes_in_rule_order() {
    let pipeline = Pipeline::new(PipelineConfig::default()).with_source(InMemorySource::new(
        "frequency_list",
        vec![candidate("舱单申报费")],
    ));
    let output = pipeline.run().unwrap();
    let row = &output.registry.to_rows()[0];
    // 报关 precedes 舱单 in the default rule set.
    assert_eq!(row.services, "报关,舱单");
}
