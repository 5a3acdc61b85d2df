use fee_registry::classify::Classifier;
use fee_registry::config::{CategoryRuleTable, ConceptBook, ConceptEntry, PipelineConfig};
use fee_registry::data::{
    CostCategory, CostSubjectCandidate, MatchTier, SourceAttributes,
};
use fee_registry::knowledge;
use fee_registry::pipeline::Pipeline;
use fee_registry::source::InMemorySource;

fn candidate(name: &str) -> CostSubjectCandidate {
    CostSubjectCandidate {
        raw_name: name.to_string(),
        source_id: "frequency_list".to_string(),
        attributes: SourceAttributes::default(),
    }
}

fn default_classifier() -> Classifier {
    Classifier::new(
        knowledge::default_concepts(),
        knowledge::default_category_rules(),
    )
}

#[test]
fn ocean_freight_resolves_through_exact_tier() {
    let classification = default_classifier().classify("海运费");
    assert_eq!(classification.tier, MatchTier::Exact);
    assert_eq!(classification.category, CostCategory::CrossBorderTransport);
    assert_eq!(classification.supplier_type, "船公司");
    assert!(!classification.description_zh.is_empty());
    assert!(!classification.description_en.is_empty());
}

#[test]
fn ocean_freight_variant_resolves_through_fuzzy_tier() {
    let classification = default_classifier().classify("海运费附加");
    assert_eq!(classification.tier, MatchTier::Fuzzy);
    assert_eq!(classification.category, CostCategory::CrossBorderTransport);
    assert!(classification.description_zh.starts_with("海运费附加"));
    assert!(classification.description_en.starts_with("海运费附加"));
}

#[test]
fn unknown_name_resolves_through_default_tier() {
    let classification = default_classifier().classify("某某某新奇收款");
    assert_eq!(classification.tier, MatchTier::Default);
    assert_eq!(classification.category, CostCategory::Special);
    assert_eq!(classification.supplier_type, "待确认");
    assert_eq!(classification.usage_scenario, "待确认");
}

#[test]
fn exactly_one_tier_fires_per_name() {
    let classifier = default_classifier();
    for name in ["海运费", "海运费附加", "港口安保费", "某某某新奇收款"] {
        let first = classifier.classify(name);
        let second = classifier.classify(name);
        assert_eq!(first.tier, second.tier, "{name}");
        assert_eq!(first.category, second.category, "{name}");
        assert_eq!(first.description_zh, second.description_zh, "{name}");
    }
}

#[test]
fn classification_is_total_over_a_registry() {
    let names = [
        "海运费",
        "海运费附加",
        "报关费",
        "港口安保费",
        "某某某新奇收款",
        "神秘杂项",
    ];
    let pipeline = Pipeline::new(PipelineConfig::default()).with_source(InMemorySource::new(
        "frequency_list",
        names.iter().map(|name| candidate(name)).collect(),
    ));
    let output = pipeline.run().unwrap();
    assert_eq!(output.registry.len(), names.len());

    for row in output.registry.to_rows() {
        assert!(
            CostCategory::from_label_zh(&row.category).is_some(),
            "unknown category label {:?}",
            row.category
        );
        assert!(!row.description_zh.is_empty());
        assert!(!row.description_en.is_empty());
    }
    let counted: usize = output.summary.categories.iter().map(|entry| entry.count).sum();
    assert_eq!(counted, names.len());
}

#[test]
fn synthetic_rule_sets_drive_the_same_engine() {
    // The engines take their tables as configuration, so a synthetic
    // knowledge base can be loaded from JSON and exercised directly.
    let json = r#"{
        "description_zh": "测试概念",
        "description_en": "synthetic concept",
        "category": "Insurance",
        "supplier_type": "保险公司",
        "usage_scenario": "测试"
    }"#;
    let entry: ConceptEntry = serde_json::from_str(json).unwrap();
    let mut concepts = ConceptBook::new();
    concepts.insert("测试费", entry);

    let classifier = Classifier::new(concepts, CategoryRuleTable::new());
    let exact = classifier.classify("测试费");
    assert_eq!(exact.tier, MatchTier::Exact);
    assert_eq!(exact.category, CostCategory::Insurance);

    let fuzzy = classifier.classify("测试费附加");
    assert_eq!(fuzzy.tier, MatchTier::Fuzzy);
    assert!(fuzzy.description_zh.starts_with("测试费附加，"));
}
