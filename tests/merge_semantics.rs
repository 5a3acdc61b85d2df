use fee_registry::data::{CostSubjectCandidate, SourceAttributes};
use fee_registry::merge::SubjectMerger;

fn candidate(name: &str, source: &str) -> CostSubjectCandidate {
    CostSubjectCandidate {
        raw_name: name.trim().to_string(),
        source_id: source.to_string(),
        attributes: SourceAttributes::default(),
    }
}

fn candidate_with_english(name: &str, source: &str, english: &str) -> CostSubjectCandidate {
    CostSubjectCandidate {
        raw_name: name.to_string(),
        source_id: source.to_string(),
        attributes: SourceAttributes {
            english_name: Some(english.to_string()),
            ..SourceAttributes::default()
        },
    }
}

#[test]
fn earlier_source_is_authoritative_for_conflicts() {
    let mut merger = SubjectMerger::new();
    // Source A is fully absorbed before source B, as the pipeline does.
    merger.absorb(candidate_with_english("海运费", "source_a", "Ocean Freight"));
    merger.absorb(candidate_with_english("海运费", "source_b", "Sea Freight"));

    let subjects = merger.into_subjects();
    assert_eq!(
        subjects["海运费"].english_name.as_deref(),
        Some("Ocean Freight")
    );
}

#[test]
fn later_sources_fill_gaps_only() {
    let mut merger = SubjectMerger::new();
    merger.absorb(candidate("报关费", "source_a"));
    merger.absorb(candidate_with_english("报关费", "source_b", "Customs Fee"));

    let subjects = merger.into_subjects();
    let subject = &subjects["报关费"];
    assert_eq!(subject.english_name.as_deref(), Some("Customs Fee"));
    assert_eq!(
        subject.provenance,
        vec!["source_a".to_string(), "source_b".to_string()]
    );
}

#[test]
fn registry_count_equals_distinct_normalized_names() {
    let names = ["海运费", " 海运费 ", "报关费", "拖车费", "报关费"];
    let mut merger = SubjectMerger::new();
    for name in names {
        merger.absorb(candidate(name, "source_a"));
    }
    let subjects = merger.into_subjects();

    let mut distinct: Vec<&str> = names.iter().map(|name| name.trim()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(subjects.len(), distinct.len());
    assert!(subjects.values().all(|subject| !subject.provenance.is_empty()));
}

#[test]
fn visually_identical_but_differently_encoded_names_stay_distinct() {
    // 「ＴＨＣ」 uses full-width letters; identity is byte-exact on purpose
    // and no Unicode normalization is applied.
    let mut merger = SubjectMerger::new();
    merger.absorb(candidate("ＴＨＣ", "source_a"));
    merger.absorb(candidate("THC", "source_b"));
    let subjects = merger.into_subjects();
    assert_eq!(subjects.len(), 2);
    assert!(subjects.contains_key("ＴＨＣ"));
    assert!(subjects.contains_key("THC"));
}

#[test]
fn first_seen_raw_name_becomes_canonical() {
    let mut merger = SubjectMerger::new();
    merger.absorb(candidate("码头操作费", "source_b"));
    merger.absorb(candidate("码头操作费", "source_a"));
    let subjects = merger.into_subjects();
    let subject = &subjects["码头操作费"];
    assert_eq!(subject.canonical_name, "码头操作费");
    assert_eq!(subject.provenance[0], "source_b");
}
