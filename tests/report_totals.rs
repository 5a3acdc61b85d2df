use fee_registry::config::PipelineConfig;
use fee_registry::data::{CostSubjectCandidate, SourceAttributes};
use fee_registry::pipeline::Pipeline;
use fee_registry::report::render_report;
use fee_registry::source::InMemorySource;

fn candidate(name: &str, source: &str) -> CostSubjectCandidate {
    CostSubjectCandidate {
        raw_name: name.to_string(),
        source_id: source.to_string(),
        attributes: SourceAttributes::default(),
    }
}

fn sample_pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default())
        .with_source(InMemorySource::new(
            "frequency_list",
            vec![
                candidate("海运费", "frequency_list"),
                candidate("报关费", "frequency_list"),
                candidate("拖车费", "frequency_list"),
                candidate("神秘杂项", "frequency_list"),
            ],
        ))
        .with_source(InMemorySource::new(
            "master_list",
            vec![
                candidate("海运费", "master_list"),
                candidate("仓储费", "master_list"),
            ],
        ))
}

#[test]
fn every_distribution_sums_to_the_registry_count() {
    let output = sample_pipeline().run().unwrap();
    let total = output.registry.len();
    assert_eq!(output.summary.total_subjects, total);

    let category_total: usize = output.summary.categories.iter().map(|c| c.count).sum();
    assert_eq!(category_total, total);

    let supplier_total: usize = output.summary.suppliers.iter().map(|s| s.count).sum();
    assert_eq!(supplier_total, total);

    assert_eq!(
        output.summary.with_services + output.summary.without_services,
        total
    );

    let contribution_total: usize = output
        .summary
        .source_contributions
        .iter()
        .map(|s| s.count)
        .sum();
    assert_eq!(contribution_total, total);
}

#[test]
fn shares_are_fractions_of_the_total() {
    let output = sample_pipeline().run().unwrap();
    for entry in &output.summary.categories {
        let expected = entry.count as f64 / output.summary.total_subjects as f64;
        assert!((entry.share - expected).abs() < 1e-9);
    }
    let share_total: f64 = output.summary.categories.iter().map(|c| c.share).sum();
    assert!((share_total - 1.0).abs() < 1e-9);
}

#[test]
fn top_services_limit_is_honored() {
    let config = PipelineConfig {
        top_services_limit: 1,
        ..PipelineConfig::default()
    };
    let output = Pipeline::new(config)
        .with_source(InMemorySource::new(
            "frequency_list",
            vec![
                candidate("报关费", "frequency_list"),
                candidate("转关费", "frequency_list"),
                candidate("仓储费", "frequency_list"),
            ],
        ))
        .run()
        .unwrap();
    assert_eq!(output.summary.top_services.len(), 1);
    assert_eq!(output.summary.top_services[0].label, "报关");
    assert_eq!(output.summary.top_services[0].count, 2);
}

#[test]
fn report_reflects_source_contributions() {
    let output = sample_pipeline().run().unwrap();
    let text = render_report("海运货代费用科目整理报告", &output.summary, output.generated_at);
    // 海运费 was created by frequency_list; master_list only contributed
    // the gap-filling observation plus 仓储费.
    assert!(text.contains("- frequency_list: 4个费用科目"));
    assert!(text.contains("- master_list: 1个费用科目"));
    assert!(text.contains("总费用科目数: 5"));
}
