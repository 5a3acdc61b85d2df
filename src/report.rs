//! Aggregate statistics over the finalized registry and their rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::constants::registry::{PROVENANCE_DELIMITER, SERVICE_DELIMITER};
use crate::registry::{Registry, RegistryRow};
use crate::types::{ServiceLabel, SourceId};

/// Count and share of one category label.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryShare {
    /// Chinese category label.
    pub category: String,
    /// Subjects in this category.
    pub count: usize,
    /// Fraction of all subjects.
    pub share: f64,
}

/// Count and share of one supplier type.
#[derive(Clone, Debug, PartialEq)]
pub struct SupplierShare {
    /// Supplier type label.
    pub supplier_type: String,
    /// Subjects assigned this supplier type.
    pub count: usize,
    /// Fraction of all subjects.
    pub share: f64,
}

/// How many subjects a service label was matched to.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceFrequency {
    /// Service label.
    pub label: ServiceLabel,
    /// Subjects linked to this service.
    pub count: usize,
}

/// Subjects created by one source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceContribution {
    /// Creating source (first provenance entry).
    pub source: SourceId,
    /// Subjects this source created.
    pub count: usize,
}

/// All statistics derived from one registry build.
///
/// Every distribution sums exactly to `total_subjects`; nothing is dropped
/// between registry build and report.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrySummary {
    /// Registry row count.
    pub total_subjects: usize,
    /// Category distribution, count-descending then label-ascending.
    pub categories: Vec<CategoryShare>,
    /// Supplier-type distribution, count-descending then label-ascending.
    pub suppliers: Vec<SupplierShare>,
    /// Subjects with at least one matched service.
    pub with_services: usize,
    /// Subjects with no matched service.
    pub without_services: usize,
    /// Most frequent service labels, truncated to the configured limit.
    pub top_services: Vec<ServiceFrequency>,
    /// Per-source creation counts, count-descending then id-ascending.
    pub source_contributions: Vec<SourceContribution>,
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn counted<T: Eq + std::hash::Hash + Ord>(values: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: indexmap::IndexMap<T, usize> = indexmap::IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut pairs: Vec<(T, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Compute statistics over canonical rows.
pub fn summarize_rows(rows: &[RegistryRow], top_services_limit: usize) -> RegistrySummary {
    let total = rows.len();

    let categories = counted(rows.iter().map(|row| row.category.clone()))
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category,
            count,
            share: share(count, total),
        })
        .collect();

    let suppliers = counted(rows.iter().map(|row| row.supplier_type.clone()))
        .into_iter()
        .map(|(supplier_type, count)| SupplierShare {
            supplier_type,
            count,
            share: share(count, total),
        })
        .collect();

    let with_services = rows.iter().filter(|row| !row.services.is_empty()).count();

    let service_labels = rows.iter().flat_map(|row| {
        row.services
            .split(SERVICE_DELIMITER)
            .filter(|label| !label.is_empty())
            .map(|label| label.to_string())
            .collect::<Vec<_>>()
    });
    let mut top_services: Vec<ServiceFrequency> = counted(service_labels)
        .into_iter()
        .map(|(label, count)| ServiceFrequency { label, count })
        .collect();
    top_services.truncate(top_services_limit);

    let source_contributions = counted(rows.iter().map(|row| {
        row.provenance
            .split(PROVENANCE_DELIMITER)
            .next()
            .unwrap_or_default()
            .to_string()
    }))
    .into_iter()
    .filter(|(source, _)| !source.is_empty())
    .map(|(source, count)| SourceContribution { source, count })
    .collect();

    RegistrySummary {
        total_subjects: total,
        categories,
        suppliers,
        with_services,
        without_services: total - with_services,
        top_services,
        source_contributions,
    }
}

/// Compute statistics over a finalized registry.
pub fn summarize(registry: &Registry, top_services_limit: usize) -> RegistrySummary {
    summarize_rows(&registry.to_rows(), top_services_limit)
}

/// Render a summary as a human-readable markdown report.
pub fn render_report(title: &str, summary: &RegistrySummary, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}");
    let _ = writeln!(out);
    let _ = writeln!(out, "生成时间: {}", generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "## 数据统计");
    let _ = writeln!(out, "- 总费用科目数: {}", summary.total_subjects);
    let _ = writeln!(out);
    let _ = writeln!(out, "## 费用分类分布");
    for entry in &summary.categories {
        let _ = writeln!(
            out,
            "- {}: {}个 ({:.1}%)",
            entry.category,
            entry.count,
            entry.share * 100.0
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "## 供应商类型分布");
    for entry in &summary.suppliers {
        let _ = writeln!(
            out,
            "- {}: {}个 ({:.1}%)",
            entry.supplier_type,
            entry.count,
            entry.share * 100.0
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "## 服务匹配统计");
    let _ = writeln!(out, "- 已匹配服务的费用科目: {}个", summary.with_services);
    let _ = writeln!(out, "- 未匹配服务的费用科目: {}个", summary.without_services);
    if !summary.top_services.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "主要服务环节:");
        for entry in &summary.top_services {
            let _ = writeln!(out, "- {}: {}个费用科目", entry.label, entry.count);
        }
    }
    if !summary.source_contributions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "## 数据源贡献");
        for entry in &summary.source_contributions {
            let _ = writeln!(out, "- {}: {}个费用科目", entry.source, entry.count);
        }
    }
    out
}
