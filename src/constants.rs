/// Constants used by registry identifier assignment and the canonical
/// output table's fixed-value columns.
pub mod registry {
    /// Prefix of every registry identifier.
    pub const ID_PREFIX: &str = "FC";
    /// Zero-padded digit count of the sequential part of an identifier.
    pub const ID_DIGITS: usize = 4;
    /// Default settlement currency written to the canonical table.
    pub const DEFAULT_CURRENCY: &str = "CNY";
    /// Default tax status written to the canonical table.
    pub const DEFAULT_TAX_STATUS: &str = "应税";
    /// Invoice types accepted for every subject.
    pub const INVOICE_TYPES: &str = "专票/普票";
    /// Payment direction of every cost subject (payable).
    pub const PAY_DIRECTION: &str = "应付";
    /// Delimiter used when serializing matched services into one cell.
    pub const SERVICE_DELIMITER: &str = ",";
    /// Delimiter used when serializing provenance into one cell.
    pub const PROVENANCE_DELIMITER: &str = ",";
    /// Mark written for a set route-leg flag; unset flags are blank.
    pub const LEG_FLAG_MARK: &str = "√";
}

/// Constants used by the classification cascade's templated tiers.
pub mod classify {
    /// Supplier placeholder for subjects the cascade could not resolve.
    pub const UNRESOLVED_SUPPLIER: &str = "待确认";
    /// Scenario placeholder for subjects the cascade could not resolve.
    pub const UNRESOLVED_SCENARIO: &str = "待确认";
    /// Scenario placeholder for keyword-tier matches awaiting human review.
    pub const KEYWORD_SCENARIO: &str = "具体场景待确认";
    /// Chinese sentence tail appended to keyword-tier descriptions.
    pub const KEYWORD_DESC_TAIL_ZH: &str = "具体收费标准和适用场景需根据实际业务情况确定。";
    /// English sentence tail appended to keyword-tier descriptions.
    pub const KEYWORD_DESC_TAIL_EN: &str =
        "specific rates and applicable scenarios depend on actual business conditions.";
    /// Chinese tail of the default-tier description.
    pub const DEFAULT_DESC_TAIL_ZH: &str = "相关的费用，具体概念和收费标准需根据实际业务需求进一步确认。";
    /// English head of the default-tier description.
    pub const DEFAULT_DESC_HEAD_EN: &str = "Charges related to ";
    /// English tail of the default-tier description.
    pub const DEFAULT_DESC_TAIL_EN: &str =
        ", specific concept and rates need further confirmation based on actual business requirements.";
}

/// Constants used by the service-taxonomy pass-through table.
pub mod services {
    /// Chinese tail appended when a service has no curated description.
    pub const PENDING_DESCRIPTION_TAIL: &str = "相关服务，具体描述待补充。";
}

/// Column names of the supported input tables.
pub mod columns {
    /// Leg-segment column of the service list.
    pub const SERVICE_SEGMENT: &str = "服务段";
    /// Service-label column of the service list.
    pub const SERVICE_LABEL: &str = "服务";
    /// Description column of the annotated service list.
    pub const SERVICE_DESCRIPTION: &str = "服务描述";
}

/// Constants used by the summary reporter.
pub mod report {
    /// Default number of service labels listed in the frequency table.
    pub const TOP_SERVICES_LIMIT: usize = 10;
    /// Title of the consolidation summary report.
    pub const SUMMARY_TITLE: &str = "海运货代费用科目整理报告";
    /// Title of the enhancement-pass report.
    pub const ENHANCEMENT_TITLE: &str = "费用科目概念增强报告";
}

/// Output file names written by the pipeline.
pub mod output {
    /// Canonical cost-subject table.
    pub const REGISTRY_FILE: &str = "全局费用科目-字段表.csv";
    /// Annotated service-taxonomy pass-through table.
    pub const SERVICE_FILE: &str = "海运服务列表.csv";
    /// Human-readable summary report.
    pub const REPORT_FILE: &str = "费用科目整理报告.md";
    /// Canonical table rewritten by the enhancement pass.
    pub const ENHANCED_REGISTRY_FILE: &str = "增强版全局费用科目-字段表.csv";
    /// Report emitted by the enhancement pass.
    pub const ENHANCEMENT_REPORT_FILE: &str = "费用科目概念增强报告.md";
}
