/// Canonical cost-subject identity: the raw name with surrounding
/// whitespace trimmed. Exact-string identity; no case folding and no
/// Unicode normalization.
/// Examples: `海运费`, `报关费`, `THC`
pub type SubjectName = String;
/// Stable registry identifier assigned at registry build time.
/// Examples: `FC0001`, `FC0042`
pub type SubjectId = String;
/// Identifier for the tabular source a candidate came from.
/// Examples: `frequency_list`, `master_list`
pub type SourceId = String;
/// Label of one service-taxonomy entry.
/// Examples: `拖车`, `报关`, `MBL`
pub type ServiceLabel = String;
/// Substring keyword used by category and service matching rules.
/// Examples: `燃油`, `报关`, `BAF`
pub type Keyword = String;
/// Leg segment a service belongs to.
/// Examples: `启运地`, `干线`, `目的港`
pub type LegSegment = String;
/// Column name in a tabular source.
/// Examples: `标准化费用名称`, `费用名称（中）`
pub type ColumnName = String;
/// Classifier-assigned typical payee role for a cost subject.
/// Examples: `船公司`, `报关行`, `码头/场站`
pub type SupplierType = String;
