//! Identity Resolver & Merger.
//!
//! Candidates are absorbed in source order; the first source to mention a
//! name creates the subject, later sources may only fill attributes that
//! are still empty. Subjects keep their creation order, which later becomes
//! the registry identifier order.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::data::{CostSubject, CostSubjectCandidate};
use crate::types::SubjectName;

/// Accumulates candidates into deduplicated subjects.
#[derive(Debug, Default)]
pub struct SubjectMerger {
    subjects: IndexMap<SubjectName, CostSubject>,
    candidates_seen: usize,
}

/// Set `slot` from `value` only when the slot is still empty.
fn fill_missing<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

impl SubjectMerger {
    /// Create an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one candidate.
    pub fn absorb(&mut self, candidate: CostSubjectCandidate) {
        self.candidates_seen += 1;
        let key = candidate.normalized_name();
        match self.subjects.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(CostSubject::from_candidate(candidate));
            }
            Entry::Occupied(mut slot) => {
                let subject = slot.get_mut();
                if !subject.provenance.contains(&candidate.source_id) {
                    subject.provenance.push(candidate.source_id);
                }
                let attributes = candidate.attributes;
                fill_missing(&mut subject.english_name, attributes.english_name);
                fill_missing(&mut subject.abbreviation, attributes.abbreviation);
                fill_missing(&mut subject.settlement_code, attributes.settlement_code);
                fill_missing(&mut subject.supplier_hint, attributes.supplier_hint);
                fill_missing(&mut subject.parent_category, attributes.parent_category);
                fill_missing(&mut subject.route_legs, attributes.route_legs);
            }
        }
    }

    /// Absorb a whole candidate sequence in order.
    pub fn absorb_all(&mut self, candidates: impl IntoIterator<Item = CostSubjectCandidate>) {
        for candidate in candidates {
            self.absorb(candidate);
        }
    }

    /// Number of distinct subjects so far.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// True when nothing has been absorbed yet.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Finish merging and hand back subjects in creation order.
    pub fn into_subjects(self) -> IndexMap<SubjectName, CostSubject> {
        debug!(
            candidates = self.candidates_seen,
            subjects = self.subjects.len(),
            "merged candidates into subjects"
        );
        self.subjects
    }
}
