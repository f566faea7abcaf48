use crate::{
    annotation::{Interval, IntervalTier, TierGroup},
    store::{AnnotationStore, DocumentRef, Selection, SelectionRange, StoreError},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MemoryStore
///
/// Reference in-memory backend: per-document, per-speaker sorted tiers
/// with binary-search range selection. Level ids form a store-wide
/// registry (the schema identity of a level), so a query against a
/// level no document carries is distinguishable from a level that does
/// not exist at all.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    levels: BTreeSet<String>,
    documents: Vec<DocumentEntry>,
}

#[derive(Debug)]
struct DocumentEntry {
    corpus_id: String,
    document_id: String,
    speakers: BTreeMap<String, TierGroup>,
}

impl MemoryStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            levels: BTreeSet::new(),
            documents: Vec::new(),
        }
    }

    /// Register a level id without inserting any tier. Insertion of a
    /// tier registers its level implicitly.
    pub fn register_level(&mut self, level_id: impl Into<String>) {
        self.levels.insert(level_id.into());
    }

    /// Insert one speaker tier, creating the document entry on first
    /// touch. Replaces any existing tier for the same (document,
    /// speaker, level). Documents keep insertion order.
    pub fn insert_tier(
        &mut self,
        corpus_id: impl Into<String>,
        document_id: impl Into<String>,
        speaker_id: impl Into<String>,
        tier: IntervalTier,
    ) {
        let document_id = document_id.into();
        self.levels.insert(tier.level_id().to_string());

        let at = self
            .documents
            .iter()
            .position(|doc| doc.document_id == document_id)
            .unwrap_or_else(|| {
                self.documents.push(DocumentEntry {
                    corpus_id: corpus_id.into(),
                    document_id: document_id.clone(),
                    speakers: BTreeMap::new(),
                });
                self.documents.len() - 1
            });
        let entry = &mut self.documents[at];
        entry
            .speakers
            .entry(speaker_id.into())
            .or_default()
            .insert(tier);
    }

    fn document(&self, document_id: &str) -> Result<&DocumentEntry, StoreError> {
        self.documents
            .iter()
            .find(|doc| doc.document_id == document_id)
            .ok_or_else(|| StoreError::unknown_document(document_id))
    }

    fn require_level(&self, level_id: &str) -> Result<(), StoreError> {
        if self.levels.contains(level_id) {
            Ok(())
        } else {
            Err(StoreError::unknown_level(level_id))
        }
    }
}

impl AnnotationStore for MemoryStore {
    fn documents(&self) -> Result<Vec<DocumentRef>, StoreError> {
        Ok(self
            .documents
            .iter()
            .map(|doc| DocumentRef::new(doc.corpus_id.clone(), doc.document_id.clone()))
            .collect())
    }

    fn intervals(&self, selection: &Selection) -> Result<Vec<Interval>, StoreError> {
        self.require_level(&selection.level_id)?;
        let document = self.document(&selection.document_id)?;
        let Some(tier) = document
            .speakers
            .get(&selection.speaker_id)
            .and_then(|group| group.tier(&selection.level_id))
        else {
            return Ok(Vec::new());
        };

        let mut intervals: Vec<Interval> = match selection.range {
            SelectionRange::All => tier.intervals().to_vec(),
            SelectionRange::Index { min, max } => {
                if min >= tier.len() {
                    Vec::new()
                } else {
                    let max = max.min(tier.len() - 1);
                    tier.intervals()[min..=max].to_vec()
                }
            }
            SelectionRange::Time(span) => tier
                .intervals_contained_in(span)
                .into_iter()
                .cloned()
                .collect(),
        };

        if let Some(attribute_ids) = &selection.attribute_ids {
            for interval in &mut intervals {
                interval.retain_attributes(attribute_ids);
            }
        }
        Ok(intervals)
    }

    fn speaker_tiers(
        &self,
        document_id: &str,
        level_ids: Option<&[&str]>,
    ) -> Result<BTreeMap<String, TierGroup>, StoreError> {
        if let Some(level_ids) = level_ids {
            for level_id in level_ids {
                self.require_level(level_id)?;
            }
        }
        let document = self.document(document_id)?;

        let mut groups = BTreeMap::new();
        for (speaker_id, group) in &document.speakers {
            let filtered: TierGroup = match level_ids {
                None => group.clone(),
                Some(level_ids) => level_ids
                    .iter()
                    .filter_map(|level_id| group.tier(level_id).cloned())
                    .collect(),
            };
            if !filtered.is_empty() {
                groups.insert(speaker_id.clone(), filtered);
            }
        }
        Ok(groups)
    }
}
