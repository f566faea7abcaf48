//! The storage contract required by the executor and resolver, and the
//! in-memory reference backend.
//!
//! Any backend offering ordered, indexable interval access per
//! (document, speaker, level) satisfies the contract: a relational
//! store, a file-based scan, or the in-memory index shipped here.

mod memory;


pub use memory::MemoryStore;

use crate::{
    annotation::{Interval, TierGroup},
    time::TimeSpan,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// DocumentRef
///
/// Host-assigned identity of one annotation document within a corpus.
/// Identifiers are opaque strings.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DocumentRef {
    pub corpus_id: String,
    pub document_id: String,
}

impl DocumentRef {
    #[must_use]
    pub fn new(corpus_id: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            corpus_id: corpus_id.into(),
            document_id: document_id.into(),
        }
    }
}

///
/// SelectionRange
///
/// Which part of a tier to read. Index ranges are 0-based and
/// inclusive, truncated to the tier bounds. Time ranges select
/// intervals whose whole spans lie inside the range (closed bounds).
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SelectionRange {
    #[default]
    All,
    Index {
        min: usize,
        max: usize,
    },
    Time(TimeSpan),
}

///
/// Selection
///
/// One interval read: which (document, speaker, level) tier, which
/// range of it, and which attributes to materialize (`None` loads
/// all).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    pub document_id: String,
    pub speaker_id: String,
    pub level_id: String,
    pub attribute_ids: Option<Vec<String>>,
    pub range: SelectionRange,
}

impl Selection {
    #[must_use]
    pub fn all(
        document_id: impl Into<String>,
        speaker_id: impl Into<String>,
        level_id: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            speaker_id: speaker_id.into(),
            level_id: level_id.into(),
            attribute_ids: None,
            range: SelectionRange::All,
        }
    }

    #[must_use]
    pub fn index_range(
        document_id: impl Into<String>,
        speaker_id: impl Into<String>,
        level_id: impl Into<String>,
        min: usize,
        max: usize,
    ) -> Self {
        Self {
            range: SelectionRange::Index { min, max },
            ..Self::all(document_id, speaker_id, level_id)
        }
    }

    #[must_use]
    pub fn time_range(
        document_id: impl Into<String>,
        speaker_id: impl Into<String>,
        level_id: impl Into<String>,
        span: TimeSpan,
    ) -> Self {
        Self {
            range: SelectionRange::Time(span),
            ..Self::all(document_id, speaker_id, level_id)
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attribute_ids: impl IntoIterator<Item = String>) -> Self {
        self.attribute_ids = Some(attribute_ids.into_iter().collect());
        self
    }
}

///
/// StoreError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("unknown document '{document_id}'")]
    UnknownDocument { document_id: String },

    #[error("unknown level '{level_id}'")]
    UnknownLevel { level_id: String },

    #[error("storage backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn unknown_document(document_id: impl Into<String>) -> Self {
        Self::UnknownDocument {
            document_id: document_id.into(),
        }
    }

    pub fn unknown_level(level_id: impl Into<String>) -> Self {
        Self::UnknownLevel {
            level_id: level_id.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

///
/// AnnotationStore
///
/// Read access to time-aligned annotations. All reads are ordered
/// (document order, then index order) and side-effect free. An unknown
/// speaker yields an empty result, not an error; unknown documents and
/// levels are errors so that callers can report them.
///

pub trait AnnotationStore {
    /// Every document, in the backend's natural order.
    fn documents(&self) -> Result<Vec<DocumentRef>, StoreError>;

    /// Intervals of one tier, in index order.
    fn intervals(&self, selection: &Selection) -> Result<Vec<Interval>, StoreError>;

    /// Bulk-load tier groups for every speaker of one document,
    /// restricted to `level_ids` when given.
    fn speaker_tiers(
        &self,
        document_id: &str,
        level_ids: Option<&[&str]>,
    ) -> Result<BTreeMap<String, TierGroup>, StoreError>;
}
