use crate::time::{TimePoint, TimeSpan};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// OccurrencePointer
///
/// Lightweight, serializable reference to one match: which tier the
/// run lives on and its inclusive index and time bounds. No interval
/// content is materialized, so result sets stay cheap at corpus scale;
/// the resolver turns a pointer into a full occurrence on demand.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct OccurrencePointer {
    pub corpus_id: String,
    pub document_id: String,
    pub speaker_id: String,
    pub level_id: String,
    pub index_min: usize,
    pub index_max: usize,
    pub t_min: TimePoint,
    pub t_max: TimePoint,
}

impl OccurrencePointer {
    /// Number of intervals in the matched run.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.index_max - self.index_min + 1
    }

    /// Absolute time bounds of the matched run.
    #[must_use]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.t_min, self.t_max)
    }
}

impl fmt::Display for OccurrencePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}[{}..{}] {}",
            self.corpus_id,
            self.document_id,
            self.speaker_id,
            self.level_id,
            self.index_min,
            self.index_max,
            self.span(),
        )
    }
}
