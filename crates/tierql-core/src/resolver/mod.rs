//! The resolver: turns one occurrence pointer back into a readable
//! occurrence with configurable context and cross-level intervals.

#[cfg(test)]
mod tests;

use crate::{
    annotation::Interval,
    executor::OccurrencePointer,
    query::QueryDefinition,
    store::{AnnotationStore, Selection},
    time::TimeSpan,
};
use serde::{Deserialize, Serialize};

///
/// ResultKind
///
/// Position of one resolved interval relative to the matched run.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResultKind {
    LeftContext,
    Target,
    RightContext,
}

///
/// ResultInterval
///
/// One classified interval of a resolved occurrence. `index` is the
/// absolute tier index on the anchor level and a running number on
/// cross-referenced levels.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultInterval {
    pub kind: ResultKind,
    pub speaker_id: String,
    pub index: usize,
    pub interval: Interval,
}

///
/// Occurrence
///
/// One fully resolved match: for every requested level, the classified
/// intervals inside the context window. Levels keep request order; a
/// level that was never requested never appears.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    corpus_id: String,
    document_id: String,
    levels: Vec<(String, Vec<ResultInterval>)>,
}

impl Occurrence {
    #[must_use]
    pub fn corpus_id(&self) -> &str {
        &self.corpus_id
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    #[must_use]
    pub fn level(&self, level_id: &str) -> Option<&[ResultInterval]> {
        self.levels
            .iter()
            .find(|(id, _)| id == level_id)
            .map(|(_, intervals)| intervals.as_slice())
    }

    pub fn level_ids(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(id, _)| id.as_str())
    }

    pub fn levels(&self) -> impl Iterator<Item = (&str, &[ResultInterval])> {
        self.levels
            .iter()
            .map(|(id, intervals)| (id.as_str(), intervals.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn text_of_kind(&self, level_id: &str, kind: ResultKind, separator: &str) -> String {
        self.level(level_id)
            .unwrap_or(&[])
            .iter()
            .filter(|result| result.kind == kind)
            .map(|result| result.interval.text())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Concatenated text of the matched run on one level.
    #[must_use]
    pub fn target_text(&self, level_id: &str, separator: &str) -> String {
        self.text_of_kind(level_id, ResultKind::Target, separator)
    }

    #[must_use]
    pub fn left_context_text(&self, level_id: &str, separator: &str) -> String {
        self.text_of_kind(level_id, ResultKind::LeftContext, separator)
    }

    #[must_use]
    pub fn right_context_text(&self, level_id: &str, separator: &str) -> String {
        self.text_of_kind(level_id, ResultKind::RightContext, separator)
    }
}

///
/// OccurrenceResolver
///
/// Read-only and idempotent: resolving the same pointer twice yields
/// identical content, barring concurrent mutation of the underlying
/// store. The resolver itself caches nothing.
///

pub struct OccurrenceResolver<'a> {
    store: &'a dyn AnnotationStore,
}

impl<'a> OccurrenceResolver<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn AnnotationStore) -> Self {
        Self { store }
    }

    /// Reconstruct the occurrence behind `pointer`.
    ///
    /// The anchor level is fetched by index window and classified by
    /// absolute index. Every other requested level is fetched by time
    /// over the context span and classified against the pointer's
    /// original time bounds. A level that fails to load (deleted
    /// since the query ran) is omitted rather than failing the call.
    #[must_use]
    pub fn resolve(&self, pointer: &OccurrencePointer, definition: &QueryDefinition) -> Occurrence {
        let mut occurrence = Occurrence {
            corpus_id: pointer.corpus_id.clone(),
            document_id: pointer.document_id.clone(),
            levels: Vec::new(),
        };

        let context_min = pointer
            .index_min
            .saturating_sub(definition.length_context_left);
        let context_max = pointer.index_max + definition.length_context_right;
        let selection = Selection::index_range(
            pointer.document_id.as_str(),
            pointer.speaker_id.as_str(),
            pointer.level_id.as_str(),
            context_min,
            context_max,
        );
        let Ok(anchor) = self.store.intervals(&selection) else {
            return occurrence;
        };
        let Some(context_span) = run_span(&anchor) else {
            return occurrence;
        };

        for level_id in definition.result_levels() {
            if level_id == pointer.level_id {
                occurrence.levels.push((
                    level_id.to_string(),
                    classify_anchor(&anchor, pointer, context_min),
                ));
            } else if let Some(results) =
                self.resolve_secondary(pointer, definition, level_id, context_span)
            {
                occurrence.levels.push((level_id.to_string(), results));
            }
        }
        occurrence
    }

    /// Time-based join onto a level that is not index-aligned with the
    /// anchor. `None` marks a resolution gap; the caller omits the
    /// level.
    fn resolve_secondary(
        &self,
        pointer: &OccurrencePointer,
        definition: &QueryDefinition,
        level_id: &str,
        context_span: TimeSpan,
    ) -> Option<Vec<ResultInterval>> {
        let attribute_ids = definition
            .attributes_for_level(level_id)
            .into_iter()
            .map(str::to_string);
        let selection = Selection::time_range(
            pointer.document_id.as_str(),
            pointer.speaker_id.as_str(),
            level_id,
            context_span,
        )
        .with_attributes(attribute_ids);

        let intervals = self.store.intervals(&selection).ok()?;
        let results = intervals
            .into_iter()
            .enumerate()
            .map(|(index, interval)| ResultInterval {
                kind: classify_by_time(&interval, pointer),
                speaker_id: pointer.speaker_id.clone(),
                index,
                interval,
            })
            .collect();
        Some(results)
    }
}

/// Absolute time bounds of a fetched run, `None` when it is empty.
fn run_span(intervals: &[Interval]) -> Option<TimeSpan> {
    let (first, last) = (intervals.first()?, intervals.last()?);
    Some(TimeSpan::new(first.t_min(), last.t_max()))
}

/// Classify the anchor-level window by absolute index against the
/// matched run.
fn classify_anchor(
    anchor: &[Interval],
    pointer: &OccurrencePointer,
    context_min: usize,
) -> Vec<ResultInterval> {
    anchor
        .iter()
        .enumerate()
        .map(|(offset, interval)| {
            let index = context_min + offset;
            let kind = if index < pointer.index_min {
                ResultKind::LeftContext
            } else if index > pointer.index_max {
                ResultKind::RightContext
            } else {
                ResultKind::Target
            };
            ResultInterval {
                kind,
                speaker_id: pointer.speaker_id.clone(),
                index,
                interval: interval.clone(),
            }
        })
        .collect()
}

/// Classify a cross-level interval against the pointer's original
/// (uncontextualized) time bounds. Bounds are closed: an interval
/// touching the matched span at a single point is part of the target.
fn classify_by_time(interval: &Interval, pointer: &OccurrencePointer) -> ResultKind {
    if interval.t_max() < pointer.t_min {
        ResultKind::LeftContext
    } else if interval.t_min() > pointer.t_max {
        ResultKind::RightContext
    } else {
        ResultKind::Target
    }
}
