//! The executor: runs compiled sequence plans against a storage
//! collaborator and materializes occurrence pointers.

mod pointer;
mod trace;


pub use pointer::OccurrencePointer;
pub use trace::{QueryTraceEvent, QueryTraceSink};

use crate::{
    Error,
    query::{FilterSequence, QueryDefinition, SequencePlan, compile},
    store::AnnotationStore,
};

///
/// SequenceOutcome
///
/// Per-sequence execution report: the matched pointer count, or the
/// contained error. One sequence failing never aborts its siblings.
///

#[derive(Debug)]
pub struct SequenceOutcome {
    pub group_index: usize,
    pub sequence_index: usize,
    pub level_id: String,
    pub result: Result<usize, Error>,
}

impl SequenceOutcome {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

///
/// QueryResponse
///
/// Materialized execution result: pointers from every evaluated
/// sequence, concatenated in definition order, plus one outcome per
/// sequence.
///

#[derive(Debug, Default)]
pub struct QueryResponse {
    pointers: Vec<OccurrencePointer>,
    outcomes: Vec<SequenceOutcome>,
}

impl QueryResponse {
    #[must_use]
    pub fn pointers(&self) -> &[OccurrencePointer] {
        &self.pointers
    }

    #[must_use]
    pub fn into_pointers(self) -> Vec<OccurrencePointer> {
        self.pointers
    }

    #[must_use]
    pub fn outcomes(&self) -> &[SequenceOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.pointers.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Outcomes of sequences that were contained after an error.
    pub fn failures(&self) -> impl Iterator<Item = &SequenceOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok())
    }
}

///
/// QueryExecutor
///
/// Interprets compiled plans as sliding window scans over the store's
/// tiers. Synchronous and read-only; the storage collaborator is
/// injected, never located through ambient state.
///

pub struct QueryExecutor<'a> {
    store: &'a dyn AnnotationStore,
    trace: Option<&'a dyn QueryTraceSink>,
}

impl<'a> QueryExecutor<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn AnnotationStore) -> Self {
        Self { store, trace: None }
    }

    #[must_use]
    pub const fn with_trace(store: &'a dyn AnnotationStore, trace: &'a dyn QueryTraceSink) -> Self {
        Self {
            store,
            trace: Some(trace),
        }
    }

    /// Evaluate every sequence of every group, concatenating pointers
    /// in definition order. Failed sequences contribute zero pointers
    /// and a failure outcome.
    #[must_use]
    pub fn run(&self, definition: &QueryDefinition) -> QueryResponse {
        let mut response = QueryResponse::default();
        for (group_index, group) in definition.groups.iter().enumerate() {
            for (sequence_index, sequence) in group.sequences.iter().enumerate() {
                let result = match self.compile_and_run(sequence) {
                    Ok(pointers) => {
                        let count = pointers.len();
                        response.pointers.extend(pointers);
                        Ok(count)
                    }
                    Err(err) => Err(err),
                };
                response.outcomes.push(SequenceOutcome {
                    group_index,
                    sequence_index,
                    level_id: sequence.level_id().to_string(),
                    result,
                });
            }
        }
        response
    }

    /// Compile one filter sequence and run it to pointers.
    pub fn compile_and_run(
        &self,
        sequence: &FilterSequence,
    ) -> Result<Vec<OccurrencePointer>, Error> {
        let plan = match compile(sequence) {
            Ok(plan) => plan,
            Err(err) => {
                self.emit(|| QueryTraceEvent::SequenceFailed {
                    level_id: sequence.level_id().to_string(),
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };
        self.emit(|| QueryTraceEvent::PlanCompiled {
            level_id: plan.level_id().to_string(),
            length: plan.length(),
            predicates: plan.predicates().len(),
        });

        match self.run_plan(&plan) {
            Ok(pointers) => {
                self.emit(|| QueryTraceEvent::SequenceFinished {
                    level_id: plan.level_id().to_string(),
                    matches: pointers.len(),
                });
                Ok(pointers)
            }
            Err(err) => {
                log::warn!("sequence on level {} failed: {err}", plan.level_id());
                self.emit(|| QueryTraceEvent::SequenceFailed {
                    level_id: plan.level_id().to_string(),
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Sliding window scan: every document in natural order, every
    /// speaker tier of the plan's level, every start index. Matches
    /// may overlap; every valid start index is reported.
    fn run_plan(&self, plan: &SequencePlan) -> Result<Vec<OccurrencePointer>, Error> {
        let mut pointers = Vec::new();
        for document in self.store.documents()? {
            let before = pointers.len();
            let tiers = self
                .store
                .speaker_tiers(&document.document_id, Some(&[plan.level_id()]))?;
            for (speaker_id, group) in &tiers {
                let Some(tier) = group.tier(plan.level_id()) else {
                    continue;
                };
                for (start, window) in tier.intervals().windows(plan.length()).enumerate() {
                    if !plan.matches_window(window) {
                        continue;
                    }
                    let index_max = start + plan.length() - 1;
                    pointers.push(OccurrencePointer {
                        corpus_id: document.corpus_id.clone(),
                        document_id: document.document_id.clone(),
                        speaker_id: speaker_id.clone(),
                        level_id: plan.level_id().to_string(),
                        index_min: start,
                        index_max,
                        t_min: window[0].t_min(),
                        t_max: window[plan.length() - 1].t_max(),
                    });
                }
            }
            self.emit(|| QueryTraceEvent::DocumentScanned {
                document_id: document.document_id.clone(),
                matches: pointers.len() - before,
            });
        }
        Ok(pointers)
    }

    fn emit(&self, event: impl FnOnce() -> QueryTraceEvent) {
        if let Some(trace) = self.trace {
            trace.on_event(event());
        }
    }
}
