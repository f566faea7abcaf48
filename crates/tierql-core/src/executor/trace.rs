//! Executor query tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! execution semantics.

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// QueryTraceEvent
///

#[derive(Clone, Debug)]
pub enum QueryTraceEvent {
    /// A filter sequence was compiled into a plan.
    PlanCompiled {
        level_id: String,
        length: usize,
        predicates: usize,
    },
    /// One document was scanned for one sequence.
    DocumentScanned {
        document_id: String,
        matches: usize,
    },
    /// One sequence finished cleanly.
    SequenceFinished { level_id: String, matches: usize },
    /// One sequence was contained after a configuration or backend
    /// error.
    SequenceFailed { level_id: String, message: String },
}
