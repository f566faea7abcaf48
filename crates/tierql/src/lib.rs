//! ## Crate layout
//! - `core`: annotation primitives, query model, compiler, executor,
//!   resolver, and the storage contract.
//!
//! The `prelude` module mirrors the runtime surface used by host
//! applications.

pub use tierql_core as core;

pub use tierql_core::Error;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        annotation::{Interval, IntervalTier, TierGroup},
        executor::{OccurrencePointer, QueryExecutor, QueryResponse, QueryTraceSink},
        query::{Condition, FilterGroup, FilterSequence, Operand, QueryDefinition},
        resolver::{Occurrence, OccurrenceResolver, ResultInterval, ResultKind},
        store::{AnnotationStore, MemoryStore, Selection, StoreError},
        time::{TimePoint, TimeSpan},
        value::Value,
    };
}
