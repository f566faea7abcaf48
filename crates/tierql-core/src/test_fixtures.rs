//! Shared corpus fixtures for the executor, resolver, and store test
//! suites.

use crate::{
    annotation::{Interval, IntervalTier},
    store::MemoryStore,
    time::TimeSpan,
    value::Value,
};

pub(crate) fn iv(start: f64, end: f64, text: &str) -> Interval {
    Interval::new(TimeSpan::from_seconds(start, end), text)
}

pub(crate) fn token(start: f64, end: f64, text: &str, pos: &str) -> Interval {
    let mut interval = iv(start, end, text);
    interval.set_attribute("pos", Value::text(pos));
    interval
}

/// "the dog barks" on `tok_min` with part-of-speech attributes.
pub(crate) fn tok_tier() -> IntervalTier {
    IntervalTier::new(
        "tok_min",
        vec![
            token(0.0, 1.0, "the", "DET"),
            token(1.0, 2.0, "dog", "NOUN"),
            token(2.0, 3.0, "barks", "VERB"),
        ],
    )
}

/// Phone segmentation of the same utterance; not index-aligned with
/// `tok_min`.
pub(crate) fn phone_tier() -> IntervalTier {
    IntervalTier::new(
        "phone",
        vec![
            iv(0.0, 0.4, "dh"),
            iv(0.4, 1.0, "ax"),
            iv(1.0, 1.5, "d"),
            iv(1.5, 2.0, "og"),
            iv(2.0, 2.6, "b"),
            iv(2.6, 3.0, "arks"),
        ],
    )
}

/// One-document corpus: `doc1` in `corpus-a`, speaker `spk1`, levels
/// `tok_min` and `phone`.
pub(crate) fn single_document_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_tier("corpus-a", "doc1", "spk1", tok_tier());
    store.insert_tier("corpus-a", "doc1", "spk1", phone_tier());
    store
}
