use crate::{
    executor::{OccurrencePointer, QueryExecutor},
    query::{Condition, FilterSequence, QueryDefinition},
    resolver::{OccurrenceResolver, ResultKind},
    store::MemoryStore,
    test_fixtures::single_document_store,
    time::TimePoint,
};

// ---- helpers -----------------------------------------------------------

fn barks_pointer(store: &MemoryStore) -> OccurrencePointer {
    let mut sequence = FilterSequence::new("tok_min");
    sequence.add_attribute("tok_min");
    sequence.expand_sequence(1);
    sequence.set_condition("tok_min", 0, Condition::contains("bar"));
    QueryExecutor::new(store)
        .compile_and_run(&sequence)
        .unwrap()
        .remove(0)
}

fn texts_of(results: &[crate::resolver::ResultInterval], kind: ResultKind) -> Vec<&str> {
    results
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.interval.text())
        .collect()
}

// ---- anchor level ------------------------------------------------------

#[test]
fn context_window_truncates_at_tier_end() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .with_context(1, 1);

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let results = occurrence.level("tok_min").unwrap();

    assert_eq!(texts_of(results, ResultKind::LeftContext), ["dog"]);
    assert_eq!(texts_of(results, ResultKind::Target), ["barks"]);
    assert!(texts_of(results, ResultKind::RightContext).is_empty());
    // absolute tier indices survive resolution
    assert_eq!(results[0].index, 1);
    assert_eq!(results[1].index, 2);
}

#[test]
fn context_window_clamps_at_tier_start() {
    let store = single_document_store();
    let mut sequence = FilterSequence::new("tok_min");
    sequence.add_attribute("tok_min");
    sequence.expand_sequence(1);
    sequence.set_condition("tok_min", 0, Condition::equals("the"));
    let pointer = QueryExecutor::new(&store)
        .compile_and_run(&sequence)
        .unwrap()
        .remove(0);

    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .with_context(5, 1);
    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let results = occurrence.level("tok_min").unwrap();

    assert!(texts_of(results, ResultKind::LeftContext).is_empty());
    assert_eq!(texts_of(results, ResultKind::Target), ["the"]);
    assert_eq!(texts_of(results, ResultKind::RightContext), ["dog"]);
}

#[test]
fn rendering_helpers_join_by_kind() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .with_context(2, 0);

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    assert_eq!(occurrence.left_context_text("tok_min", " "), "the dog");
    assert_eq!(occurrence.target_text("tok_min", " "), "barks");
    assert_eq!(occurrence.right_context_text("tok_min", " "), "");
}

// ---- cross-level join --------------------------------------------------

#[test]
fn secondary_levels_join_by_time_not_index() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .request_attribute("phone", "phone")
        .with_context(1, 0);

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let phones = occurrence.level("phone").unwrap();

    // context span is [1.0, 3.0]: phones d, og, b, arks
    let all: Vec<&str> = phones.iter().map(|r| r.interval.text()).collect();
    assert_eq!(all, ["d", "og", "b", "arks"]);

    // classification is against the uncontextualized match span [2.0, 3.0];
    // "og" touches it at exactly 2.0 and counts as target
    assert_eq!(texts_of(phones, ResultKind::LeftContext), ["d"]);
    assert_eq!(texts_of(phones, ResultKind::Target), ["og", "b", "arks"]);
}

#[test]
fn unrequested_levels_never_appear() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("phone", "phone")
        .with_context(1, 1);

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let levels: Vec<&str> = occurrence.level_ids().collect();
    assert_eq!(levels, ["phone"]);
    assert!(occurrence.level("tok_min").is_none());
}

#[test]
fn unknown_secondary_level_is_omitted() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .request_attribute("syll", "syll");

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let levels: Vec<&str> = occurrence.level_ids().collect();
    assert_eq!(levels, ["tok_min"]);
}

#[test]
fn secondary_fetch_keeps_only_requested_attributes() {
    let mut store = single_document_store();
    // give one phone an extra attribute that is not requested
    let mut phones = crate::test_fixtures::phone_tier();
    let mut decorated = phones.intervals().to_vec();
    decorated[0].set_attribute("stress", crate::value::Value::Integer(1));
    decorated[0].set_attribute("cv", crate::value::Value::text("C"));
    phones = crate::annotation::IntervalTier::new("phone", decorated);
    store.insert_tier("corpus-a", "doc1", "spk1", phones);

    let pointer = OccurrencePointer {
        corpus_id: "corpus-a".to_string(),
        document_id: "doc1".to_string(),
        speaker_id: "spk1".to_string(),
        level_id: "tok_min".to_string(),
        index_min: 0,
        index_max: 0,
        t_min: TimePoint::ZERO,
        t_max: TimePoint::from_seconds(1.0),
    };
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .request_attribute("phone", "cv");

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    let first = &occurrence.level("phone").unwrap()[0];
    assert_eq!(first.interval.attribute("stress"), None);
    assert!(first.interval.attribute("cv").is_some());
}

// ---- degradation and idempotency ---------------------------------------

#[test]
fn dangling_pointer_resolves_to_an_empty_occurrence() {
    let store = single_document_store();
    let pointer = OccurrencePointer {
        corpus_id: "corpus-a".to_string(),
        document_id: "deleted-doc".to_string(),
        speaker_id: "spk1".to_string(),
        level_id: "tok_min".to_string(),
        index_min: 0,
        index_max: 0,
        t_min: TimePoint::ZERO,
        t_max: TimePoint::from_seconds(1.0),
    };
    let definition = QueryDefinition::new().request_attribute("tok_min", "tok_min");

    let occurrence = OccurrenceResolver::new(&store).resolve(&pointer, &definition);
    assert!(occurrence.is_empty());
}

#[test]
fn resolution_is_idempotent() {
    let store = single_document_store();
    let pointer = barks_pointer(&store);
    let definition = QueryDefinition::new()
        .request_attribute("tok_min", "tok_min")
        .request_attribute("phone", "phone")
        .with_context(1, 1);

    let resolver = OccurrenceResolver::new(&store);
    let first = resolver.resolve(&pointer, &definition);
    let second = resolver.resolve(&pointer, &definition);
    assert_eq!(first, second);
}
