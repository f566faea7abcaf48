use crate::{
    annotation::{Interval, IntervalTier},
    time::{TimePoint, TimeSpan},
    value::Value,
};
use proptest::prelude::*;

// ---- helpers -----------------------------------------------------------

fn iv(start: f64, end: f64, text: &str) -> Interval {
    Interval::new(TimeSpan::from_seconds(start, end), text)
}

fn tok_tier() -> IntervalTier {
    IntervalTier::new(
        "tok_min",
        vec![iv(0.0, 1.0, "the"), iv(1.0, 2.0, "dog"), iv(2.0, 3.0, "barks")],
    )
}

fn t(seconds: f64) -> TimePoint {
    TimePoint::from_seconds(seconds)
}

// ---- intervals ---------------------------------------------------------

#[test]
fn attribute_map_preserves_first_set_order_and_replaces_in_place() {
    let mut intv = iv(0.0, 1.0, "dog");
    intv.set_attribute("pos", Value::text("NOUN"));
    intv.set_attribute("lemma", Value::text("dog"));
    intv.set_attribute("pos", Value::text("VERB"));

    let ids: Vec<&str> = intv.attribute_ids().collect();
    assert_eq!(ids, ["pos", "lemma"]);
    assert_eq!(intv.attribute("pos"), Some(&Value::text("VERB")));
    assert_eq!(intv.attribute("missing"), None);
}

#[test]
fn pause_detection_covers_empty_and_reserved_labels() {
    assert!(iv(0.0, 1.0, "").is_pause_silent());
    assert!(iv(0.0, 1.0, "  ").is_pause_silent());
    assert!(iv(0.0, 1.0, "_").is_pause_silent());
    assert!(!iv(0.0, 1.0, "dog").is_pause_silent());
}

#[test]
fn merged_run_joins_text_and_unions_span() {
    let run = [iv(0.0, 1.0, "the"), iv(1.0, 2.0, "dog")];
    let merged = Interval::merged(&run, " ").unwrap();
    assert_eq!(merged.text(), "the dog");
    assert_eq!(merged.t_min(), t(0.0));
    assert_eq!(merged.t_max(), t(2.0));
    assert!(Interval::merged(&[], " ").is_none());
}

// ---- tier construction -------------------------------------------------

#[test]
fn construction_sorts_and_patches_gaps() {
    let tier = IntervalTier::new(
        "tok_min",
        vec![iv(2.0, 3.0, "barks"), iv(0.0, 1.0, "the")],
    );
    assert_eq!(tier.len(), 3);
    assert_eq!(tier.interval(0).unwrap().text(), "the");
    assert_eq!(tier.interval(1).unwrap().text(), "");
    assert_eq!(tier.interval(2).unwrap().text(), "barks");
    // contiguity
    for pair in tier.intervals().windows(2) {
        assert_eq!(pair[0].t_max(), pair[1].t_min());
    }
}

#[test]
fn with_bounds_pads_to_the_requested_span() {
    let tier = IntervalTier::with_bounds(
        "tok_min",
        vec![iv(1.0, 2.0, "dog")],
        TimeSpan::from_seconds(0.0, 3.0),
    );
    assert_eq!(tier.len(), 3);
    assert_eq!(tier.t_min(), t(0.0));
    assert_eq!(tier.t_max(), t(3.0));
}

#[test]
fn empty_input_with_bounds_yields_single_blank_interval() {
    let tier =
        IntervalTier::with_bounds("tok_min", Vec::new(), TimeSpan::from_seconds(0.0, 5.0));
    assert_eq!(tier.len(), 1);
    assert!(tier.interval(0).unwrap().is_pause_silent());
}

// ---- lookups -----------------------------------------------------------

#[test]
fn index_at_time_uses_binary_search_over_the_span() {
    let tier = tok_tier();
    assert_eq!(tier.index_at_time(t(0.5)), Some(0));
    assert_eq!(tier.index_at_time(t(2.5)), Some(2));
    assert_eq!(tier.index_at_time(t(3.0)), Some(2));
    assert_eq!(tier.index_at_time(t(3.5)), None);
    assert_eq!(tier.index_at_time(t(-0.1)), None);
}

#[test]
fn contained_in_requires_both_bounds_inside() {
    let tier = tok_tier();
    let within = tier.intervals_contained_in(TimeSpan::from_seconds(0.5, 3.0));
    let texts: Vec<&str> = within.iter().map(|i| i.text()).collect();
    assert_eq!(texts, ["dog", "barks"]);
}

#[test]
fn overlapping_with_requires_nonzero_overlap() {
    let tier = tok_tier();
    let hits = tier.intervals_overlapping_with(TimeSpan::from_seconds(0.5, 1.5));
    let texts: Vec<&str> = hits.iter().map(|i| i.text()).collect();
    assert_eq!(texts, ["the", "dog"]);
    // touching at a boundary is not overlap
    let hits = tier.intervals_overlapping_with(TimeSpan::from_seconds(1.0, 2.0));
    let texts: Vec<&str> = hits.iter().map(|i| i.text()).collect();
    assert_eq!(texts, ["dog"]);
}

#[test]
fn index_range_contained_in_reports_first_and_last() {
    let tier = tok_tier();
    assert_eq!(
        tier.index_range_contained_in(TimeSpan::from_seconds(1.0, 3.0)),
        Some((1, 2))
    );
    assert_eq!(
        tier.index_range_contained_in(TimeSpan::from_seconds(0.2, 0.8)),
        None
    );
}

#[test]
fn context_truncates_at_tier_edges() {
    let tier = tok_tier();
    let left: Vec<&str> = tier.context(2, -5).iter().map(Interval::text).collect();
    assert_eq!(left, ["the", "dog"]);
    let right: Vec<&str> = tier.context(2, 5).iter().map(Interval::text).collect();
    assert!(right.is_empty());
    assert!(tier.context(7, 1).is_empty());
}

#[test]
fn text_of_range_joins_with_separator() {
    let tier = tok_tier();
    assert_eq!(
        tier.text_of_range(0, 2, " ").as_deref(),
        Some("the dog barks")
    );
    assert_eq!(tier.text_of_range(1, 5, " "), None);
}

#[test]
fn distinct_labels_keep_first_appearance_order() {
    let tier = IntervalTier::new(
        "tok_min",
        vec![
            iv(0.0, 1.0, "a"),
            iv(1.0, 2.0, "b"),
            iv(2.0, 3.0, "a"),
        ],
    );
    assert_eq!(tier.distinct_labels(), ["a", "b"]);
}

// ---- merging -----------------------------------------------------------

#[test]
fn merge_identical_collapses_adjacent_runs() {
    let mut tier = IntervalTier::new(
        "phone",
        vec![
            iv(0.0, 1.0, "a"),
            iv(1.0, 2.0, "a"),
            iv(2.0, 3.0, "b"),
            iv(3.0, 4.0, "a"),
        ],
    );
    tier.merge_identical_annotations("");
    let texts: Vec<&str> = tier.intervals().iter().map(Interval::text).collect();
    assert_eq!(texts, ["a", "b", "a"]);
    assert_eq!(tier.interval(0).unwrap().t_max(), t(2.0));
    for pair in tier.intervals().windows(2) {
        assert_eq!(pair[0].t_max(), pair[1].t_min());
    }
}

#[test]
fn merge_identical_skips_excluded_label() {
    let mut tier = IntervalTier::new(
        "phone",
        vec![iv(0.0, 1.0, "_"), iv(1.0, 2.0, "_"), iv(2.0, 3.0, "a")],
    );
    tier.merge_identical_annotations("_");
    assert_eq!(tier.len(), 3);
}

// ---- properties --------------------------------------------------------

proptest! {
    #[test]
    fn contained_is_subset_of_overlapping(
        bounds in proptest::collection::vec(0..40i64, 2..20),
        probe_start in 0..40i64,
        probe_len in 0..40i64,
    ) {
        let mut cuts = bounds;
        cuts.sort_unstable();
        cuts.dedup();
        prop_assume!(cuts.len() >= 2);

        let intervals: Vec<Interval> = cuts
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                Interval::new(
                    TimeSpan::new(
                        TimePoint::from_milliseconds(w[0]),
                        TimePoint::from_milliseconds(w[1]),
                    ),
                    format!("w{i}"),
                )
            })
            .collect();
        let tier = IntervalTier::new("tok_min", intervals);
        let probe = TimeSpan::new(
            TimePoint::from_milliseconds(probe_start),
            TimePoint::from_milliseconds(probe_start + probe_len),
        );

        let overlapping = tier.intervals_overlapping_with(probe);
        for contained in tier.intervals_contained_in(probe) {
            // zero-length contained intervals cannot overlap; everything else must
            if contained.duration() > TimePoint::ZERO {
                prop_assert!(overlapping.iter().any(|o| o == &contained));
            }
        }
    }
}
