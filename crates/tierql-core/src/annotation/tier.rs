use crate::{
    annotation::Interval,
    time::{TimePoint, TimeSpan},
};
use serde::{Deserialize, Serialize};

///
/// IntervalTier
///
/// Ordered, non-overlapping, contiguous sequence of intervals for one
/// level of annotation, scoped to one document and speaker.
///
/// Construction sorts the intervals by start time and patches any gaps
/// with empty intervals, so that `interval[i].t_max() ==
/// interval[i + 1].t_min()` holds over the whole tier.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IntervalTier {
    level_id: String,
    span: TimeSpan,
    intervals: Vec<Interval>,
}

impl IntervalTier {
    /// Build a tier from unordered intervals. The tier span is the
    /// union of the interval spans; an empty input yields an empty
    /// tier with a zero span.
    #[must_use]
    pub fn new(level_id: impl Into<String>, intervals: Vec<Interval>) -> Self {
        let span = intervals
            .iter()
            .map(Interval::span)
            .reduce(|acc, s| TimeSpan::new(acc.start().min(s.start()), acc.end().max(s.end())))
            .unwrap_or_default();
        Self::with_bounds(level_id, intervals, span)
    }

    /// Build a tier covering `span`. Gaps between intervals, and
    /// between the intervals and the given bounds, are filled with
    /// empty intervals. An empty input yields a single blank interval
    /// covering the span.
    #[must_use]
    pub fn with_bounds(
        level_id: impl Into<String>,
        mut intervals: Vec<Interval>,
        span: TimeSpan,
    ) -> Self {
        if intervals.is_empty() {
            let blank = if span.duration() > TimePoint::ZERO {
                vec![Interval::new(span, "")]
            } else {
                Vec::new()
            };
            return Self {
                level_id: level_id.into(),
                span,
                intervals: blank,
            };
        }
        intervals.sort_by_key(Interval::t_min);
        let span = TimeSpan::new(
            span.start().min(intervals[0].t_min()),
            span.end().max(intervals[intervals.len() - 1].t_max()),
        );
        let intervals = fix_empty_intervals(intervals, span);
        Self {
            level_id: level_id.into(),
            span,
            intervals,
        }
    }

    #[must_use]
    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    #[must_use]
    pub const fn span(&self) -> TimeSpan {
        self.span
    }

    #[must_use]
    pub const fn t_min(&self) -> TimePoint {
        self.span.start()
    }

    #[must_use]
    pub const fn t_max(&self) -> TimePoint {
        self.span.end()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    #[must_use]
    pub fn interval(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Interval> {
        self.intervals.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Binary search for the interval containing `t`. `None` outside
    /// the tier span.
    #[must_use]
    pub fn index_at_time(&self, t: TimePoint) -> Option<usize> {
        if !self.span.contains(t) {
            return None;
        }
        let mut imin = 0usize;
        let mut imax = self.intervals.len().checked_sub(1)?;
        while imax >= imin {
            let imid = imin + (imax - imin) / 2;
            let interval = &self.intervals[imid];
            if interval.t_max() < t {
                imin = imid + 1;
            } else if interval.t_min() > t {
                imax = imid.checked_sub(1)?;
            } else {
                return Some(imid);
            }
        }
        None
    }

    /// Intervals whose spans lie entirely inside `span` (closed
    /// bounds). Always a subset of [`Self::intervals_overlapping_with`].
    #[must_use]
    pub fn intervals_contained_in(&self, span: TimeSpan) -> Vec<&Interval> {
        self.range_scan(span)
            .filter(|intv| span.contains_span(&intv.span()))
            .collect()
    }

    /// Index range `(first, last)` of the intervals contained in
    /// `span`, if any.
    #[must_use]
    pub fn index_range_contained_in(&self, span: TimeSpan) -> Option<(usize, usize)> {
        let offset = self
            .intervals
            .partition_point(|intv| intv.t_max() < span.start());
        let mut range = None;
        for (index, intv) in self.intervals.iter().enumerate().skip(offset) {
            if intv.t_min() > span.end() {
                break;
            }
            if span.contains_span(&intv.span()) {
                range = match range {
                    None => Some((index, index)),
                    Some((first, _)) => Some((first, index)),
                };
            }
        }
        range
    }

    /// Intervals with nonzero temporal overlap with `span`.
    #[must_use]
    pub fn intervals_overlapping_with(&self, span: TimeSpan) -> Vec<&Interval> {
        self.range_scan(span)
            .filter(|intv| intv.span().overlaps(&span))
            .collect()
    }

    /// Candidate intervals near `span`, located by binary search over
    /// the sorted start times.
    fn range_scan(&self, span: TimeSpan) -> impl Iterator<Item = &Interval> {
        let start = self
            .intervals
            .partition_point(|intv| intv.t_max() < span.start());
        self.intervals[start..]
            .iter()
            .take_while(move |intv| intv.t_min() <= span.end())
    }

    /// Up to `|delta|` neighbours of `intervals[index]`: to the left in
    /// tier order for negative `delta`, to the right for positive.
    /// Truncated at the tier edges.
    #[must_use]
    pub fn context(&self, index: usize, delta: isize) -> &[Interval] {
        if index >= self.intervals.len() || delta == 0 {
            return &[];
        }
        if delta < 0 {
            let left = index.saturating_sub(delta.unsigned_abs());
            &self.intervals[left..index]
        } else {
            let right = (index + delta.unsigned_abs()).min(self.intervals.len() - 1);
            &self.intervals[index + 1..=right]
        }
    }

    /// Concatenated text of the inclusive index range, or `None` when
    /// either index is out of bounds.
    #[must_use]
    pub fn text_of_range(&self, index_min: usize, index_max: usize, separator: &str) -> Option<String> {
        let run = self.intervals.get(index_min..=index_max)?;
        Some(
            run.iter()
                .map(Interval::text)
                .collect::<Vec<_>>()
                .join(separator),
        )
    }

    /// Distinct labels in order of first appearance.
    #[must_use]
    pub fn distinct_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for intv in &self.intervals {
            if !labels.iter().any(|l| l == intv.text()) {
                labels.push(intv.text().to_string());
            }
        }
        labels
    }

    /// Collapse runs of index-adjacent intervals with identical text,
    /// except runs labelled `exclude_label`. Contiguity is preserved:
    /// each collapsed run becomes one interval over the union span.
    pub fn merge_identical_annotations(&mut self, exclude_label: &str) {
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for intv in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.text() == intv.text() && intv.text() != exclude_label => {
                    let run = [prev.clone(), intv];
                    // union span, label unchanged
                    if let Some(m) = Interval::merged(&run, "") {
                        let text = prev.text().to_string();
                        *prev = m;
                        prev.set_text(text);
                    }
                }
                _ => merged.push(intv),
            }
        }
        self.intervals = merged;
    }
}

/// Insert blank intervals into every gap so the tier is contiguous
/// over `span`.
fn fix_empty_intervals(intervals: Vec<Interval>, span: TimeSpan) -> Vec<Interval> {
    let mut fixed: Vec<Interval> = Vec::with_capacity(intervals.len());
    let mut previous_t_max = span.start();
    for intv in intervals {
        if previous_t_max < intv.t_min() {
            fixed.push(Interval::new(TimeSpan::new(previous_t_max, intv.t_min()), ""));
        }
        previous_t_max = intv.t_max();
        fixed.push(intv);
    }
    if previous_t_max < span.end() {
        fixed.push(Interval::new(TimeSpan::new(previous_t_max, span.end()), ""));
    }
    fixed
}
