use crate::{
    time::{TimePoint, TimeSpan},
    value::Value,
};
use serde::{Deserialize, Serialize};

/// Reserved label marking a structural pause on a tier.
pub const PAUSE_SYMBOL: &str = "_";

///
/// Interval
///
/// One time-bounded annotation unit: a span, a text label, and an
/// ordered map of named attribute values. Attribute order is the order
/// in which attributes were first set, so rendering is deterministic.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    span: TimeSpan,
    text: String,
    attributes: Vec<(String, Value)>,
}

impl Interval {
    #[must_use]
    pub fn new(span: TimeSpan, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attributes(
        span: TimeSpan,
        text: impl Into<String>,
        attributes: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        let mut interval = Self::new(span, text);
        for (id, value) in attributes {
            interval.set_attribute(id, value);
        }
        interval
    }

    /// Merge a run of intervals into one: the union span, texts joined
    /// with `separator`, attributes taken from the first interval.
    /// Returns `None` for an empty run.
    #[must_use]
    pub fn merged(run: &[Self], separator: &str) -> Option<Self> {
        let (first, last) = (run.first()?, run.last()?);
        let text = run
            .iter()
            .map(Self::text)
            .collect::<Vec<_>>()
            .join(separator);
        Some(Self {
            span: TimeSpan::new(first.t_min(), last.t_max()),
            text,
            attributes: first.attributes.clone(),
        })
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
    pub fn duration(&self) -> TimePoint {
        self.span.duration()
    }

    #[must_use]
    pub fn center(&self) -> TimePoint {
        self.span.center()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn attribute(&self, attribute_id: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(id, _)| id == attribute_id)
            .map(|(_, value)| value)
    }

    /// Set an attribute value, replacing an existing binding in place
    /// or appending a new one.
    pub fn set_attribute(&mut self, attribute_id: impl Into<String>, value: Value) {
        let attribute_id = attribute_id.into();
        if let Some(slot) = self
            .attributes
            .iter_mut()
            .find(|(id, _)| *id == attribute_id)
        {
            slot.1 = value;
        } else {
            self.attributes.push((attribute_id, value));
        }
    }

    pub fn attribute_ids(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(id, _)| id.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes
            .iter()
            .map(|(id, value)| (id.as_str(), value))
    }

    /// Keep only the attributes named in `attribute_ids`.
    pub fn retain_attributes(&mut self, attribute_ids: &[String]) {
        self.attributes
            .retain(|(id, _)| attribute_ids.iter().any(|keep| keep == id));
    }

    /// Structural silence marker: an empty/whitespace-only label or the
    /// reserved pause symbol.
    #[must_use]
    pub fn is_pause_silent(&self) -> bool {
        let trimmed = self.text.trim();
        trimmed.is_empty() || trimmed == PAUSE_SYMBOL
    }

    #[must_use]
    pub fn contains(&self, t: TimePoint) -> bool {
        self.span.contains(t)
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.span.overlaps(&other.span)
    }
}
