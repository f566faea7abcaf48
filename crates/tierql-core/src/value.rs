use crate::time::TimePoint;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, cmp::Ordering, fmt};

///
/// Float64
///
/// Attribute float with a total order (`f64::total_cmp`), so values can
/// carry `Eq`/`Ord` and participate in deterministic comparisons.
///

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Float64 {}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Float64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Float64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// Value
///
/// Closed variant type for interval attribute values. Annotation
/// attributes are dynamic (string-keyed) but their values are always
/// one of these shapes; there is no runtime reflection.
///
/// `Null` marks an attribute that exists in the schema but carries no
/// value for a given interval.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Float(Float64),
    Integer(i64),
    #[default]
    Null,
    Text(String),
    Time(TimePoint),
}

impl Value {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Float(Float64::new(value))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Canonical text rendering, used by the textual operands and for
    /// display. `Null` renders as the empty string.
    #[must_use]
    pub fn render_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Owned(b.to_string()),
            Self::Float(x) => Cow::Owned(x.to_string()),
            Self::Integer(i) => Cow::Owned(i.to_string()),
            Self::Time(t) => Cow::Owned(t.to_string()),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(x) => Some(x.get()),
            _ => None,
        }
    }

    /// Typed ordering comparison.
    ///
    /// Same-family comparisons are direct; integer/float cross-compare
    /// numerically; a text operand against a numeric, boolean, or time
    /// value is coerced by parsing the text. Families that cannot be
    /// coerced (and anything against `Null`) are not comparable and
    /// yield `None`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Null, _) | (_, Self::Null) => None,
            (Self::Text(a), b) => coerce_text(a, b).as_ref().and_then(|a| a.compare(b)),
            (a, Self::Text(b)) => {
                coerce_text(b, a).and_then(|b| a.compare(&b))
            }
            (a, b) => {
                let (a, b) = (a.as_numeric()?, b.as_numeric()?);
                Some(a.total_cmp(&b))
            }
        }
    }
}

/// Parse a text operand into the family of `target`, if possible.
fn coerce_text(text: &str, target: &Value) -> Option<Value> {
    match target {
        Value::Integer(_) | Value::Float(_) => {
            let parsed: f64 = text.trim().parse().ok()?;
            Some(Value::float(parsed))
        }
        Value::Bool(_) => {
            let parsed: bool = text.trim().parse().ok()?;
            Some(Value::Bool(parsed))
        }
        Value::Time(_) => {
            let seconds: f64 = text.trim().parse().ok()?;
            Some(Value::Time(TimePoint::from_seconds(seconds)))
        }
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_text())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(Float64::new(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<TimePoint> for Value {
    fn from(value: TimePoint) -> Self {
        Self::Time(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_comparison_is_lexicographic() {
        assert_eq!(
            Value::text("dog").compare(&Value::text("cat")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::text("dog").compare(&Value::text("dog")),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn integer_and_float_cross_compare_numerically() {
        assert_eq!(
            Value::Integer(2).compare(&Value::float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::float(2.0).compare(&Value::Integer(2)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn text_operand_coerces_against_typed_value() {
        assert_eq!(
            Value::Integer(120).compare(&Value::text("90")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::text("1.5").compare(&Value::float(1.5)),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::Integer(1).compare(&Value::text("dog")), None);
    }

    #[test]
    fn null_and_foreign_families_are_not_comparable() {
        assert_eq!(Value::Null.compare(&Value::Null), None);
        assert_eq!(Value::Integer(1).compare(&Value::Null), None);
        assert_eq!(Value::Bool(true).compare(&Value::Integer(1)), None);
    }

    #[test]
    fn render_text_is_canonical() {
        assert_eq!(Value::text("dog").render_text(), "dog");
        assert_eq!(Value::Integer(-3).render_text(), "-3");
        assert_eq!(Value::Bool(true).render_text(), "true");
        assert_eq!(Value::Null.render_text(), "");
    }
}
