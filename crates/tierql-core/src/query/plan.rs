use crate::{
    annotation::Interval,
    query::{FilterSequence, Operand, semantics},
    value::Value,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// AttributeSelector
///
/// What a predicate reads from an interval: the interval's own text,
/// or a named attribute. The compiler translates the reserved
/// attribute id (equal to the level id) into `OwnText`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeSelector {
    OwnText,
    Named(String),
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnText => write!(f, "text"),
            Self::Named(id) => write!(f, "{id}"),
        }
    }
}

///
/// PositionPredicate
///
/// One per-position attribute constraint of a compiled plan. The
/// operand is never `None`: unconstrained positions compile to no
/// predicate at all.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionPredicate {
    pub position: usize,
    pub attribute: AttributeSelector,
    pub operand: Operand,
    pub value: Value,
}

impl PositionPredicate {
    /// Whether `interval` (the candidate at this predicate's position)
    /// satisfies the constraint. A missing attribute satisfies
    /// nothing.
    #[must_use]
    pub fn matches(&self, interval: &Interval) -> bool {
        let own_text;
        let actual = match &self.attribute {
            AttributeSelector::OwnText => {
                own_text = Value::text(interval.text());
                Some(&own_text)
            }
            AttributeSelector::Named(id) => interval.attribute(id),
        };
        actual.is_some_and(|actual| semantics::condition_holds(self.operand, actual, &self.value))
    }
}

///
/// SequencePlan
///
/// Backend-neutral realization of one filter sequence: find every
/// start index `i` such that the `length` index-contiguous intervals
/// of one (document, speaker) tier on `level_id` satisfy all
/// per-position predicates. Equivalent to an N-way positional
/// self-join on a relational backend, or a sliding window scan over a
/// sorted tier in memory; both yield the same match set, and
/// overlapping matches are all reported.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SequencePlan {
    level_id: String,
    length: usize,
    predicates: Vec<PositionPredicate>,
}

impl SequencePlan {
    #[must_use]
    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn predicates(&self) -> &[PositionPredicate] {
        &self.predicates
    }

    /// Whether a window of `length` index-contiguous intervals is a
    /// match.
    #[must_use]
    pub fn matches_window(&self, window: &[Interval]) -> bool {
        window.len() == self.length
            && self
                .predicates
                .iter()
                .all(|predicate| predicate.matches(&window[predicate.position]))
    }

    /// Compact single-line rendering, for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        use fmt::Write;

        let mut out = format!("level {} length {}", self.level_id, self.length);
        for p in &self.predicates {
            let _ = write!(
                out,
                " [{}] {} {:?} {}",
                p.position,
                p.attribute,
                p.operand,
                p.value.render_text()
            );
        }
        out
    }
}

///
/// PlanError
///
/// Configuration errors caught at compile time. Per the error policy
/// these are contained by the executor (the sequence contributes zero
/// pointers) rather than failing a whole query.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanError {
    #[error("filter sequence has an empty level id")]
    EmptyLevel,

    #[error("filter sequence has no registered attributes")]
    NoAttributes,

    #[error("filter sequence has zero positions")]
    EmptySequence,
}

/// Compile one filter sequence into a positional plan.
pub fn compile(sequence: &FilterSequence) -> Result<SequencePlan, PlanError> {
    if sequence.level_id().is_empty() {
        return Err(PlanError::EmptyLevel);
    }
    if sequence.attribute_ids().next().is_none() {
        return Err(PlanError::NoAttributes);
    }
    let length = sequence.sequence_length();
    if length == 0 {
        return Err(PlanError::EmptySequence);
    }

    let mut predicates = Vec::new();
    for attribute_id in sequence.attribute_ids() {
        let attribute = if attribute_id == sequence.level_id() {
            AttributeSelector::OwnText
        } else {
            AttributeSelector::Named(attribute_id.to_string())
        };
        for position in 0..length {
            let Some(condition) = sequence.condition(attribute_id, position) else {
                continue;
            };
            if condition.is_none() {
                continue;
            }
            predicates.push(PositionPredicate {
                position,
                attribute: attribute.clone(),
                operand: condition.operand,
                value: condition.value.clone(),
            });
        }
    }

    let plan = SequencePlan {
        level_id: sequence.level_id().to_string(),
        length,
        predicates,
    };
    log::debug!("compiled sequence plan: {}", plan.describe());

    Ok(plan)
}
