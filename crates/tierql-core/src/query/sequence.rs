use crate::query::Condition;
use serde::{Deserialize, Serialize};

///
/// FilterSequence
///
/// A positional pattern over one level: N slots, each slot carrying at
/// most one condition per registered attribute. Every attribute holds a
/// condition list of the same length (the sequence length); positions
/// without a constraint hold `Condition::none()`.
///
/// The attribute map preserves registration order. An attribute whose
/// id equals the sequence's level id denotes the interval's own text.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterSequence {
    level_id: String,
    attributes: Vec<(String, Vec<Condition>)>,
}

impl FilterSequence {
    #[must_use]
    pub fn new(level_id: impl Into<String>) -> Self {
        Self {
            level_id: level_id.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    /// Sequence length: the length of the first attribute's condition
    /// list, 0 when no attributes are registered. A zero-length
    /// pattern matches nothing.
    #[must_use]
    pub fn sequence_length(&self) -> usize {
        self.attributes
            .first()
            .map_or(0, |(_, conditions)| conditions.len())
    }

    #[must_use]
    pub fn has_attribute(&self, attribute_id: &str) -> bool {
        self.attributes.iter().any(|(id, _)| id == attribute_id)
    }

    pub fn attribute_ids(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(id, _)| id.as_str())
    }

    /// Register an attribute with a no-op condition at every existing
    /// position. Registering an attribute twice is a no-op.
    pub fn add_attribute(&mut self, attribute_id: impl Into<String>) {
        let attribute_id = attribute_id.into();
        if self.has_attribute(&attribute_id) {
            return;
        }
        let length = self.sequence_length();
        self.attributes
            .push((attribute_id, vec![Condition::none(); length]));
    }

    pub fn remove_attribute(&mut self, attribute_id: &str) {
        self.attributes.retain(|(id, _)| id != attribute_id);
    }

    /// Append `count` unconstrained slots to every attribute.
    pub fn expand_sequence(&mut self, count: usize) {
        for (_, conditions) in &mut self.attributes {
            conditions.extend(std::iter::repeat_n(Condition::none(), count));
        }
    }

    /// Remove `count` trailing slots from every attribute, saturating
    /// at zero length.
    pub fn reduce_sequence(&mut self, count: usize) {
        for (_, conditions) in &mut self.attributes {
            let keep = conditions.len().saturating_sub(count);
            conditions.truncate(keep);
        }
    }

    #[must_use]
    pub fn condition(&self, attribute_id: &str, position: usize) -> Option<&Condition> {
        self.attributes
            .iter()
            .find(|(id, _)| id == attribute_id)
            .and_then(|(_, conditions)| conditions.get(position))
    }

    /// Set the condition at one position. Out-of-bounds positions and
    /// unknown attributes are a no-op: callers must register and
    /// expand first.
    pub fn set_condition(&mut self, attribute_id: &str, position: usize, condition: Condition) {
        if let Some((_, conditions)) = self
            .attributes
            .iter_mut()
            .find(|(id, _)| id == attribute_id)
            && let Some(slot) = conditions.get_mut(position)
        {
            *slot = condition;
        }
    }

    /// Textual shorthand of the condition at one position; empty when
    /// unset or out of bounds.
    #[must_use]
    pub fn condition_string(&self, attribute_id: &str, position: usize) -> String {
        self.condition(attribute_id, position)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Parse and set a condition from its textual shorthand. Same
    /// bounds rules as [`Self::set_condition`].
    pub fn set_condition_string(&mut self, attribute_id: &str, position: usize, input: &str) {
        self.set_condition(attribute_id, position, Condition::parse(input));
    }
}

///
/// FilterGroup
///
/// A list of filter sequences evaluated together. Sequences in a group
/// contribute matches independently; cross-sequence composition is not
/// interpreted by the executor.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub sequences: Vec<FilterSequence>,
}

impl FilterGroup {
    #[must_use]
    pub const fn new(sequences: Vec<FilterSequence>) -> Self {
        Self { sequences }
    }
}

impl From<FilterSequence> for FilterGroup {
    fn from(sequence: FilterSequence) -> Self {
        Self::new(vec![sequence])
    }
}

///
/// QueryDefinition
///
/// A complete query: filter groups, the (level, attribute) pairs to
/// materialize in resolved occurrences, and the context window sizes.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct QueryDefinition {
    pub groups: Vec<FilterGroup>,
    pub result_levels_attributes: Vec<(String, String)>,
    pub length_context_left: usize,
    pub length_context_right: usize,
}

impl QueryDefinition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<FilterGroup>) -> Self {
        self.groups.push(group.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, left: usize, right: usize) -> Self {
        self.length_context_left = left;
        self.length_context_right = right;
        self
    }

    /// Request one (level, attribute) pair for display.
    #[must_use]
    pub fn request_attribute(
        mut self,
        level_id: impl Into<String>,
        attribute_id: impl Into<String>,
    ) -> Self {
        self.result_levels_attributes
            .push((level_id.into(), attribute_id.into()));
        self
    }

    /// Distinct requested level ids, in request order.
    #[must_use]
    pub fn result_levels(&self) -> Vec<&str> {
        let mut levels: Vec<&str> = Vec::new();
        for (level_id, _) in &self.result_levels_attributes {
            if !levels.contains(&level_id.as_str()) {
                levels.push(level_id);
            }
        }
        levels
    }

    /// Attribute ids requested for one level, in request order.
    #[must_use]
    pub fn attributes_for_level(&self, level_id: &str) -> Vec<&str> {
        self.result_levels_attributes
            .iter()
            .filter(|(level, _)| level == level_id)
            .map(|(_, attribute)| attribute.as_str())
            .collect()
    }
}
