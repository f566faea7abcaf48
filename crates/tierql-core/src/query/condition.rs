use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Operand
///
/// Comparison operand of one positional condition. `None` means the
/// position places no constraint on the attribute.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    #[default]
    None,
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
    Like,
}

impl Operand {
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Textual operands match on rendered text; the rest compare typed
    /// values.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Contains | Self::NotContains | Self::Like)
    }
}

///
/// Condition
///
/// One attribute constraint at one sequence position.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operand: Operand,
    pub value: Value,
}

impl Condition {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            operand: Operand::None,
            value: Value::Null,
        }
    }

    #[must_use]
    pub fn new(operand: Operand, value: impl Into<Value>) -> Self {
        Self {
            operand,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::new(Operand::Equals, value)
    }

    #[must_use]
    pub fn not_equals(value: impl Into<Value>) -> Self {
        Self::new(Operand::NotEquals, value)
    }

    #[must_use]
    pub fn greater_than(value: impl Into<Value>) -> Self {
        Self::new(Operand::GreaterThan, value)
    }

    #[must_use]
    pub fn less_than(value: impl Into<Value>) -> Self {
        Self::new(Operand::LessThan, value)
    }

    #[must_use]
    pub fn contains(value: impl Into<Value>) -> Self {
        Self::new(Operand::Contains, value)
    }

    #[must_use]
    pub fn like(value: impl Into<Value>) -> Self {
        Self::new(Operand::Like, value)
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.operand.is_none()
    }

    /// Parse the textual condition shorthand: a leading `<>`, `>=`,
    /// `>`, `<=`, `<`, `CONTAINS `, `NOT_CONTAINS `, or `LIKE ` selects
    /// the operand, a bare value means equality, and an empty string
    /// means no condition. Values parse as text literals; `%` inside a
    /// Like/Contains value is a wildcard.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::none();
        }
        let prefixes: [(&str, Operand); 8] = [
            ("<>", Operand::NotEquals),
            (">=", Operand::GreaterThanOrEqual),
            (">", Operand::GreaterThan),
            ("<=", Operand::LessThanOrEqual),
            ("<", Operand::LessThan),
            ("NOT_CONTAINS ", Operand::NotContains),
            ("CONTAINS ", Operand::Contains),
            ("LIKE ", Operand::Like),
        ];
        for (prefix, operand) in prefixes {
            if let Some(rest) = input.strip_prefix(prefix) {
                return Self::new(operand, Value::text(rest.trim_start()));
            }
        }
        Self::equals(Value::text(input))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.render_text();
        match self.operand {
            Operand::None => Ok(()),
            Operand::Equals => write!(f, "{value}"),
            Operand::NotEquals => write!(f, "<>{value}"),
            Operand::GreaterThan => write!(f, ">{value}"),
            Operand::GreaterThanOrEqual => write!(f, ">={value}"),
            Operand::LessThan => write!(f, "<{value}"),
            Operand::LessThanOrEqual => write!(f, "<={value}"),
            Operand::Contains => write!(f, "CONTAINS {value}"),
            Operand::NotContains => write!(f, "NOT_CONTAINS {value}"),
            Operand::Like => write!(f, "LIKE {value}"),
        }
    }
}
