//! Operand evaluation semantics: typed ordering for the comparison
//! family, rendered-text matching for the substring/wildcard family.

use crate::{query::Operand, value::Value};
use std::cmp::Ordering;

/// Evaluate one operand against an actual attribute value. `None`
/// operands always hold; incomparable values never do.
#[must_use]
pub(crate) fn condition_holds(operand: Operand, actual: &Value, literal: &Value) -> bool {
    match operand {
        Operand::None => true,
        Operand::Equals => compare_eq(actual, literal),
        Operand::NotEquals => !compare_eq(actual, literal),
        Operand::GreaterThan => compare_order(actual, literal, Ordering::is_gt),
        Operand::GreaterThanOrEqual => compare_order(actual, literal, Ordering::is_ge),
        Operand::LessThan => compare_order(actual, literal, Ordering::is_lt),
        Operand::LessThanOrEqual => compare_order(actual, literal, Ordering::is_le),
        Operand::Contains => text_contains(actual, literal),
        Operand::NotContains => !text_contains(actual, literal),
        Operand::Like => like_matches(actual, literal),
    }
}

fn compare_eq(actual: &Value, literal: &Value) -> bool {
    actual.compare(literal) == Some(Ordering::Equal)
}

fn compare_order(actual: &Value, literal: &Value, accept: fn(Ordering) -> bool) -> bool {
    actual.compare(literal).is_some_and(accept)
}

/// Substring matching on rendered text. The literal is implicitly
/// wrapped in wildcards, so `%` inside it widens the match further.
fn text_contains(actual: &Value, literal: &Value) -> bool {
    let pattern = literal.render_text();
    if pattern.contains('%') {
        like_match_text(&actual.render_text(), &format!("%{pattern}%"))
    } else {
        actual.render_text().contains(pattern.as_ref())
    }
}

/// Wildcard matching on rendered text: `%` matches any (possibly
/// empty) run of characters; everything else is literal.
fn like_matches(actual: &Value, literal: &Value) -> bool {
    like_match_text(&actual.render_text(), &literal.render_text())
}

fn like_match_text(text: &str, pattern: &str) -> bool {
    if !pattern.contains('%') {
        return text == pattern;
    }
    let segments: Vec<&str> = pattern.split('%').collect();
    let first = segments[0];
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };
    let last = segments[segments.len() - 1];
    for segment in &segments[1..segments.len() - 1] {
        if segment.is_empty() {
            continue;
        }
        match rest.find(segment) {
            Some(at) => rest = &rest[at + segment.len()..],
            None => return false,
        }
    }
    last.is_empty() || rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(s: &str) -> Value {
        Value::text(s)
    }

    #[test]
    fn equals_and_not_equals_on_text() {
        assert!(condition_holds(Operand::Equals, &txt("dog"), &txt("dog")));
        assert!(!condition_holds(Operand::Equals, &txt("dog"), &txt("Dog")));
        assert!(condition_holds(Operand::NotEquals, &txt("dog"), &txt("cat")));
    }

    #[test]
    fn ordering_operands_use_typed_comparison() {
        assert!(condition_holds(
            Operand::GreaterThan,
            &Value::Integer(120),
            &txt("90")
        ));
        assert!(condition_holds(
            Operand::LessThanOrEqual,
            &Value::float(1.5),
            &Value::float(1.5)
        ));
        // incomparable values never satisfy an ordering operand
        assert!(!condition_holds(
            Operand::GreaterThan,
            &Value::Bool(true),
            &Value::Integer(0)
        ));
    }

    #[test]
    fn contains_is_substring_on_rendered_text() {
        assert!(condition_holds(Operand::Contains, &txt("barks"), &txt("bar")));
        assert!(!condition_holds(Operand::Contains, &txt("dog"), &txt("bar")));
        assert!(condition_holds(
            Operand::NotContains,
            &txt("dog"),
            &txt("bar")
        ));
        assert!(condition_holds(
            Operand::Contains,
            &Value::Integer(1234),
            &txt("23")
        ));
    }

    #[test]
    fn contains_honours_embedded_wildcards() {
        assert!(condition_holds(
            Operand::Contains,
            &txt("barking dogs"),
            &txt("bark%dog")
        ));
        assert!(!condition_holds(
            Operand::Contains,
            &txt("dogs barking"),
            &txt("bark%dog")
        ));
    }

    #[test]
    fn like_requires_full_match_between_wildcards() {
        assert!(condition_holds(Operand::Like, &txt("barks"), &txt("bar%")));
        assert!(condition_holds(Operand::Like, &txt("barks"), &txt("%rks")));
        assert!(condition_holds(Operand::Like, &txt("barks"), &txt("b%k%")));
        assert!(!condition_holds(Operand::Like, &txt("barks"), &txt("bar")));
        assert!(condition_holds(Operand::Like, &txt("bar"), &txt("bar")));
        assert!(!condition_holds(Operand::Like, &txt("embark"), &txt("bar%")));
    }

    #[test]
    fn like_handles_adjacent_and_edge_wildcards() {
        assert!(condition_holds(Operand::Like, &txt("abc"), &txt("%%")));
        assert!(condition_holds(Operand::Like, &txt(""), &txt("%")));
        assert!(condition_holds(Operand::Like, &txt("abcbc"), &txt("a%bc")));
        assert!(!condition_holds(Operand::Like, &txt("ab"), &txt("a%bc")));
    }
}
