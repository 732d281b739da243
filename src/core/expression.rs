//! Canonicalization of user-typed function expressions.
//!
//! Users write `2x**2 + 3x`, the solver and chart parsers want
//! `2*x^2+3*x`-style explicit operators. The sanitizer is a one-way parse
//! adapter: its output is meant for machines, not for echoing back to users.
//!
//! Two rule sets have shipped: the power-only rewrite and the later variant
//! that also inserts implicit multiplication. Both stay selectable through
//! [`SanitizeRules`].

use serde::{Deserialize, Serialize};

/// Toggles for the individual rewrite passes.
///
/// Passes run in declaration order: power normalization, then digit-letter
/// insertion, then letter-digit insertion. Only ASCII digits and ASCII
/// letters take part in the insertion passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeRules {
    /// Rewrite every `**` to `^`, scanning left to right without overlap.
    pub normalize_power: bool,
    /// `2x` -> `2*x`.
    pub digit_then_letter: bool,
    /// `x2` -> `x*2`. Also hits subscript-like names (`x1` -> `x*1`).
    pub letter_then_digit: bool,
}

impl SanitizeRules {
    /// The original rule set: `**` -> `^` only.
    pub const POWER_ONLY: Self = Self {
        normalize_power: true,
        digit_then_letter: false,
        letter_then_digit: false,
    };

    /// Power normalization plus implicit multiplication in both directions.
    pub const IMPLICIT_MULTIPLICATION: Self = Self {
        normalize_power: true,
        digit_then_letter: true,
        letter_then_digit: true,
    };

    #[must_use]
    pub fn inserts_multiplication(self) -> bool {
        self.digit_then_letter || self.letter_then_digit
    }
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self::IMPLICIT_MULTIPLICATION
    }
}

/// Stateless expression rewriter. Cheap to copy and share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpressionSanitizer {
    rules: SanitizeRules,
}

impl ExpressionSanitizer {
    #[must_use]
    pub const fn new(rules: SanitizeRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub const fn power_only() -> Self {
        Self::new(SanitizeRules::POWER_ONLY)
    }

    #[must_use]
    pub const fn with_implicit_multiplication(mut self, enabled: bool) -> Self {
        self.rules.digit_then_letter = enabled;
        self.rules.letter_then_digit = enabled;
        self
    }

    #[must_use]
    pub const fn rules(&self) -> SanitizeRules {
        self.rules
    }

    /// Applies the enabled passes and returns the rewritten expression.
    ///
    /// Never fails; an expression with nothing to rewrite comes back unchanged.
    /// The output is a fixed point: sanitizing it again yields the same text.
    #[must_use]
    pub fn sanitize(&self, expression: &str) -> String {
        let mut sanitized = if self.rules.normalize_power {
            expression.replace("**", "^")
        } else {
            expression.to_owned()
        };

        if self.rules.digit_then_letter {
            sanitized = insert_multiplication(&sanitized, is_digit, is_letter);
        }
        if self.rules.letter_then_digit {
            sanitized = insert_multiplication(&sanitized, is_letter, is_digit);
        }

        sanitized
    }
}

/// Sanitizes with the default (implicit multiplication) rules.
#[must_use]
pub fn sanitize_expression(expression: &str) -> String {
    ExpressionSanitizer::default().sanitize(expression)
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

// A match consumes both characters, but the right-hand character can never
// start another match of the same pass (the two classes are disjoint), so
// checking every adjacent pair equals a non-overlapping global replace.
fn insert_multiplication(input: &str, left: fn(char) -> bool, right: fn(char) -> bool) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 2);
    let mut previous = None::<char>;
    for ch in input.chars() {
        if previous.is_some_and(left) && right(ch) {
            out.push('*');
        }
        out.push(ch);
        previous = Some(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_power_operator_left_to_right() {
        let sanitizer = ExpressionSanitizer::power_only();
        assert_eq!(sanitizer.sanitize("x**2"), "x^2");
        assert_eq!(sanitizer.sanitize("x***2"), "x^*2");
        assert_eq!(sanitizer.sanitize("x****2"), "x^^2");
    }

    #[test]
    fn inserts_operator_around_multi_digit_numbers() {
        assert_eq!(sanitize_expression("12ab"), "12*ab");
        assert_eq!(sanitize_expression("x10"), "x*10");
        assert_eq!(sanitize_expression("1a2b"), "1*a*2*b");
    }

    #[test]
    fn non_ascii_letters_are_left_alone() {
        assert_eq!(sanitize_expression("2π"), "2π");
        assert_eq!(sanitize_expression("2x·π"), "2*x·π");
    }

    #[test]
    fn toggling_off_implicit_multiplication_matches_power_only() {
        let toggled = ExpressionSanitizer::default().with_implicit_multiplication(false);
        assert_eq!(toggled, ExpressionSanitizer::power_only());
        assert_eq!(toggled.sanitize("2x**3"), "2x^3");
    }

    #[test]
    fn rules_round_trip_through_serde() {
        let json = serde_json::to_string(&SanitizeRules::POWER_ONLY).expect("serialize");
        let rules: SanitizeRules = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(rules, SanitizeRules::POWER_ONLY);
        assert!(!rules.inserts_multiplication());
    }
}
