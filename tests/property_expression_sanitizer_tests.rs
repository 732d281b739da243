use numlab::core::ExpressionSanitizer;
use proptest::prelude::*;

fn expression_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9a-zA-Z*^+\\-/() .π]{0,48}").expect("valid regex")
}

fn has_adjacent(text: &str, left: fn(char) -> bool, right: fn(char) -> bool) -> bool {
    text.chars()
        .zip(text.chars().skip(1))
        .any(|(a, b)| left(a) && right(b))
}

proptest! {
    #[test]
    fn power_only_variant_is_idempotent(input in expression_strategy()) {
        let sanitizer = ExpressionSanitizer::power_only();
        let once = sanitizer.sanitize(&input);
        prop_assert_eq!(sanitizer.sanitize(&once), once);
    }

    #[test]
    fn implicit_multiplication_variant_is_idempotent(input in expression_strategy()) {
        let sanitizer = ExpressionSanitizer::default();
        let once = sanitizer.sanitize(&input);
        prop_assert_eq!(sanitizer.sanitize(&once), once);
    }

    #[test]
    fn output_has_no_power_pairs_or_implicit_products(input in expression_strategy()) {
        let out = ExpressionSanitizer::default().sanitize(&input);
        let digit = |c: char| c.is_ascii_digit();
        let letter = |c: char| c.is_ascii_alphabetic();
        prop_assert!(!out.contains("**"));
        prop_assert!(!has_adjacent(&out, digit, letter));
        prop_assert!(!has_adjacent(&out, letter, digit));
    }

    #[test]
    fn only_stars_are_added(input in expression_strategy()) {
        let out = ExpressionSanitizer::default().sanitize(&input);
        let power_only = ExpressionSanitizer::power_only().sanitize(&input);
        let stripped: String = out.chars().filter(|c| *c != '*').collect();
        let expected: String = power_only.chars().filter(|c| *c != '*').collect();
        prop_assert_eq!(stripped, expected);
    }
}
