/// Shown in place of an empty line-item description.
pub const NO_DESCRIPTION: &str = "(no description)";

/// Appended to text cut short by [`truncate`].
pub const ELLIPSIS: &str = "...";

/// Two-decimal, non-localized currency text.
///
/// Rounds half away from zero at the cent, working on the shortest
/// decimal text that reads back as `value`. `94.995` is stored as
/// 94.99499... but prints as `95.00`, while `1.0049999995` prints as
/// `1.00`. Amounts that round to zero cents never carry a minus sign.
/// Non-finite values print as `NaN`, `inf` or `-inf`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // `Display` for f64 never uses exponent notation.
    let text = value.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac.as_bytes();

    let mut digits: Vec<u8> = whole.bytes().map(|b| b - b'0').collect();
    digits.extend((0..2).map(|i| frac.get(i).map_or(0, |b| b - b'0')));
    if frac.get(2).is_some_and(|b| *b >= b'5') {
        round_up(&mut digits);
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|d| *d != 0) {
        out.push('-');
    }
    let (units, cents) = digits.split_at(digits.len() - 2);
    out.extend(units.iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.extend(cents.iter().map(|d| char::from(b'0' + d)));
    out
}

/// Add one to the last digit, carrying leftwards.
fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

/// Returns `text` unchanged if it has at most `max_len` characters,
/// otherwise its first `max_len - 3` characters followed by `...`.
/// Budgets too small for the marker keep the first `max_len`
/// characters and drop the marker.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < ELLIPSIS.len() {
        return text.chars().take(max_len).collect();
    }
    let mut out: String = text.chars().take(max_len - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Description cell text: placeholder for empty input, then truncated.
pub fn describe(description: &str, max_len: usize) -> String {
    if description.is_empty() {
        truncate(NO_DESCRIPTION, max_len)
    } else {
        truncate(description, max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(75.0), "75.00");
        assert_eq!(format_money(1930.0), "1930.00");
        assert_eq!(format_money(96.5), "96.50");
        assert_eq!(format_money(2026.5), "2026.50");
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(format_money(94.995), "95.00");
        assert_eq!(format_money(0.125), "0.13");
        assert_eq!(format_money(-0.125), "-0.13");
    }

    #[test]
    fn money_does_not_round_up_below_a_half() {
        assert_eq!(format_money(1.0049999995), "1.00");
        assert_eq!(format_money(0.0049999999), "0.00");
        assert_eq!(format_money(0.005), "0.01");
        assert_eq!(format_money(99.995), "100.00");
        assert_eq!(format_money(0.995), "1.00");
    }

    #[test]
    fn money_keeps_large_amounts_exact() {
        assert_eq!(format_money(1e17), "100000000000000000.00");
        assert_eq!(format_money(-9.5e18), "-9500000000000000000.00");
        assert_eq!(format_money(f64::MAX).len(), 309 + 3);
    }

    #[test]
    fn money_spells_out_non_finite_values() {
        assert_eq!(format_money(f64::NAN), "NaN");
        assert_eq!(format_money(f64::INFINITY), "inf");
        assert_eq!(format_money(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn money_preserves_sign() {
        assert_eq!(format_money(-2.5), "-2.50");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn truncate_at_budget_is_unchanged() {
        let text = "a".repeat(28);
        assert_eq!(truncate(&text, 28), text);
    }

    #[test]
    fn truncate_one_over_budget() {
        let text = "Front and rear brake cables!";
        assert_eq!(text.len(), 28);
        let over = format!("{}x", text);
        let cut = truncate(&over, 28);
        assert_eq!(cut, "Front and rear brake cabl...");
        assert_eq!(cut.chars().count(), 28);
    }

    #[test]
    fn truncate_below_marker_length_drops_marker() {
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("abcdef", 0), "");
        assert_eq!(truncate("abcdef", 3), "...");
        assert_eq!(truncate("ab", 2), "ab");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", 5), "\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}");
        assert_eq!(truncate("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}", 5), "\u{e9}\u{e9}...");
    }

    #[test]
    fn empty_description_uses_placeholder() {
        assert_eq!(describe("", 28), NO_DESCRIPTION);
        assert_eq!(describe("", 10), "(no des...");
        assert_eq!(describe("Labor 3hrs", 42), "Labor 3hrs");
    }

    proptest! {
        #[test]
        fn truncated_text_never_exceeds_budget(text in "\\PC{0,80}", budget in 0usize..60) {
            let cut = truncate(&text, budget);
            prop_assert!(cut.chars().count() <= budget);
            if text.chars().count() > budget {
                prop_assert_eq!(cut.chars().count(), budget);
                if budget >= ELLIPSIS.len() {
                    prop_assert!(cut.ends_with(ELLIPSIS));
                }
            } else {
                prop_assert_eq!(cut, text);
            }
        }

        #[test]
        fn whole_cents_format_exactly(cents in -10_000_000i64..10_000_000) {
            let text = format_money(cents as f64 / 100.0);
            let expected = format!(
                "{}{}.{:02}",
                if cents < 0 { "-" } else { "" },
                cents.unsigned_abs() / 100,
                cents.unsigned_abs() % 100
            );
            prop_assert_eq!(text, expected);
        }
    }
}
