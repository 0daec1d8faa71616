//! Identity-key ordering.
//!
//! Item codes mix letters, digits and punctuation (`A-10`, `a_7`, `X2`). The
//! report lists them in the order a person expects from a locale-aware sort:
//! case is ignored at first, punctuation sorts before digits and digits
//! before letters. Punctuation marks follow the root collation order, so `_`
//! sorts before `-` and `-` before `(`. Digits are compared one character at
//! a time, so `X10` sorts before `X2`.

use std::cmp::Ordering;

use crate::config::KeyOrder;

/// Compare two identity keys under the given ordering.
pub fn compare_keys(a: &str, b: &str, order: KeyOrder) -> Ordering {
    match order {
        KeyOrder::Locale => locale_cmp(a, b),
        KeyOrder::Ordinal => a.cmp(b),
    }
}

/// Locale-aware comparison.
///
/// Three levels, each consulted only when the previous one ties:
/// 1. character class (whitespace, punctuation/symbol, digit, letter), then
///    the rank of the character within its class;
/// 2. at the first position differing only in case, lowercase first;
/// 3. code-point order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

/// Punctuation and symbols in root collation order.
const SYMBOL_ORDER: &[char] = &[
    '_', '-', ',', ';', ':', '!', '?', '.', '\'', '"', '(', ')', '[', ']', '{', '}', '@', '*',
    '/', '\\', '&', '#', '%', '`', '^', '+', '<', '=', '>', '|', '~', '$',
];

fn primary_weight(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        (0, c as u32)
    } else if c.is_numeric() {
        (2, c as u32)
    } else if c.is_alphabetic() {
        (3, c.to_lowercase().next().unwrap_or(c) as u32)
    } else {
        (1, symbol_rank(c))
    }
}

/// Listed symbols first in table order; anything else after them by code point.
fn symbol_rank(c: char) -> u32 {
    match SYMBOL_ORDER.iter().position(|s| *s == c) {
        Some(pos) => pos as u32,
        None => SYMBOL_ORDER.len() as u32 + c as u32,
    }
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(keys: &[&str], order: KeyOrder) -> Vec<String> {
        let mut v: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        v.sort_by(|a, b| compare_keys(a, b, order));
        v
    }

    #[test]
    fn case_insensitive_primary() {
        assert_eq!(sorted(&["b1", "A2", "a1"], KeyOrder::Locale), ["a1", "A2", "b1"]);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_cmp("x1", "X1"), Ordering::Less);
        assert_eq!(locale_cmp("X1", "x1"), Ordering::Greater);
    }

    #[test]
    fn digits_compared_characterwise() {
        assert_eq!(sorted(&["X2", "X10", "X1"], KeyOrder::Locale), ["X1", "X10", "X2"]);
    }

    #[test]
    fn punctuation_before_digits_before_letters() {
        assert_eq!(sorted(&["a", "1", "_"], KeyOrder::Locale), ["_", "1", "a"]);
        // Code-point order would put `_` between upper and lower case.
        assert_eq!(sorted(&["a", "B", "_"], KeyOrder::Ordinal), ["B", "_", "a"]);
    }

    #[test]
    fn punctuation_in_collation_order() {
        assert_eq!(
            sorted(&["A(1", "A-1", "A_1"], KeyOrder::Locale),
            ["A_1", "A-1", "A(1"]
        );
        assert_eq!(
            sorted(&["SM$1", "SM/1", "SM.1", "SM-1"], KeyOrder::Locale),
            ["SM-1", "SM.1", "SM/1", "SM$1"]
        );
        assert_eq!(locale_cmp("A-1", "A-1"), Ordering::Equal);
    }

    #[test]
    fn unlisted_symbols_after_listed() {
        assert_eq!(locale_cmp("A$", "A€"), Ordering::Less);
        assert_eq!(locale_cmp("A€", "A0"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(locale_cmp("X1", "X1A"), Ordering::Less);
    }

    #[test]
    fn hangul_after_latin() {
        assert_eq!(sorted(&["갤럭시", "Z"], KeyOrder::Locale), ["Z", "갤럭시"]);
    }

    #[test]
    fn equal_only_for_identical_strings() {
        assert_eq!(locale_cmp("X1", "X1"), Ordering::Equal);
        assert_ne!(locale_cmp("x1", "X1"), Ordering::Equal);
    }
}
