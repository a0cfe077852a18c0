//! Arabic and Roman numeral extraction
//!
//! Chapter and page fields mix free text with the numeral ("Chapter 12",
//! "xiii", "1. Romans"). Digits are tried before Roman letters, so a
//! Roman-looking letter inside ordinary text does not shadow a real
//! Arabic number elsewhere in the field.

use crate::error::{CoreError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn arabic_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+").expect("arabic pattern is valid"))
}

// Canonical Roman grammar, anchored: a candidate token must be a Roman
// numeral in full, not merely contain Roman letters.
fn roman_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^M*(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$")
            .expect("roman pattern is valid")
    })
}

/// Extract the first maximal digit run, with an optional leading minus
/// sign. Returns `None` when the string contains no digits.
pub fn parse_arabic(s: &str) -> Option<i64> {
    arabic_pattern()
        .find(s)
        .and_then(|m| m.as_str().parse().ok())
}

/// Find the first alphabetic token that is a Roman numeral and convert
/// it. Returns `None` when no such token exists. The token must match
/// the canonical grammar in full, so the stray `d` in "Fred" is not a
/// numeral while the bare token "c" is.
pub fn parse_roman(s: &str) -> Option<i64> {
    roman_token(s).map(roman_value)
}

/// True when the string contains an embedded Arabic integer.
pub fn matches_arabic(s: &str) -> bool {
    arabic_pattern().is_match(s)
}

/// True when the string contains a Roman numeral token.
pub fn matches_roman(s: &str) -> bool {
    roman_token(s).is_some()
}

fn roman_token(s: &str) -> Option<&str> {
    s.split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
        .find(|token| roman_pattern().is_match(token))
}

/// Arabic first, Roman numeral as fallback. Fails with
/// [`CoreError::NumeralNotFound`] when neither form is present.
pub fn parse_flexible(s: &str) -> Result<i64> {
    if let Some(value) = parse_arabic(s) {
        return Ok(value);
    }
    parse_roman(s).ok_or_else(|| CoreError::NumeralNotFound {
        input: s.to_string(),
    })
}

/// Decimal value of a Roman numeral string, using the subtractive-pair
/// scan: a symbol smaller than its successor is subtracted, otherwise
/// added. Characters that are not Roman symbols count as 0, so a string
/// without any Roman letters yields 0.
pub fn roman_value(s: &str) -> i64 {
    let symbols: Vec<i64> = s.chars().map(roman_digit).collect();
    let mut total = 0;
    let mut i = 0;
    while i < symbols.len() {
        match symbols.get(i + 1) {
            Some(&next) if symbols[i] < next => {
                total += next - symbols[i];
                i += 2;
            }
            _ => {
                total += symbols[i];
                i += 1;
            }
        }
    }
    total
}

/// Value of a single Roman symbol, either case; 0 for anything else.
pub fn roman_digit(c: char) -> i64 {
    match c {
        'I' | 'i' => 1,
        'V' | 'v' => 5,
        'X' | 'x' => 10,
        'L' | 'l' => 50,
        'C' | 'c' => 100,
        'D' | 'd' => 500,
        'M' | 'm' => 1000,
        _ => 0,
    }
}
