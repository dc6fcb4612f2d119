//! Raw price text normalization.
//!
//! Store pages render prices in many shapes: `"1,250 EGP"`, `"EGP 999.50"`,
//! `"12,500 جنيه"` with right-to-left marks, `"١٢٥٠٠ ج.م"` in Arabic-Indic
//! digits, non-breaking spaces between the amount and the currency, and so
//! on. Everything here reduces such a snippet to a plain non-negative number,
//! or to nothing.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Unicode spacing and direction marks that show up around prices.
pub const SPACE_VARIANTS: [char; 4] = ['\u{00a0}', '\u{200f}', '\u{200e}', '\u{202f}'];

/// Currency tokens stripped before the number is read.
static CURRENCY_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(EGP\.?|ج\.م|جنيه|ريال|درهم|SAR|AED|USD)").unwrap()
});

/// First decimal number, with an optional attached minus sign.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());

/// Normalizes a scraped price snippet into a number.
///
/// Returns `None` when the input is absent, contains no number, or the
/// number is negative or not finite. Zero is a valid result; it is up to the
/// caller to decide whether a zero price is meaningful.
pub fn normalize(raw: Option<&str>) -> Option<f64> {
    let text = raw?;
    if text.trim().is_empty() {
        return None;
    }

    let cleaned = clean(text);
    let number = NUMBER.find(&cleaned)?;
    let value: f64 = number.as_str().parse().ok()?;

    if !value.is_finite() || value < 0.0 || number.as_str().starts_with('-') {
        return None;
    }

    Some(value)
}

/// Convenience wrapper for text that is always present.
pub fn normalize_str(raw: &str) -> Option<f64> {
    normalize(Some(raw))
}

/// Arabic thousands separator.
const ARABIC_THOUSANDS: char = '\u{066c}';
/// Arabic decimal separator.
const ARABIC_DECIMAL: char = '\u{066b}';

/// Replaces spacing variants and Arabic-Indic digits, drops thousands
/// separators and currency tokens.
fn clean(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| *c != ',' && *c != ARABIC_THOUSANDS)
        .map(|c| match c {
            c if SPACE_VARIANTS.contains(&c) => ' ',
            ARABIC_DECIMAL => '.',
            c => ascii_digit(c).unwrap_or(c),
        })
        .collect();
    CURRENCY_TOKENS.replace_all(&mapped, " ").into_owned()
}

/// Maps Arabic-Indic (U+0660..) and Eastern Arabic-Indic (U+06F0..) digits to ASCII.
fn ascii_digit(c: char) -> Option<char> {
    let offset = match c {
        '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
        '\u{06f0}'..='\u{06f9}' => c as u32 - 0x06f0,
        _ => return None,
    };
    char::from_digit(offset, 10)
}
