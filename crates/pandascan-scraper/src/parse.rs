//! Numeric extractors for the loosely-structured text found on listing cards.
//!
//! All functions are pure and total: "not found" is `None`, never an error,
//! and no input can make them panic. They use manual byte scanning rather
//! than `regex` to stay dependency-light; inputs are lowercased up front so
//! the scanners only deal with one case.

/// Maximum byte distance between a fee amount and its "delivery" label.
///
/// 24 bytes covers the observed card phrasings:
/// - `"Rs. 49 delivery"` (amount before label)
/// - `"delivery from Rs. 99"` (amount after label)
const DELIVERY_LABEL_WINDOW: usize = 24;

/// Maximum byte distance between an ETA value and its minute-unit token,
/// sized for range forms like `"20 - 30 min"`.
const ETA_WINDOW: usize = 12;

/// Maximum byte distance between a rating value and its star glyph.
const STAR_WINDOW: usize = 8;

/// Currency markers recognized by the fee extractor. Alphabetic tokens are
/// matched on word boundaries so `"hours"` never reads as `"rs"`.
const CURRENCY_TOKENS: &[&str] = &["rs", "pkr", "₨", "₹", "$", "€", "£"];

/// Phrasings that mean the delivery fee is exactly zero.
const FREE_DELIVERY_PHRASES: &[&str] = &["free delivery", "delivery free", "free-delivery"];

/// Star glyphs a rating may sit next to.
const STAR_GLYPHS: &[&str] = &["★", "⭐", "☆", "✩"];

/// Extracts the first currency-style amount from free text: a run of digits
/// with an optional decimal point, digit-grouping commas allowed
/// (`"1,250"` → `1250.0`).
///
/// Returns `None` when no number is present. `0` is never used to mean
/// "unknown" — it only appears when the text literally says `0`.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    first_number(text)
}

/// Extracts the first number immediately followed by a `%` token
/// (`"20% off"` → `20.0`). The value is not clamped to 0–100.
#[must_use]
pub fn parse_percent(text: &str) -> Option<f64> {
    let mut found = None;
    scan_numbers(text, |value, _, end| {
        let rest = text[end..].trim_start();
        if rest.starts_with('%') || rest.starts_with('％') {
            found = Some(value);
            true
        } else {
            false
        }
    });
    found
}

/// Extracts a delivery fee from card text.
///
/// Matching rules (case-insensitive):
/// 1. A "free delivery" phrase → `Some(0.0)`.
/// 2. A currency-marked amount within [`DELIVERY_LABEL_WINDOW`] bytes of a
///    `"delivery"` label, on either side; the amount closest to the label
///    wins (last before it, or first after it).
///
/// A bare number near "delivery" without a currency marker is ignored —
/// `"delivery in 30"` is an ETA, not a fee.
#[must_use]
pub fn parse_fee(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();

    if FREE_DELIVERY_PHRASES.iter().any(|p| lower.contains(p)) {
        return Some(0.0);
    }

    let mut search_from = 0usize;
    loop {
        let pos = search_from + lower[search_from..].find("delivery")?;
        search_from = pos + 1;

        let window_start = snap_boundary_forward(&lower, pos.saturating_sub(DELIVERY_LABEL_WINDOW));
        let window_end = snap_boundary_forward(
            &lower,
            (pos + "delivery".len() + DELIVERY_LABEL_WINDOW).min(lower.len()),
        );

        let before = &lower[window_start..pos];
        if let Some(value) = currency_amounts(before).pop() {
            return Some(value);
        }

        let after = &lower[pos + "delivery".len()..window_end];
        if let Some(value) = currency_amounts(after).first().copied() {
            return Some(value);
        }
    }
}

/// Extracts an estimated delivery time in minutes.
///
/// Recognizes a single value (`"30 min"`) or a low–high range
/// (`"20-30 min"`, `"25 – 40 mins"`); for a range the upper bound is
/// returned. Only the unit tokens themselves count: `"min"`, `"mins"`,
/// `"minute"`, `"minutes"`, each ending on a word boundary — so
/// `"vitamin"`, `"admin"`, and crucially `"minimum"` (as in
/// `"Rs 200 minimum order"`) never match.
#[must_use]
pub fn parse_eta_minutes(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();

    let mut search_from = 0usize;
    loop {
        let pos = search_from + lower[search_from..].find("min")?;
        search_from = pos + 1;

        let boundary_ok = pos == 0
            || !lower[..pos]
                .chars()
                .last()
                .is_some_and(char::is_alphanumeric);
        if !boundary_ok {
            continue;
        }
        if !is_minute_unit_tail(&lower[pos + "min".len()..]) {
            continue;
        }

        let window_start = snap_boundary_forward(&lower, pos.saturating_sub(ETA_WINDOW));
        let before = &lower[window_start..pos];
        // Last number before the unit is the range's upper bound.
        if let Some(value) = numbers_in(before).pop() {
            return Some(value);
        }
    }
}

/// Extracts a star rating from rating-labelled text.
///
/// Matching rules (case-insensitive):
/// 1. A number adjacent to a star glyph, e.g. `"★ 4.5"` or `"4.5★"`.
/// 2. Text containing a `"rating"` label, e.g. `"Rating: 4.2 out of 5"`.
/// 3. Bare numeric text as produced by dedicated rating nodes: `"4.5"`
///    or `"4.5/5"`.
///
/// The scale is passed through unvalidated.
#[must_use]
pub fn parse_rating(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();

    for glyph in STAR_GLYPHS {
        let Some(pos) = lower.find(glyph) else {
            continue;
        };
        let window_start = snap_boundary_forward(&lower, pos.saturating_sub(STAR_WINDOW));
        if let Some(value) = numbers_in(&lower[window_start..pos]).pop() {
            return Some(value);
        }
        let after_start = pos + glyph.len();
        let window_end =
            snap_boundary_forward(&lower, (after_start + STAR_WINDOW).min(lower.len()));
        if let Some(value) = first_number(&lower[after_start..window_end]) {
            return Some(value);
        }
    }

    if lower.contains("rating") {
        return first_number(&lower);
    }

    let bare = lower.trim().trim_end_matches("/5");
    if !bare.is_empty() && bare.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return first_number(bare);
    }

    None
}

// ---------------------------------------------------------------------------
// Internal scanning helpers
// ---------------------------------------------------------------------------

/// Scans `s` left to right for numbers (digit runs with an optional decimal
/// point; digit-grouping commas are consumed silently) and calls `on_match`
/// with `(value, start, end)` byte offsets for each one. Scanning stops when
/// `on_match` returns `true`.
fn scan_numbers(s: &str, mut on_match: impl FnMut(f64, usize, usize) -> bool) {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        let digit_start = bytes[i].is_ascii_digit()
            || (bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit());
        if !digit_start {
            i += 1;
            continue;
        }

        let start = i;
        let mut buf = String::new();
        let mut has_dot = false;
        while i < len {
            let b = bytes[i];
            if b.is_ascii_digit() {
                buf.push(b as char);
            } else if b == b'.' && !has_dot && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                has_dot = true;
                buf.push('.');
            } else if b == b',' && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                // digit-grouping comma, e.g. "1,250"
            } else {
                break;
            }
            i += 1;
        }

        if let Ok(value) = buf.parse::<f64>() {
            if on_match(value, start, i) {
                return;
            }
        }
    }
}

/// First number in `s`, if any.
fn first_number(s: &str) -> Option<f64> {
    let mut found = None;
    scan_numbers(s, |value, _, _| {
        found = Some(value);
        true
    });
    found
}

/// All numbers in `s` in left-to-right order.
fn numbers_in(s: &str) -> Vec<f64> {
    let mut values = Vec::new();
    scan_numbers(s, |value, _, _| {
        values.push(value);
        false
    });
    values
}

/// Currency-marked amounts in `s`, in order of their marker position.
///
/// An amount counts when it begins within a few bytes after a currency
/// token, allowing separators like `"Rs. 49"` or `"PKR: 120"`. Alphabetic
/// tokens require word boundaries on both sides.
fn currency_amounts(s: &str) -> Vec<f64> {
    let mut hits: Vec<(usize, f64)> = Vec::new();

    for token in CURRENCY_TOKENS {
        let mut search_from = 0usize;
        while let Some(rel) = s[search_from..].find(token) {
            let pos = search_from + rel;
            search_from = pos + token.len();

            if token.bytes().all(|b| b.is_ascii_alphabetic()) {
                let before_ok = pos == 0
                    || !s[..pos].chars().last().is_some_and(char::is_alphanumeric);
                let after = &s[pos + token.len()..];
                let after_ok = !after.chars().next().is_some_and(char::is_alphabetic);
                if !(before_ok && after_ok) {
                    continue;
                }
            }

            let tail = &s[pos + token.len()..];
            let lead: usize = tail
                .bytes()
                .take_while(|b| matches!(b, b' ' | b'.' | b':'))
                .count();
            if tail[lead..].chars().next().is_some_and(|c| c.is_ascii_digit()) {
                if let Some(value) = first_number(&tail[lead..]) {
                    hits.push((pos, value));
                }
            }
        }
    }

    hits.sort_by_key(|&(pos, _)| pos);
    hits.dedup_by_key(|&mut (pos, _)| pos);
    hits.into_iter().map(|(_, value)| value).collect()
}

/// Whether the text following a `"min"` prefix completes a minute unit
/// token rather than an unrelated word. Accepts an empty tail, a
/// non-alphabetic continuation (`"min."`, `"min/"`), or the suffixes
/// `"s"`, `"ute"`, `"utes"` ending on a word boundary.
fn is_minute_unit_tail(tail: &str) -> bool {
    let ends_token = |rest: &str| !rest.chars().next().is_some_and(char::is_alphabetic);

    ends_token(tail)
        || tail.strip_prefix('s').is_some_and(ends_token)
        || tail
            .strip_prefix("ute")
            .map(|rest| rest.strip_prefix('s').unwrap_or(rest))
            .is_some_and(ends_token)
}

/// Smallest valid UTF-8 boundary at or after `candidate`.
fn snap_boundary_forward(s: &str, candidate: usize) -> usize {
    (candidate..=s.len())
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_amount
    // -----------------------------------------------------------------------

    #[test]
    fn amount_plain_integer() {
        assert_eq!(parse_amount("Rs. 350"), Some(350.0));
    }

    #[test]
    fn amount_decimal() {
        assert_eq!(parse_amount("from 12.99"), Some(12.99));
    }

    #[test]
    fn amount_grouping_comma() {
        assert_eq!(parse_amount("Rs. 1,250 for two"), Some(1250.0));
    }

    #[test]
    fn amount_leading_dot() {
        assert_eq!(parse_amount(".5 kg"), Some(0.5));
    }

    #[test]
    fn amount_takes_first_of_many() {
        assert_eq!(parse_amount("Rs 100 was Rs 200"), Some(100.0));
    }

    #[test]
    fn amount_absent_returns_none() {
        assert_eq!(parse_amount("price on request"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn amount_non_ascii_no_panic() {
        assert_eq!(parse_amount("très bon — ₨ 450"), Some(450.0));
    }

    // -----------------------------------------------------------------------
    // parse_percent
    // -----------------------------------------------------------------------

    #[test]
    fn percent_basic() {
        assert_eq!(parse_percent("20% off"), Some(20.0));
    }

    #[test]
    fn percent_with_space() {
        assert_eq!(parse_percent("up to 35 % discount"), Some(35.0));
    }

    #[test]
    fn percent_skips_unmarked_numbers() {
        assert_eq!(parse_percent("2 for Rs 500, 15% off"), Some(15.0));
    }

    #[test]
    fn percent_not_clamped() {
        assert_eq!(parse_percent("110%"), Some(110.0));
    }

    #[test]
    fn percent_absent_returns_none() {
        assert_eq!(parse_percent("half price"), None);
        assert_eq!(parse_percent("100 percent-free text with no sign"), None);
    }

    // -----------------------------------------------------------------------
    // parse_fee
    // -----------------------------------------------------------------------

    #[test]
    fn fee_amount_before_label() {
        assert_eq!(parse_fee("Rs. 49 delivery"), Some(49.0));
    }

    #[test]
    fn fee_amount_after_label() {
        assert_eq!(parse_fee("Delivery from Rs. 99"), Some(99.0));
    }

    #[test]
    fn fee_free_delivery_is_zero() {
        assert_eq!(parse_fee("Free delivery on orders above Rs. 500"), Some(0.0));
    }

    #[test]
    fn fee_symbol_currency() {
        assert_eq!(parse_fee("$ 2.99 delivery fee"), Some(2.99));
    }

    #[test]
    fn fee_ignores_uncurrencied_numbers() {
        // "30" is an ETA, not a fee: no currency marker.
        assert_eq!(parse_fee("delivery in 30 min"), None);
    }

    #[test]
    fn fee_rs_inside_word_is_not_currency() {
        assert_eq!(parse_fee("delivery hours 24"), None);
    }

    #[test]
    fn fee_absent_returns_none() {
        assert_eq!(parse_fee("pickup only"), None);
        assert_eq!(parse_fee(""), None);
    }

    #[test]
    fn fee_amount_far_from_label_ignored() {
        // Rs 500 is a minimum-order note well outside the label window.
        assert_eq!(
            parse_fee("minimum order Rs 500 · see menu for details · delivery"),
            None
        );
    }

    // -----------------------------------------------------------------------
    // parse_eta_minutes
    // -----------------------------------------------------------------------

    #[test]
    fn eta_single_value() {
        assert_eq!(parse_eta_minutes("30 min"), Some(30.0));
    }

    #[test]
    fn eta_range_takes_upper_bound() {
        assert_eq!(parse_eta_minutes("20-30 min"), Some(30.0));
    }

    #[test]
    fn eta_range_with_en_dash_and_spaces() {
        assert_eq!(parse_eta_minutes("25 – 40 mins"), Some(40.0));
    }

    #[test]
    fn eta_minutes_long_form() {
        assert_eq!(parse_eta_minutes("about 45 minutes"), Some(45.0));
    }

    #[test]
    fn eta_vitamin_is_not_a_unit() {
        assert_eq!(parse_eta_minutes("vitamin water 500"), None);
    }

    #[test]
    fn eta_min_order_without_preceding_number() {
        assert_eq!(parse_eta_minutes("min. order Rs 200"), None);
    }

    #[test]
    fn eta_minimum_order_amount_is_not_an_eta() {
        assert_eq!(parse_eta_minutes("Rs 200 minimum order"), None);
    }

    #[test]
    fn eta_mining_is_not_a_unit() {
        assert_eq!(parse_eta_minutes("24 mining rigs"), None);
    }

    #[test]
    fn eta_unit_followed_by_punctuation_still_matches() {
        assert_eq!(parse_eta_minutes("arrives in 35 min."), Some(35.0));
    }

    #[test]
    fn eta_absent_returns_none() {
        assert_eq!(parse_eta_minutes("open all day"), None);
    }

    // -----------------------------------------------------------------------
    // parse_rating
    // -----------------------------------------------------------------------

    #[test]
    fn rating_star_before_value() {
        assert_eq!(parse_rating("★ 4.5"), Some(4.5));
    }

    #[test]
    fn rating_value_before_star() {
        assert_eq!(parse_rating("4.7★ (500+)"), Some(4.7));
    }

    #[test]
    fn rating_labelled_text() {
        assert_eq!(parse_rating("Rating: 4.2 out of 5"), Some(4.2));
    }

    #[test]
    fn rating_bare_decimal() {
        assert_eq!(parse_rating("4.5"), Some(4.5));
    }

    #[test]
    fn rating_out_of_five_suffix() {
        assert_eq!(parse_rating("4.5/5"), Some(4.5));
    }

    #[test]
    fn rating_plain_sentence_returns_none() {
        assert_eq!(parse_rating("20-30 min from you"), None);
    }

    #[test]
    fn rating_absent_returns_none() {
        assert_eq!(parse_rating("new on foodpanda"), None);
        assert_eq!(parse_rating(""), None);
    }
}
