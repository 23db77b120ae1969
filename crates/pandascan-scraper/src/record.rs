//! Builds [`ListingRecord`]s from located card elements.
//!
//! Field extraction is best-effort: each field is probed through a short
//! list of sub-selectors and falls back to the card's full text where the
//! pattern carries its own label (fee, ETA, discount). A card that yields
//! no display name is treated as a non-card element incidentally matched by
//! a broad selector and skipped — never an error.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};

use pandascan_core::{derive_discounted_price, ListingRecord, PLATFORM};

use crate::cards::locate_cards;
use crate::parse::{parse_amount, parse_eta_minutes, parse_fee, parse_percent, parse_rating};

const NAME_SELECTORS: &[&str] = &[
    "[data-testid*='name']",
    "figcaption",
    "h2",
    "h3",
    "[class*='name']",
];

const ITEM_SELECTORS: &[&str] = &[
    "[data-testid*='cuisine']",
    "[class*='cuisine']",
    "[class*='characteristic']",
    "p",
];

const PRICE_SELECTORS: &[&str] = &["[data-testid*='price']", "[class*='price']"];

const DISCOUNT_SELECTORS: &[&str] = &[
    "[data-testid*='discount']",
    "[class*='discount']",
    "[class*='deal']",
    "[class*='badge']",
];

const FEE_SELECTORS: &[&str] = &["[data-testid*='delivery-fee']", "[class*='delivery-fee']"];

const ETA_SELECTORS: &[&str] = &[
    "[data-testid*='delivery-time']",
    "[class*='delivery-time']",
    "[class*='time']",
];

const RATING_SELECTORS: &[&str] = &["[data-testid*='rating']", "[class*='rating']"];

/// Extracts up to `max` listing records from a rendered HTML document.
///
/// `origin` is the site origin (scheme + host) used to absolutize
/// root-relative card links. The cap is a hard stop: card iteration ends
/// as soon as `max` records have been accepted.
#[must_use]
pub fn extract_listings(html: &str, origin: &str, max: usize) -> Vec<ListingRecord> {
    let doc = Html::parse_document(html);
    let now = Utc::now();

    let mut records = Vec::new();
    for card in locate_cards(&doc) {
        if records.len() >= max {
            break;
        }
        if let Some(record) = build_record(card, origin, now) {
            records.push(record);
        }
    }

    tracing::debug!(count = records.len(), "extracted listing records");
    records
}

/// Attempts to build one record from a candidate card element.
///
/// Returns `None` when the card has no display name.
#[must_use]
pub fn build_record(
    card: ElementRef<'_>,
    origin: &str,
    now: DateTime<Utc>,
) -> Option<ListingRecord> {
    let restaurant = first_text(card, NAME_SELECTORS)?;

    // Label-carrying patterns (fee, ETA, discount, stars) can match against
    // the card's full text when no dedicated node exists.
    let card_text: String = card.text().collect::<Vec<_>>().join(" ");

    let base_price = first_text(card, PRICE_SELECTORS)
        .as_deref()
        .and_then(parse_amount);
    let discount_pct = first_text(card, DISCOUNT_SELECTORS)
        .as_deref()
        .and_then(parse_percent)
        .or_else(|| parse_percent(&card_text));
    let delivery_fee = first_text(card, FEE_SELECTORS)
        .as_deref()
        .and_then(parse_fee)
        .or_else(|| parse_fee(&card_text));
    let eta_min = first_text(card, ETA_SELECTORS)
        .as_deref()
        .and_then(parse_eta_minutes)
        .or_else(|| parse_eta_minutes(&card_text));
    let rating = first_text(card, RATING_SELECTORS)
        .as_deref()
        .and_then(parse_rating)
        .or_else(|| aria_label_rating(card))
        .or_else(|| parse_rating(&card_text));

    Some(ListingRecord {
        platform: PLATFORM.to_string(),
        restaurant,
        item: first_text(card, ITEM_SELECTORS),
        base_price,
        discounted_price: derive_discounted_price(base_price, discount_pct),
        discount_pct,
        delivery_fee,
        eta_min,
        rating,
        link: card_link(card).and_then(|href| absolutize(&href, origin)),
        last_seen: now,
    })
}

/// First non-empty text content among `selectors`, tried in order.
fn first_text(card: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    for sel in selectors {
        let Ok(selector) = Selector::parse(sel) else {
            continue;
        };
        for element in card.select(&selector) {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// The card's own `href` when the card is an anchor, else the first
/// descendant anchor's `href`.
fn card_link(card: ElementRef<'_>) -> Option<String> {
    if card.value().name() == "a" {
        if let Some(href) = card.value().attr("href") {
            return Some(href.to_string());
        }
    }
    let selector = Selector::parse("a[href]").ok()?;
    card.select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Normalizes a card href to an absolute URL.
///
/// Already-absolute URLs pass through; root-relative paths are prefixed
/// with the site origin; anything else (fragments, `javascript:`,
/// non-root-relative paths) is dropped.
fn absolutize(href: &str, origin: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    if href.starts_with('/') {
        return Some(format!("{}{}", origin.trim_end_matches('/'), href));
    }
    None
}

/// Rating read from an `aria-label` attribute mentioning "rating",
/// e.g. `aria-label="Rating 4.5 out of 5"`.
fn aria_label_rating(card: ElementRef<'_>) -> Option<f64> {
    let selector = Selector::parse("[aria-label]").ok()?;
    card.select(&selector)
        .chain(std::iter::once(card))
        .filter_map(|el| el.value().attr("aria-label"))
        .find(|label| label.to_lowercase().contains("rating"))
        .and_then(parse_amount)
}
