//! Listing-card discovery over a rendered document.
//!
//! The target site's markup drifts without notice, so cards are located by
//! trying selector strategies in priority order — test-id attributes first,
//! vendor-specific containers next, a generic class-contains-"restaurant"
//! match last — and taking the first strategy that yields at least one
//! element. Strategies never mix: one winning strategy means one record per
//! card, with no element counted twice.

use scraper::{ElementRef, Html, Selector};

/// Hard cap on the number of cards considered per page, to bound work on
/// pathological documents.
pub const MAX_CARD_SCAN: usize = 120;

/// One card-discovery strategy: a name for logging and a CSS selector.
struct CardStrategy {
    name: &'static str,
    selector: &'static str,
}

/// Priority-ordered strategies, most specific first.
const CARD_STRATEGIES: &[CardStrategy] = &[
    CardStrategy {
        name: "vendor-tile-testid",
        selector: "li[data-testid*='vendor-tile']",
    },
    CardStrategy {
        name: "vendor-testid",
        selector: "[data-testid*='vendor']",
    },
    CardStrategy {
        name: "restaurant-testid",
        selector: "[data-testid*='restaurant']",
    },
    CardStrategy {
        name: "vendor-list-item",
        selector: "ul.vendor-list > li",
    },
    CardStrategy {
        name: "vendor-class",
        selector: "div[class*='vendor-tile']",
    },
    CardStrategy {
        name: "restaurant-anchor",
        selector: "a[class*='restaurant']",
    },
    CardStrategy {
        name: "restaurant-class",
        selector: "div[class*='restaurant']",
    },
];

/// Returns the candidate card elements of `doc`, in document order, capped
/// at [`MAX_CARD_SCAN`]. The first strategy with at least one match wins;
/// an empty vec means no strategy matched anything.
#[must_use]
pub fn locate_cards(doc: &Html) -> Vec<ElementRef<'_>> {
    for strategy in CARD_STRATEGIES {
        let Ok(selector) = Selector::parse(strategy.selector) else {
            // Selectors are compile-time literals; a parse failure is a bug
            // in this table, not in the page.
            tracing::warn!(selector = strategy.selector, "unparseable card selector");
            continue;
        };

        let cards: Vec<ElementRef<'_>> = doc.select(&selector).take(MAX_CARD_SCAN).collect();
        if !cards.is_empty() {
            tracing::debug!(
                strategy = strategy.name,
                count = cards.len(),
                "matched card strategy"
            );
            return cards;
        }
    }

    tracing::debug!("no card strategy matched");
    Vec::new()
}
