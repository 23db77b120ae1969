use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed identifier of the source site every record is scraped from.
pub const PLATFORM: &str = "foodpanda";

/// One restaurant entry discovered on the aggregator's results page,
/// normalized for output.
///
/// Records are built fresh per request from rendered page content and are
/// immutable once built; the fee-cap filter only includes or excludes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Source platform, always [`PLATFORM`].
    pub platform: String,
    /// Restaurant display name. Never empty in final output — cards without
    /// a name are skipped at build time.
    pub restaurant: String,
    /// Featured item or cuisine line shown on the card, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Currency amount before any discount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    /// `base_price * (100 - discount_pct) / 100`, rounded to 2 decimals,
    /// when both inputs are present and nonzero; otherwise equals
    /// `base_price`. See [`derive_discounted_price`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    /// Advertised discount percentage, 0–100 by convention (not clamped).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<f64>,
    /// Delivery fee in currency units; `0.0` denotes free delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
    /// Estimated delivery time in minutes; upper bound when the site shows
    /// a range like `"20-30 min"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_min: Option<f64>,
    /// Star rating, typically on a 0–5 scale. Passed through unvalidated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Absolute URL to the listing detail page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Extraction timestamp.
    pub last_seen: DateTime<Utc>,
}

impl ListingRecord {
    /// Returns `true` if the card advertised a nonzero discount.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_pct.is_some_and(|pct| pct > 0.0)
    }

    /// Returns `true` if the card advertised free delivery (fee of exactly 0).
    #[must_use]
    pub fn is_free_delivery(&self) -> bool {
        self.delivery_fee == Some(0.0)
    }
}

/// Derives the discounted price from a base price and a discount percentage.
///
/// Convention (applied everywhere, never mixed):
/// - both present and `pct > 0` → `base * (100 - pct) / 100`, rounded to
///   2 decimal places;
/// - base present, discount absent or zero → `base` unchanged;
/// - base absent → `None`, regardless of the discount.
#[must_use]
pub fn derive_discounted_price(base: Option<f64>, pct: Option<f64>) -> Option<f64> {
    let base = base?;
    match pct {
        Some(pct) if pct > 0.0 => Some(round2(base * (100.0 - pct) / 100.0)),
        _ => Some(base),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn make_record(fee: Option<f64>, pct: Option<f64>) -> ListingRecord {
        ListingRecord {
            platform: PLATFORM.to_string(),
            restaurant: "Kolachi".to_string(),
            item: Some("BBQ Platter".to_string()),
            base_price: Some(100.0),
            discounted_price: derive_discounted_price(Some(100.0), pct),
            discount_pct: pct,
            delivery_fee: fee,
            eta_min: Some(30.0),
            rating: Some(4.5),
            link: Some("https://www.foodpanda.pk/restaurant/x1ab/kolachi".to_string()),
            last_seen: Utc::now(),
        }
    }

    #[test]
    fn derive_applies_percentage_and_rounds() {
        assert_eq!(derive_discounted_price(Some(100.0), Some(20.0)), Some(80.0));
        assert_eq!(
            derive_discounted_price(Some(9.99), Some(15.0)),
            Some(8.49) // 8.4915 rounds down
        );
    }

    #[test]
    fn derive_without_discount_keeps_base() {
        assert_eq!(derive_discounted_price(Some(42.0), None), Some(42.0));
        assert_eq!(derive_discounted_price(Some(42.0), Some(0.0)), Some(42.0));
    }

    #[test]
    fn derive_without_base_is_absent() {
        assert_eq!(derive_discounted_price(None, Some(50.0)), None);
        assert_eq!(derive_discounted_price(None, None), None);
    }

    #[test]
    fn derived_price_never_exceeds_base() {
        for pct in [1.0, 25.0, 50.0, 99.0, 100.0] {
            let discounted = derive_discounted_price(Some(250.0), Some(pct)).unwrap();
            assert!(discounted <= 250.0, "pct {pct} gave {discounted}");
        }
    }

    #[test]
    fn has_discount_requires_nonzero_pct() {
        assert!(make_record(None, Some(20.0)).has_discount());
        assert!(!make_record(None, Some(0.0)).has_discount());
        assert!(!make_record(None, None).has_discount());
    }

    #[test]
    fn free_delivery_is_exactly_zero() {
        assert!(make_record(Some(0.0), None).is_free_delivery());
        assert!(!make_record(Some(5.0), None).is_free_delivery());
        assert!(!make_record(None, None).is_free_delivery());
    }

    #[test]
    fn absent_numerics_are_omitted_from_json() {
        let record = make_record(None, None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("delivery_fee").is_none());
        assert_eq!(json["restaurant"], "Kolachi");
        assert_eq!(json["platform"], "foodpanda");
    }
}
