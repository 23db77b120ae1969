//! Inbound scrape parameters and the outbound response payloads.
//!
//! The transport layer (out of scope here) is expected to construct a
//! [`ScrapeRequest`], call the scraper, and relay the [`ScrapeResponse`]
//! or a typed error verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::listing::ListingRecord;

/// Hard bounds for the requested result count. Values outside the range are
/// clamped, not rejected.
pub const MAX_RESULTS_FLOOR: usize = 1;
pub const MAX_RESULTS_CEIL: usize = 50;

/// Parameters for one scrape invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Search query. Required, must be non-empty after trimming.
    pub query: String,
    /// Display-only location label echoed back in the response.
    pub location: String,
    /// Maximum number of records to return, clamped to 1–50.
    pub max: usize,
    /// Delivery-fee cap in currency units; records above it are dropped.
    pub fee_cap: f64,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("query must be a non-empty string")]
    EmptyQuery,
}

impl ScrapeRequest {
    /// Validates the request and clamps `max` into its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyQuery`] if `query` is empty or
    /// whitespace-only. No scrape should be attempted in that case.
    pub fn validate(mut self) -> Result<Self, RequestError> {
        if self.query.trim().is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        self.max = self.max.clamp(MAX_RESULTS_FLOOR, MAX_RESULTS_CEIL);
        Ok(self)
    }
}

/// Descriptive metadata attached to a zero-result response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeMeta {
    pub platform: String,
    pub site_root: String,
}

/// Outcome of a scrape that completed without technical failure.
///
/// Zero records is a valid, reported outcome — not an error — so it is
/// modelled as its own variant with a human-readable message instead of
/// being forced through the error channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeResponse {
    Results {
        query: String,
        location: String,
        count: usize,
        items: Vec<ListingRecord>,
    },
    Empty {
        message: String,
        items: Vec<ListingRecord>,
        meta: ScrapeMeta,
    },
}

impl ScrapeResponse {
    /// Builds the appropriate variant for `items`, echoing the request.
    #[must_use]
    pub fn from_items(request: &ScrapeRequest, items: Vec<ListingRecord>, meta: ScrapeMeta) -> Self {
        if items.is_empty() {
            Self::Empty {
                message: format!("no listings found for \"{}\"", request.query),
                items,
                meta,
            }
        } else {
            Self::Results {
                query: request.query.clone(),
                location: request.location.clone(),
                count: items.len(),
                items,
            }
        }
    }

    /// Number of records carried by this response.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Results { items, .. } | Self::Empty { items, .. } => items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(query: &str, max: usize) -> ScrapeRequest {
        ScrapeRequest {
            query: query.to_string(),
            location: "Karachi".to_string(),
            max,
            fee_cap: 10.0,
        }
    }

    #[test]
    fn validate_rejects_empty_query() {
        assert!(matches!(
            make_request("", 10).validate(),
            Err(RequestError::EmptyQuery)
        ));
    }

    #[test]
    fn validate_rejects_whitespace_query() {
        assert!(matches!(
            make_request("   ", 10).validate(),
            Err(RequestError::EmptyQuery)
        ));
    }

    #[test]
    fn validate_clamps_max_into_range() {
        assert_eq!(make_request("biryani", 0).validate().unwrap().max, 1);
        assert_eq!(make_request("biryani", 500).validate().unwrap().max, 50);
        assert_eq!(make_request("biryani", 25).validate().unwrap().max, 25);
    }

    #[test]
    fn from_items_empty_carries_message_and_meta() {
        let request = make_request("biryani", 10);
        let meta = ScrapeMeta {
            platform: "foodpanda".to_string(),
            site_root: "https://www.foodpanda.pk".to_string(),
        };
        let response = ScrapeResponse::from_items(&request, vec![], meta);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["message"].as_str().unwrap().contains("biryani"));
        assert_eq!(json["items"].as_array().unwrap().len(), 0);
        assert_eq!(json["meta"]["platform"], "foodpanda");
    }

    #[test]
    fn from_items_nonempty_reports_count() {
        let request = make_request("biryani", 10);
        let meta = ScrapeMeta {
            platform: "foodpanda".to_string(),
            site_root: "https://www.foodpanda.pk".to_string(),
        };
        let record = crate::listing::ListingRecord {
            platform: crate::listing::PLATFORM.to_string(),
            restaurant: "Student Biryani".to_string(),
            item: None,
            base_price: None,
            discounted_price: None,
            discount_pct: None,
            delivery_fee: None,
            eta_min: None,
            rating: None,
            link: None,
            last_seen: chrono::Utc::now(),
        };
        let response = ScrapeResponse::from_items(&request, vec![record], meta);
        assert_eq!(response.count(), 1);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["query"], "biryani");
        assert_eq!(json["location"], "Karachi");
    }
}
