//! One-shot scrape orchestration.
//!
//! A scrape is a single sequential pipeline: launch → navigate/search →
//! extract → filter. The whole pipeline races a wall-clock deadline that is
//! deliberately tighter than any transport-level timeout, so the caller
//! always gets a structured error instead of a hang. The browser is torn
//! down on every exit path, including a lost deadline race — no partial
//! results are salvaged from an abandoned scrape.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use url::Url;

use pandascan_core::{AppConfig, ListingRecord, ScrapeMeta, ScrapeRequest, ScrapeResponse, PLATFORM};

use crate::browser::HeadlessBrowser;
use crate::error::ScrapeError;
use crate::filter::apply_fee_cap;
use crate::record::extract_listings;
use crate::search::open_results_view;

/// Runs one scrape end to end and returns the response payload.
///
/// Zero records after filtering is a normal outcome reported through
/// [`ScrapeResponse::Empty`], not an error.
///
/// # Errors
///
/// - [`ScrapeError::InvalidInput`] — empty query or unparseable site root;
///   no browser is launched.
/// - [`ScrapeError::NavigationFailed`] — the site could not be reached.
/// - [`ScrapeError::DeadlineExceeded`] — the pipeline lost the deadline race.
/// - [`ScrapeError::Extraction`] — browser-level failure while driving or
///   reading the page; rare by construction, treat as a bug signal.
pub async fn scrape(
    request: ScrapeRequest,
    config: &AppConfig,
) -> Result<ScrapeResponse, ScrapeError> {
    let request = request.validate()?;
    let origin = site_origin(&config.site_root)?;

    tracing::info!(
        query = %request.query,
        max = request.max,
        fee_cap = request.fee_cap,
        "starting scrape"
    );

    let browser = HeadlessBrowser::launch(&config.user_agent).await?;

    let raced = race_deadline(
        config.deadline_secs,
        run_pipeline(&browser, &request, &origin, config),
    )
    .await;

    // Teardown runs before the outcome is inspected so that every exit
    // path — success, pipeline error, lost race — releases the process.
    browser.close().await;

    let items = raced?;

    tracing::info!(count = items.len(), "scrape finished");
    Ok(ScrapeResponse::from_items(
        &request,
        items,
        ScrapeMeta {
            platform: PLATFORM.to_string(),
            site_root: config.site_root.clone(),
        },
    ))
}

/// Races `pipeline` against a wall-clock deadline, mapping a lost race
/// to [`ScrapeError::DeadlineExceeded`].
async fn race_deadline<T>(
    deadline_secs: u64,
    pipeline: impl Future<Output = Result<T, ScrapeError>>,
) -> Result<T, ScrapeError> {
    match timeout(Duration::from_secs(deadline_secs), pipeline).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(deadline_secs, "scrape deadline exceeded");
            Err(ScrapeError::DeadlineExceeded { deadline_secs })
        }
    }
}

/// The deadline-raced part: navigate, search, extract, filter.
async fn run_pipeline(
    browser: &HeadlessBrowser,
    request: &ScrapeRequest,
    origin: &str,
    config: &AppConfig,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    let page = browser.new_page().await?;

    open_results_view(&page, &request.query, config).await?;

    let html = page.content().await.map_err(|e| ScrapeError::Extraction {
        reason: format!("failed to read page content: {e}"),
    })?;

    let records = extract_listings(&html, origin, request.max);
    Ok(apply_fee_cap(records, request.fee_cap))
}

/// Scheme + host origin of the configured site root, used to absolutize
/// root-relative card links.
fn site_origin(site_root: &str) -> Result<String, ScrapeError> {
    let url = Url::parse(site_root).map_err(|e| ScrapeError::InvalidInput {
        reason: format!("invalid site root \"{site_root}\": {e}"),
    })?;
    Ok(url.origin().ascii_serialization())
}
