//! Drives the target site from its landing page to a query-relevant
//! results view.
//!
//! The search input is probed through a prioritized selector list; when no
//! input shows up within the probing window, the trigger falls back to a
//! direct listings URL with the query embedded as a parameter instead of
//! failing. The post-navigation waits (network quiescence, settle delay)
//! are best-effort — a slow page is degraded output, not a request failure.

use std::time::Duration;

use chromiumoxide::Page;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio::time::{sleep, timeout};

use pandascan_core::AppConfig;

use crate::error::ScrapeError;

/// Input-field candidates, most specific first.
const SEARCH_INPUT_SELECTORS: &[&str] = &[
    "input[data-testid='search-bar-input']",
    "input[type='search']",
    "input[name='search']",
    "input[placeholder*='earch']",
    "input[aria-label*='earch']",
];

/// Passes over the selector list before giving up on the search input.
const PROBE_PASSES: u32 = 2;
/// Pause between probe passes, letting client-side rendering attach the input.
const PROBE_PAUSE: Duration = Duration::from_millis(600);
/// Poll interval for the network-quiescence heuristic.
const QUIESCENCE_POLL: Duration = Duration::from_millis(250);

/// Navigates to the site root and submits `query` through the site's own
/// search, falling back to a direct listings URL when no input is found.
/// On return the page is as settled as the configured waits allow.
///
/// # Errors
///
/// Returns [`ScrapeError::NavigationFailed`] when the site root (or the
/// fallback listings URL) cannot be loaded within the navigation timeout.
/// Wait timeouts after a successful navigation are not errors.
pub async fn open_results_view(
    page: &Page,
    query: &str,
    config: &AppConfig,
) -> Result<(), ScrapeError> {
    let nav_timeout = Duration::from_secs(config.nav_timeout_secs);

    navigate(page, &config.site_root, nav_timeout).await?;

    if submit_query(page, query).await {
        // Enter usually triggers a client-side route change, not a full
        // navigation; wait for one briefly in case the site does reload.
        let _ = timeout(nav_timeout, page.wait_for_navigation()).await;
    } else {
        let fallback = listings_url(&config.site_root, query);
        tracing::debug!(url = %fallback, "no search input found, navigating directly");
        navigate(page, &fallback, nav_timeout).await?;
    }

    wait_for_quiescence(page, Duration::from_secs(config.quiescence_timeout_secs)).await;
    sleep(Duration::from_millis(config.settle_ms)).await;
    Ok(())
}

async fn navigate(page: &Page, url: &str, nav_timeout: Duration) -> Result<(), ScrapeError> {
    let goto = async {
        page.goto(url).await?;
        page.wait_for_navigation().await?;
        Ok::<(), chromiumoxide::error::CdpError>(())
    };
    match timeout(nav_timeout, goto).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ScrapeError::NavigationFailed {
            url: url.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ScrapeError::NavigationFailed {
            url: url.to_string(),
            reason: format!("page load exceeded {}s", nav_timeout.as_secs()),
        }),
    }
}

/// Tries the input-selector candidates; on the first hit, focuses the field,
/// types the query, and presses Enter. Returns `false` when no candidate
/// input was usable within the probing window.
async fn submit_query(page: &Page, query: &str) -> bool {
    for pass in 0..PROBE_PASSES {
        if pass > 0 {
            sleep(PROBE_PAUSE).await;
        }
        for selector in SEARCH_INPUT_SELECTORS {
            let Ok(input) = page.find_element(*selector).await else {
                continue;
            };
            tracing::debug!(selector, "found search input");

            let typed = async {
                input.click().await?;
                input.type_str(query).await?;
                input.press_key("Enter").await?;
                Ok::<(), chromiumoxide::error::CdpError>(())
            }
            .await;

            match typed {
                Ok(()) => return true,
                Err(e) => {
                    // A stale or detached input; keep probing the rest.
                    tracing::debug!(selector, error = %e, "search input interaction failed");
                }
            }
        }
    }
    false
}

/// Direct results URL used when the landing page exposes no search input.
fn listings_url(site_root: &str, query: &str) -> String {
    format!(
        "{}/restaurants?q={}",
        site_root.trim_end_matches('/'),
        utf8_percent_encode(query, NON_ALPHANUMERIC)
    )
}

/// Best-effort network-quiescence wait: polls the page's resource-entry
/// count and treats two consecutive identical readings as "no further
/// network activity". Bounded by `limit`; a timeout here is normal for
/// chatty pages and is never escalated.
async fn wait_for_quiescence(page: &Page, limit: Duration) {
    let deadline = tokio::time::Instant::now() + limit;
    let mut last_count: Option<u64> = None;

    while tokio::time::Instant::now() < deadline {
        let count = page
            .evaluate("performance.getEntriesByType('resource').length")
            .await
            .ok()
            .and_then(|v| v.into_value::<u64>().ok());

        match (count, last_count) {
            (Some(current), Some(previous)) if current == previous => {
                tracing::debug!(resources = current, "network quiescent");
                return;
            }
            (Some(current), _) => last_count = Some(current),
            (None, _) => {}
        }
        sleep(QUIESCENCE_POLL).await;
    }
    tracing::debug!("quiescence wait timed out, continuing");
}
