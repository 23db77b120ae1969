//! Runtime configuration for the scraper, loaded from environment variables
//! by [`crate::load_app_config`].

/// All tunables the scrape pipeline reads. Every field has an env-var
/// counterpart with a default, so a bare environment still yields a
/// working configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root URL of the target site, e.g. `https://www.foodpanda.pk`.
    pub site_root: String,
    /// Display-only default location echoed back in responses.
    pub default_location: String,
    /// Default delivery-fee cap in currency units.
    pub fee_cap: f64,
    /// Default maximum result count (still clamped per request).
    pub max_results: usize,
    /// Whole-operation deadline for one scrape (navigate + search +
    /// extract). Tighter than any transport-level timeout by design.
    pub deadline_secs: u64,
    /// Timeout for the initial page navigation.
    pub nav_timeout_secs: u64,
    /// Upper bound on the best-effort network-quiescence wait.
    pub quiescence_timeout_secs: u64,
    /// Fixed settle delay after quiescence, for client-side rendering.
    pub settle_ms: u64,
    /// User agent presented by the headless browser.
    pub user_agent: String,
    /// Default log filter, e.g. `info` or `pandascan_scraper=debug`.
    pub log_level: String,
}
