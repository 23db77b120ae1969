use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load scraper configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
/// No variables are required — every setting has a default.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load scraper configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let site_root = or_default("PANDASCAN_SITE_ROOT", "https://www.foodpanda.pk");
    let default_location = or_default("PANDASCAN_DEFAULT_LOCATION", "Karachi");
    let fee_cap = parse_f64("PANDASCAN_FEE_CAP", "10")?;
    let max_results = parse_usize("PANDASCAN_MAX_RESULTS", "20")?;
    let deadline_secs = parse_u64("PANDASCAN_DEADLINE_SECS", "45")?;
    let nav_timeout_secs = parse_u64("PANDASCAN_NAV_TIMEOUT_SECS", "20")?;
    let quiescence_timeout_secs = parse_u64("PANDASCAN_QUIESCENCE_TIMEOUT_SECS", "8")?;
    let settle_ms = parse_u64("PANDASCAN_SETTLE_MS", "1500")?;
    let user_agent = or_default(
        "PANDASCAN_USER_AGENT",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    );
    let log_level = or_default("PANDASCAN_LOG_LEVEL", "info");

    if fee_cap < 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PANDASCAN_FEE_CAP".to_string(),
            reason: "fee cap must be non-negative".to_string(),
        });
    }

    Ok(AppConfig {
        site_root,
        default_location,
        fee_cap,
        max_results,
        deadline_secs,
        nav_timeout_secs,
        quiescence_timeout_secs,
        settle_ms,
        user_agent,
        log_level,
    })
}
