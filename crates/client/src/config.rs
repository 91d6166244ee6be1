//! Client configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use storefront_catalog::{DEFAULT_PAGE_SIZE, FilterState, SortSpec};

pub const PAGE_SIZE_VAR: &str = "STOREFRONT_PAGE_SIZE";
pub const DEBOUNCE_MS_VAR: &str = "STOREFRONT_DEBOUNCE_MS";
pub const STATE_DB_VAR: &str = "STOREFRONT_STATE_DB";
pub const QUERY_VAR: &str = "STOREFRONT_QUERY";
pub const SORT_VAR: &str = "STOREFRONT_SORT";
pub const PAGE_VAR: &str = "STOREFRONT_PAGE";

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub page_size: usize,
    /// Quiet period before a burst of query edits is applied.
    pub debounce: Duration,
    /// Location of the SQLite state file.
    pub state_db: PathBuf,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    ///
    /// Unparseable values fall back to defaults with a warning; only a missing
    /// data directory (needed for the default state path) is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let page_size = match lookup(PAGE_SIZE_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!("{PAGE_SIZE_VAR}={raw:?} is not a positive integer; using {DEFAULT_PAGE_SIZE}");
                    DEFAULT_PAGE_SIZE
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let debounce = match lookup(DEBOUNCE_MS_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!("{DEBOUNCE_MS_VAR}={raw:?} is not a number of milliseconds; using default");
                    DEFAULT_DEBOUNCE
                }
            },
            None => DEFAULT_DEBOUNCE,
        };

        let state_db = match lookup(STATE_DB_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_state_db_path()?,
        };

        Ok(Self {
            page_size,
            debounce,
            state_db,
        })
    }
}

/// One-run adjustments layered over the persisted filters.
///
/// Overrides shape a single invocation only; they are never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOverrides {
    pub query: Option<String>,
    pub sort: Option<SortSpec>,
    pub page: Option<usize>,
}

impl RunOverrides {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Malformed overrides are errors, unlike [`ClientConfig`] values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let sort = lookup(SORT_VAR)
            .map(|raw| raw.parse::<SortSpec>().with_context(|| format!("invalid {SORT_VAR}={raw:?}")))
            .transpose()?;
        let page = lookup(PAGE_VAR)
            .map(|raw| raw.trim().parse::<usize>().with_context(|| format!("invalid {PAGE_VAR}={raw:?}")))
            .transpose()?;

        Ok(Self {
            query: lookup(QUERY_VAR),
            sort,
            page,
        })
    }

    /// The filters for this run; `persisted` is left as loaded.
    pub fn apply(&self, persisted: &FilterState) -> FilterState {
        let mut filters = persisted.clone();
        if let Some(query) = &self.query {
            filters.query = query.clone();
        }
        if let Some(spec) = self.sort {
            filters = filters.with_sort(spec);
        }
        filters
    }
}

/// `{app_data_dir}/storefront/state.db`.
fn default_state_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("storefront");
    path.push("state.db");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned()).unwrap()
    }

    #[test]
    fn explicit_values_are_used() {
        let config = config_from(&[
            (PAGE_SIZE_VAR, "25"),
            (DEBOUNCE_MS_VAR, "150"),
            (STATE_DB_VAR, "/tmp/storefront-test.db"),
        ]);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.debounce, Duration::from_millis(150));
        assert_eq!(config.state_db, PathBuf::from("/tmp/storefront-test.db"));
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let config = config_from(&[
            (PAGE_SIZE_VAR, "0"),
            (DEBOUNCE_MS_VAR, "soon"),
            (STATE_DB_VAR, "state.db"),
        ]);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.debounce, DEFAULT_DEBOUNCE);
    }

    fn overrides_from(pairs: &[(&str, &str)]) -> anyhow::Result<RunOverrides> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        RunOverrides::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn overrides_shape_the_run_but_not_the_persisted_filters() {
        let persisted = FilterState::default().with_query("shoes").with_in_stock_only(true);
        let overrides = overrides_from(&[(QUERY_VAR, "coffee"), (SORT_VAR, "price-desc"), (PAGE_VAR, "2")]).unwrap();

        let run = overrides.apply(&persisted);
        assert_eq!(run.query, "coffee");
        assert_eq!(run.sort_spec().to_string(), "price-desc");
        assert!(run.in_stock_only);
        assert_eq!(overrides.page, Some(2));

        assert_eq!(persisted.query, "shoes");
        assert_eq!(persisted.sort_spec().to_string(), "name-asc");
    }

    #[test]
    fn no_overrides_keep_the_persisted_filters() {
        let persisted = FilterState::default().with_query("book");
        let overrides = overrides_from(&[]).unwrap();
        assert_eq!(overrides, RunOverrides::default());
        assert_eq!(overrides.apply(&persisted), persisted);
    }

    #[test]
    fn malformed_overrides_are_errors() {
        assert!(overrides_from(&[(SORT_VAR, "cheapest")]).is_err());
        assert!(overrides_from(&[(PAGE_VAR, "two")]).is_err());
    }
}
