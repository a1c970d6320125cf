//! Runtime settings read from the environment.

use core::str::FromStr;
use std::time::Duration;

use remedystock_inventory::BarcodePolicy;
use remedystock_observability::LogFormat;

use crate::scan_display::DEFAULT_SCAN_RESULT_WINDOW;

pub const SCAN_RESULT_SECS_VAR: &str = "REMEDYSTOCK_SCAN_RESULT_SECS";
pub const CHECK_BARCODE_ON_EDIT_VAR: &str = "REMEDYSTOCK_CHECK_BARCODE_ON_EDIT";
pub const LOG_FORMAT_VAR: &str = "REMEDYSTOCK_LOG_FORMAT";
pub const SEED_VAR: &str = "REMEDYSTOCK_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How long a scan result stays visible.
    pub scan_result_window: Duration,
    /// Whether inline barcode edits are checked for duplicates.
    pub barcode_policy: BarcodePolicy,
    pub log_format: LogFormat,
    /// Start from the built-in seed list instead of an empty inventory.
    pub seed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_result_window: DEFAULT_SCAN_RESULT_WINDOW,
            barcode_policy: BarcodePolicy::OnCreate,
            log_format: LogFormat::Pretty,
            seed: true,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Only the log format; needed before the subscriber exists.
    pub fn log_format_from_env() -> LogFormat {
        std::env::var(LOG_FORMAT_VAR)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Build settings from an arbitrary key lookup. Unset keys keep their
    /// defaults; unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let scan_secs = parse_or(
            SCAN_RESULT_SECS_VAR,
            lookup(SCAN_RESULT_SECS_VAR),
            defaults.scan_result_window.as_secs(),
        );

        let check_on_edit = lookup(CHECK_BARCODE_ON_EDIT_VAR)
            .map(|raw| flag_or(CHECK_BARCODE_ON_EDIT_VAR, &raw, false))
            .unwrap_or(false);

        let seed = lookup(SEED_VAR)
            .map(|raw| flag_or(SEED_VAR, &raw, defaults.seed))
            .unwrap_or(defaults.seed);

        Self {
            scan_result_window: Duration::from_secs(scan_secs),
            barcode_policy: if check_on_edit {
                BarcodePolicy::OnCreateAndEdit
            } else {
                BarcodePolicy::OnCreate
            },
            log_format: parse_or(LOG_FORMAT_VAR, lookup(LOG_FORMAT_VAR), defaults.log_format),
            seed,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(key, value = %raw, %err, "ignoring invalid setting; using default");
            default
        }
    }
}

fn flag_or(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = raw, "ignoring invalid flag; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
        assert_eq!(Settings::default().scan_result_window, Duration::from_secs(5));
    }

    #[test]
    fn reads_every_variable() {
        let s = Settings::from_lookup(lookup(&[
            (SCAN_RESULT_SECS_VAR, "2"),
            (CHECK_BARCODE_ON_EDIT_VAR, "yes"),
            (LOG_FORMAT_VAR, "json"),
            (SEED_VAR, "false"),
        ]));
        assert_eq!(s.scan_result_window, Duration::from_secs(2));
        assert_eq!(s.barcode_policy, BarcodePolicy::OnCreateAndEdit);
        assert_eq!(s.log_format, LogFormat::Json);
        assert!(!s.seed);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let s = Settings::from_lookup(lookup(&[
            (SCAN_RESULT_SECS_VAR, "soon"),
            (CHECK_BARCODE_ON_EDIT_VAR, "maybe"),
            (LOG_FORMAT_VAR, "xml"),
        ]));
        assert_eq!(s, Settings::default());
    }
}
