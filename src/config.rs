//! Site configuration.
//!
//! Configuration is layered, later layers winning:
//!
//! 1. Stock defaults ([`SiteConfig::default`])
//! 2. `siteshell.toml` (path chosen by the CLI, missing file is fine)
//! 3. Environment: `SITESHELL_MANIFEST_URL`, `SITESHELL_SITE_NAME`
//! 4. CLI flags (applied by `main`)
//!
//! ## Configuration Options
//!
//! ```toml
//! manifest_url = "https://example.com/site.json"  # required to render anything
//! site_name = "Acme"                              # overrides the manifest's business name
//!
//! [fetch]
//! timeout_secs = 30   # omit for no timeout
//! ```
//!
//! Unknown keys are rejected to catch typos early. An empty `manifest_url` or
//! `site_name` (from any layer) counts as unset.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const ENV_MANIFEST_URL: &str = "SITESHELL_MANIFEST_URL";
pub const ENV_SITE_NAME: &str = "SITESHELL_SITE_NAME";
pub const DEFAULT_CONFIG_FILE: &str = "siteshell.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the manifest lives: an `http(s)://` URL, a `file://` URL, or a
    /// local path. Absent means nothing can be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
    /// Display name that takes priority over the manifest's business name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Upper bound on the manifest request. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be greater than 0 (omit it for no timeout)".into(),
            ));
        }
        Ok(())
    }

    /// The manifest location, treating an empty string as unset.
    pub fn manifest_url(&self) -> Option<&str> {
        non_empty(self.manifest_url.as_deref())
    }

    /// The site-name override, treating an empty string as unset.
    pub fn site_name(&self) -> Option<&str> {
        non_empty(self.site_name.as_deref())
    }

    /// Overlay environment variables. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_MANIFEST_URL) {
            self.manifest_url = Some(url);
        }
        if let Some(name) = lookup(ENV_SITE_NAME) {
            self.site_name = Some(name);
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path` over stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Load the config file, then overlay the process environment.
pub fn load_config_with_env(path: &Path) -> Result<SiteConfig, ConfigError> {
    let mut config = load_config(path)?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Returns a fully-commented stock `siteshell.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# siteshell configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.
#
# Environment variables override this file:
#   SITESHELL_MANIFEST_URL  -> manifest_url
#   SITESHELL_SITE_NAME     -> site_name

# Where the site manifest lives: https://..., file://..., or a local path.
# Without it nothing is fetched and a "missing configuration" page is shown.
# manifest_url = "https://example.com/site.json"

# Overrides the manifest's businessName in the header and title fallback.
# site_name = "Acme"

# ---------------------------------------------------------------------------
# Manifest fetch
# ---------------------------------------------------------------------------
[fetch]
# Seconds before the manifest request is abandoned. Omit to wait indefinitely.
# timeout_secs = 30
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_has_no_manifest_url() {
        let config = SiteConfig::default();
        assert!(config.manifest_url().is_none());
        assert!(config.site_name().is_none());
        assert!(config.fetch.timeout_secs.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
manifest_url = "https://example.com/site.json"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.manifest_url(), Some("https://example.com/site.json"));
        // Default values preserved
        assert!(config.site_name().is_none());
        assert!(config.fetch.timeout_secs.is_none());
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let config = SiteConfig {
            manifest_url: Some("".into()),
            site_name: Some("  ".into()),
            ..SiteConfig::default()
        };
        assert!(config.manifest_url().is_none());
        assert!(config.site_name().is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config: SiteConfig = toml::from_str(
            r#"
manifest_url = "https://file.example/site.json"
site_name = "From File"
"#,
        )
        .unwrap();
        config.apply_env(env(&[(ENV_MANIFEST_URL, "https://env.example/site.json")]));
        assert_eq!(config.manifest_url(), Some("https://env.example/site.json"));
        // Untouched when the variable is absent
        assert_eq!(config.site_name(), Some("From File"));

        config.apply_env(env(&[(ENV_SITE_NAME, "From Env")]));
        assert_eq!(config.site_name(), Some("From Env"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r##"
site_name = "Acme"

[fetch]
timeout_secs = 10
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site_name(), Some("Acme"));
        assert_eq!(config.fetch.timeout_secs, Some(10));
        assert!(config.manifest_url().is_none());
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[outer.inner]
kept = "base"
replaced = "base"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[outer.inner]
replaced = "overlay"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let inner = merged.get("outer").unwrap().get("inner").unwrap();
        assert_eq!(inner.get("replaced").unwrap().as_str(), Some("overlay"));
        assert_eq!(inner.get("kept").unwrap().as_str(), Some("base"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"site_name = "A""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"site_name = "B""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("site_name").unwrap().as_str(), Some("B"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(r#"manifest_ur = "x""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn color_tables_are_not_config() {
        let toml_str = r##"
[colors.light]
background = "#fff"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r#"
[fetch]
timeout = 5
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("fetch").is_some());
        assert!(val.get("manifest_url").is_none());
    }
}
