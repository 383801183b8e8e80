//! Configuration types for redeem.
//!
//! [`Config::load`] reads `~/.config/redeem/config.toml`, creating it with
//! the built-in defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests), and [`Config::from_file`] layers an explicit file over them.

use crate::{coalesce::DEFAULT_TOLERANCE_MS, error::ConfigError, extract::Extractor};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[coalesce]
tolerance_ms = 100

[extract]
marker      = "REWARD REDEMPTION EVENT RECEIVED"
fingerprint = '"broadcaster_user_id"'
timezone    = "local"
time_format = "%Y-%m-%d %H:%M:%S"

[filter]
enabled      = true
reward_title = "Dailyおみくじ"

[labels]
redeemed_at  = "引き換え日時"
user_id      = "ユーザーID"
user_login   = "ログイン名"
user_name    = "表示名"
reward_title = "報酬名"
redeemer     = "名前"

[export]
bom = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/redeem/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub coalesce: CoalesceConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[coalesce]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CoalesceConfig {
    #[serde(default = "default_tolerance_ms")]
    pub tolerance_ms: i64,
}

fn default_tolerance_ms() -> i64 { DEFAULT_TOLERANCE_MS }

impl CoalesceConfig {
    /// Reject negative tolerances, which would disable merging entirely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance_ms < 0 {
            return Err(ConfigError::Tolerance(self.tolerance_ms));
        }
        Ok(())
    }

    pub fn tolerance(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.tolerance_ms)
    }
}

impl Default for CoalesceConfig {
    fn default() -> Self {
        Self { tolerance_ms: default_tolerance_ms() }
    }
}

/// `[extract]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_fingerprint")]
    pub fingerprint: String,
    /// `local`, `utc`, or a fixed offset like `+09:00`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// strftime pattern for `redeemedAt`. Records are sorted on the formatted
    /// string, so the pattern should order lexicographically by time.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_marker() -> String { crate::extract::MARKER.to_string() }
fn default_fingerprint() -> String { crate::extract::FINGERPRINT.to_string() }
fn default_timezone() -> String { "local".to_string() }
fn default_time_format() -> String { crate::extract::TIME_FORMAT.to_string() }

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            fingerprint: default_fingerprint(),
            timezone: default_timezone(),
            time_format: default_time_format(),
        }
    }
}

/// `[filter]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_filter_enabled")]
    pub enabled: bool,
    #[serde(default = "default_reward_title")]
    pub reward_title: String,
}

fn default_filter_enabled() -> bool { true }
fn default_reward_title() -> String { "Dailyおみくじ".to_string() }

impl FilterConfig {
    /// Title to pass to [`filter`](crate::filter::filter), or `None` when
    /// filtering is off.
    pub fn active_title(&self) -> Option<&str> {
        self.enabled.then_some(self.reward_title.as_str())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: default_filter_enabled(),
            reward_title: default_reward_title(),
        }
    }
}

/// `[labels]` section — column headers for table and CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Labels {
    #[serde(default = "default_label_redeemed_at")]
    pub redeemed_at: String,
    #[serde(default = "default_label_user_id")]
    pub user_id: String,
    #[serde(default = "default_label_user_login")]
    pub user_login: String,
    #[serde(default = "default_label_user_name")]
    pub user_name: String,
    #[serde(default = "default_label_reward_title")]
    pub reward_title: String,
    #[serde(default = "default_label_redeemer")]
    pub redeemer: String,
}

fn default_label_redeemed_at() -> String { "引き換え日時".to_string() }
fn default_label_user_id() -> String { "ユーザーID".to_string() }
fn default_label_user_login() -> String { "ログイン名".to_string() }
fn default_label_user_name() -> String { "表示名".to_string() }
fn default_label_reward_title() -> String { "報酬名".to_string() }
fn default_label_redeemer() -> String { "名前".to_string() }

impl Default for Labels {
    fn default() -> Self {
        Self {
            redeemed_at: default_label_redeemed_at(),
            user_id: default_label_user_id(),
            user_login: default_label_user_login(),
            user_name: default_label_user_name(),
            reward_title: default_label_reward_title(),
            redeemer: default_label_redeemer(),
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Prefix CSV output with a UTF-8 byte-order mark for spreadsheet apps.
    #[serde(default = "default_bom")]
    pub bom: bool,
}

fn default_bom() -> bool { true }

impl Default for ExportConfig {
    fn default() -> Self {
        Self { bom: default_bom() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/redeem/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Ok(Self::from_file(&path)?)
    }

    /// Layer `path` over the built-in defaults. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coalesce.validate()
    }

    /// Build the configured [`Extractor`], validating the `[extract]` section.
    pub fn extractor(&self) -> Result<Extractor, ConfigError> {
        Extractor::new(&self.extract)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("redeem")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.coalesce.tolerance_ms, 100);
        assert_eq!(cfg.extract.marker, "REWARD REDEMPTION EVENT RECEIVED");
        assert_eq!(cfg.extract.fingerprint, r#""broadcaster_user_id""#);
        assert_eq!(cfg.filter.active_title(), Some("Dailyおみくじ"));
        assert_eq!(cfg.labels, Labels::default());
        assert!(cfg.export.bom);
    }

    #[test]
    fn embedded_defaults_match_rust_defaults() {
        let cfg = Config::defaults();
        let ex = ExtractConfig::default();
        assert_eq!(cfg.extract.marker, ex.marker);
        assert_eq!(cfg.extract.fingerprint, ex.fingerprint);
        assert_eq!(cfg.extract.time_format, ex.time_format);
        assert_eq!(cfg.filter.reward_title, FilterConfig::default().reward_title);
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[filter]\nenabled = false\n\n[labels]\nuser_name = \"Display name\"\n\n[extract]\ntimezone = \"utc\"\n",
        )
        .unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.filter.active_title(), None);
        assert_eq!(cfg.labels.user_name, "Display name");
        assert_eq!(cfg.labels.user_id, "ユーザーID");
        assert_eq!(cfg.coalesce.tolerance(), chrono::Duration::milliseconds(100));
        assert!(cfg.extractor().is_ok());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[coalesce]\ntolerance_ms = -5\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Tolerance(-5))
        ));

        std::fs::write(&path, "[coalesce]\ntolerance_ms = 0\n").unwrap();
        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.coalesce.tolerance(), chrono::Duration::zero());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("nope.toml")),
            Err(ConfigError::Load(_))
        ));
    }
}
