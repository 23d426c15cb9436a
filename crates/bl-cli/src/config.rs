//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bl_core::Locale;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the remote JSON collection.
    pub remote_url: String,
    /// Language for day headers and labels.
    pub locale: Locale,
    /// Seconds between background refreshes in `bl watch`.
    pub refresh_interval_secs: u64,
    /// Per-request timeout for remote calls.
    pub request_timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("remote_url", &self.remote_url)
            .field("locale", &self.locale)
            .field("refresh_interval_secs", &self.refresh_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: "http://localhost:8080/data.php".to_string(),
            locale: Locale::default(),
            refresh_interval_secs: 30,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BL_*)
        figment = figment.merge(Env::prefixed("BL_"));

        figment.extract()
    }

    /// Interval between background refreshes. Never zero.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Timeout applied to each remote request. Never zero.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Returns the platform-specific config directory for babylog.
///
/// On Linux: `~/.config/babylog`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("babylog"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_dirs_config_path_ends_with_babylog() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "babylog");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote_url, "http://localhost:8080/data.php");
        assert_eq!(config.locale, Locale::Polish);
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"remote_url = "https://example.com/log/data.php""#).unwrap();
        writeln!(file, r#"locale = "en-GB""#).unwrap();
        writeln!(file, "refresh_interval_secs = 5").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.remote_url, "https://example.com/log/data.php");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"locale = "klingon""#).unwrap();
        file.flush().unwrap();

        assert!(Config::load_from(Some(file.path())).is_err());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config {
            refresh_interval_secs: 0,
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
