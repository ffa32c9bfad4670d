/// Runtime configuration
///
/// Settings are read from a JSON file so the timing and layout thresholds can
/// be tuned without a rebuild. The file is looked up at:
/// - `$HERITAGE_SITE_CONFIG` if set
/// - Linux: ~/.config/heritage-site/config.json
/// - macOS: ~/Library/Application Support/heritage-site/config.json
/// - Windows: %APPDATA%\heritage-site\config.json
///
/// A missing file means "use the defaults".

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SiteError};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "HERITAGE_SITE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scroll offset (px) past which the header switches to its compact style
    /// and the back-to-top button appears
    pub header_scroll_threshold: f32,
    /// Window width (px) at or below which the nav collapses into a drawer
    pub mobile_breakpoint: f32,
    /// Fade-out before a filtered-out gallery item leaves the layout
    pub fade_out_ms: u64,
    /// Duration of anchor and back-to-top scrolling
    pub smooth_scroll_ms: u64,
    /// Simulated latency of the mock contact/donation gateway
    pub submit_delay_ms: u64,
    /// Alternative content file; the bundled content is used when unset
    pub content_path: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_scroll_threshold: 50.0,
            mobile_breakpoint: 992.0,
            fade_out_ms: 300,
            smooth_scroll_ms: 450,
            submit_delay_ms: 800,
            content_path: None,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl SiteConfig {
    /// Load the config from its default location.
    ///
    /// Returns the defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| SiteError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse from a JSON string; unspecified fields keep their defaults
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("heritage-site");
        path.push("config.json");
        Some(path)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
