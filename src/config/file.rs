//! On-disk TOML configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::GarminConfig;

/// Optional overrides read from `config.toml`.
///
/// ```toml
/// api_base_url = "https://connect.garmin.com/gc-api"
/// login_timeout_secs = 300
/// headless = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub credential_path: Option<PathBuf>,
    pub browser_profile_dir: Option<PathBuf>,
    pub login_url: Option<String>,
    pub logged_in_url_prefix: Option<String>,
    pub logged_in_marker: Option<String>,
    pub web_base_url: Option<String>,
    pub api_base_url: Option<String>,
    pub login_timeout_secs: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub capture_grace_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub headless: Option<bool>,
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl ConfigFile {
    pub fn apply(self, mut config: GarminConfig) -> GarminConfig {
        if let Some(path) = self.credential_path {
            config.credential_path = path;
        }
        if let Some(dir) = self.browser_profile_dir {
            config.browser_profile_dir = Some(dir);
        }
        if let Some(url) = self.login_url {
            config.login_url = url;
        }
        if let Some(prefix) = self.logged_in_url_prefix {
            config.logged_in_url_prefix = prefix;
        }
        if let Some(marker) = self.logged_in_marker {
            config.logged_in_marker = marker;
        }
        if let Some(url) = self.web_base_url {
            config.web_base_url = url;
        }
        if let Some(url) = self.api_base_url {
            config.api_base_url = url;
        }
        if let Some(secs) = self.login_timeout_secs {
            config.login_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = self.capture_grace_secs {
            config.capture_grace = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(headless) = self.headless {
            config.headless = headless;
        }
        if let Some(path) = self.chrome_executable {
            config.chrome_executable = Some(path);
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        config
    }
}
