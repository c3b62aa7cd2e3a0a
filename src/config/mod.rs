//! Configuration system (layered: code > env > config file > defaults).

mod file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GarminError;

pub use file::ConfigFile;

pub const DEFAULT_WEB_BASE_URL: &str = "https://connect.garmin.com";
pub const DEFAULT_API_BASE_URL: &str = "https://connect.garmin.com/gc-api";
pub const DEFAULT_LOGIN_URL: &str = "https://connect.garmin.com/modern/workouts";
pub const DEFAULT_LOGGED_IN_MARKER: &str = "a[href*='/modern/workout/create']";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Runtime settings for login, storage and the Connect API.
#[derive(Debug, Clone, PartialEq)]
pub struct GarminConfig {
    pub credential_path: PathBuf,
    pub browser_profile_dir: Option<PathBuf>,
    pub login_url: String,
    pub logged_in_url_prefix: String,
    pub logged_in_marker: String,
    pub web_base_url: String,
    pub api_base_url: String,
    pub login_timeout: Duration,
    pub poll_interval: Duration,
    pub capture_grace: Duration,
    pub request_timeout: Duration,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for GarminConfig {
    fn default() -> Self {
        Self {
            credential_path: default_credential_path(),
            browser_profile_dir: Some(default_data_dir().join("browser-profile")),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            logged_in_url_prefix: DEFAULT_LOGIN_URL.to_string(),
            logged_in_marker: DEFAULT_LOGGED_IN_MARKER.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(1),
            capture_grace: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
            headless: false,
            chrome_executable: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl GarminConfig {
    /// Defaults, then `~/.garmin-workouts/config.toml` if present, then environment.
    ///
    /// An unreadable config file is logged and skipped.
    pub fn load() -> Self {
        let config = match Self::default().with_file(default_config_path()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring config file");
                Self::default()
            }
        };
        config.with_env()
    }

    /// Defaults overridden by environment variables only.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply a TOML config file. A missing file leaves the config unchanged.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, GarminError> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(self),
            Err(err) => return Err(GarminError::Io(err)),
        };
        let file: ConfigFile = toml::from_str(&raw).map_err(|err| {
            GarminError::Configuration(format!("Invalid config file {}: {err}", path.display()))
        })?;
        Ok(file.apply(self))
    }

    /// Apply `GARMIN_*` environment variables (and a `.env` file if present).
    pub fn with_env(self) -> Self {
        let _ = dotenvy::dotenv();
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Apply variables resolved by `lookup`, using the `GARMIN_*` names.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("GARMIN_CREDENTIAL_PATH") {
            self.credential_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("GARMIN_BROWSER_PROFILE_DIR") {
            self.browser_profile_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("GARMIN_LOGIN_URL") {
            self.login_url = url;
        }
        if let Some(prefix) = lookup("GARMIN_LOGGED_IN_URL_PREFIX") {
            self.logged_in_url_prefix = prefix;
        }
        if let Some(marker) = lookup("GARMIN_LOGGED_IN_MARKER") {
            self.logged_in_marker = marker;
        }
        if let Some(url) = lookup("GARMIN_WEB_BASE_URL") {
            self.web_base_url = url;
        }
        if let Some(url) = lookup("GARMIN_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(secs) = lookup("GARMIN_LOGIN_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.login_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = lookup("GARMIN_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = lookup("GARMIN_POLL_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = lookup("GARMIN_CAPTURE_GRACE_SECS").and_then(|v| v.parse().ok()) {
            self.capture_grace = Duration::from_secs(secs);
        }
        if let Some(headless) = lookup("GARMIN_HEADLESS").as_deref().and_then(parse_flag) {
            self.headless = headless;
        }
        if let Some(path) = lookup("GARMIN_CHROME_EXECUTABLE") {
            self.chrome_executable = Some(PathBuf::from(path));
        }
        if let Some(agent) = lookup("GARMIN_USER_AGENT") {
            self.user_agent = agent;
        }
        self
    }

    pub fn with_credential_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_path = path.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_web_base_url(mut self, url: impl Into<String>) -> Self {
        self.web_base_url = url.into();
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" => Some(true),
        "0" | "false" | "FALSE" | "no" => Some(false),
        _ => None,
    }
}

/// Base directory for local state (`~/.garmin-workouts`).
pub fn default_data_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".garmin-workouts"))
        .unwrap_or_else(|| PathBuf::from(".garmin-workouts"))
}

pub fn default_credential_path() -> PathBuf {
    default_data_dir().join("credential.json")
}

pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}
