//! Interactive browser login and bearer-token capture.
//!
//! [`BrowserLogin`] drives any [`BrowserSession`]: it opens the workouts page,
//! waits for the user to finish signing in, and turns the first bearer token
//! the page sends plus the session cookies into a [`Credential`]. The
//! Chromium-backed session lives in [`chromium`].

#[cfg(feature = "browser")]
pub mod chromium;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::credential::Credential;
use super::error::AuthError;
use super::manager::CredentialAcquirer;
use crate::config::GarminConfig;

#[cfg(feature = "browser")]
pub use chromium::ChromiumLauncher;

/// A cookie read from the browser profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
}

/// One running browser with a single page under automation.
#[async_trait]
pub trait BrowserSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<(), AuthError>;

    async fn current_url(&mut self) -> Result<Option<String>, AuthError>;

    /// Whether an element matching `selector` is present on the current page.
    async fn has_element(&mut self, selector: &str) -> Result<bool, AuthError>;

    /// The first bearer token observed on an outgoing request, if any.
    async fn captured_bearer(&mut self) -> Option<String>;

    async fn reload(&mut self) -> Result<(), AuthError>;

    /// Every cookie held by the browser profile.
    async fn cookies(&mut self) -> Result<Vec<BrowserCookie>, AuthError>;

    /// Shut the browser down. Safe to call more than once.
    async fn close(&mut self) -> Result<(), AuthError>;
}

/// Starts browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, AuthError>;
}

/// Where to send the user and how to recognise a finished login.
#[derive(Debug, Clone)]
pub struct LoginSettings {
    pub login_url: String,
    /// Prefix the page URL has once the authenticated workouts page loaded.
    pub logged_in_url_prefix: String,
    /// CSS selector only present on the authenticated workouts page.
    pub logged_in_marker: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// How long to wait for a token after the forced reload.
    pub capture_grace: Duration,
}

impl From<&GarminConfig> for LoginSettings {
    fn from(config: &GarminConfig) -> Self {
        Self {
            login_url: config.login_url.clone(),
            logged_in_url_prefix: config.logged_in_url_prefix.clone(),
            logged_in_marker: config.logged_in_marker.clone(),
            timeout: config.login_timeout,
            poll_interval: config.poll_interval,
            capture_grace: config.capture_grace,
        }
    }
}

/// Credential acquisition through a visible browser login.
///
/// # Example
/// ```no_run
/// # #[cfg(feature = "browser")]
/// # async fn example() -> Result<(), garmin_workouts::auth::AuthError> {
/// use garmin_workouts::auth::browser::{BrowserLogin, ChromiumLauncher};
/// use garmin_workouts::auth::CredentialAcquirer;
/// use garmin_workouts::config::GarminConfig;
///
/// let config = GarminConfig::load();
/// let login = BrowserLogin::new(ChromiumLauncher::from_config(&config), (&config).into());
/// let credential = login.acquire().await?;
/// println!("logged in until {}", credential.expires_at);
/// # Ok(())
/// # }
/// ```
pub struct BrowserLogin<L> {
    launcher: L,
    settings: LoginSettings,
}

impl<L: BrowserLauncher> BrowserLogin<L> {
    pub fn new(launcher: L, settings: LoginSettings) -> Self {
        Self { launcher, settings }
    }

    pub fn settings(&self) -> &LoginSettings {
        &self.settings
    }

    async fn drive(&self, session: &mut dyn BrowserSession) -> Result<Credential, AuthError> {
        session.navigate(&self.settings.login_url).await?;
        tracing::info!(
            url = %self.settings.login_url,
            timeout_secs = self.settings.timeout.as_secs(),
            "Waiting for Garmin Connect login in the browser"
        );
        self.wait_for_login(session).await?;
        tracing::debug!("Login detected");

        let token = match session.captured_bearer().await {
            Some(token) => token,
            None => {
                tracing::debug!("No bearer token seen yet, reloading to provoke an API call");
                session.reload().await?;
                self.wait_for_bearer(session)
                    .await
                    .ok_or(AuthError::TokenNotCaptured)?
            }
        };

        let cookies = session.cookies().await?;
        tracing::debug!(count = cookies.len(), "Collected browser cookies");
        Ok(Credential::from_captured(token, cookie_header(&cookies)))
    }

    async fn wait_for_login(&self, session: &mut dyn BrowserSession) -> Result<(), AuthError> {
        loop {
            if self.is_logged_in(session).await? {
                return Ok(());
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    async fn is_logged_in(&self, session: &mut dyn BrowserSession) -> Result<bool, AuthError> {
        let url = session.current_url().await?.unwrap_or_default();
        if !url.starts_with(&self.settings.logged_in_url_prefix) {
            return Ok(false);
        }
        session.has_element(&self.settings.logged_in_marker).await
    }

    async fn wait_for_bearer(&self, session: &mut dyn BrowserSession) -> Option<String> {
        let deadline = Instant::now() + self.settings.capture_grace;
        loop {
            if let Some(token) = session.captured_bearer().await {
                return Some(token);
            }
            if Instant::now() >= deadline {
                return None;
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

#[async_trait]
impl<L: BrowserLauncher> CredentialAcquirer for BrowserLogin<L> {
    async fn acquire(&self) -> Result<Credential, AuthError> {
        let mut session = self.launcher.launch().await?;
        let outcome = tokio::time::timeout(self.settings.timeout, self.drive(session.as_mut())).await;
        if let Err(err) = session.close().await {
            tracing::warn!(error = %err, "Failed to close browser cleanly");
        }
        match outcome {
            Ok(result) => result,
            Err(_) => Err(AuthError::LoginTimeout {
                secs: self.settings.timeout.as_secs(),
            }),
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_from_header(value: &str) -> Option<String> {
    let value = value.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Join cookies into a single `Cookie` header value.
pub fn cookie_header(cookies: &[BrowserCookie]) -> String {
    cookies
        .iter()
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ")
}
