//! Chromium session driven over the DevTools protocol.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::EventRequestWillBeSent;
use chromiumoxide::cdp::browser_protocol::storage::GetCookiesParams as GetAllCookiesParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{bearer_from_header, BrowserCookie, BrowserLauncher, BrowserSession};
use crate::auth::error::AuthError;
use crate::config::GarminConfig;

/// Launches a local Chrome/Chromium, visible unless configured otherwise.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    /// Persistent profile directory so the provider can remember the device.
    pub profile_dir: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn from_config(config: &GarminConfig) -> Self {
        Self {
            headless: config.headless,
            executable: config.chrome_executable.clone(),
            profile_dir: config.browser_profile_dir.clone(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, AuthError> {
        let mut builder = BrowserConfig::builder().window_size(1280, 900);
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &self.executable {
            builder = builder.chrome_executable(executable);
        }
        if let Some(dir) = &self.profile_dir {
            std::fs::create_dir_all(dir)?;
            builder = builder.user_data_dir(dir);
        }
        builder.build().map_err(AuthError::Browser)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, AuthError> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!(error = %err, "Browser handler stopped");
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler_task.abort();
                return Err(err.into());
            }
        };

        let captured = Arc::new(Mutex::new(None));
        let capture_task = match spawn_capture(&page, captured.clone()).await {
            Ok(task) => task,
            Err(err) => {
                handler_task.abort();
                return Err(err);
            }
        };

        tracing::debug!(headless = self.headless, "Browser launched");
        Ok(Box::new(ChromiumSession {
            browser,
            page,
            captured,
            tasks: vec![handler_task, capture_task],
            closed: false,
        }))
    }
}

/// Record the first bearer token any request from `page` carries.
async fn spawn_capture(
    page: &Page,
    captured: Arc<Mutex<Option<String>>>,
) -> Result<JoinHandle<()>, AuthError> {
    let mut requests = page.event_listener::<EventRequestWillBeSent>().await?;
    Ok(tokio::spawn(async move {
        while let Some(event) = requests.next().await {
            let Some(headers) = event.request.headers.inner().as_object() else {
                continue;
            };
            let token = headers
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .find_map(|(_, value)| value.as_str().and_then(bearer_from_header));
            if let Some(token) = token {
                if let Ok(mut slot) = captured.lock() {
                    if slot.is_none() {
                        tracing::debug!(url = %event.request.url, "Captured bearer token");
                        *slot = Some(token);
                    }
                }
            }
        }
    }))
}

/// Dropping the session aborts the event tasks and drops the `Browser`,
/// which kills the child process; `close` shuts down gracefully.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    captured: Arc<Mutex<Option<String>>>,
    tasks: Vec<JoinHandle<()>>,
    closed: bool,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), AuthError> {
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<Option<String>, AuthError> {
        Ok(self.page.url().await?)
    }

    async fn has_element(&mut self, selector: &str) -> Result<bool, AuthError> {
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn captured_bearer(&mut self) -> Option<String> {
        self.captured.lock().ok().and_then(|slot| slot.clone())
    }

    async fn reload(&mut self) -> Result<(), AuthError> {
        self.page.reload().await?;
        Ok(())
    }

    async fn cookies(&mut self) -> Result<Vec<BrowserCookie>, AuthError> {
        let response = self.page.execute(GetAllCookiesParams::default()).await?;
        Ok(response
            .result
            .cookies
            .iter()
            .map(|cookie| BrowserCookie {
                name: cookie.name.clone(),
                value: cookie.value.clone(),
            })
            .collect())
    }

    async fn close(&mut self) -> Result<(), AuthError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.browser.close().await;
        if let Err(err) = self.browser.wait().await {
            tracing::debug!(error = %err, "Waiting for browser exit failed");
        }
        for task in &self.tasks {
            task.abort();
        }
        result.map(|_| ()).map_err(AuthError::from)
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
