use std::path::Path;
use std::time::Duration;

use fantoccini::elements::Element;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder, Locator};

use crate::driver::{Driver, PageOps, Selector, Session};
use crate::error::ScrapeError;

/// fantoccini-backed implementation of the browser capability.
///
/// The only module that touches a concrete automation product. Raw
/// `CmdError`s are classified into the `ScrapeError` taxonomy here, at the
/// boundary, so nothing upstream sniffs error message text.
pub struct WebDriver {
    webdriver_url: String,
    window_size: (u32, u32),
}

impl WebDriver {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            window_size: (1280, 900),
        }
    }
}

impl Driver for WebDriver {
    type Session = WebSession;
    type Page = WebPage;

    async fn launch(&self, profile_dir: &Path) -> Result<WebSession, ScrapeError> {
        // The profile directory must exist before Chrome is pointed at it
        std::fs::create_dir_all(profile_dir)?;

        let (width, height) = self.window_size;
        let chrome_opts = serde_json::json!({
            "args": [
                format!("--user-data-dir={}", profile_dir.display()),
                format!("--window-size={},{}", width, height),
                "--disable-blink-features=AutomationControlled",
                "--no-first-run",
                "--no-default-browser-check",
            ],
            "excludeSwitches": ["enable-automation"],
        });
        let mut caps = serde_json::map::Map::new();
        caps.insert("goog:chromeOptions".to_string(), chrome_opts);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&self.webdriver_url)
            .await
            .map_err(classify_connect)?;

        ::log::debug!(
            "connected to WebDriver at {} (profile: {})",
            self.webdriver_url,
            profile_dir.display()
        );
        Ok(WebSession { client })
    }
}

#[derive(Clone)]
pub struct WebSession {
    client: Client,
}

impl Session for WebSession {
    type Page = WebPage;

    async fn pages(&self) -> Result<Vec<WebPage>, ScrapeError> {
        let windows = self.client.windows().await.map_err(classify)?;
        Ok(windows
            .into_iter()
            .map(|window| WebPage {
                client: self.client.clone(),
                window,
            })
            .collect())
    }

    async fn new_page(&self) -> Result<WebPage, ScrapeError> {
        let response = self.client.new_window(true).await.map_err(classify)?;
        Ok(WebPage {
            client: self.client.clone(),
            window: response.handle,
        })
    }

    async fn close(&self) {
        if let Err(e) = self.client.clone().close().await {
            ::log::debug!("ignoring session close error: {}", e);
        }
    }
}

/// One browser tab: a window handle plus the client it lives on. Every
/// operation focuses the window first, since the underlying session has a
/// single cursor over windows.
#[derive(Clone)]
pub struct WebPage {
    client: Client,
    window: WindowHandle,
}

impl WebPage {
    async fn focus(&self) -> Result<(), ScrapeError> {
        self.client
            .switch_to_window(self.window.clone())
            .await
            .map_err(classify)
    }

    async fn find_first(&self, selector: &Selector) -> Result<Option<Element>, ScrapeError> {
        self.focus().await?;
        let elements = self
            .client
            .find_all(locator(selector))
            .await
            .map_err(classify)?;
        Ok(elements.into_iter().next())
    }
}

impl PageOps for WebPage {
    async fn is_closed(&self) -> bool {
        match self.client.windows().await {
            Ok(windows) => !windows.contains(&self.window),
            // A dead session means no usable windows either way
            Err(_) => true,
        }
    }

    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ScrapeError> {
        self.focus().await?;
        match tokio::time::timeout(timeout, self.client.goto(url)).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(ScrapeError::NavigationTransient(format!(
                "navigation to {} exceeded {:?}",
                url, timeout
            ))),
        }
    }

    async fn count(&self, selector: &Selector) -> Result<usize, ScrapeError> {
        self.focus().await?;
        let elements = self
            .client
            .find_all(locator(selector))
            .await
            .map_err(classify)?;
        Ok(elements.len())
    }

    async fn text_first(&self, selector: &Selector) -> Result<Option<String>, ScrapeError> {
        match self.find_first(selector).await? {
            Some(element) => {
                let text = element.text().await.map_err(classify)?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    async fn attr_first(
        &self,
        selector: &Selector,
        attr: &str,
    ) -> Result<Option<String>, ScrapeError> {
        match self.find_first(selector).await? {
            Some(element) => element.attr(attr).await.map_err(classify),
            None => Ok(None),
        }
    }

    async fn click_first(&self, selector: &Selector) -> Result<bool, ScrapeError> {
        match self.find_first(selector).await? {
            Some(element) => {
                element.click().await.map_err(classify)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn locator(selector: &Selector) -> Locator<'_> {
    match selector {
        Selector::Css(s) => Locator::Css(s),
        Selector::XPath(s) => Locator::XPath(s),
    }
}

/// Session-fatal signatures seen in raw WebDriver error text.
const SESSION_FATAL_SIGNATURES: [&str; 6] = [
    "closed",
    "Target page",
    "Failed to open",
    "Protocol error",
    "Unable to find session",
    "invalid session",
];

fn classify(e: CmdError) -> ScrapeError {
    let msg = e.to_string();
    match e {
        e if e.is_no_such_window() => ScrapeError::SessionFatal(msg),
        CmdError::Lost(_) => ScrapeError::SessionFatal(msg),
        CmdError::WaitTimeout => ScrapeError::NavigationTransient(msg),
        _ => {
            if SESSION_FATAL_SIGNATURES.iter().any(|s| msg.contains(s)) {
                ScrapeError::SessionFatal(msg)
            } else if msg.contains("timeout") || msg.contains("timed out") {
                ScrapeError::NavigationTransient(msg)
            } else {
                ScrapeError::Unknown(msg)
            }
        }
    }
}

fn classify_connect(e: NewSessionError) -> ScrapeError {
    ScrapeError::SessionFatal(format!("failed to open session: {}", e))
}
