use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::ScrapeError;

/// A DOM selector, either CSS or XPath.
///
/// XPath is used wherever the engine needs positional scoping (e.g. "the
/// heading link inside the third card"); CSS for everything simpler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Css(String),
    XPath(String),
}

impl Selector {
    pub fn css(s: impl Into<String>) -> Self {
        Self::Css(s.into())
    }

    pub fn xpath(s: impl Into<String>) -> Self {
        Self::XPath(s.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css({})", s),
            Self::XPath(s) => write!(f, "xpath({})", s),
        }
    }
}

/// The browser-automation capability the engine depends on.
///
/// The engine is generic over this surface and never touches a concrete
/// automation product directly; `webdriver.rs` provides the fantoccini
/// implementation, and the test suite provides a scripted stub.
pub trait Driver {
    type Session: Session<Page = Self::Page>;
    type Page: PageOps;

    /// Launch a persistent browser session bound to the given on-disk
    /// profile directory (cookies and login state survive across runs).
    async fn launch(&self, profile_dir: &Path) -> Result<Self::Session, ScrapeError>;
}

/// One persistent browser context.
pub trait Session {
    type Page: PageOps;

    /// Enumerate the currently open tabs. Failing this probe means the
    /// session is dead and must be recreated.
    async fn pages(&self) -> Result<Vec<Self::Page>, ScrapeError>;

    /// Open a fresh tab.
    async fn new_page(&self) -> Result<Self::Page, ScrapeError>;

    /// Close the session. Best-effort and idempotent: closing an
    /// already-closed session must never raise.
    async fn close(&self);
}

/// A single browser tab.
///
/// `*_first` lookups resolve to the first matching element; `Ok(None)` means
/// "no match", which is a normal outcome, not an error.
pub trait PageOps: Clone {
    async fn is_closed(&self) -> bool;

    /// Navigate and wait for the page to settle, bounded by `timeout`.
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ScrapeError>;

    async fn count(&self, selector: &Selector) -> Result<usize, ScrapeError>;

    async fn text_first(&self, selector: &Selector) -> Result<Option<String>, ScrapeError>;

    async fn attr_first(
        &self,
        selector: &Selector,
        attr: &str,
    ) -> Result<Option<String>, ScrapeError>;

    /// Click the first match. `Ok(false)` means no element matched.
    async fn click_first(&self, selector: &Selector) -> Result<bool, ScrapeError>;
}
