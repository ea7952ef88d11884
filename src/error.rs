use thiserror::Error;

/// Error taxonomy for the scraping engine.
///
/// Raw automation errors are classified into this closed set exactly once, at
/// the driver boundary (see `webdriver.rs`), so retry logic upstream branches
/// on a variant rather than sniffing error message text.
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// The browser context or its session is gone (closed window, dead
    /// WebDriver session, failed launch). Recovery is a session recreate.
    #[error("browser session lost: {0}")]
    SessionFatal(String),

    /// A navigation failed in a way that may succeed on retry (timeout,
    /// network hiccup) without touching the session.
    #[error("navigation failed: {0}")]
    NavigationTransient(String),

    /// A DOM lookup or interaction failed. Never retried; the affected field
    /// resolves to null instead.
    #[error("extraction failed: {0}")]
    ExtractionSoft(String),

    /// Anything that did not match a known signature. The current unit of
    /// work (one profile or one page) is abandoned and the run continues.
    #[error("{0}")]
    Unknown(String),
}

impl ScrapeError {
    pub fn session_fatal(msg: impl Into<String>) -> Self {
        Self::SessionFatal(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// True if recovery requires recreating the browser session.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::SessionFatal(_))
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(e: std::io::Error) -> Self {
        Self::Unknown(e.to_string())
    }
}
