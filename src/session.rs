use std::path::PathBuf;
use std::time::Duration;

use crate::driver::{Driver, PageOps, Session};
use crate::error::ScrapeError;

const PAGE_ACQUIRE_ATTEMPTS: usize = 3;

/// Sole owner of the one live browser session.
///
/// Guarantees that "get me a working page" never fails permanently because of
/// a crashed or closed browser: a session that fails its validity probe is
/// closed best-effort and transparently relaunched on the next acquire.
/// Designed for unattended multi-hour runs where transient browser crashes
/// are expected.
pub struct SessionSupervisor<D: Driver> {
    driver: D,
    profile_dir: PathBuf,
    session: Option<D::Session>,
    pause: Duration,
    launches: usize,
}

impl<D: Driver> SessionSupervisor<D> {
    pub fn new(driver: D, profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            profile_dir: profile_dir.into(),
            session: None,
            pause: Duration::from_millis(1000),
            launches: 0,
        }
    }

    /// Pause applied after a force-recreate and before transient-error
    /// retries. Kept short in tests.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// How many times a session has been launched over the supervisor's
    /// lifetime. Useful for operator logs on long runs.
    pub fn launch_count(&self) -> usize {
        self.launches
    }

    /// A session is valid iff it exists and enumerating its pages does not
    /// error. Any probe failure means invalid (fail closed, never loud).
    async fn is_valid(&self) -> bool {
        match &self.session {
            Some(session) => session.pages().await.is_ok(),
            None => false,
        }
    }

    /// Return the live session, relaunching it first if the current one is
    /// absent or fails the validity probe.
    pub async fn acquire_session(&mut self) -> Result<&D::Session, ScrapeError> {
        if !self.is_valid().await {
            if let Some(old) = self.session.take() {
                ::log::warn!("browser session failed validity probe, recreating");
                old.close().await;
            }
            self.relaunch().await?;
        }
        match self.session.as_ref() {
            Some(session) => Ok(session),
            None => Err(ScrapeError::unknown("no session after launch")),
        }
    }

    /// Unconditionally close the current session (ignoring close errors),
    /// wait briefly for the process to release resources, then relaunch.
    pub async fn force_recreate(&mut self) -> Result<&D::Session, ScrapeError> {
        if let Some(old) = self.session.take() {
            old.close().await;
        }
        tokio::time::sleep(self.pause).await;
        self.relaunch().await?;
        match self.session.as_ref() {
            Some(session) => Ok(session),
            None => Err(ScrapeError::unknown("no session after recreate")),
        }
    }

    async fn relaunch(&mut self) -> Result<(), ScrapeError> {
        let session = self.driver.launch(&self.profile_dir).await?;
        self.launches += 1;
        ::log::info!("launched browser session (launch #{})", self.launches);
        self.session = Some(session);
        Ok(())
    }

    /// Return a usable tab from the current session.
    ///
    /// The engine is single-tab by design: the first open tab is reused
    /// across the whole run to preserve cookies and avoid resource growth.
    /// Session-fatal failures escalate to a force-recreate; other failures
    /// are retried after a short pause. Either returns a page or errors
    /// after the attempt budget — never hangs.
    pub async fn acquire_page(&mut self) -> Result<D::Page, ScrapeError> {
        let mut attempt = 0;
        loop {
            match self.try_page().await {
                Ok(page) => return Ok(page),
                Err(e) => {
                    attempt += 1;
                    if attempt >= PAGE_ACQUIRE_ATTEMPTS {
                        ::log::error!("page acquisition failed after {} attempts: {}", attempt, e);
                        return Err(e);
                    }
                    if e.is_session_fatal() {
                        ::log::warn!("page acquisition hit dead session, recreating: {}", e);
                        self.force_recreate().await?;
                    } else {
                        ::log::warn!("page acquisition failed, retrying: {}", e);
                        tokio::time::sleep(self.pause).await;
                    }
                }
            }
        }
    }

    async fn try_page(&mut self) -> Result<D::Page, ScrapeError> {
        let session = self.acquire_session().await?;
        let pages = session.pages().await?;
        for page in pages {
            if !page.is_closed().await {
                return Ok(page);
            }
        }
        session.new_page().await
    }

    /// Close the session at the end of a run. Best-effort.
    pub async fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
    }
}
