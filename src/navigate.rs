use std::time::Duration;

use crate::config::RunConfig;
use crate::driver::{Driver, PageOps};
use crate::error::ScrapeError;
use crate::session::SessionSupervisor;

/// Retry policy for one navigation call. The budget is local to each call,
/// not shared across the run.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    pub max_retries: u32,
    pub timeout: Duration,
    pub retry_pause: Duration,
}

impl NavigationPolicy {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            max_retries: config.navigation_retries,
            timeout: Duration::from_millis(config.navigation_timeout_ms),
            retry_pause: Duration::from_millis(config.session_pause_ms),
        }
    }
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            timeout: Duration::from_secs(30),
            retry_pause: Duration::from_millis(1000),
        }
    }
}

/// Load a URL with resilience to mid-flight session death.
///
/// Session-fatal failures force-recreate the session, re-acquire a page into
/// the caller's slot, and retry. Transient failures retry on the same page
/// after a pause. Anything else (DNS failure, 4xx) is rethrown immediately —
/// the caller logs and moves on rather than aborting the run.
pub async fn navigate<D: Driver>(
    supervisor: &mut SessionSupervisor<D>,
    page: &mut D::Page,
    url: &str,
    policy: &NavigationPolicy,
) -> Result<(), ScrapeError> {
    let mut retries = 0;
    loop {
        match page.goto(url, policy.timeout).await {
            Ok(()) => return Ok(()),
            Err(e @ ScrapeError::SessionFatal(_)) => {
                if retries >= policy.max_retries {
                    return Err(e);
                }
                retries += 1;
                ::log::warn!(
                    "session died loading {} (retry {} of {}): {}",
                    url,
                    retries,
                    policy.max_retries,
                    e
                );
                supervisor.force_recreate().await?;
                *page = supervisor.acquire_page().await?;
                tokio::time::sleep(policy.retry_pause).await;
            }
            Err(e @ ScrapeError::NavigationTransient(_)) => {
                if retries >= policy.max_retries {
                    return Err(e);
                }
                retries += 1;
                ::log::warn!(
                    "navigation to {} failed (retry {} of {}): {}",
                    url,
                    retries,
                    policy.max_retries,
                    e
                );
                tokio::time::sleep(policy.retry_pause).await;
            }
            Err(e) => return Err(e),
        }
    }
}
