#![allow(async_fn_in_trait)]

pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod links;
pub mod navigate;
pub mod output;
pub mod results;
pub mod runner;
pub mod session;
pub mod sites;
pub mod webdriver;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use config::{DelayRange, RunConfig};
pub use error::ScrapeError;
pub use results::{PageResult, PageStatus, Record};
pub use runner::RunSummary;
pub use sites::SiteAdapter;

use std::path::PathBuf;

/// Builder for one scraping run against a single site.
///
/// ```no_run
/// use page_harvest::Harvest;
/// use page_harvest::sites::Useme;
///
/// # async fn demo() -> Result<(), page_harvest::ScrapeError> {
/// let summary = Harvest::new(Useme)
///     .with_start_page(1)
///     .with_total_pages(10)
///     .with_max_records_per_page(25)
///     .run()
///     .await?;
/// println!("{} records", summary.records_extracted);
/// # Ok(())
/// # }
/// ```
pub struct Harvest<A: SiteAdapter> {
    adapter: A,
    config: RunConfig,
}

impl<A: SiteAdapter> Harvest<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_start_page(mut self, start_page: u32) -> Self {
        self.config.start_page = start_page;
        self
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.config.total_pages = total_pages;
        self
    }

    pub fn with_max_records_per_page(mut self, cap: usize) -> Self {
        self.config.max_records_per_page = Some(cap);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn with_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.profile_dir = dir.into();
        self
    }

    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    /// Run the harvest against a live WebDriver instance.
    pub async fn run(self) -> Result<RunSummary, ScrapeError> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let driver = webdriver::WebDriver::new(&config.webdriver_url);
        runner::run(driver, &self.adapter, &config).await
    }
}
