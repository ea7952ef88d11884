use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An inclusive millisecond range for randomized politeness delays.
///
/// The magnitudes are empirical anti-rate-limiting heuristics, so they are
/// configuration rather than constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Sample a duration uniformly from the range.
    pub fn sample(&self) -> Duration {
        let ms = if self.min_ms >= self.max_ms {
            self.min_ms
        } else {
            rand::rng().random_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(ms)
    }

    pub async fn sleep(&self) {
        tokio::time::sleep(self.sample()).await;
    }
}

/// Configuration for one scraping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// First listing page number to process (1-based)
    #[serde(default = "default_start_page")]
    pub start_page: u32,

    /// Number of listing pages to process
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,

    /// Cap on profiles visited per listing page (unbounded if absent;
    /// small values are useful for smoke tests)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_records_per_page: Option<usize>,

    /// Directory for per-page JSON output files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// On-disk browser profile directory (reused cookies/login state)
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Delay between profile visits within a listing page
    #[serde(default = "default_profile_delay")]
    pub profile_delay: DelayRange,

    /// Delay between listing pages (larger than the intra-page delay)
    #[serde(default = "default_page_delay")]
    pub page_delay: DelayRange,

    /// Settle delay after clicking a reveal-on-click control
    #[serde(default = "default_reveal_settle")]
    pub reveal_settle: DelayRange,

    /// Overall budget for one reveal-on-click sequence
    #[serde(default = "default_reveal_budget_ms")]
    pub reveal_budget_ms: u64,

    /// Per-attempt navigation timeout
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Navigation retries on session-fatal or transient failures
    #[serde(default = "default_navigation_retries")]
    pub navigation_retries: u32,

    /// Pause before retrying navigation and after force-recreating a session
    #[serde(default = "default_session_pause_ms")]
    pub session_pause_ms: u64,
}

impl RunConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_page: default_start_page(),
            total_pages: default_total_pages(),
            max_records_per_page: None,
            output_dir: default_output_dir(),
            profile_dir: default_profile_dir(),
            webdriver_url: default_webdriver_url(),
            profile_delay: default_profile_delay(),
            page_delay: default_page_delay(),
            reveal_settle: default_reveal_settle(),
            reveal_budget_ms: default_reveal_budget_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            navigation_retries: default_navigation_retries(),
            session_pause_ms: default_session_pause_ms(),
        }
    }
}

fn default_start_page() -> u32 {
    1
}

fn default_total_pages() -> u32 {
    1
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("scraped-data")
}

fn default_profile_dir() -> PathBuf {
    PathBuf::from("browser-profile")
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_profile_delay() -> DelayRange {
    DelayRange::new(800, 1500)
}

fn default_page_delay() -> DelayRange {
    DelayRange::new(1500, 3500)
}

fn default_reveal_settle() -> DelayRange {
    DelayRange::new(1000, 1500)
}

fn default_reveal_budget_ms() -> u64 {
    4000
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_navigation_retries() -> u32 {
    2
}

fn default_session_pause_ms() -> u64 {
    1000
}
