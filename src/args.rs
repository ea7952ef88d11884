use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(about = "Resilient multi-page scraper for freelancer job-board listings")]
#[command(version)]
pub struct Args {
    /// Target site to harvest
    #[arg(value_enum)]
    pub site: SiteArg,

    /// First listing page number (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub start_page: u32,

    /// Number of listing pages to process
    #[arg(short = 'n', long, default_value_t = 1)]
    pub pages: u32,

    /// Cap on profiles visited per listing page (unbounded if omitted)
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Directory for per-page JSON output files
    #[arg(long, default_value = "scraped-data")]
    pub output_dir: PathBuf,

    /// On-disk browser profile directory (reused login state)
    #[arg(long, default_value = "browser-profile")]
    pub profile_dir: PathBuf,

    /// URL for the WebDriver instance
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver_url: String,

    /// JSON config file; when given, it replaces all flags above except the site
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    Useme,
    Oferia,
    MultiKomputer,
}
