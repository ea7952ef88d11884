use clap::Parser;
use page_harvest::runner::{self, RunSummary};
use page_harvest::sites::{MultiKomputer, Oferia, SiteAdapter, Useme};
use page_harvest::webdriver::WebDriver;
use page_harvest::{RunConfig, ScrapeError};

mod args;
use args::{Args, SiteArg};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    println!("Note: harvesting requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!(
        "Starting harvest: site={:?}, pages {}..{}",
        args.site,
        config.start_page,
        config.start_page + config.total_pages.saturating_sub(1)
    );

    let result = match args.site {
        SiteArg::Useme => run_site(Useme, &config).await,
        SiteArg::Oferia => run_site(Oferia, &config).await,
        SiteArg::MultiKomputer => run_site(MultiKomputer, &config).await,
    };

    match result {
        Ok(summary) => {
            ::log::info!(
                "Harvest complete: {} pages processed ({} failed), {} records",
                summary.pages_processed,
                summary.pages_failed,
                summary.records_extracted
            );
        }
        Err(e) => {
            ::log::error!("Harvest aborted: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_config(args: &Args) -> Result<RunConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        return RunConfig::from_file(path);
    }

    let mut config = RunConfig {
        start_page: args.start_page,
        total_pages: args.pages,
        max_records_per_page: args.max_records,
        output_dir: args.output_dir.clone(),
        profile_dir: args.profile_dir.clone(),
        webdriver_url: args.webdriver_url.clone(),
        ..RunConfig::default()
    };

    // Override the WebDriver URL with an environment variable if provided
    if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
        if !webdriver_url.is_empty() {
            config.webdriver_url = webdriver_url;
        }
    }

    Ok(config)
}

async fn run_site<A: SiteAdapter>(adapter: A, config: &RunConfig) -> Result<RunSummary, ScrapeError> {
    let driver = WebDriver::new(&config.webdriver_url);
    runner::run(driver, &adapter, config).await
}
