use std::time::Duration;

use crate::config::RunConfig;
use crate::driver::Driver;
use crate::error::ScrapeError;
use crate::harvest::harvest_page;
use crate::output;
use crate::results::{PageResult, PageStatus, RunManifest};
use crate::session::SessionSupervisor;
use crate::sites::SiteAdapter;

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub pages_processed: u32,
    pub pages_failed: u32,
    pub records_extracted: usize,
}

impl RunSummary {
    fn record(&mut self, result: &PageResult) {
        self.pages_processed += 1;
        if result.status == PageStatus::Error {
            self.pages_failed += 1;
        }
        self.records_extracted += result.records.len();
    }
}

/// Drive the full page range, strictly sequentially, persisting each page's
/// result before moving to the next.
///
/// Per-page persistence is the durability contract: a crash or interruption
/// loses at most the in-flight page. A page whose harvest escapes the
/// harvester is logged, recorded as an error result, and the run continues —
/// the only ways to stop a run are external termination and exhausting the
/// page range.
pub async fn run<D: Driver, A: SiteAdapter>(
    driver: D,
    adapter: &A,
    config: &RunConfig,
) -> Result<RunSummary, ScrapeError> {
    output::ensure_dir(&config.output_dir)?;

    let started = chrono::Utc::now();
    let manifest = RunManifest {
        scraped_at: started.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        base_url: adapter.base_url().to_string(),
        start_page: config.start_page,
        total_pages: config.total_pages,
    };
    let run_prefix = format!("{}-{}", adapter.name(), started.format("%Y%m%d-%H%M%S"));

    let mut supervisor = SessionSupervisor::new(driver, &config.profile_dir)
        .with_pause(Duration::from_millis(config.session_pause_ms));

    let mut summary = RunSummary::default();
    if config.total_pages == 0 {
        ::log::warn!("total_pages is 0, nothing to do");
        return Ok(summary);
    }
    let last_page = config.start_page + config.total_pages - 1;

    ::log::info!(
        "starting {} run: pages {}..{}, output {}",
        adapter.name(),
        config.start_page,
        last_page,
        config.output_dir.display()
    );

    for page_number in config.start_page..=last_page {
        let result = match harvest_page(&mut supervisor, adapter, config, &manifest, page_number)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                ::log::error!("page {}: harvest aborted: {}", page_number, e);
                if e.is_session_fatal() {
                    if let Err(recover) = supervisor.force_recreate().await {
                        ::log::warn!("session recovery failed: {}", recover);
                    }
                }
                PageResult::failed(&manifest, page_number, &adapter.listing_url(page_number))
            }
        };

        let path = output::page_result_path(&config.output_dir, &run_prefix, page_number);
        output::write_page_result(&path, &result, adapter.record_key())?;
        if let Some(field) = adapter.plain_text_field() {
            output::write_job_texts(&config.output_dir, page_number, &result, field)?;
        }
        ::log::info!(
            "page {}: {} records ({:?}) -> {}",
            page_number,
            result.records.len(),
            result.status,
            path.display()
        );
        summary.record(&result);

        if page_number < last_page {
            config.page_delay.sleep().await;
        }
    }

    supervisor.shutdown().await;
    ::log::info!(
        "run complete: {} pages ({} failed), {} records, {} session launches",
        summary.pages_processed,
        summary.pages_failed,
        summary.records_extracted,
        supervisor.launch_count()
    );
    Ok(summary)
}
