use std::time::Duration;

use crate::config::RunConfig;
use crate::driver::{Driver, PageOps};
use crate::error::ScrapeError;
use crate::extract::FieldReader;
use crate::links::LinkCollector;
use crate::navigate::{NavigationPolicy, navigate};
use crate::results::{PageResult, PageStatus, Record, RunManifest};
use crate::session::SessionSupervisor;
use crate::sites::SiteAdapter;

/// Process one listing page end-to-end into a PageResult.
///
/// Failures are contained at the smallest unit that makes sense: a failed
/// listing load yields an `error` result, a page with no cards yields an
/// `empty` result, and a failed profile visit yields an all-null record —
/// none of them abort the page, let alone the run. Only failures the
/// supervisor itself cannot recover from escape to the caller.
pub async fn harvest_page<D: Driver, A: SiteAdapter>(
    supervisor: &mut SessionSupervisor<D>,
    adapter: &A,
    config: &RunConfig,
    manifest: &RunManifest,
    page_number: u32,
) -> Result<PageResult, ScrapeError> {
    let listing_url = adapter.listing_url(page_number);
    let mut result = PageResult::new(manifest, page_number, &listing_url);
    let policy = NavigationPolicy::from_config(config);

    let mut page = supervisor.acquire_page().await?;

    if let Err(e) = navigate(supervisor, &mut page, &listing_url, &policy).await {
        ::log::error!(
            "page {}: giving up on listing {}: {}",
            page_number,
            listing_url,
            e
        );
        result.status = PageStatus::Error;
        return Ok(result);
    }

    let card_count = match page.count(&adapter.card_selector()).await {
        Ok(n) => n,
        Err(e) => {
            ::log::error!("page {}: card enumeration failed: {}", page_number, e);
            result.status = PageStatus::Error;
            return Ok(result);
        }
    };

    if card_count == 0 {
        ::log::info!("page {}: no cards found", page_number);
        result.status = PageStatus::Empty;
        return Ok(result);
    }
    ::log::info!("page {}: found {} cards", page_number, card_count);

    let mut links = collect_links(&page, adapter, &listing_url, card_count).await?;
    if let Some(cap) = config.max_records_per_page {
        if links.len() > cap {
            ::log::info!(
                "page {}: capping {} profiles to {}",
                page_number,
                links.len(),
                cap
            );
            links.truncate(cap);
        }
    }

    for (index, url) in links.iter().enumerate() {
        match visit_profile(supervisor, adapter, config, &policy, &mut page, url).await {
            Ok(record) => result.records.push(record),
            Err(e) => {
                // The URL still gets a record so downstream consumers know
                // an attempt was made.
                ::log::error!(
                    "page {} profile {} ({}): recording as null: {}",
                    page_number,
                    index,
                    url,
                    e
                );
                result.records.push(Record::null_fields(url, adapter.field_names()));
            }
        }
        if index + 1 < links.len() {
            config.profile_delay.sleep().await;
        }
    }

    Ok(result)
}

/// Enumerate the detail-page links of all cards, in card order, applying the
/// adapter's per-card selector preference order.
async fn collect_links<P: PageOps, A: SiteAdapter>(
    page: &P,
    adapter: &A,
    listing_url: &str,
    card_count: usize,
) -> Result<Vec<String>, ScrapeError> {
    let mut collector = LinkCollector::new(listing_url, adapter.page_param())?;

    for card_index in 0..card_count {
        let mut found = false;
        for selector in adapter.profile_link_selectors(card_index) {
            match page.attr_first(&selector, "href").await {
                Ok(Some(href)) if !href.trim().is_empty() => {
                    collector.offer(&href);
                    found = true;
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    ::log::debug!("card {}: link lookup failed for {}: {}", card_index, selector, e);
                }
            }
        }
        if !found {
            ::log::debug!("card {}: no detail link found, skipping", card_index);
        }
    }

    Ok(collector.into_links())
}

async fn visit_profile<D: Driver, A: SiteAdapter>(
    supervisor: &mut SessionSupervisor<D>,
    adapter: &A,
    config: &RunConfig,
    policy: &NavigationPolicy,
    page: &mut D::Page,
    url: &str,
) -> Result<Record, ScrapeError> {
    navigate(supervisor, page, url, policy).await?;

    let reader = FieldReader::new(
        &*page,
        config.reveal_settle,
        Duration::from_millis(config.reveal_budget_ms),
    );
    let mut record = adapter.extract(&reader).await;
    record.url = url.to_string();
    Ok(record)
}
