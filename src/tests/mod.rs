
mod runner_tests;
mod supervisor_tests;

use crate::config::{DelayRange, RunConfig};
use crate::driver::{PageOps, Selector};
use crate::extract::FieldReader;
use crate::results::{Record, RunManifest};
use crate::sites::SiteAdapter;
use self::stub::StubDoc;

pub(crate) const LISTING: &str = "https://example.com/list";

/// Minimal adapter used by the engine tests: cards under `.card`, two
/// fields, phone behind a reveal control.
pub(crate) struct TestSite;

impl SiteAdapter for TestSite {
    fn name(&self) -> &'static str {
        "testsite"
    }

    fn base_url(&self) -> &'static str {
        "https://example.com"
    }

    fn record_key(&self) -> &'static str {
        "records"
    }

    fn listing_url(&self, page_number: u32) -> String {
        if page_number <= 1 {
            LISTING.to_string()
        } else {
            format!("{}?page={}", LISTING, page_number)
        }
    }

    fn card_selector(&self) -> Selector {
        Selector::css(".card")
    }

    fn profile_link_selectors(&self, card_index: usize) -> Vec<Selector> {
        let nth = card_index + 1;
        vec![
            Selector::css(format!(".card:nth-of-type({}) h2 a", nth)),
            Selector::css(format!(".card:nth-of-type({}) a", nth)),
        ]
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["name", "phone"]
    }

    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record {
        let mut record = Record::new("");
        record.set(
            "name",
            reader
                .text_or(&Selector::css("h1.name"), &Selector::css("h1"))
                .await,
        );
        record.set(
            "phone",
            reader
                .reveal(&Selector::css(".show-phone"), &Selector::css("a.phone"))
                .await,
        );
        record
    }
}

/// Run configuration with all delays zeroed so tests stay fast.
pub(crate) fn fast_config() -> RunConfig {
    RunConfig {
        profile_delay: DelayRange::new(0, 0),
        page_delay: DelayRange::new(0, 0),
        reveal_settle: DelayRange::new(0, 0),
        reveal_budget_ms: 500,
        navigation_timeout_ms: 1000,
        session_pause_ms: 0,
        ..RunConfig::default()
    }
}

pub(crate) fn manifest() -> RunManifest {
    RunManifest {
        scraped_at: "2024-01-01T00:00:00Z".to_string(),
        base_url: "https://example.com".to_string(),
        start_page: 1,
        total_pages: 1,
    }
}

/// A listing document whose cards carry the given heading-link hrefs.
pub(crate) fn listing_doc(hrefs: &[&str]) -> StubDoc {
    let mut doc = StubDoc::new().with_count(".card", hrefs.len());
    for (i, href) in hrefs.iter().enumerate() {
        doc = doc.with_attr(&format!(".card:nth-of-type({}) h2 a", i + 1), "href", href);
    }
    doc
}

/// A profile document with a name heading and a working reveal-on-click
/// phone control.
pub(crate) fn profile_doc(name: &str) -> StubDoc {
    StubDoc::new()
        .with_text("h1.name", name)
        .with_count(".show-phone", 1)
        .with_post_click_attr("a.phone", "href", "tel:+48111222333")
}
