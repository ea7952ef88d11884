use std::fs;
use std::path::Path;

use super::stub::{StubDoc, World};
use super::{LISTING, TestSite, fast_config, listing_doc, profile_doc};
use crate::config::RunConfig;
use crate::driver::{PageOps, Selector};
use crate::error::ScrapeError;
use crate::extract::FieldReader;
use crate::results::Record;
use crate::runner;
use crate::sites::SiteAdapter;

fn config_into(dir: &Path) -> RunConfig {
    RunConfig {
        output_dir: dir.to_path_buf(),
        ..fast_config()
    }
}

/// Page-result JSON files written into `dir`, sorted by name.
fn json_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

fn read_page_file(dir: &Path, page_number: u32) -> serde_json::Value {
    let name = json_files(dir)
        .into_iter()
        .find(|name| name.ends_with(&format!("-page-{}.json", page_number)))
        .unwrap_or_else(|| panic!("no output file for page {}", page_number));
    let content = fs::read_to_string(dir.join(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn single_page_run_writes_records_in_order() {
    let world = World::new();
    world.add_doc(LISTING, listing_doc(&["/p/1", "/p/2"]));
    world.add_doc("https://example.com/p/1", profile_doc("X"));
    world.add_doc("https://example.com/p/2", profile_doc("Y"));
    let dir = tempfile::tempdir().unwrap();

    let summary = runner::run(world.driver(), &TestSite, &config_into(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.pages_processed, 1);
    assert_eq!(summary.records_extracted, 2);

    let value = read_page_file(dir.path(), 1);
    assert_eq!(value["pageNumber"], 1);
    assert_eq!(value["listingUrl"], LISTING);
    assert_eq!(value["status"], "ok");
    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "X");
    assert_eq!(records[1]["name"], "Y");
}

#[tokio::test]
async fn zero_card_page_still_produces_a_file() {
    let world = World::new();
    world.add_doc(LISTING, StubDoc::new());
    let dir = tempfile::tempdir().unwrap();

    let summary = runner::run(world.driver(), &TestSite, &config_into(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.pages_processed, 1);
    assert_eq!(summary.records_extracted, 0);

    let value = read_page_file(dir.path(), 1);
    assert_eq!(value["status"], "empty");
    assert_eq!(value["records"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn failing_page_does_not_stop_its_neighbors() {
    let world = World::new();
    world.add_doc(LISTING, listing_doc(&["/p/1"]));
    world.add_doc("https://example.com/list?page=3", listing_doc(&["/p/2"]));
    world.add_doc("https://example.com/p/1", profile_doc("X"));
    world.add_doc("https://example.com/p/2", profile_doc("Y"));
    world.fail_goto(
        "https://example.com/list?page=2",
        ScrapeError::unknown("HTTP 503"),
    );
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_into(dir.path());
    config.total_pages = 3;

    let summary = runner::run(world.driver(), &TestSite, &config)
        .await
        .unwrap();

    assert_eq!(summary.pages_processed, 3);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.records_extracted, 2);

    assert_eq!(read_page_file(dir.path(), 1)["status"], "ok");
    let failed = read_page_file(dir.path(), 2);
    assert_eq!(failed["status"], "error");
    assert_eq!(failed["records"].as_array().unwrap().len(), 0);
    assert_eq!(read_page_file(dir.path(), 3)["status"], "ok");
}

#[tokio::test]
async fn every_processed_page_gets_its_own_file() {
    let world = World::new();
    world.add_doc(LISTING, listing_doc(&["/p/1"]));
    world.add_doc("https://example.com/list?page=2", listing_doc(&["/p/1"]));
    world.add_doc("https://example.com/list?page=3", listing_doc(&["/p/1"]));
    world.add_doc("https://example.com/p/1", profile_doc("X"));
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_into(dir.path());
    config.total_pages = 3;

    runner::run(world.driver(), &TestSite, &config).await.unwrap();

    // One independently valid JSON file per processed page, no temp files
    let files = json_files(dir.path());
    assert_eq!(files.len(), 3);
    for page in 1..=3 {
        let value = read_page_file(dir.path(), page);
        assert_eq!(value["pageNumber"], page);
        assert!(value["scrapedAt"].is_string());
        assert!(value["records"].is_array());
    }
}

#[tokio::test]
async fn session_death_during_listing_load_is_recovered() {
    let world = World::new();
    world.add_doc(LISTING, listing_doc(&["/p/1", "/p/2"]));
    world.add_doc("https://example.com/p/1", profile_doc("X"));
    world.add_doc("https://example.com/p/2", profile_doc("Y"));
    // First two attempts die mid-flight; the third succeeds
    world.fail_goto(LISTING, ScrapeError::session_fatal("browser has been closed"));
    world.fail_goto(LISTING, ScrapeError::session_fatal("browser has been closed"));
    let dir = tempfile::tempdir().unwrap();

    let summary = runner::run(world.driver(), &TestSite, &config_into(dir.path()))
        .await
        .unwrap();

    // Initial launch plus one per force-recreate
    assert_eq!(world.launches(), 3);
    assert_eq!(summary.pages_failed, 0);
    let value = read_page_file(dir.path(), 1);
    assert_eq!(value["records"].as_array().unwrap().len(), 2);
}

/// Adapter variant whose records are text blobs, mirroring the job-board
/// site: the description field is additionally written to per-job files.
struct JobSite;

impl SiteAdapter for JobSite {
    fn name(&self) -> &'static str {
        "jobsite"
    }

    fn base_url(&self) -> &'static str {
        "https://example.com"
    }

    fn record_key(&self) -> &'static str {
        "jobs"
    }

    fn listing_url(&self, page_number: u32) -> String {
        TestSite.listing_url(page_number)
    }

    fn card_selector(&self) -> Selector {
        TestSite.card_selector()
    }

    fn profile_link_selectors(&self, card_index: usize) -> Vec<Selector> {
        TestSite.profile_link_selectors(card_index)
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["title", "description"]
    }

    fn plain_text_field(&self) -> Option<&'static str> {
        Some("description")
    }

    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record {
        let mut record = Record::new("");
        record.set("title", reader.text(&Selector::css("h1.name")).await);
        record.set("description", reader.text(&Selector::css(".desc")).await);
        record
    }
}

#[tokio::test]
async fn plain_text_sites_also_write_per_job_files() {
    let world = World::new();
    world.add_doc(LISTING, listing_doc(&["/p/1", "/p/2"]));
    world.add_doc(
        "https://example.com/p/1",
        StubDoc::new()
            .with_text("h1.name", "First job")
            .with_text(".desc", "Fix the printer"),
    );
    world.add_doc(
        "https://example.com/p/2",
        StubDoc::new().with_text("h1.name", "Second job"),
    );
    let dir = tempfile::tempdir().unwrap();

    runner::run(world.driver(), &JobSite, &config_into(dir.path()))
        .await
        .unwrap();

    let text = fs::read_to_string(dir.path().join("page-1-job-0.txt")).unwrap();
    assert_eq!(text, "Fix the printer");
    // Null description: JSON record exists, text file does not
    assert!(!dir.path().join("page-1-job-1.txt").exists());
    let value = read_page_file(dir.path(), 1);
    assert_eq!(value["jobs"].as_array().unwrap().len(), 2);
}
