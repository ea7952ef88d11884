use crate::driver::{PageOps, Selector};
use crate::extract::FieldReader;
use crate::results::Record;
use crate::sites::SiteAdapter;

const CARDS: &str = "//article[contains(@class,'job-offer')]";

/// Job-offer board on multi-komputer. Records are mostly one text blob per
/// job; the runner also writes each description to its own `.txt` file.
pub struct MultiKomputer;

impl SiteAdapter for MultiKomputer {
    fn name(&self) -> &'static str {
        "multi-komputer"
    }

    fn base_url(&self) -> &'static str {
        "https://multi-komputer.pl"
    }

    fn record_key(&self) -> &'static str {
        "jobs"
    }

    fn listing_url(&self, page_number: u32) -> String {
        if page_number <= 1 {
            format!("{}/ogloszenia", self.base_url())
        } else {
            format!("{}/ogloszenia?page={}", self.base_url(), page_number)
        }
    }

    fn card_selector(&self) -> Selector {
        Selector::xpath(CARDS)
    }

    fn profile_link_selectors(&self, card_index: usize) -> Vec<Selector> {
        let nth = card_index + 1;
        vec![
            Selector::xpath(format!("({})[{}]//h2//a", CARDS, nth)),
            Selector::xpath(format!(
                "({})[{}]//a[not(starts-with(@href,'javascript'))]",
                CARDS, nth
            )),
        ]
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["title", "posted", "description"]
    }

    fn plain_text_field(&self) -> Option<&'static str> {
        Some("description")
    }

    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record {
        let mut record = Record::new("");

        record.set(
            "title",
            reader
                .text_or(
                    &Selector::xpath("//article//h1"),
                    &Selector::css("h1"),
                )
                .await,
        );
        record.set(
            "posted",
            reader.text(&Selector::css(".job-meta time")).await,
        );
        record.set(
            "description",
            reader
                .text_or(
                    &Selector::css(".job-description"),
                    &Selector::css("article"),
                )
                .await,
        );

        record
    }
}
