use crate::driver::{PageOps, Selector};
use crate::extract::FieldReader;
use crate::results::Record;
use crate::sites::SiteAdapter;

const CARDS: &str = "//div[contains(@class,'company-card')]";

/// Company directory on useme. Phone and email sit behind reveal-on-click
/// controls on the company profile page.
pub struct Useme;

impl SiteAdapter for Useme {
    fn name(&self) -> &'static str {
        "useme"
    }

    fn base_url(&self) -> &'static str {
        "https://useme.com"
    }

    fn record_key(&self) -> &'static str {
        "companies"
    }

    fn listing_url(&self, page_number: u32) -> String {
        if page_number <= 1 {
            format!("{}/pl/companies/", self.base_url())
        } else {
            format!("{}/pl/companies/?page={}", self.base_url(), page_number)
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
        &["name", "location", "website", "phone", "email"]
    }

    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record {
        let mut record = Record::new("");

        record.set(
            "name",
            reader
                .text_or(
                    &Selector::xpath("//div[contains(@class,'company-header')]//h1"),
                    &Selector::css("h1"),
                )
                .await,
        );
        record.set(
            "location",
            reader
                .text(&Selector::css(".company-header .location"))
                .await,
        );
        record.set(
            "website",
            reader.href(&Selector::css("a.company-website")).await,
        );
        record.set(
            "phone",
            reader
                .reveal(
                    &Selector::xpath("//button[contains(@class,'show-phone')]"),
                    &Selector::xpath("//a[starts-with(@href,'tel:')]"),
                )
                .await,
        );
        record.set(
            "email",
            reader
                .reveal(
                    &Selector::xpath("//button[contains(@class,'show-email')]"),
                    &Selector::xpath("//a[starts-with(@href,'mailto:')]"),
                )
                .await,
        );

        record
    }
}
