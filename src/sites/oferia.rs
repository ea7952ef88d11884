use crate::driver::{PageOps, Selector};
use crate::extract::FieldReader;
use crate::results::Record;
use crate::sites::SiteAdapter;

const CARDS: &str = "//div[contains(@class,'executor-card')]";

/// Contractor directory on oferia. The listing paginates with a `strona`
/// query parameter; phone numbers hide behind a reveal control.
pub struct Oferia;

impl SiteAdapter for Oferia {
    fn name(&self) -> &'static str {
        "oferia"
    }

    fn base_url(&self) -> &'static str {
        "https://oferia.pl"
    }

    fn record_key(&self) -> &'static str {
        "contractors"
    }

    fn listing_url(&self, page_number: u32) -> String {
        if page_number <= 1 {
            format!("{}/wykonawcy", self.base_url())
        } else {
            format!("{}/wykonawcy?strona={}", self.base_url(), page_number)
        }
    }

    fn page_param(&self) -> &'static str {
        "strona"
    }

    fn card_selector(&self) -> Selector {
        Selector::xpath(CARDS)
    }

    fn profile_link_selectors(&self, card_index: usize) -> Vec<Selector> {
        let nth = card_index + 1;
        vec![
            Selector::xpath(format!("({})[{}]//h3//a", CARDS, nth)),
            Selector::xpath(format!(
                "({})[{}]//a[not(starts-with(@href,'javascript'))]",
                CARDS, nth
            )),
        ]
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["name", "category", "location", "phone"]
    }

    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record {
        let mut record = Record::new("");

        record.set(
            "name",
            reader
                .text_or(
                    &Selector::xpath("//div[contains(@class,'executor-header')]//h1"),
                    &Selector::css("h1"),
                )
                .await,
        );
        record.set(
            "category",
            reader
                .text(&Selector::css(".executor-header .category"))
                .await,
        );
        record.set(
            "location",
            reader
                .text(&Selector::css(".executor-header .location"))
                .await,
        );
        record.set(
            "phone",
            reader
                .reveal(
                    &Selector::xpath("//a[contains(@class,'pokaz-numer')]"),
                    &Selector::xpath("//a[starts-with(@href,'tel:')]"),
                )
                .await,
        );

        record
    }
}
