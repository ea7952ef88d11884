pub mod multikomputer;
pub mod oferia;
pub mod useme;

pub use multikomputer::MultiKomputer;
pub use oferia::Oferia;
pub use useme::Useme;

use crate::driver::{PageOps, Selector};
use crate::extract::FieldReader;
use crate::results::Record;

/// Site-specific knowledge plugged into the generic engine: how listing URLs
/// are built, where the cards are, how to get from a card to its detail page,
/// and how to read one record off a loaded detail page.
///
/// Each adapter is a thin, selector-heavy description; all resilience lives
/// in the engine.
pub trait SiteAdapter {
    fn name(&self) -> &'static str;

    fn base_url(&self) -> &'static str;

    /// JSON key for the records array in output files
    /// (`companies`, `contractors`, `jobs`).
    fn record_key(&self) -> &'static str;

    /// Listing URL for a page number. Page 1 carries no pagination parameter.
    fn listing_url(&self, page_number: u32) -> String;

    /// Name of the pagination query parameter, used to recognize paginated
    /// variants of the listing URL among card links.
    fn page_param(&self) -> &'static str {
        "page"
    }

    /// Selector matching the repeated card elements on a listing page.
    fn card_selector(&self) -> Selector;

    /// Selectors for the detail-page link of one card, in preference order
    /// (specific heading link first, then the first plain anchor).
    /// `card_index` is zero-based.
    fn profile_link_selectors(&self, card_index: usize) -> Vec<Selector>;

    /// Field names of one record, used to build all-null records when a
    /// profile visit fails unrecoverably.
    fn field_names(&self) -> &'static [&'static str];

    /// If set, the runner additionally writes this field of every record to
    /// its own `page-{P}-job-{I}.txt` file.
    fn plain_text_field(&self) -> Option<&'static str> {
        None
    }

    /// Read one record off a loaded detail page. All lookups are soft; a
    /// missing field is `None`, never an error.
    async fn extract<P: PageOps>(&self, reader: &FieldReader<'_, P>) -> Record;
}
