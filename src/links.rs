use regex::Regex;
use std::collections::HashSet;
use url::Url;

use crate::error::ScrapeError;

/// Href markers that can never be navigated to, checked on the raw string
/// before URL resolution.
const DEFAULT_EXCLUDE_PATTERNS: [&str; 5] = [
    r"^javascript:",
    r"^mailto:",
    r"^tel:",
    r"^#",
    r"\.(jpg|jpeg|png|gif|css|js|ico|svg|woff|woff2|ttf|eot|pdf)$",
];

/// Collects profile links from one listing page.
///
/// Hrefs are normalized to absolute URLs, restricted to the listing's domain,
/// deduplicated first-seen-wins, and filtered against the listing page's own
/// URL including its paginated variants (a card that links back to the list
/// must not cause a self-loop).
pub struct LinkCollector {
    listing_root: String,
    page_param: String,
    required_domain: Option<String>,
    base: Url,
    exclude_regexes: Vec<Regex>,
    seen: HashSet<String>,
    links: Vec<String>,
}

impl LinkCollector {
    pub fn new(listing_url: &str, page_param: &str) -> Result<Self, ScrapeError> {
        let base = Url::parse(listing_url)
            .map_err(|e| ScrapeError::unknown(format!("invalid listing URL {}: {}", listing_url, e)))?;

        let mut exclude_regexes = Vec::with_capacity(DEFAULT_EXCLUDE_PATTERNS.len());
        for pattern in DEFAULT_EXCLUDE_PATTERNS {
            let regex = Regex::new(pattern)
                .map_err(|e| ScrapeError::unknown(format!("invalid exclude pattern: {}", e)))?;
            exclude_regexes.push(regex);
        }

        let listing_root = strip_page_param(&base, page_param);
        let required_domain = base.domain().map(|d| d.to_string());

        Ok(Self {
            listing_root,
            page_param: page_param.to_string(),
            required_domain,
            base,
            exclude_regexes,
            seen: HashSet::new(),
            links: Vec::new(),
        })
    }

    /// Offer a raw href. Returns true if it was accepted into the link list.
    pub fn offer(&mut self, href: &str) -> bool {
        let href = href.trim();
        if href.is_empty() {
            return false;
        }

        for regex in &self.exclude_regexes {
            if regex.is_match(href) {
                ::log::debug!("excluded non-navigable href: {}", href);
                return false;
            }
        }

        let resolved = match self.base.join(href) {
            Ok(url) => url,
            Err(e) => {
                ::log::debug!("unresolvable href {}: {}", href, e);
                return false;
            }
        };

        if !matches!(resolved.scheme(), "http" | "https") {
            return false;
        }

        if let Some(required) = &self.required_domain {
            if resolved.domain() != Some(required.as_str()) {
                ::log::debug!("off-domain href rejected: {}", resolved);
                return false;
            }
        }

        // Strip the fragment before comparison and storage
        let mut normalized = resolved.clone();
        normalized.set_fragment(None);

        // Reject the listing page itself and its paginated variants
        if strip_page_param(&normalized, &self.page_param) == self.listing_root {
            ::log::debug!("self-referential listing link rejected: {}", normalized);
            return false;
        }

        let normalized = normalized.to_string();
        if !self.seen.insert(normalized.clone()) {
            return false;
        }

        self.links.push(normalized);
        true
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The accepted links, in first-seen order.
    pub fn into_links(self) -> Vec<String> {
        self.links
    }
}

/// Remove the pagination query parameter and fragment, yielding a canonical
/// form under which `list` and `list?page=2` compare equal.
fn strip_page_param(url: &Url, page_param: &str) -> String {
    let mut stripped = url.clone();
    stripped.set_fragment(None);

    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != page_param)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if remaining.is_empty() {
        stripped.set_query(None);
    } else {
        let query = remaining
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        stripped.set_query(Some(&query));
    }

    stripped.to_string()
}
