use std::time::Duration;

use crate::config::DelayRange;
use crate::driver::{PageOps, Selector};

/// Soft field lookups against a loaded detail page.
///
/// Every method resolves to `Option<String>`: selector misses, empty text,
/// interaction errors and timeouts all become `None`. A slow or absent
/// element degrades the one field, never the record or the run.
pub struct FieldReader<'a, P: PageOps> {
    page: &'a P,
    settle: DelayRange,
    budget: Duration,
}

impl<'a, P: PageOps> FieldReader<'a, P> {
    pub fn new(page: &'a P, settle: DelayRange, budget: Duration) -> Self {
        Self {
            page,
            settle,
            budget,
        }
    }

    /// Visible text of the first match, trimmed; empty text is `None`.
    pub async fn text(&self, selector: &Selector) -> Option<String> {
        match self.page.text_first(selector).await {
            Ok(Some(text)) => clean(&text),
            Ok(None) => None,
            Err(e) => {
                ::log::debug!("text lookup failed for {}: {}", selector, e);
                None
            }
        }
    }

    /// Primary selector first, then a looser fallback.
    pub async fn text_or(&self, primary: &Selector, fallback: &Selector) -> Option<String> {
        if let Some(text) = self.text(primary).await {
            return Some(text);
        }
        self.text(fallback).await
    }

    /// Raw attribute of the first match.
    pub async fn attr(&self, selector: &Selector, name: &str) -> Option<String> {
        match self.page.attr_first(selector, name).await {
            Ok(Some(value)) => clean(&value),
            Ok(None) => None,
            Err(e) => {
                ::log::debug!("attr lookup failed for {}: {}", selector, e);
                None
            }
        }
    }

    /// Contact-style link value: prefer the href attribute (with any
    /// `tel:`/`mailto:` scheme stripped), fall back to visible text.
    pub async fn href(&self, selector: &Selector) -> Option<String> {
        if let Some(value) = self.attr(selector, "href").await {
            return clean(strip_contact_scheme(&value));
        }
        self.text(selector).await
    }

    /// Reveal-on-click field: click the reveal control, wait a randomized
    /// settle delay for the real value to render, then re-query it.
    ///
    /// The whole sequence runs under the reveal budget; expiry or any step
    /// failing resolves the field to `None`.
    pub async fn reveal(&self, control: &Selector, value: &Selector) -> Option<String> {
        let sequence = async {
            match self.page.click_first(control).await {
                Ok(true) => {}
                Ok(false) => {
                    ::log::debug!("reveal control absent: {}", control);
                    return None;
                }
                Err(e) => {
                    ::log::debug!("reveal click failed for {}: {}", control, e);
                    return None;
                }
            }
            self.settle.sleep().await;
            self.href(value).await
        };

        match tokio::time::timeout(self.budget, sequence).await {
            Ok(result) => result,
            Err(_) => {
                ::log::debug!("reveal timed out for {}", value);
                None
            }
        }
    }
}

/// Trim and map empty to `None`.
pub fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip the `tel:`/`mailto:` scheme from a contact href.
pub fn strip_contact_scheme(value: &str) -> &str {
    value
        .strip_prefix("tel:")
        .or_else(|| value.strip_prefix("mailto:"))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        assert_eq!(clean("  Acme  "), Some("Acme".to_string()));
        assert_eq!(clean(""), None);
        assert_eq!(clean("   \n\t "), None);
    }

    #[test]
    fn test_strip_contact_scheme() {
        assert_eq!(strip_contact_scheme("tel:+48123456789"), "+48123456789");
        assert_eq!(strip_contact_scheme("mailto:x@example.com"), "x@example.com");
        assert_eq!(strip_contact_scheme("https://example.com"), "https://example.com");
        assert_eq!(strip_contact_scheme("+48 123 456 789"), "+48 123 456 789");
    }
}
