use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One extracted record: the profile URL plus a field map.
///
/// A `None` field means "absent or extraction failed" — a valid terminal
/// state, not an error. A record whose fields are all `None` still marks that
/// an attempt was made for that URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub url: String,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: BTreeMap::new(),
        }
    }

    /// A record with every named field null, used when a profile visit fails
    /// unrecoverably but must still appear in the output.
    pub fn null_fields(url: &str, names: &[&str]) -> Self {
        let mut record = Self::new(url);
        for name in names {
            record.fields.insert((*name).to_string(), None);
        }
        record
    }

    pub fn set(&mut self, field: &str, value: Option<String>) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }
}

/// Outcome classification for one listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Listing loaded and cards were processed
    Ok,
    /// Listing loaded but contained zero cards (normal at the pagination tail)
    Empty,
    /// Listing navigation or enumeration failed
    Error,
}

/// Run-level provenance stamped onto every persisted page file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    /// ISO-8601 timestamp taken at run start
    pub scraped_at: String,
    pub base_url: String,
    pub start_page: u32,
    pub total_pages: u32,
}

/// All extracted records for one listing page — the durable output unit.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub manifest: RunManifest,
    pub page_number: u32,
    pub listing_url: String,
    pub status: PageStatus,
    pub records: Vec<Record>,
}

impl PageResult {
    pub fn new(manifest: &RunManifest, page_number: u32, listing_url: &str) -> Self {
        Self {
            manifest: manifest.clone(),
            page_number,
            listing_url: listing_url.to_string(),
            status: PageStatus::Ok,
            records: Vec::new(),
        }
    }

    pub fn failed(manifest: &RunManifest, page_number: u32, listing_url: &str) -> Self {
        let mut result = Self::new(manifest, page_number, listing_url);
        result.status = PageStatus::Error;
        result
    }

    /// Serialize to the stable output shape. The records array is keyed by
    /// the site-specific name (`companies`, `contractors`, `jobs`), so the
    /// key is supplied by the caller rather than baked into the struct.
    pub fn to_json(&self, record_key: &str) -> Value {
        let mut value = serde_json::json!({
            "scrapedAt": self.manifest.scraped_at,
            "baseUrl": self.manifest.base_url,
            "startPage": self.manifest.start_page,
            "totalPages": self.manifest.total_pages,
            "pageNumber": self.page_number,
            "listingUrl": self.listing_url,
            "status": self.status,
        });
        value[record_key] = serde_json::json!(self.records);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> RunManifest {
        RunManifest {
            scraped_at: "2024-01-01T00:00:00Z".to_string(),
            base_url: "https://example.com".to_string(),
            start_page: 1,
            total_pages: 3,
        }
    }

    #[test]
    fn test_record_field_access() {
        let mut record = Record::new("https://example.com/p/1");
        record.set("name", Some("Acme".to_string()));
        record.set("phone", None);

        assert_eq!(record.get("name"), Some("Acme"));
        assert_eq!(record.get("phone"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_null_fields_record() {
        let record = Record::null_fields("https://example.com/p/1", &["name", "phone"]);
        assert_eq!(record.url, "https://example.com/p/1");
        assert_eq!(record.fields.len(), 2);
        assert!(record.fields.values().all(|v| v.is_none()));
    }

    #[test]
    fn test_record_serializes_flat() {
        let mut record = Record::new("https://example.com/p/1");
        record.set("name", Some("Acme".to_string()));
        record.set("phone", None);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["url"], "https://example.com/p/1");
        assert_eq!(value["name"], "Acme");
        assert_eq!(value["phone"], Value::Null);
    }

    #[test]
    fn test_page_result_json_shape() {
        let mut result = PageResult::new(&manifest(), 2, "https://example.com/list?page=2");
        result.records.push(Record::new("https://example.com/p/1"));

        let value = result.to_json("companies");
        assert_eq!(value["scrapedAt"], "2024-01-01T00:00:00Z");
        assert_eq!(value["baseUrl"], "https://example.com");
        assert_eq!(value["startPage"], 1);
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["pageNumber"], 2);
        assert_eq!(value["listingUrl"], "https://example.com/list?page=2");
        assert_eq!(value["status"], "ok");
        assert_eq!(value["companies"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_page_result() {
        let result = PageResult::failed(&manifest(), 4, "https://example.com/list?page=4");
        assert_eq!(result.status, PageStatus::Error);
        assert!(result.records.is_empty());
        let value = result.to_json("companies");
        assert_eq!(value["status"], "error");
        assert_eq!(value["companies"].as_array().unwrap().len(), 0);
    }
}
