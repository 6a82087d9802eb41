//! Unpaywall client (api.unpaywall.org) — the primary status provider

use anyhow::{Context, Result};
use serde::Deserialize;

use oapath_core::provider::{PrimaryRecord, StatusProvider};

use crate::client;

/// Subset of the Unpaywall DOI object (https://unpaywall.org/data-format)
/// the pipeline cares about.
#[derive(Debug, Deserialize)]
pub struct DoiRecord {
    pub is_oa: bool,
    #[serde(default)]
    pub journal_issn_l: Option<String>,
    #[serde(default)]
    pub journal_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub z_authors: Option<Vec<serde_json::Value>>,
}

/// Unpaywall requires a contact email with every request.
pub struct Unpaywall {
    email: String,
}

impl Unpaywall {
    /// Fails when no email is configured; like a missing Sherpa key this is
    /// a deployment defect, not a runtime condition.
    pub fn new(email: Option<&str>) -> Result<Self> {
        let email = email
            .map(String::from)
            .or_else(|| std::env::var("UNPAYWALL_EMAIL").ok())
            .filter(|e| !e.is_empty())
            .context("no contact email for the Unpaywall API (set UNPAYWALL_EMAIL)")?;
        Ok(Self { email })
    }
}

impl StatusProvider for Unpaywall {
    fn fetch_status(&self, doi: &str) -> Option<PrimaryRecord> {
        let url = format!("https://api.unpaywall.org/v2/{doi}");
        let body = client::api_get(&url, &[("email", &self.email)], &[])
            .map_err(|e| log::debug!("unpaywall lookup for {doi} failed: {e}"))
            .ok()?;
        parse_doi_record(&body).map(Into::into)
    }
}

impl From<DoiRecord> for PrimaryRecord {
    fn from(record: DoiRecord) -> Self {
        let authors = record
            .z_authors
            .as_deref()
            .and_then(first_author_et_al);
        Self {
            is_oa: record.is_oa,
            issn: record.journal_issn_l,
            title: record.title,
            journal: record.journal_name,
            authors,
            year: record.year,
        }
    }
}

/// Parse an Unpaywall response body; `None` on unexpected shape.
pub fn parse_doi_record(body: &str) -> Option<DoiRecord> {
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(e) => {
            log::debug!("unexpected unpaywall response shape: {e}");
            None
        }
    }
}

/// "Given Family et al." from the Crossref-style contributor list.
///
/// The schema nominally guarantees given/family keys, but some records
/// carry a bare "name" instead, so every component is optional here.
fn first_author_et_al(authors: &[serde_json::Value]) -> Option<String> {
    let first = authors
        .iter()
        .find(|a| a.get("sequence").and_then(|s| s.as_str()) == Some("first"))
        .or_else(|| authors.first())?;

    if let Some(name) = first.get("name").and_then(|n| n.as_str()) {
        return Some(format!("{name} et al."));
    }

    let given = first.get("given").and_then(|g| g.as_str());
    let family = first.get("family").and_then(|f| f.as_str());
    match (given, family) {
        (Some(g), Some(f)) => Some(format!("{g} {f} et al.")),
        (None, Some(f)) => Some(format!("{f} et al.")),
        (Some(g), None) => Some(format!("{g} et al.")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "doi": "10.7554/elife.01567",
        "is_oa": true,
        "journal_issn_l": "2050-084X",
        "journal_name": "eLife",
        "title": "Suspended animation",
        "year": 2013,
        "z_authors": [
            {"given": "Ada", "family": "Lovelace", "sequence": "first"},
            {"given": "Charles", "family": "Babbage", "sequence": "additional"}
        ],
        "oa_status": "gold",
        "data_standard": 2
    }"#;

    #[test]
    fn parses_status_and_issn() {
        let record: PrimaryRecord = parse_doi_record(RESPONSE).unwrap().into();
        assert!(record.is_oa);
        assert_eq!(record.issn.as_deref(), Some("2050-084X"));
        assert_eq!(record.journal.as_deref(), Some("eLife"));
        assert_eq!(record.authors.as_deref(), Some("Ada Lovelace et al."));
        assert_eq!(record.year, Some(2013));
    }

    #[test]
    fn tolerates_minimal_record() {
        let record: PrimaryRecord = parse_doi_record(r#"{"is_oa": false}"#).unwrap().into();
        assert!(!record.is_oa);
        assert!(record.issn.is_none());
        assert!(record.authors.is_none());
    }

    #[test]
    fn rejects_shapeless_response() {
        assert!(parse_doi_record(r#"{"error": true}"#).is_none());
        assert!(parse_doi_record("not json").is_none());
    }

    #[test]
    fn author_with_bare_name_key() {
        // Seen in the wild, e.g. 10.1007/s00350-021-5862-6
        let authors = vec![serde_json::json!({"name": "Some Committee", "sequence": "first"})];
        assert_eq!(
            first_author_et_al(&authors).as_deref(),
            Some("Some Committee et al.")
        );
    }

    #[test]
    fn author_fallback_to_first_entry_without_sequence() {
        let authors = vec![serde_json::json!({"given": "Grace", "family": "Hopper"})];
        assert_eq!(
            first_author_et_al(&authors).as_deref(),
            Some("Grace Hopper et al.")
        );
    }

    #[test]
    fn missing_email_is_a_config_error() {
        let saved = std::env::var("UNPAYWALL_EMAIL").ok();
        std::env::remove_var("UNPAYWALL_EMAIL");
        assert!(Unpaywall::new(None).is_err());
        assert!(Unpaywall::new(Some("team@example.org")).is_ok());
        if let Some(email) = saved {
            std::env::set_var("UNPAYWALL_EMAIL", email);
        }
    }
}
