//! Zenodo client (zenodo.org) — repository aggregator evidence

use oapath_core::provider::{OaEvidence, OaEvidenceProvider};

use crate::client;

const RECORDS_URL: &str = "https://zenodo.org/api/records";

pub struct Zenodo;

impl OaEvidenceProvider for Zenodo {
    fn find_open_copy(&self, doi: &str) -> Option<OaEvidence> {
        let query = format!(r#"doi:"{doi}""#);
        let value = client::api_get_json(RECORDS_URL, &[("q", &query)], &[])?;
        let url = find_open_record_url(&value);
        if url.is_none() && has_hits(&value) {
            log::warn!("zenodo has deposits for {doi} but none with open access rights");
        }
        url.map(|url| OaEvidence { url: Some(url) })
    }
}

fn has_hits(value: &serde_json::Value) -> bool {
    value
        .pointer("/hits/total")
        .and_then(|t| t.as_u64())
        .is_some_and(|t| t > 0)
}

/// HTML link of the first deposit with `access_right == "open"`.
pub fn find_open_record_url(value: &serde_json::Value) -> Option<String> {
    let hits = value.pointer("/hits/hits")?.as_array()?;
    hits.iter()
        .find(|hit| {
            hit.pointer("/metadata/access_right")
                .and_then(|a| a.as_str())
                == Some("open")
        })
        .and_then(|hit| hit.pointer("/links/html").and_then(|l| l.as_str()))
        .map(String::from)
}
