//! Crossref client (api.crossref.org) — author name search fallback

use oapath_core::schema::{Author, OaStatus, Paper};

use crate::client;

const WORKS_URL: &str = "https://api.crossref.org/works";

pub struct Crossref;

impl Crossref {
    /// Free-text author search; papers carry DOI/ISSN/title only, OA status
    /// stays undetermined until each DOI is enriched individually.
    pub fn fetch_author_with_papers(&self, name: &str) -> Option<Author> {
        let value = client::api_get_json(WORKS_URL, &[("query.author", name)], &[])?;
        let papers = parse_work_items(&value);
        let url_name = name.replace(' ', "+");
        Some(Author {
            name: name.to_string(),
            papers,
            profile_url: Some(format!("https://search.crossref.org/?q={url_name}")),
            provider: Some("crossref".to_string()),
        })
    }
}

/// Papers from a works query response; items without a DOI are dropped.
pub fn parse_work_items(value: &serde_json::Value) -> Vec<Paper> {
    let Some(items) = value.pointer("/message/items").and_then(|i| i.as_array()) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let doi = item.get("DOI")?.as_str()?;
            // Crossref wraps both as arrays; take the first entry
            let issn = item
                .get("ISSN")
                .and_then(|i| i.as_array())
                .and_then(|a| a.first())
                .and_then(|i| i.as_str())
                .map(String::from);
            let title = item
                .get("title")
                .and_then(|t| t.as_array())
                .and_then(|a| a.first())
                .and_then(|t| t.as_str())
                .map(String::from);

            let mut paper = Paper::new(doi, issn, OaStatus::NotFound);
            paper.title = title;
            Some(paper)
        })
        .collect()
}
