//! Semantic Scholar client (api.semanticscholar.org)
//!
//! Serves two roles: corroborating OA evidence for a DOI, and author
//! profile lookup. A partner API key switches to the partner endpoint.

use serde::Deserialize;

use oapath_core::provider::{OaEvidence, OaEvidenceProvider};
use oapath_core::schema::{Author, OaStatus, Paper};

use crate::client;

/// Unofficial paper schema, reconstructed from the v1 API responses;
/// every field optional since no official documentation guarantees them.
#[derive(Debug, Deserialize)]
pub struct S2Paper {
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub is_open_access: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct S2AuthorRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub papers: Vec<S2AuthorPaperRef>,
}

#[derive(Debug, Deserialize)]
pub struct S2AuthorPaperRef {
    #[serde(rename = "paperId")]
    pub paper_id: String,
}

pub struct SemanticScholar {
    api_key: Option<String>,
}

impl SemanticScholar {
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key
                .map(String::from)
                .or_else(|| std::env::var("S2_API_KEY").ok()),
        }
    }

    fn get(&self, relative: &str) -> Option<serde_json::Value> {
        match &self.api_key {
            Some(key) => client::api_get_json(
                &format!("https://partner.semanticscholar.org/v1/{relative}"),
                &[],
                &[("x-api-key", key)],
            ),
            None => client::api_get_json(
                &format!("https://api.semanticscholar.org/v1/{relative}"),
                &[],
                &[],
            ),
        }
    }

    pub fn fetch_paper(&self, paper_id: &str) -> Option<S2Paper> {
        let value = self.get(&format!("paper/{paper_id}"))?;
        parse_paper(&value)
    }

    /// Author profile with papers resolved one by one (the v1 author
    /// endpoint only returns paper ids).
    pub fn fetch_author_with_papers(&self, author_id: &str) -> Option<Author> {
        let value = self.get(&format!("author/{author_id}"))?;
        let record: S2AuthorRecord = serde_json::from_value(value).ok()?;

        let papers = record
            .papers
            .iter()
            .filter_map(|r| self.fetch_paper(&r.paper_id))
            .filter_map(|p| {
                let doi = p.doi?;
                let status = match p.is_open_access {
                    Some(true) => OaStatus::Oa,
                    Some(false) => OaStatus::NotOa,
                    None => OaStatus::NotFound,
                };
                let mut paper = Paper::new(doi, None, status);
                paper.title = p.title;
                paper.year = p.year;
                Some(paper)
            })
            .collect();

        Some(Author {
            name: record.name.unwrap_or_else(|| author_id.to_string()),
            papers,
            profile_url: record.url,
            provider: Some("semantic_scholar".to_string()),
        })
    }
}

impl OaEvidenceProvider for SemanticScholar {
    fn find_open_copy(&self, doi: &str) -> Option<OaEvidence> {
        let paper = self.fetch_paper(doi)?;
        // Only an explicit positive signal corroborates; false and null are
        // "no evidence", never a downgrade.
        if paper.is_open_access == Some(true) {
            Some(OaEvidence { url: paper.url })
        } else {
            None
        }
    }
}

fn parse_paper(value: &serde_json::Value) -> Option<S2Paper> {
    match serde_json::from_value(value.clone()) {
        Ok(paper) => Some(paper),
        Err(e) => {
            log::debug!("unexpected semantic scholar paper shape: {e}");
            None
        }
    }
}

/// Last path segment of a Semantic Scholar profile URL (or the bare id).
pub fn extract_profile_id_from_url(url: &str) -> &str {
    let without_params = url.split('?').next().unwrap_or(url).trim_end_matches('/');
    without_params.rsplit('/').next().unwrap_or(without_params)
}
