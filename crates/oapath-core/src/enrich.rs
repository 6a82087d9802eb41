//! Enrichment pipeline
//!
//! Composes primary status lookup, status validation and pathway resolution
//! into the one entry point the request layer calls. All collaborators are
//! injected; the only shared mutable state across concurrent calls is the
//! pathway cache, whose writes are idempotent upserts.

use crate::cache::PathwayCache;
use crate::error::CoreError;
use crate::pathway::resolve_pathway;
use crate::provider::{OaEvidenceProvider, PolicyProvider, StatusProvider};
use crate::schema::{OaStatus, Paper};
use crate::status::validate_oa_status;

/// Everything a single enrichment run needs, threaded explicitly instead of
/// living in ambient global state. The primary status provider is passed
/// per call since batch audits work from data extracts and skip it.
pub struct EnrichContext<'a> {
    /// Corroborating providers in consultation order.
    pub evidence: &'a [&'a dyn OaEvidenceProvider],
    pub policy: &'a dyn PolicyProvider,
    pub cache: Option<&'a PathwayCache>,
    pub sherpa_api_key: Option<&'a str>,
}

impl EnrichContext<'_> {
    /// Fully classify one paper identified by DOI.
    ///
    /// A primary-lookup miss is a valid terminal outcome (`NotFound` status,
    /// `NotAttempted` pathway), not an error; only a missing Sherpa API key
    /// for a paper that actually needs policy resolution fails.
    pub fn enrich_paper(&self, doi: &str, status: &dyn StatusProvider) -> Result<Paper, CoreError> {
        let paper = match status.fetch_status(doi) {
            Some(record) => {
                let status = if record.is_oa {
                    OaStatus::Oa
                } else {
                    OaStatus::NotOa
                };
                let mut paper = Paper::new(doi, record.issn, status);
                paper.title = record.title;
                paper.journal = record.journal;
                paper.authors = record.authors;
                paper.year = record.year;
                paper
            }
            None => {
                log::debug!("primary provider has no record for DOI {doi}");
                Paper::unknown(doi)
            }
        };

        let paper = validate_oa_status(paper, self.evidence);
        resolve_pathway(paper, self.policy, self.cache, self.sherpa_api_key)
    }

    /// Classify a paper whose status is already known.
    pub fn enrich_with_known_status(&self, paper: Paper) -> Result<Paper, CoreError> {
        let paper = validate_oa_status(paper, self.evidence);
        resolve_pathway(paper, self.policy, self.cache, self.sherpa_api_key)
    }
}
