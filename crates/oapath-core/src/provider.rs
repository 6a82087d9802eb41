//! Collaborator traits for the external bibliographic services
//!
//! The pipeline only knows these seams; concrete HTTP clients live in
//! `oapath-providers`. All methods are best-effort: transport failures and
//! unknown identifiers surface as `None`/empty, never as errors.

use crate::schema::PublisherPolicy;

/// What the primary (Unpaywall-equivalent) provider knows about a DOI.
#[derive(Debug, Clone, Default)]
pub struct PrimaryRecord {
    pub is_oa: bool,
    /// Canonical linking ISSN of the publication venue.
    pub issn: Option<String>,
    pub title: Option<String>,
    pub journal: Option<String>,
    pub authors: Option<String>,
    pub year: Option<i32>,
}

/// Corroborating evidence that a free copy of a paper exists.
#[derive(Debug, Clone, Default)]
pub struct OaEvidence {
    pub url: Option<String>,
}

/// Primary OA status + venue lookup.
///
/// `Sync` so a provider can serve many workers at once; implementations are
/// expected to share one HTTP client.
pub trait StatusProvider: Sync {
    /// `None` when the DOI is unknown to the provider or the call failed.
    fn fetch_status(&self, doi: &str) -> Option<PrimaryRecord>;
}

/// A secondary source that may corroborate the existence of a free copy.
///
/// Returns `Some` only on positive evidence; "don't know" and "no" are both
/// `None` so the fold in the status validator stays monotonic.
pub trait OaEvidenceProvider: Sync {
    fn find_open_copy(&self, doi: &str) -> Option<OaEvidence>;
}

/// Publisher self-archiving policy lookup by ISSN.
pub trait PolicyProvider: Sync {
    /// All policies pooled across every publication matching the ISSN.
    /// Empty on not-found or transport failure.
    fn publisher_policies(&self, issn: &str, api_key: &str) -> Vec<PublisherPolicy>;
}
