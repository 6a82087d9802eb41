//! Typed entities shared across the pipeline
//!
//! Status and pathway are closed enumerations rather than free-form strings;
//! publisher policy records keep unknown upstream fields in a flattened map
//! so evidence can be serialized back out unchanged.

use serde::{Deserialize, Serialize};

/// Open-access status of a single paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OaStatus {
    /// A free copy is known to exist.
    Oa,
    /// Checked, no free copy found.
    NotOa,
    /// Lookup failed or the identifier is unknown.
    NotFound,
}

impl OaStatus {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oa => "oa",
            Self::NotOa => "not_oa",
            Self::NotFound => "not_found",
        }
    }
}

/// Republication pathway classification.
///
/// `AlreadyOa` pairs with [`OaStatus::Oa`] and `NotAttempted` with
/// [`OaStatus::NotFound`]; the remaining variants derive from publisher
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OaPathway {
    /// Paper is already open, no pathway needed.
    AlreadyOa,
    /// OA status unknown, pathway lookup skipped.
    NotAttempted,
    /// Publisher policy permits self-archiving without a fee.
    Nocost,
    /// Publisher has a policy but it requires payment or is restrictive.
    Other,
    /// No publisher policy could be retrieved for the ISSN.
    NotFound,
}

impl OaPathway {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyOa => "already_oa",
            Self::NotAttempted => "not_attempted",
            Self::Nocost => "nocost",
            Self::Other => "other",
            Self::NotFound => "not_found",
        }
    }
}

/// One permitted-OA clause of a publisher policy.
///
/// Only `additional_oa_fee` matters for classification; everything else the
/// Sherpa API sends (embargo, locations, licences) rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermittedOa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_oa_fee: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A publisher self-archiving policy as returned by the policy provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_access_prohibited: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permitted_oa: Option<Vec<PermittedOa>>,
    /// URI of the Sherpa publication record this policy was pooled from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sherpa_publication_uri: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A paper as it moves through the enrichment pipeline.
///
/// Created from a bare DOI, enriched functionally step by step. Title,
/// journal, authors and year are display metadata and irrelevant to
/// classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub doi: String,
    #[serde(default)]
    pub issn: Option<String>,
    pub oa_status: OaStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oa_pathway: Option<OaPathway>,
    /// No-cost policies substantiating a `Nocost` classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oa_pathway_details: Option<Vec<PublisherPolicy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oa_location_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl Paper {
    /// Bare paper with a known status, no metadata attached yet.
    pub fn new(doi: impl Into<String>, issn: Option<String>, oa_status: OaStatus) -> Self {
        Self {
            doi: doi.into(),
            issn,
            oa_status,
            oa_pathway: None,
            oa_pathway_details: None,
            oa_location_url: None,
            title: None,
            journal: None,
            authors: None,
            year: None,
        }
    }

    /// Paper the primary provider knows nothing about.
    pub fn unknown(doi: impl Into<String>) -> Self {
        Self::new(doi, None, OaStatus::NotFound)
    }
}

/// An author together with the papers a profile search returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub papers: Vec<Paper>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    /// Which search backend produced this author ("orcid", "semantic_scholar", "crossref").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl Author {
    /// Drop duplicate DOIs, keeping the first occurrence.
    pub fn dedup_papers(&mut self) {
        let mut seen = rustc_hash::FxHashSet::default();
        self.papers.retain(|p| seen.insert(p.doi.clone()));
    }
}
