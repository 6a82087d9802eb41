//! Pathway resolution for paywalled papers
//!
//! Consults the publisher-policy provider for the paper's ISSN, pools the
//! returned policies through the evaluator and reduces the result to one
//! [`OaPathway`]. Resolved pathways are memoized per ISSN.

use crate::cache::PathwayCache;
use crate::error::CoreError;
use crate::policy::has_no_cost_oa_policy;
use crate::provider::PolicyProvider;
use crate::schema::{OaPathway, OaStatus, Paper};

/// Classify the republication pathway of a status-enriched paper.
///
/// Open papers become `AlreadyOa` and unknown ones `NotAttempted` without
/// any provider or cache interaction. For paywalled papers a cache hit
/// short-circuits the provider entirely; on a miss the provider is asked
/// exactly once and a resolved `Nocost`/`Other` outcome is stored back.
/// `NotFound` (empty policy set, transport failure) is deliberately not
/// cached so a transient failure cannot poison the memoization layer.
///
/// Fails only when no API key is available, a caller configuration defect.
pub fn resolve_pathway(
    mut paper: Paper,
    provider: &dyn PolicyProvider,
    cache: Option<&PathwayCache>,
    api_key: Option<&str>,
) -> Result<Paper, CoreError> {
    match paper.oa_status {
        OaStatus::Oa => {
            paper.oa_pathway = Some(OaPathway::AlreadyOa);
            return Ok(paper);
        }
        OaStatus::NotFound => {
            paper.oa_pathway = Some(OaPathway::NotAttempted);
            return Ok(paper);
        }
        OaStatus::NotOa => {}
    }

    // Paywalled but no venue identifier: nothing to ask the provider about.
    let Some(issn) = paper.issn.clone() else {
        paper.oa_pathway = Some(OaPathway::NotFound);
        return Ok(paper);
    };

    if let Some(cached) = cache.and_then(|c| c.get(&issn)) {
        log::debug!("pathway cache hit for ISSN {issn}: {cached:?}");
        paper.oa_pathway = Some(cached);
        return Ok(paper);
    }

    let api_key = api_key.ok_or(CoreError::MissingSherpaApiKey)?;

    // Single attempt; retries (if any) belong to the provider's transport.
    let policies = provider.publisher_policies(&issn, api_key);
    let (pathway, details) = classify_policies(policies);

    if pathway != OaPathway::NotFound {
        if let Some(cache) = cache {
            cache.put(&issn, pathway);
        }
    }

    paper.oa_pathway = Some(pathway);
    paper.oa_pathway_details = details;
    Ok(paper)
}

/// Reduce a pooled policy set to a pathway plus the no-cost evidence.
fn classify_policies(policies: Vec<crate::schema::PublisherPolicy>) -> PolicyOutcome {
    if policies.is_empty() {
        return (OaPathway::NotFound, None);
    }

    let no_cost: Vec<_> = policies
        .into_iter()
        .filter(|p| has_no_cost_oa_policy(p))
        .collect();

    if no_cost.is_empty() {
        (OaPathway::Other, None)
    } else {
        (OaPathway::Nocost, Some(no_cost))
    }
}

type PolicyOutcome = (OaPathway, Option<Vec<crate::schema::PublisherPolicy>>);
