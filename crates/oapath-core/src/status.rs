//! OA status cross-validation
//!
//! The primary provider occasionally misses free copies that other services
//! know about. An ordered list of corroborating providers is folded over the
//! paper; the first positive signal wins and promotes the status to `Oa`.
//! Promotion is strictly upward: an already-open paper is never touched and
//! a provider can never downgrade.

use crate::provider::OaEvidenceProvider;
use crate::schema::{OaStatus, Paper};

/// Upgrade a paper's status with corroborating evidence, first OA wins.
///
/// Providers are best-effort; a failed or empty lookup is a no-op for that
/// step, and remaining providers are skipped once one corroborates.
pub fn validate_oa_status(mut paper: Paper, providers: &[&dyn OaEvidenceProvider]) -> Paper {
    if paper.oa_status == OaStatus::Oa {
        return paper;
    }

    for provider in providers {
        if let Some(evidence) = provider.find_open_copy(&paper.doi) {
            paper.oa_status = OaStatus::Oa;
            if evidence.url.is_some() {
                paper.oa_location_url = evidence.url;
            }
            break;
        }
    }

    paper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::OaEvidence;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockEvidence {
        evidence: Option<OaEvidence>,
        calls: AtomicUsize,
    }

    impl MockEvidence {
        fn found(url: Option<&str>) -> Self {
            Self {
                evidence: Some(OaEvidence {
                    url: url.map(String::from),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn nothing() -> Self {
            Self {
                evidence: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OaEvidenceProvider for MockEvidence {
        fn find_open_copy(&self, _doi: &str) -> Option<OaEvidence> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.evidence.clone()
        }
    }

    #[test]
    fn open_paper_skips_all_providers() {
        let a = MockEvidence::found(Some("https://example.org/pdf"));
        let paper = Paper::new("10.1/x", None, OaStatus::Oa);

        let out = validate_oa_status(paper, &[&a]);
        assert_eq!(out.oa_status, OaStatus::Oa);
        assert_eq!(a.call_count(), 0);
        // URL from the primary record (here absent) is left alone
        assert!(out.oa_location_url.is_none());
    }

    #[test]
    fn first_positive_signal_wins_and_stops_the_fold() {
        let first = MockEvidence::found(Some("https://first.example/copy"));
        let second = MockEvidence::found(Some("https://second.example/copy"));
        let paper = Paper::new("10.1/x", None, OaStatus::NotOa);

        let out = validate_oa_status(paper, &[&first, &second]);
        assert_eq!(out.oa_status, OaStatus::Oa);
        assert_eq!(out.oa_location_url.as_deref(), Some("https://first.example/copy"));
        assert_eq!(second.call_count(), 0);
    }

    #[test]
    fn later_provider_consulted_when_earlier_has_nothing() {
        let first = MockEvidence::nothing();
        let second = MockEvidence::found(Some("https://deposit.example/record"));
        let paper = Paper::new("10.1/x", None, OaStatus::NotOa);

        let out = validate_oa_status(paper, &[&first, &second]);
        assert_eq!(out.oa_status, OaStatus::Oa);
        assert_eq!(first.call_count(), 1);
        assert_eq!(
            out.oa_location_url.as_deref(),
            Some("https://deposit.example/record")
        );
    }

    #[test]
    fn no_corroboration_leaves_status_untouched() {
        let a = MockEvidence::nothing();
        let b = MockEvidence::nothing();

        let paywalled = Paper::new("10.1/x", None, OaStatus::NotOa);
        assert_eq!(
            validate_oa_status(paywalled, &[&a, &b]).oa_status,
            OaStatus::NotOa
        );

        let unknown = Paper::new("10.1/y", None, OaStatus::NotFound);
        assert_eq!(
            validate_oa_status(unknown, &[&a, &b]).oa_status,
            OaStatus::NotFound
        );
    }

    #[test]
    fn evidence_without_url_still_promotes() {
        let a = MockEvidence::found(None);
        let paper = Paper::new("10.1/x", None, OaStatus::NotOa);

        let out = validate_oa_status(paper, &[&a]);
        assert_eq!(out.oa_status, OaStatus::Oa);
        assert!(out.oa_location_url.is_none());
    }

    #[test]
    fn empty_provider_list_is_a_no_op() {
        let paper = Paper::new("10.1/x", None, OaStatus::NotOa);
        let out = validate_oa_status(paper.clone(), &[]);
        assert_eq!(out, paper);
    }
}
