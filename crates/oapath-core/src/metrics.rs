//! Summary metrics over classified papers

use crate::schema::{OaPathway, OaStatus, Paper};

/// Four-bucket summary of a batch classification run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Papers that are already open access.
    pub n_already_oa: usize,
    /// Paywalled papers with a free republication pathway.
    pub n_nocost: usize,
    /// Paywalled papers whose pathway requires payment or is restrictive.
    pub n_other: usize,
    /// Papers for which status or pathway could not be determined.
    pub n_unknown: usize,
}

impl Metrics {
    pub fn total(&self) -> usize {
        self.n_already_oa + self.n_nocost + self.n_other + self.n_unknown
    }
}

/// Bucket classified papers, first match wins.
///
/// Precedence: open status, then no-cost pathway, then other pathway, then
/// undetermined. A paper matching no branch (possible only when the
/// status/pathway coupling was violated upstream) is excluded from every
/// count rather than treated as an error.
pub fn aggregate<'a>(papers: impl IntoIterator<Item = &'a Paper>) -> Metrics {
    let mut metrics = Metrics::default();
    for paper in papers {
        if paper.oa_status == OaStatus::Oa {
            metrics.n_already_oa += 1;
        } else if paper.oa_pathway == Some(OaPathway::Nocost) {
            metrics.n_nocost += 1;
        } else if paper.oa_pathway == Some(OaPathway::Other) {
            metrics.n_other += 1;
        } else if paper.oa_status == OaStatus::NotFound
            || paper.oa_pathway == Some(OaPathway::NotFound)
        {
            metrics.n_unknown += 1;
        }
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(status: OaStatus, pathway: OaPathway) -> Paper {
        let mut paper = Paper::new("10.1/x", Some("1234-1234".into()), status);
        paper.oa_pathway = Some(pathway);
        paper
    }

    #[test]
    fn partitions_one_paper_per_bucket() {
        let papers = vec![
            classified(OaStatus::Oa, OaPathway::AlreadyOa),
            classified(OaStatus::NotOa, OaPathway::Nocost),
            classified(OaStatus::NotOa, OaPathway::Other),
            classified(OaStatus::NotFound, OaPathway::NotAttempted),
        ];

        let m = aggregate(&papers);
        assert_eq!(
            (m.n_already_oa, m.n_nocost, m.n_other, m.n_unknown),
            (1, 1, 1, 1)
        );
        assert_eq!(m.total(), 4);
    }

    #[test]
    fn open_status_wins_over_pathway() {
        // Shouldn't occur given the coupling invariant, but precedence is
        // defined: the status bucket claims the paper first.
        let papers = vec![classified(OaStatus::Oa, OaPathway::Nocost)];
        let m = aggregate(&papers);
        assert_eq!(m.n_already_oa, 1);
        assert_eq!(m.n_nocost, 0);
    }

    #[test]
    fn pathway_not_found_counts_as_unknown() {
        let papers = vec![classified(OaStatus::NotOa, OaPathway::NotFound)];
        assert_eq!(aggregate(&papers).n_unknown, 1);
    }

    #[test]
    fn inconsistent_paper_excluded_from_all_buckets() {
        // NotOa paired with AlreadyOa violates the coupling invariant;
        // the lenient fallback drops it silently.
        let papers = vec![classified(OaStatus::NotOa, OaPathway::AlreadyOa)];
        assert_eq!(aggregate(&papers), Metrics::default());

        // Same for a paywalled paper with no pathway attached at all
        let bare = Paper::new("10.1/y", None, OaStatus::NotOa);
        assert_eq!(aggregate([&bare]), Metrics::default());
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let none: [&Paper; 0] = [];
        assert_eq!(aggregate(none), Metrics::default());
    }
}
