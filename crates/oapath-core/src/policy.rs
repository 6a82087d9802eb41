//! Publisher policy evaluation
//!
//! Policy data is heterogeneous third-party material, so evaluation fails
//! closed: anything that cannot be proven free of charge counts as costly.

use crate::schema::{PermittedOa, PublisherPolicy};

/// Whether a single publisher policy permits self-archiving without a fee.
///
/// Requires `open_access_prohibited` to be exactly `"no"` (any other or
/// missing value disqualifies), a present `permitted_oa` list, and at least
/// one entry that explicitly states `additional_oa_fee == "no"`. An entry
/// with the fee key absent is assumed to carry a fee.
pub fn has_no_cost_oa_policy(policy: &PublisherPolicy) -> bool {
    if policy.open_access_prohibited.as_deref() != Some("no") {
        return false;
    }

    match &policy.permitted_oa {
        None => false,
        Some(permitted) => permitted.iter().any(is_fee_free),
    }
}

fn is_fee_free(permitted: &PermittedOa) -> bool {
    permitted.additional_oa_fee.as_deref() == Some("no")
}

/// Copy of `policy` with the costly `permitted_oa` entries stripped.
///
/// Applied to `Nocost` evidence before display so users only see the
/// clauses that actually substantiate the classification.
pub fn retain_no_cost_permitted_oa(policy: &PublisherPolicy) -> PublisherPolicy {
    let mut out = policy.clone();
    out.permitted_oa = out
        .permitted_oa
        .map(|perms| perms.into_iter().filter(is_fee_free).collect());
    out
}

/// Lenient per-record parse of a raw policy value.
///
/// A malformed record is logged and dropped rather than failing the whole
/// response; one bad policy must never hide its siblings.
pub fn parse_policy(value: &serde_json::Value) -> Option<PublisherPolicy> {
    match serde_json::from_value(value.clone()) {
        Ok(policy) => Some(policy),
        Err(e) => {
            log::warn!("skipping malformed publisher policy ({e}): {value}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_from(json: &str) -> PublisherPolicy {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn conservatism_table() {
        // (policy, expected) pairs per the documented conservative defaults
        let cases = [
            // No permitted_oa terms at all: cannot prove no-cost
            (r#"{"open_access_prohibited": "no"}"#, false),
            // Explicit prohibition
            (r#"{"open_access_prohibited": "yes"}"#, false),
            // Entry without the fee key: unknown fee, assume fee
            (
                r#"{"permitted_oa": [{}], "open_access_prohibited": "no"}"#,
                false,
            ),
            (
                r#"{"permitted_oa": [{"additional_oa_fee": "no"}], "open_access_prohibited": "no"}"#,
                true,
            ),
            (
                r#"{"permitted_oa": [{"additional_oa_fee": "yes"}], "open_access_prohibited": "no"}"#,
                false,
            ),
        ];
        for (json, expected) in cases {
            assert_eq!(
                has_no_cost_oa_policy(&policy_from(json)),
                expected,
                "policy: {json}"
            );
        }
    }

    #[test]
    fn unexpected_prohibited_value_disqualifies() {
        // Stricter of the two historical readings: only exactly "no" passes.
        let policy = policy_from(
            r#"{"permitted_oa": [{"additional_oa_fee": "no"}], "open_access_prohibited": "unclear"}"#,
        );
        assert!(!has_no_cost_oa_policy(&policy));

        let policy = policy_from(r#"{"permitted_oa": [{"additional_oa_fee": "no"}]}"#);
        assert!(!has_no_cost_oa_policy(&policy));
    }

    #[test]
    fn one_fee_free_entry_suffices() {
        let policy = policy_from(
            r#"{
                "open_access_prohibited": "no",
                "permitted_oa": [
                    {"additional_oa_fee": "yes"},
                    {},
                    {"additional_oa_fee": "no"}
                ]
            }"#,
        );
        assert!(has_no_cost_oa_policy(&policy));
    }

    #[test]
    fn retain_strips_costly_entries() {
        let policy = policy_from(
            r#"{
                "open_access_prohibited": "no",
                "permitted_oa": [
                    {"additional_oa_fee": "yes", "location": "repository"},
                    {"additional_oa_fee": "no", "location": "preprint_server"}
                ]
            }"#,
        );
        let trimmed = retain_no_cost_permitted_oa(&policy);
        let perms = trimmed.permitted_oa.unwrap();
        assert_eq!(perms.len(), 1);
        assert_eq!(perms[0].additional_oa_fee.as_deref(), Some("no"));
    }

    #[test]
    fn retain_keeps_absent_permitted_oa_absent() {
        let policy = policy_from(r#"{"open_access_prohibited": "yes"}"#);
        assert!(retain_no_cost_permitted_oa(&policy).permitted_oa.is_none());
    }

    #[test]
    fn parse_policy_drops_malformed() {
        // id must be numeric; a malformed record yields None instead of an error
        let bad = serde_json::json!({"id": {"nested": true}});
        assert!(parse_policy(&bad).is_none());

        let good = serde_json::json!({"id": 7, "open_access_prohibited": "no"});
        assert_eq!(parse_policy(&good).unwrap().id, Some(7));
    }
}
