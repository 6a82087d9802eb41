//! Sherpa/RoMEO client (v2.sherpa.ac.uk) — the publisher-policy provider
//!
//! One ISSN can match several publication records; all their policies are
//! pooled into one flat set (deduplicated by policy id) so a single no-cost
//! policy anywhere qualifies the venue. The publication URI is attached to
//! each policy for evidence display.

use oapath_core::provider::PolicyProvider;
use oapath_core::schema::PublisherPolicy;

use crate::client;

const RETRIEVE_URL: &str = "https://v2.sherpa.ac.uk/cgi/retrieve";

pub struct Sherpa;

impl PolicyProvider for Sherpa {
    fn publisher_policies(&self, issn: &str, api_key: &str) -> Vec<PublisherPolicy> {
        let filter = format!(r#"[["issn","equals","{issn}"]]"#);
        let query = [
            ("item-type", "publication"),
            ("api-key", api_key),
            ("format", "Json"),
            ("filter", filter.as_str()),
        ];
        match client::api_get(RETRIEVE_URL, &query, &[]) {
            Ok(body) => pool_policies(&body),
            Err(e) => {
                log::error!("sherpa retrieve for ISSN {issn} failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Flatten the policies of every matched publication, first id wins.
pub fn pool_policies(body: &str) -> Vec<PublisherPolicy> {
    let root: serde_json::Value = match serde_json::from_str(body) {
        Ok(root) => root,
        Err(e) => {
            log::warn!("unexpected sherpa response shape: {e}");
            return Vec::new();
        }
    };
    let Some(items) = root.get("items").and_then(|i| i.as_array()) else {
        return Vec::new();
    };

    let mut seen_ids = rustc_hash::FxHashSet::default();
    let mut pooled = Vec::new();
    for publication in items {
        let uri = publication
            .pointer("/system_metadata/uri")
            .and_then(|u| u.as_str());
        let Some(policies) = publication
            .get("publisher_policy")
            .and_then(|p| p.as_array())
        else {
            continue;
        };
        for raw in policies {
            let Some(mut policy) = oapath_core::policy::parse_policy(raw) else {
                continue;
            };
            if let Some(id) = policy.id {
                if !seen_ids.insert(id) {
                    continue;
                }
            }
            policy.sherpa_publication_uri = uri.map(String::from);
            pooled.push(policy);
        }
    }
    pooled
}
