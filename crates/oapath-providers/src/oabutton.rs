//! Open Access Button client (api.openaccessbutton.org)
//!
//! Pure passthrough: the find and permissions payloads are returned as-is
//! for display, no classification logic depends on them.

use crate::client;

pub struct OpenAccessButton;

impl OpenAccessButton {
    /// OA Button's paper metadata for a DOI.
    pub fn find(&self, doi: &str) -> Option<serde_json::Value> {
        client::api_get_json("https://api.openaccessbutton.org/find", &[("doi", doi)], &[])
    }

    /// OA Button's re-publication permission details for a DOI.
    pub fn permissions(&self, doi: &str) -> Option<serde_json::Value> {
        client::api_get_json(
            "https://api.openaccessbutton.org/permissions",
            &[("doi", doi)],
            &[],
        )
    }
}
