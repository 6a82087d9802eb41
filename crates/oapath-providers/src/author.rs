//! Author profile dispatch
//!
//! A profile search string can be an ORCID iD, a Semantic Scholar profile
//! id or URL, or a free-text name for the Crossref fallback. Whichever
//! backend answers, duplicate DOIs are dropped before the result is
//! returned (the same work often appears as preprint and published
//! version).

use oapath_core::schema::Author;

use crate::crossref::Crossref;
use crate::orcid::{Orcid, is_orcid};
use crate::semantic_scholar::{SemanticScholar, extract_profile_id_from_url};

/// Resolve a profile string to an author with their (not yet enriched)
/// papers. `None` when no backend knows the profile.
pub fn find_author_with_papers(profile: &str, s2: &SemanticScholar) -> Option<Author> {
    let mut author = if is_orcid(profile) {
        Orcid.fetch_author_with_papers(profile)?
    } else {
        let author_id = extract_profile_id_from_url(profile);
        if author_id.chars().all(|c| c.is_ascii_digit()) && !author_id.is_empty() {
            s2.fetch_author_with_papers(author_id)?
        } else {
            Crossref.fetch_author_with_papers(profile)?
        }
    };

    author.dedup_papers();
    Some(author)
}
