//! ORCID client (pub.orcid.org)
//!
//! The public works endpoint answers in XML; each work group carries an
//! external-ids block from which DOI and venue ISSN are extracted.

use quick_xml::Reader;
use quick_xml::events::Event;

use oapath_core::schema::{Author, OaStatus, Paper};

use crate::client;

pub struct Orcid;

impl Orcid {
    /// All works of an ORCID profile as bare DOI+ISSN papers.
    pub fn fetch_author_with_papers(&self, orcid: &str) -> Option<Author> {
        let url = format!("https://pub.orcid.org/{orcid}/works");
        let xml = match client::api_get(&url, &[], &[]) {
            Ok(xml) => xml,
            Err(e) => {
                log::debug!("orcid works lookup for {orcid} failed: {e}");
                return None;
            }
        };

        let papers = parse_works(&xml)
            .into_iter()
            .filter_map(|(doi, issn)| doi.map(|doi| Paper::new(doi, issn, OaStatus::NotFound)))
            .collect();

        Some(Author {
            name: orcid.to_string(),
            papers,
            profile_url: Some(format!("https://orcid.org/{orcid}")),
            provider: Some("orcid".to_string()),
        })
    }
}

/// Whether a profile string looks like an ORCID iD
/// (four dash-separated groups of four digits, last digit may be X).
pub fn is_orcid(profile: &str) -> bool {
    let groups: Vec<&str> = profile.split('-').collect();
    if groups.len() != 4 {
        return false;
    }
    groups.iter().enumerate().all(|(i, group)| {
        group.len() == 4
            && group.chars().enumerate().all(|(j, c)| {
                // checksum digit of the final group may be X
                c.is_ascii_digit() || (i == 3 && j == 3 && (c == 'X' || c == 'x'))
            })
    })
}

/// Extract `(doi, issn)` pairs from an ORCID works XML document.
///
/// Per external-ids block the last id of each type wins; blocks without
/// either id are skipped.
pub fn parse_works(xml: &str) -> Vec<(Option<String>, Option<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pairs = Vec::new();
    let mut id_type = String::new();
    let mut doi: Option<String> = None;
    let mut issn: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"external-id" => id_type.clear(),
                b"external-id-type" => {
                    if let Ok(text) = reader.read_text(e.name()) {
                        id_type = text.trim().to_string();
                    }
                }
                b"external-id-value" => {
                    if let Ok(text) = reader.read_text(e.name()) {
                        let value = text.trim().to_string();
                        match id_type.as_str() {
                            "doi" => doi = Some(value),
                            "issn" => issn = Some(value),
                            _ => {}
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"external-ids" => {
                if doi.is_some() || issn.is_some() {
                    pairs.push((doi.take(), issn.take()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("malformed orcid works XML: {e}");
                break;
            }
            _ => {}
        }
    }
    pairs
}
