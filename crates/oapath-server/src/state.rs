//! Shared application state wired from settings at startup

use std::sync::Arc;

use anyhow::{Context, Result};

use oapath_core::{CoreError, EnrichContext, Paper, PathwayCache, Settings};
use oapath_core::schema::Author;
use oapath_providers::{
    OpenAccessButton, SemanticScholar, Sherpa, Unpaywall, Zenodo, find_author_with_papers,
};

/// Everything the handlers need: provider clients, the pathway cache and
/// the Sherpa credential. Built once; credentials are validated here so a
/// misconfigured deployment fails at startup, not on the first request.
pub struct AppState {
    unpaywall: Unpaywall,
    s2: SemanticScholar,
    zenodo: Zenodo,
    sherpa: Sherpa,
    pub oabutton: OpenAccessButton,
    cache: PathwayCache,
    sherpa_api_key: String,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let sherpa_api_key = settings
            .credentials
            .sherpa_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .context("no Sherpa API key configured (set SHERPA_API_KEY)")?;
        let unpaywall = Unpaywall::new(settings.credentials.unpaywall_email.as_deref())?;

        let cache = match &settings.cache.path {
            Some(path) => PathwayCache::load(path)
                .with_context(|| format!("failed to load pathway cache {}", path.display()))?,
            None => PathwayCache::new(),
        };

        Ok(Self {
            unpaywall,
            s2: SemanticScholar::new(settings.credentials.s2_api_key.as_deref()),
            zenodo: Zenodo,
            sherpa: Sherpa,
            oabutton: OpenAccessButton,
            cache,
            sherpa_api_key,
        })
    }

    /// Run the full enrichment pipeline for one DOI.
    pub fn enrich_paper(&self, doi: &str) -> Result<Paper, CoreError> {
        let ctx = EnrichContext {
            evidence: &[&self.s2, &self.zenodo],
            policy: &self.sherpa,
            cache: Some(&self.cache),
            sherpa_api_key: Some(&self.sherpa_api_key),
        };
        ctx.enrich_paper(doi, &self.unpaywall)
    }

    pub fn find_author(&self, profile: &str) -> Option<Author> {
        find_author_with_papers(profile, &self.s2)
    }
}
