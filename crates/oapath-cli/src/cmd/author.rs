//! Author subcommand - profile lookup plus per-paper classification

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use oapath_core::{
    CoreError, EnrichContext, OaStatus, Paper, PathwayCache, Settings, StatusProvider, aggregate,
};
use oapath_providers::{SemanticScholar, Sherpa, Unpaywall, Zenodo, find_author_with_papers};

#[derive(Args, Debug)]
pub struct AuthorArgs {
    /// Author profile: ORCID iD, Semantic Scholar author URL/ID, or a plain name
    pub profile: String,

    /// Skip pathway resolution and only list the author's papers
    #[arg(long)]
    pub papers_only: bool,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AuthorArgs, settings: &Settings) -> Result<()> {
    let s2 = SemanticScholar::new(settings.credentials.s2_api_key.as_deref());

    let mut author = find_author_with_papers(&args.profile, &s2)
        .with_context(|| format!("No author found for profile '{}'", args.profile))?;

    log::info!("Found {} with {} papers", author.name, author.papers.len());

    if !args.papers_only {
        let sherpa_api_key = settings
            .credentials
            .sherpa_api_key
            .clone()
            .context("Sherpa API key not configured (set SHERPA_API_KEY)")?;
        let unpaywall = Unpaywall::new(settings.credentials.unpaywall_email.as_deref())?;

        let cache = match &settings.cache.path {
            Some(path) => PathwayCache::load(path)?,
            None => PathwayCache::new(),
        };

        let ctx = EnrichContext {
            evidence: &[&s2, &Zenodo],
            policy: &Sherpa,
            cache: Some(&cache),
            sherpa_api_key: Some(&sherpa_api_key),
        };

        author.papers = classify_papers(&ctx, &unpaywall, author.papers)?;

        if let Some(path) = &settings.cache.path {
            cache.save(path)?;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&author)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("DOI").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Pathway").fg(Color::Cyan),
        ]);
    for paper in &author.papers {
        table.add_row(vec![
            paper.doi.as_str(),
            paper.title.as_deref().unwrap_or(""),
            paper.oa_status.as_str(),
            paper.oa_pathway.map(|p| p.as_str()).unwrap_or(""),
        ]);
    }

    eprintln!("\n{}", author.name);
    eprintln!("{table}");

    if !args.papers_only {
        let metrics = aggregate(&author.papers);
        eprintln!(
            "{} already OA, {} no-cost pathway, {} other pathway, {} unknown",
            metrics.n_already_oa, metrics.n_nocost, metrics.n_other, metrics.n_unknown
        );
    }

    Ok(())
}

/// Classify a backend's paper list.
///
/// Semantic Scholar delivers papers with a usable status; ORCID and
/// Crossref deliver bare DOIs with `NotFound`. The latter get the full
/// primary lookup so a resolvable DOI never terminates as unknown, keeping
/// whatever display title the backend already supplied.
fn classify_papers(
    ctx: &EnrichContext<'_>,
    primary: &dyn StatusProvider,
    papers: Vec<Paper>,
) -> Result<Vec<Paper>, CoreError> {
    papers
        .into_iter()
        .map(|p| {
            if p.oa_status == OaStatus::NotFound {
                let title = p.title;
                let mut enriched = ctx.enrich_paper(&p.doi, primary)?;
                if enriched.title.is_none() {
                    enriched.title = title;
                }
                Ok(enriched)
            } else {
                ctx.enrich_with_known_status(p)
            }
        })
        .collect()
}
