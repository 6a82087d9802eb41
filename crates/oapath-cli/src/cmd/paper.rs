//! Paper subcommand - classify a single DOI

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use oapath_core::{EnrichContext, PathwayCache, Settings, retain_no_cost_permitted_oa};
use oapath_providers::{SemanticScholar, Sherpa, Unpaywall, Zenodo};

#[derive(Args, Debug)]
pub struct PaperArgs {
    /// DOI to classify, e.g. 10.1007/s00580-005-0536-8
    pub doi: String,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PaperArgs, settings: &Settings) -> Result<()> {
    let sherpa_api_key = settings
        .credentials
        .sherpa_api_key
        .clone()
        .context("Sherpa API key not configured (set SHERPA_API_KEY)")?;

    let unpaywall = Unpaywall::new(settings.credentials.unpaywall_email.as_deref())?;
    let s2 = SemanticScholar::new(settings.credentials.s2_api_key.as_deref());

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
    let mut paper = ctx.enrich_paper(&args.doi, &unpaywall)?;

    if let Some(path) = &settings.cache.path {
        cache.save(path)?;
    }

    if let Some(details) = paper.oa_pathway_details.take() {
        paper.oa_pathway_details =
            Some(details.iter().map(retain_no_cost_permitted_oa).collect());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&paper)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table.add_row(vec!["DOI", &paper.doi]);
    if let Some(title) = &paper.title {
        table.add_row(vec!["Title", title]);
    }
    if let Some(journal) = &paper.journal {
        table.add_row(vec!["Journal", journal]);
    }
    if let Some(authors) = &paper.authors {
        table.add_row(vec!["Authors", authors]);
    }
    if let Some(year) = paper.year {
        table.add_row(vec!["Year", &year.to_string()]);
    }
    table.add_row(vec![
        "ISSN",
        paper.issn.as_deref().unwrap_or("unknown"),
    ]);
    table.add_row(vec!["OA status", paper.oa_status.as_str()]);
    if let Some(pathway) = paper.oa_pathway {
        table.add_row(vec!["Pathway", pathway.as_str()]);
    }
    if let Some(url) = &paper.oa_location_url {
        table.add_row(vec!["Open copy", url]);
    }

    eprintln!("\n{table}");
    Ok(())
}
