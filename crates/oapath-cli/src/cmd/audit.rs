//! Audit subcommand - sanity-check classification against an Unpaywall extract
//!
//! Reads a JSONL extract carrying `doi`, `journal_issn_l` and `is_oa`, runs
//! the pipeline with the status already known, and reports how the papers
//! distribute across the pathway classes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use indicatif::MultiProgress;
use rayon::prelude::*;

use oapath_core::{
    EnrichContext, OaStatus, Paper, PathwayCache, Settings, aggregate,
};
use oapath_providers::SemanticScholar;

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// JSONL extract of the Unpaywall dataset (doi, journal_issn_l, is_oa)
    pub extract: PathBuf,

    /// Pathway cache file (overrides the configured one)
    #[arg(long)]
    pub pathway_cache: Option<PathBuf>,

    /// Maximum number of papers to process
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Number of parallel workers
    #[arg(short, long, default_value = "8")]
    pub workers: usize,
}

/// One row of the Unpaywall extract. Extra fields are ignored.
#[derive(Debug, serde::Deserialize)]
struct ExtractRow {
    doi: String,
    journal_issn_l: Option<String>,
    is_oa: bool,
}

pub fn run(args: AuditArgs, settings: &Settings, multi: Option<&MultiProgress>) -> Result<()> {
    let start = Instant::now();

    let sherpa_api_key = settings
        .credentials
        .sherpa_api_key
        .clone()
        .context("Sherpa API key not configured (set SHERPA_API_KEY)")?;
    let s2 = SemanticScholar::new(settings.credentials.s2_api_key.as_deref());

    let papers = load_extract(&args.extract, args.limit)?;
    log::info!(
        "Auditing {} papers with {} workers",
        papers.len(),
        args.workers
    );

    let cache_path = args.pathway_cache.as_ref().or(settings.cache.path.as_ref());
    let cache = match cache_path {
        Some(path) => PathwayCache::load(path)?,
        None => PathwayCache::new(),
    };

    let ctx = EnrichContext {
        evidence: &[&s2],
        policy: &oapath_providers::Sherpa,
        cache: Some(&cache),
        sherpa_api_key: Some(&sherpa_api_key),
    };

    let pb = multi.map(|m| {
        let pb = m.add(indicatif::ProgressBar::new(papers.len() as u64));
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} {bar:40} {pos}/{len} {wide_msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb
    });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.workers)
        .build()
        .context("Failed to create thread pool")?;

    let enriched = Mutex::new(Vec::with_capacity(papers.len()));
    pool.install(|| {
        papers.into_par_iter().for_each(|paper| {
            let doi = paper.doi.clone();
            match ctx.enrich_with_known_status(paper) {
                Ok(p) => enriched.lock().unwrap().push(p),
                Err(e) => log::error!("{doi}: {e}"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        });
    });
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    if let Some(path) = cache_path {
        cache.save(path)?;
        log::info!("Cached pathways for {} ISSNs at {}", cache.len(), path.display());
    }

    let enriched = enriched.into_inner().unwrap();
    let metrics = aggregate(&enriched);
    let elapsed = start.elapsed();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Audit").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table.add_row(vec!["Papers", &metrics.total().to_string()]);
    table.add_row(vec!["Already OA", &metrics.n_already_oa.to_string()]);
    table.add_row(vec!["No-cost pathway", &metrics.n_nocost.to_string()]);
    table.add_row(vec!["Other pathway", &metrics.n_other.to_string()]);
    table.add_row(vec!["Undetermined", &metrics.n_unknown.to_string()]);
    table.add_row(vec!["Time", &format!("{:.1}s", elapsed.as_secs_f64())]);
    eprintln!("\n{table}");

    Ok(())
}

/// Parse the extract into papers with a known status, skipping rows without
/// a linking ISSN and rows that fail to parse.
fn load_extract(path: &Path, limit: Option<usize>) -> Result<Vec<Paper>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open extract {}", path.display()))?;

    let mut papers = Vec::new();
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row: ExtractRow = match serde_json::from_str(&line) {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Skipping line {}: {e}", lineno + 1);
                continue;
            }
        };
        let Some(issn) = row.journal_issn_l else {
            continue;
        };
        let status = if row.is_oa { OaStatus::Oa } else { OaStatus::NotOa };
        papers.push(Paper::new(row.doi, Some(issn), status));
        if limit.is_some_and(|l| papers.len() >= l) {
            break;
        }
    }
    Ok(papers)
}
