//! oapath - Open-access pathway classification from the command line
//!
//! Looks up open-access status and republication pathways for single
//! papers, whole author profiles, and bulk Unpaywall extracts.

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::MultiProgress;

use oapath_core::Settings;

mod cmd;

#[derive(Parser)]
#[command(name = "oapath")]
#[command(about = "Open-access pathway classification for academic papers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./oapath.toml or ~/.config/oapath/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single paper by DOI
    Paper(cmd::paper::PaperArgs),
    /// Look up an author profile and classify their papers
    Author(cmd::author::AuthorArgs),
    /// Classify a bulk Unpaywall extract and report aggregate metrics
    Audit(cmd::audit::AuditArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress bars only make sense on a terminal; in pipes the logs
    // are the only progress indicator.
    let is_tty = std::io::stderr().is_terminal();
    let multi = if is_tty { Some(MultiProgress::new()) } else { None };
    let quiet = if is_tty { cli.quiet || !cli.debug } else { cli.quiet };
    oapath_core::init_logging(quiet, cli.debug, multi.as_ref());

    let settings = if let Some(path) = &cli.config {
        Settings::from_file(path)?
    } else {
        Settings::load()?
    };

    match cli.command {
        Command::Paper(args) => cmd::paper::run(args, &settings),
        Command::Author(args) => cmd::author::run(args, &settings),
        Command::Audit(args) => cmd::audit::run(args, &settings, multi.as_ref()),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            let configured = |opt: &Option<String>| {
                if opt.is_some() { "configured" } else { "not set" }
            };
            table.add_row(vec![
                "Sherpa API key",
                configured(&settings.credentials.sherpa_api_key),
            ]);
            table.add_row(vec![
                "Unpaywall email",
                configured(&settings.credentials.unpaywall_email),
            ]);
            table.add_row(vec![
                "S2 API key",
                configured(&settings.credentials.s2_api_key),
            ]);
            table.add_row(vec![
                "Server address",
                &format!("{}:{}", settings.server.host, settings.server.port),
            ]);
            table.add_row(vec![
                "Pathway cache",
                &settings
                    .cache
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "memory only".to_string()),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
