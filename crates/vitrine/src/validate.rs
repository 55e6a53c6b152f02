use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vitrine_catalog::VitrineConfig;

use crate::load::{load_catalog, print_json};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog source: a path, file:// URL or http(s):// URL
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Print the load report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ValidateArgs, config: &VitrineConfig) -> Result<()> {
    let (_catalog, report, source) = load_catalog(args.source.as_deref(), config)?;

    if args.json {
        print_json(&report)?;
    } else {
        println!(
            "{} {} records accepted from {}",
            "✓".green(),
            report.accepted,
            source
        );
        for rejected in &report.rejected {
            let id = rejected
                .id
                .map(|id| format!(" (id {id})"))
                .unwrap_or_default();
            println!(
                "{} record {}{}: {}",
                "✗".red(),
                rejected.index,
                id,
                rejected.reason
            );
        }
    }

    if !report.is_clean() {
        anyhow::bail!(
            "{} malformed records in {}",
            report.rejected.len(),
            source
        );
    }
    Ok(())
}
