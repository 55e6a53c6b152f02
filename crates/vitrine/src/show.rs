use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;
use vitrine_catalog::{Browser, ProductId, VitrineConfig};

use crate::load::{load_catalog, print_json};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Product id
    pub id: ProductId,

    /// Catalog source: a path, file:// URL or http(s):// URL
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ShowArgs, config: &VitrineConfig) -> Result<()> {
    let (catalog, _report, source) = load_catalog(args.source.as_deref(), config)?;
    let mut browser = Browser::with_catalog(config, catalog)?;
    browser
        .view_more(args.id)
        .with_context(|| format!("Failed to show product from {source}"))?;
    let view = browser
        .detail()
        .view()
        .context("Detail panel did not open")?;

    if args.json {
        return print_json(view);
    }

    let labels = browser.labels();
    let fields = [
        (labels.size.as_str(), view.size.as_str()),
        (labels.version.as_str(), view.version.as_str()),
        (labels.compatibility.as_str(), view.compatibility.as_str()),
        (labels.download.as_str(), view.download_link.as_str()),
    ];
    let width = fields
        .iter()
        .map(|(name, _)| UnicodeWidthStr::width(*name))
        .max()
        .unwrap_or(0);

    println!("{}", view.title.bold());
    for (name, value) in fields {
        let pad = " ".repeat(width - UnicodeWidthStr::width(name));
        println!("  {}{pad}  {value}", format!("{name}:").dimmed());
    }
    if !view.description_lines.is_empty() {
        println!();
        for line in &view.description_lines {
            println!("  {line}");
        }
    }
    Ok(())
}
