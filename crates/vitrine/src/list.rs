use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use vitrine_catalog::{Browser, Product, VitrineConfig};

use crate::load::{load_catalog, print_json};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Catalog source: a path, file:// URL or http(s):// URL
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Only show products whose name or description contains this text
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Show every page up to and including this one
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    query: &'a str,
    page: usize,
    total_matches: usize,
    has_more: bool,
    products: Vec<&'a Product>,
}

pub fn execute(args: ListArgs, config: &VitrineConfig) -> Result<()> {
    let (catalog, _report, _source) = load_catalog(args.source.as_deref(), config)?;
    let mut browser = Browser::with_catalog(config, catalog)?;
    if !args.query.is_empty() {
        browser.search_for(args.query.as_str());
    }
    browser.advance_to(args.page as usize);

    if args.json {
        return print_json(&ListOutput {
            query: &args.query,
            page: browser.current_page(),
            total_matches: browser.filtered_len(),
            has_more: browser.load_more_visible(),
            products: browser.visible_products(),
        });
    }

    if let Some(message) = browser.list().placeholder() {
        println!("{}", message.yellow());
        return Ok(());
    }

    for card in browser.list().cards() {
        println!("{}  {}", format!("{:>4}", card.id).dimmed(), card.name.bold());
    }

    let shown = browser.list().cards().len();
    let total = browser.filtered_len();
    println!();
    if browser.load_more_visible() {
        println!(
            "Showing {shown} of {total} matches. {} with {}",
            browser.labels().load_more,
            format!("--page {}", browser.current_page() + 1).cyan()
        );
    } else {
        println!("Showing {shown} of {total} matches.");
    }
    Ok(())
}
