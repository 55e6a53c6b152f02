use anyhow::{Context, Result};
use vitrine_catalog::{Catalog, CatalogSource, LoadReport, VitrineConfig};

/// Resolve the catalog source from the command line, environment and config.
pub fn resolve_source(cli: Option<&str>, config: &VitrineConfig) -> Result<CatalogSource> {
    let raw = config.resolve_source(cli);
    let source = CatalogSource::parse(&raw)?;
    log::debug!("Using catalog source {source}");
    Ok(source)
}

pub fn load_catalog(
    cli: Option<&str>,
    config: &VitrineConfig,
) -> Result<(Catalog, LoadReport, CatalogSource)> {
    let source = resolve_source(cli, config)?;
    let (catalog, report) = Catalog::load(&source)
        .with_context(|| format!("Failed to load catalog from {source}"))?;
    Ok((catalog, report, source))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
