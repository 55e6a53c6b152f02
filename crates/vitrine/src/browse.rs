use anyhow::Result;
use clap::Args;
use vitrine_catalog::VitrineConfig;

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Catalog source: a path, file:// URL or http(s):// URL
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,
}

pub fn execute(args: BrowseArgs, config: &VitrineConfig) -> Result<()> {
    let source = crate::load::resolve_source(args.source.as_deref(), config)?;
    vitrine_catalog::tui::run(config, source)
}
