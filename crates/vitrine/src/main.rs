use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::{Env, Target};
use std::path::PathBuf;
use vitrine_catalog::VitrineConfig;

mod browse;
mod list;
mod load;
mod show;
mod validate;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Browse a product catalog from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Configuration file (defaults to ~/.vitrine/config.toml)
    #[arg(long, global = true, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Write log output to a file instead of stderr
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive catalog browser (default)
    #[command(alias = "b")]
    Browse(browse::BrowseArgs),

    /// Print the visible window of the catalog
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// Print the details of one product
    Show(show::ShowArgs),

    /// Check a catalog document and report malformed records
    Validate(validate::ValidateArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug (overridden by RUST_LOG)
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &cli.log_file {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();

    let config =
        VitrineConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        None => browse::execute(browse::BrowseArgs::default(), &config),
        Some(Commands::Browse(args)) => browse::execute(args, &config),
        Some(Commands::List(args)) => list::execute(args, &config),
        Some(Commands::Show(args)) => show::execute(args, &config),
        Some(Commands::Validate(args)) => validate::execute(args, &config),
    }
}
