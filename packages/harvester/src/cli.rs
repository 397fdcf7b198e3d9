//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::coa::{Catalog, CoaResolver};
use crate::config::{validate_url, HarvesterConfig};
use crate::error::Result;
use crate::http::create_client;
use crate::output::{render, save_output, OutputFormat};
use crate::ovm::{download_registry, parse_registry_xml};
use crate::types::Subjekt;

/// OVM Harvester - Convert the Czech public-administration registry export.
#[derive(Parser)]
#[command(name = "ovm-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a locally stored registry export.
    Parse {
        /// Path to the Seznam OVM XML export
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Download the official registry export and convert it.
    Download {
        /// Export URL (default: OVM_EXPORT_URL or the official endpoint)
        #[arg(short, long)]
        url: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Guess coat-of-arms URLs for municipality names.
    Coa {
        /// Municipality names
        #[arg(required = true)]
        names: Vec<String>,

        /// Catalog file with one Commons URL per line (default: bundled list)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Print the file names of the coat-of-arms catalog.
    Catalog {
        /// Catalog file with one Commons URL per line (default: bundled list)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Offline commands never read the network settings.
    match cli.command {
        Commands::Parse {
            file,
            output,
            format,
        } => parse_command(&file, output.as_deref(), format),
        Commands::Download {
            url,
            output,
            format,
        } => {
            let config = HarvesterConfig::from_env()?;
            download_command(&config, url.as_deref(), output.as_deref(), format)
        }
        Commands::Coa { names, catalog } => {
            let config = HarvesterConfig::from_env()?;
            coa_command(&config, &names, catalog.as_deref())
        }
        Commands::Catalog { catalog } => catalog_command(catalog.as_deref()),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::parse(&std::fs::read_to_string(path)?),
        None => Catalog::builtin(),
    }
}

fn parse_command(file: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let xml = std::fs::read_to_string(file)?;
    let subjects = parse_registry_xml(&xml)?;
    emit(&subjects, &file.display().to_string(), output, format)
}

fn download_command(
    config: &HarvesterConfig,
    url: Option<&str>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let url = url.unwrap_or(config.export_url.as_str());
    validate_url(url)?;

    let pb = spinner("Downloading registry export...");
    let subjects = create_client(config).and_then(|client| download_registry(&client, url));
    pb.finish_and_clear();

    emit(&subjects?, url, output, format)
}

/// Print to stdout, or save to `output` with a short summary on stderr.
fn emit(
    subjects: &[Subjekt],
    source: &str,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match output {
        Some(path) => {
            save_output(subjects, source, format, path)?;
            eprintln!(
                "{} {} subjects to {}",
                style("Saved").green().bold(),
                subjects.len(),
                path.display()
            );
        }
        None => print!("{}", render(subjects, source, format)?),
    }
    Ok(())
}

fn coa_command(config: &HarvesterConfig, names: &[String], catalog: Option<&Path>) -> Result<()> {
    let catalog = Arc::new(load_catalog(catalog)?);
    let resolver = CoaResolver::from_config(config, catalog)?;

    let pb = spinner("Searching Wikipedia...");
    let results = resolver.resolve_many(names.iter().map(String::as_str));
    pb.finish_and_clear();

    for (name, result) in results {
        match result {
            Ok(Some(url)) => println!("{}: {}", style(&name).cyan(), url),
            Ok(None) => println!("{}: -", style(&name).cyan()),
            Err(e) => println!("{}: {} {}", style(&name).cyan(), style("error").red(), e),
        }
    }
    Ok(())
}

fn catalog_command(catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    for entry in catalog.entries() {
        println!("{}", entry.token());
    }
    eprintln!("{} entries", catalog.len());
    Ok(())
}
