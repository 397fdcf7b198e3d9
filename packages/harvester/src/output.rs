//! YAML and JSON output for extracted registry subjects.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;
use crate::types::Subjekt;

/// Serialisation format for the subject list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Top-level output document.
#[derive(Debug, Serialize)]
struct RegistryDocument<'a> {
    source: &'a str,
    generated_at: String,
    count: usize,
    subjects: &'a [Subjekt],
}

impl<'a> RegistryDocument<'a> {
    fn new(subjects: &'a [Subjekt], source: &'a str) -> Self {
        Self {
            source,
            generated_at: chrono::Local::now().format("%Y-%m-%d").to_string(),
            count: subjects.len(),
            subjects,
        }
    }
}

/// Render subjects as a YAML document.
///
/// `source` records where the registry export came from (path or URL).
pub fn generate_yaml(subjects: &[Subjekt], source: &str) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(&RegistryDocument::new(subjects, source))?;
    Ok(format!("---\n{yaml}"))
}

/// Render subjects as pretty-printed JSON.
pub fn generate_json(subjects: &[Subjekt], source: &str) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&RegistryDocument::new(subjects, source))?;
    json.push('\n');
    Ok(json)
}

/// Render subjects in the requested format.
pub fn render(subjects: &[Subjekt], source: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => generate_yaml(subjects, source),
        OutputFormat::Json => generate_json(subjects, source),
    }
}

/// Write rendered subjects to `path`.
///
/// The content goes to a temporary sibling file first and is renamed into
/// place, so readers never observe a half-written file.
pub fn save_output(
    subjects: &[Subjekt],
    source: &str,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let content = render(subjects, source, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::info!(path = %path.display(), count = subjects.len(), "Saved subjects");
    Ok(())
}
