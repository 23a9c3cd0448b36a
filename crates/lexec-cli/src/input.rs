//! # Case File Input
//!
//! Reads a case file exported by the record store. JSON is the native
//! export; YAML is accepted for hand-written fixtures (`.yaml` / `.yml`).

use std::path::Path;

use anyhow::Context;

use lexec_state::CaseRecords;

/// Serialization of a case file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    Json,
    Yaml,
}

impl CaseFormat {
    /// Pick the format from the file extension. Anything that is not YAML
    /// is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse case records from text.
pub fn parse_case(text: &str, format: CaseFormat) -> anyhow::Result<CaseRecords> {
    let records = match format {
        CaseFormat::Json => serde_json::from_str(text).context("invalid JSON case file")?,
        CaseFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML case file")?,
    };
    Ok(records)
}

/// Read and parse a case file.
pub fn load_case(path: &Path) -> anyhow::Result<CaseRecords> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading case file {}", path.display()))?;
    let records = parse_case(&text, CaseFormat::from_path(path))
        .with_context(|| format!("parsing case file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        events = records.events.len(),
        layers = records.layers.len(),
        incidents = records.incidents.len(),
        "case file loaded"
    );
    Ok(records)
}
