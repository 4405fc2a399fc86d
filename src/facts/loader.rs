//! Reading the JSON facts document.
//!
//! Units are decoded one by one so a single malformed unit is skipped and
//! reported instead of failing the whole document.

use super::{AnalysisInput, CompiledModule, SkippedUnit, SourceUnit};
use crate::core::{Error, Representation, Result, ResultExt};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawFacts {
    #[serde(default)]
    compiled: Vec<serde_json::Value>,
    #[serde(default)]
    source: Vec<serde_json::Value>,
}

/// Parse a facts document of the form `{"compiled": [...], "source": [...]}`.
pub fn parse_facts(contents: &str) -> Result<AnalysisInput> {
    let raw: RawFacts = serde_json::from_str(contents)?;
    let mut skipped = Vec::new();

    let compiled =
        decode_units::<CompiledModule>(raw.compiled, Representation::Compiled, &mut skipped);
    let source = decode_units::<SourceUnit>(raw.source, Representation::Source, &mut skipped);

    Ok(AnalysisInput {
        compiled,
        source,
        skipped,
    })
}

pub fn load_facts_file(path: &Path) -> Result<AnalysisInput> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read facts file", path, e))?;
    parse_facts(&contents).context(format!("facts file {}", path.display()))
}

fn decode_units<T: DeserializeOwned>(
    values: Vec<serde_json::Value>,
    representation: Representation,
    skipped: &mut Vec<SkippedUnit>,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let label = unit_label(&value, representation, index);
            match serde_json::from_value::<T>(value) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    warn!(unit = %label, error = %e, "skipping malformed {} unit", representation);
                    skipped.push(SkippedUnit {
                        representation,
                        unit: label,
                        reason: e.to_string(),
                    });
                    None
                }
            }
        })
        .collect()
}

fn unit_label(value: &serde_json::Value, representation: Representation, index: usize) -> String {
    ["name", "path"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{representation}[{index}]"))
}
