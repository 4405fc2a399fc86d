pub mod output;
pub mod tables;

pub use output::{
    create_writer, CsvWriter, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter,
    TerminalWriter,
};
pub use tables::{entity_summary, CouplingTable, EntitySummaryRow};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
