use crate::analysis::{AnalysisReport, PassReport};
use crate::core::CouplingKind;
use crate::debt::DebtReport;
use crate::io::ensure_dir;
use crate::io::tables::{entity_summary, write_summary_csv, CouplingTable};
use crate::stats::Statistics;
use colored::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
    Csv,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        for pass in &report.passes {
            self.write_pass(pass)?;
        }
        self.write_skipped(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Coupling Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_pass(&mut self, pass: &PassReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## {} representation", pass.representation)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} entities in {} packages.",
            pass.entities.len(),
            pass.packages.len()
        )?;
        if pass.cancelled {
            writeln!(self.writer)?;
            writeln!(self.writer, "**Cancelled before all metrics ran.**")?;
        }
        writeln!(self.writer)?;

        self.write_statistics(pass)?;
        if let Some(debt) = &pass.debt {
            self.write_debt(debt)?;
        }
        for metric in &pass.metrics {
            let table = CouplingTable::from_metric(metric);
            self.write_table(&format!("{} coupling", metric.kind), &table)?;
        }
        self.write_entity_summary(pass)?;
        Ok(())
    }

    fn write_statistics(&mut self, pass: &PassReport) -> anyhow::Result<()> {
        writeln!(self.writer, "### Statistics")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Metric | All | Resolved | Errors | Project part | Self connections | Ignored |"
        )?;
        writeln!(
            self.writer,
            "|--------|-----|----------|--------|--------------|------------------|---------|"
        )?;
        for metric in &pass.metrics {
            let stats = &metric.statistics;
            writeln!(
                self.writer,
                "| {} | {} | {} ({}%) | {} ({}%) | {} ({}%) | {} ({}%) | {} |",
                metric.kind,
                stats.total,
                stats.resolved,
                stats.percent(stats.resolved),
                stats.errors,
                stats.percent(stats.errors),
                stats.project_part(),
                stats.percent(stats.project_part()),
                stats.self_connections,
                stats.percent(stats.self_connections),
                stats.ignored,
            )?;
        }
        writeln!(self.writer)?;

        for metric in pass
            .metrics
            .iter()
            .filter(|metric| !metric.statistics.error_messages.is_empty())
        {
            writeln!(
                self.writer,
                "#### {} errors ({})",
                metric.kind,
                metric.statistics.error_messages.len()
            )?;
            writeln!(self.writer)?;
            for message in &metric.statistics.error_messages {
                writeln!(self.writer, "- `{message}`")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_debt(&mut self, debt: &DebtReport) -> anyhow::Result<()> {
        writeln!(self.writer, "### Structural Debt")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Score | Cycles |")?;
        writeln!(self.writer, "|-------|--------|")?;
        writeln!(self.writer, "| {} | {} |", debt.score, debt.cycle_count)?;
        writeln!(self.writer)?;
        for cycle in &debt.cycles {
            writeln!(self.writer, "- {cycle}")?;
        }
        if !debt.cycles.is_empty() {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_table(&mut self, title: &str, table: &CouplingTable) -> anyhow::Result<()> {
        if table.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "### {title}")?;
        writeln!(self.writer)?;

        write!(self.writer, "| |")?;
        for name in &table.names {
            write!(self.writer, " {name} |")?;
        }
        writeln!(self.writer, " sum_out |")?;
        write!(self.writer, "|---|")?;
        for _ in &table.names {
            write!(self.writer, "---|")?;
        }
        writeln!(self.writer, "---|")?;

        for ((name, row), sum) in table.names.iter().zip(&table.cells).zip(&table.sum_out) {
            write!(self.writer, "| {name} |")?;
            for value in row {
                write!(self.writer, " {value} |")?;
            }
            writeln!(self.writer, " {sum} |")?;
        }

        write!(self.writer, "| sum_in |")?;
        for value in &table.sum_in {
            write!(self.writer, " {value} |")?;
        }
        writeln!(self.writer, " |")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_entity_summary(&mut self, pass: &PassReport) -> anyhow::Result<()> {
        let (kinds, rows) = entity_summary(pass);
        if kinds.is_empty() || rows.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "### All metrics per entity")?;
        writeln!(self.writer)?;
        write!(self.writer, "| Entity |")?;
        for kind in &kinds {
            write!(self.writer, " {kind} |")?;
        }
        writeln!(self.writer, " total |")?;
        write!(self.writer, "|---|")?;
        for _ in &kinds {
            write!(self.writer, "---|")?;
        }
        writeln!(self.writer, "---|")?;
        for row in rows {
            write!(self.writer, "| {} |", row.entity)?;
            for value in &row.values {
                write!(self.writer, " {value} |")?;
            }
            writeln!(self.writer, " {} |", row.total)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_skipped(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let skipped: Vec<_> = report.skipped_units().collect();
        if skipped.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Skipped units")?;
        writeln!(self.writer)?;
        for unit in skipped {
            writeln!(
                self.writer,
                "- {} `{}`: {}",
                unit.representation, unit.unit, unit.reason
            )?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl TerminalWriter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Coupling Analysis Report".bold().blue())?;
        writeln!(self.writer, "{}", "========================".blue())?;
        writeln!(self.writer)?;

        for pass in &report.passes {
            writeln!(
                self.writer,
                "{} {} representation ({} entities, {} packages)",
                "▶".bold(),
                pass.representation.to_string().bold(),
                pass.entities.len(),
                pass.packages.len()
            )?;
            for metric in &pass.metrics {
                writeln!(
                    self.writer,
                    "  {:<12} {} edges  {}",
                    metric.kind.to_string(),
                    metric.matrix.edge_count(),
                    colored_statistics(&metric.statistics)
                )?;
            }
            if let Some(debt) = &pass.debt {
                let score = if debt.score == 0 {
                    debt.score.to_string().green()
                } else {
                    debt.score.to_string().red()
                };
                writeln!(
                    self.writer,
                    "  Structural debt: {} ({} cycles)",
                    score, debt.cycle_count
                )?;
                for cycle in &debt.cycles {
                    writeln!(self.writer, "    {}", cycle.to_string().yellow())?;
                }
            }
            if pass.cancelled {
                writeln!(self.writer, "  {}", "cancelled".yellow())?;
            }
            writeln!(self.writer)?;
        }

        let skipped = report.skipped_units().count();
        if skipped > 0 {
            writeln!(
                self.writer,
                "{} {} malformed units skipped",
                "⚠".yellow(),
                skipped
            )?;
        }
        Ok(())
    }
}

fn colored_statistics(stats: &Statistics) -> String {
    let errors = if stats.errors > 0 {
        stats.errors.to_string().red()
    } else {
        stats.errors.to_string().normal()
    };
    format!(
        "[all={}, resolved={}, error={}, project_part={}, self={}]",
        stats.total,
        stats.resolved,
        errors,
        stats.project_part(),
        stats.self_connections
    )
}

/// One CSV file per metric and pass, plus an all-metrics table per pass.
pub struct CsvWriter {
    directory: PathBuf,
}

impl CsvWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn file_name(pass: &PassReport, kind: CouplingKind) -> String {
        format!("{}_{}.csv", pass.representation, kind)
    }
}

impl OutputWriter for CsvWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        ensure_dir(&self.directory)?;
        for pass in &report.passes {
            for metric in &pass.metrics {
                let table = CouplingTable::from_metric(metric);
                let path = self.directory.join(Self::file_name(pass, metric.kind));
                log::debug!("Writing CSV file: {}", path.display());
                table.write_csv(fs::File::create(&path)?)?;
            }
            let path = self
                .directory
                .join(format!("{}_all_metrics.csv", pass.representation));
            write_summary_csv(pass, fs::File::create(&path)?)?;
        }
        Ok(())
    }
}

/// Writer for `format`, targeting `output` or stdout.
///
/// CSV output is a set of files and needs a directory.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let writer: Box<dyn OutputWriter> = match (format, output) {
        (OutputFormat::Csv, Some(directory)) => Box::new(CsvWriter::new(directory)),
        (OutputFormat::Csv, None) => {
            anyhow::bail!("CSV output needs an output directory (--output)")
        }
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(fs::File::create(path)?)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Markdown, Some(path)) => {
            Box::new(MarkdownWriter::new(fs::File::create(path)?))
        }
        (OutputFormat::Markdown, None) => Box::new(MarkdownWriter::new(std::io::stdout())),
        (OutputFormat::Terminal, Some(path)) => {
            Box::new(TerminalWriter::new(fs::File::create(path)?))
        }
        (OutputFormat::Terminal, None) => Box::new(TerminalWriter::stdout()),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CouplingAnalyzer;
    use crate::config::CouplingConfig;
    use crate::core::Representation;
    use crate::facts::{AnalysisInput, CompiledModule, Invocation, Opcode};

    fn sample_report() -> AnalysisReport {
        let call = |owner: &str| Invocation {
            opcode: Opcode::InvokeVirtual,
            owner: owner.into(),
            method: "run".into(),
        };
        let mut a = CompiledModule::new("a/ClassA");
        a.invocations = vec![call("b/ClassB")];
        let mut b = CompiledModule::new("b/ClassB");
        b.invocations = vec![call("a/ClassA")];

        CouplingAnalyzer::new(CouplingConfig::default())
            .unwrap()
            .analyze(&AnalysisInput::new(vec![a, b], Vec::new()))
    }

    #[test]
    fn test_json_writer_round_trips_pass() {
        let report = sample_report();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();

        let parsed: AnalysisReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.passes, report.passes);
    }

    #[test]
    fn test_markdown_writer_sections() {
        let report = sample_report();
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer).write_report(&report).unwrap();
        let markdown = String::from_utf8(buffer).unwrap();

        assert!(markdown.contains("# Coupling Analysis Report"));
        assert!(markdown.contains("## compiled representation"));
        assert!(markdown.contains("### Structural Debt"));
        assert!(markdown.contains("- a -> b -> a"));
        assert!(markdown.contains("### call coupling"));
        assert!(markdown.contains("| a.ClassA | 0 | 1 | 1 |"));
        assert!(markdown.contains("### All metrics per entity"));
    }

    #[test]
    fn test_terminal_writer_reports_debt() {
        colored::control::set_override(false);
        let report = sample_report();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer).write_report(&report).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Structural debt: 12 (1 cycles)"));
        assert!(text.contains("a -> b -> a"));
    }

    #[test]
    fn test_csv_writer_creates_files() {
        let report = sample_report();
        let directory = tempfile::TempDir::new().unwrap();
        CsvWriter::new(directory.path()).write_report(&report).unwrap();

        let pass = report.pass(Representation::Compiled).unwrap();
        let call_csv = fs::read_to_string(
            directory
                .path()
                .join(CsvWriter::file_name(pass, CouplingKind::Call)),
        )
        .unwrap();
        assert!(call_csv.starts_with(",a.ClassA,b.ClassB,sum_out\n"));
        assert!(directory.path().join("compiled_all_metrics.csv").exists());
    }

    #[test]
    fn test_csv_rows_keep_their_width_with_commas_in_names() {
        let mut a = CompiledModule::new("a/Class,A");
        a.invocations = vec![Invocation {
            opcode: Opcode::InvokeVirtual,
            owner: "a/ClassB".into(),
            method: "run".into(),
        }];
        let b = CompiledModule::new("a/ClassB");
        let report = CouplingAnalyzer::new(CouplingConfig::default())
            .unwrap()
            .analyze(&AnalysisInput::new(vec![a, b], Vec::new()));
        let directory = tempfile::TempDir::new().unwrap();
        CsvWriter::new(directory.path()).write_report(&report).unwrap();

        for file in ["compiled_call.csv", "compiled_all_metrics.csv"] {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .from_path(directory.path().join(file))
                .unwrap();
            let records: Vec<csv::StringRecord> =
                reader.records().map(|record| record.unwrap()).collect();
            let width = records[0].len();
            assert!(records.iter().all(|record| record.len() == width), "{file}");
            assert_eq!(&records[1][0], "a.Class,A", "{file}");
        }
    }

    #[test]
    fn test_csv_requires_directory() {
        assert!(create_writer(OutputFormat::Csv, None).is_err());
    }
}
