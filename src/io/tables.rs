//! Tabular views of metric matrices shared by the markdown and CSV writers.

use crate::analysis::{MetricReport, PassReport};
use crate::core::CouplingKind;
use std::io::Write;

/// Square matrix over sorted names with outgoing and incoming sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouplingTable {
    pub names: Vec<String>,
    pub cells: Vec<Vec<u64>>,
    pub sum_out: Vec<u64>,
    pub sum_in: Vec<u64>,
}

impl CouplingTable {
    /// Build the table over the metric's names and every matrix endpoint.
    pub fn from_metric(metric: &MetricReport) -> Self {
        let mut names = metric.names.clone();
        for (from, to, _) in metric.matrix.edges() {
            names.push(from.to_string());
            names.push(to.to_string());
        }
        names.sort();
        names.dedup();

        let cells: Vec<Vec<u64>> = names
            .iter()
            .map(|from| {
                names
                    .iter()
                    .map(|to| metric.matrix.weight(from, to))
                    .collect()
            })
            .collect();
        let sum_out: Vec<u64> = cells.iter().map(|row| row.iter().sum()).collect();
        let sum_in: Vec<u64> = (0..names.len())
            .map(|column| cells.iter().map(|row| row[column]).sum())
            .collect();

        Self {
            names,
            cells,
            sum_out,
            sum_in,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Header row of names, one row per name with its `sum_out`, then the
    /// `sum_in` row with an empty `sum_out` cell.
    pub fn write_csv<W: Write>(&self, out: W) -> anyhow::Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(out);

        let mut header = vec![String::new()];
        header.extend(self.names.iter().cloned());
        header.push("sum_out".to_string());
        wtr.write_record(&header)?;

        for ((name, row), sum) in self.names.iter().zip(&self.cells).zip(&self.sum_out) {
            let mut record = vec![name.clone()];
            record.extend(row.iter().map(u64::to_string));
            record.push(sum.to_string());
            wtr.write_record(&record)?;
        }

        let mut sum_in = vec!["sum_in".to_string()];
        sum_in.extend(self.sum_in.iter().map(u64::to_string));
        sum_in.push(String::new());
        wtr.write_record(&sum_in)?;

        wtr.flush()?;
        Ok(())
    }
}

/// Outgoing coupling of one entity across all entity-level kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummaryRow {
    pub entity: String,
    pub values: Vec<u64>,
    pub total: u64,
}

/// Per-entity outgoing sums for every entity-level metric of a pass.
///
/// Package coupling is left out because its rows are packages.
pub fn entity_summary(pass: &PassReport) -> (Vec<CouplingKind>, Vec<EntitySummaryRow>) {
    let metrics: Vec<&MetricReport> = pass
        .metrics
        .iter()
        .filter(|metric| metric.kind != CouplingKind::Package)
        .collect();
    let kinds = metrics.iter().map(|metric| metric.kind).collect();

    let rows = pass
        .entities
        .iter()
        .map(|entity| {
            let values: Vec<u64> = metrics
                .iter()
                .map(|metric| metric.matrix.out_weight(entity))
                .collect();
            EntitySummaryRow {
                entity: entity.clone(),
                total: values.iter().sum(),
                values,
            }
        })
        .collect();

    (kinds, rows)
}

/// The per-entity summary as CSV: kinds as columns, `total` last.
pub fn write_summary_csv<W: Write>(pass: &PassReport, out: W) -> anyhow::Result<()> {
    let (kinds, rows) = entity_summary(pass);
    let mut wtr = csv::WriterBuilder::new().from_writer(out);

    let mut header = vec![String::new()];
    header.extend(kinds.iter().map(|kind| kind.label().to_string()));
    header.push("total".to_string());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.entity];
        record.extend(row.values.iter().map(u64::to_string));
        record.push(row.total.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CouplingMatrix;
    use crate::stats::Statistics;
    use pretty_assertions::assert_eq;

    fn metric(kind: CouplingKind, names: &[&str], edges: &[(&str, &str)]) -> MetricReport {
        let mut matrix = CouplingMatrix::new();
        for (from, to) in edges {
            matrix.record(from, to);
        }
        MetricReport {
            kind,
            names: names.iter().map(|name| name.to_string()).collect(),
            matrix: matrix.snapshot(),
            statistics: Statistics::default(),
        }
    }

    #[test]
    fn test_table_sums() {
        let report = metric(
            CouplingKind::Call,
            &["a.A", "a.B", "a.C"],
            &[("a.A", "a.B"), ("a.A", "a.B"), ("a.C", "a.B"), ("a.B", "a.A")],
        );
        let table = CouplingTable::from_metric(&report);

        assert_eq!(table.cells, vec![vec![0, 2, 0], vec![1, 0, 0], vec![0, 1, 0]]);
        assert_eq!(table.sum_out, vec![2, 1, 1]);
        assert_eq!(table.sum_in, vec![1, 3, 0]);
    }

    #[test]
    fn test_table_includes_whitelisted_targets_missing_from_names() {
        let report = metric(CouplingKind::Call, &["a.A"], &[("a.A", "x.Special")]);
        let table = CouplingTable::from_metric(&report);
        assert_eq!(table.names, vec!["a.A", "x.Special"]);
    }

    fn csv_of(table: &CouplingTable) -> String {
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let report = metric(CouplingKind::Call, &["a.A", "a.B"], &[("a.A", "a.B")]);
        let csv = csv_of(&CouplingTable::from_metric(&report));
        assert_eq!(csv, ",a.A,a.B,sum_out\na.A,0,1,1\na.B,0,0,0\nsum_in,0,1,\n");
    }

    #[test]
    fn test_csv_quotes_names_with_commas() {
        let report = metric(
            CouplingKind::Call,
            &["a.Class,A", "a.ClassB"],
            &[("a.Class,A", "a.ClassB")],
        );
        let csv = csv_of(&CouplingTable::from_metric(&report));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|record| record.len() == 4));
        assert_eq!(&records[0][1], "a.Class,A");
        assert_eq!(&records[1][0], "a.Class,A");
        assert_eq!(&records[1][2], "1");
    }

    #[test]
    fn test_entity_summary_skips_package() {
        let pass = PassReport {
            representation: crate::core::Representation::Compiled,
            entities: vec!["a.A".into(), "a.B".into()],
            packages: vec!["a".into()],
            metrics: vec![
                metric(CouplingKind::Call, &["a.A", "a.B"], &[("a.A", "a.B"), ("a.A", "a.B")]),
                metric(CouplingKind::Field, &["a.A", "a.B"], &[("a.B", "a.A")]),
                metric(CouplingKind::Package, &["a", "b"], &[("a", "b")]),
            ],
            debt: None,
            skipped: Vec::new(),
            cancelled: false,
        };

        let (kinds, rows) = entity_summary(&pass);
        assert_eq!(kinds, vec![CouplingKind::Call, CouplingKind::Field]);
        assert_eq!(rows[0].values, vec![2, 0]);
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[1].values, vec![0, 1]);
    }
}
