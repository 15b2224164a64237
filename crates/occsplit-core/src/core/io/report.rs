use serde::Serialize;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One line of the solution report.
///
/// Chain lists are space-separated so the file stays a plain four-column table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionRow {
    pub name: String,
    pub accepted_chains: String,
    pub retained_chains: String,
    pub output_path: String,
}

impl SolutionRow {
    pub fn new<'a>(
        name: &str,
        accepted: impl IntoIterator<Item = &'a str>,
        retained: impl IntoIterator<Item = &'a str>,
        output_path: Option<&Path>,
    ) -> Self {
        Self {
            name: name.to_string(),
            accepted_chains: accepted.into_iter().collect::<Vec<_>>().join(" "),
            retained_chains: retained.into_iter().collect::<Vec<_>>().join(" "),
            output_path: output_path
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Writes a header line followed by one row per solution.
pub fn write_report<W: Write>(writer: W, rows: &[SolutionRow]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    if rows.is_empty() {
        csv_writer.write_record(["name", "accepted_chains", "retained_chains", "output_path"])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_report_to_path<P: AsRef<Path>>(
    path: P,
    rows: &[SolutionRow],
) -> Result<(), ReportError> {
    let file = std::fs::File::create(path)?;
    write_report(std::io::BufWriter::new(file), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_has_header_and_one_row_per_solution() {
        let rows = vec![
            SolutionRow::new("B", ["B"], ["A", "B"], Some(Path::new("model-B.cif"))),
            SolutionRow::new("C", ["C"], ["A", "C"], None),
        ];

        let mut out = Vec::new();
        write_report(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "name,accepted_chains,retained_chains,output_path\n\
             B,B,A B,model-B.cif\n\
             C,C,A C,\n"
        );
    }

    #[test]
    fn empty_report_still_has_header() {
        let mut out = Vec::new();
        write_report(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,accepted_chains,retained_chains,output_path\n"
        );
    }

    #[test]
    fn report_can_be_written_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let rows = vec![SolutionRow::new("D-F", ["D", "F"], ["D", "F"], None)];

        write_report_to_path(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("D-F,D F,D F,"));
    }
}
