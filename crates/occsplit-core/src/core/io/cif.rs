//! mmCIF reader and chain-filtering writer.
//!
//! Only the `_atom_site` loop of the first data block is interpreted. Every other line,
//! including other categories, comments, and semicolon text fields, is kept verbatim so a
//! filtered copy differs from its source only by the dropped atom rows.

use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::occupancy::{ChainOccupancy, FULL_OCCUPANCY};
use nalgebra::Point3;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const ATOM_SITE_PREFIX: &str = "_atom_site.";

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CifParseErrorKind },
    #[error("_atom_site loop starting on line {line} is missing required column '{column}'")]
    MissingColumn { line: usize, column: &'static str },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CifParseErrorKind {
    #[error("Invalid integer in column {column} (value: '{value}')")]
    InvalidInt { column: &'static str, value: String },
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: &'static str, value: String },
    #[error("Row has {found} values but the _atom_site loop declares {expected} columns")]
    RowLength { expected: usize, found: usize },
}

/// One interpreted row of the `_atom_site` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSiteRecord {
    pub chain: String,
    pub residue: i32,
    pub atom_name: String,
    pub occupancy: f64,
    pub position: Point3<f64>,
}

impl AtomSiteRecord {
    pub fn to_atom(&self) -> Atom {
        Atom::new(&self.chain, self.residue, &self.atom_name, self.position)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Raw(String),
    AtomRow { line: String, record: usize },
}

/// A parsed mmCIF file: interpreted atom records plus the original text layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CifDocument {
    segments: Vec<Segment>,
    records: Vec<AtomSiteRecord>,
}

impl CifDocument {
    pub fn records(&self) -> &[AtomSiteRecord] {
        &self.records
    }

    pub fn atoms(&self) -> Vec<Atom> {
        self.records.iter().map(AtomSiteRecord::to_atom).collect()
    }

    /// Minimum occupancy per chain over all atom records.
    pub fn chain_occupancy(&self) -> ChainOccupancy {
        ChainOccupancy::from_records(
            self.records
                .iter()
                .map(|r| (r.chain.as_str(), r.occupancy)),
        )
    }

    pub fn chains(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.chain.clone()).collect()
    }
}

#[derive(Default)]
struct AtomSiteIndices {
    column_count: usize,
    label_asym_id: Option<usize>,
    auth_asym_id: Option<usize>,
    label_atom_id: Option<usize>,
    auth_atom_id: Option<usize>,
    label_seq_id: Option<usize>,
    auth_seq_id: Option<usize>,
    cartn_x: Option<usize>,
    cartn_y: Option<usize>,
    cartn_z: Option<usize>,
    occupancy: Option<usize>,
}

/// Column positions resolved to the ones actually used for each field.
struct AtomSiteColumns {
    column_count: usize,
    chain: usize,
    atom_name: usize,
    seq: usize,
    seq_fallback: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    occupancy: Option<usize>,
}

impl AtomSiteIndices {
    fn from_headers(headers: &[String]) -> Self {
        let mut indices = Self {
            column_count: headers.len(),
            ..Default::default()
        };
        for (i, header) in headers.iter().enumerate() {
            let Some(field) = header.strip_prefix(ATOM_SITE_PREFIX) else {
                continue;
            };
            match field {
                "label_asym_id" => indices.label_asym_id = Some(i),
                "auth_asym_id" => indices.auth_asym_id = Some(i),
                "label_atom_id" => indices.label_atom_id = Some(i),
                "auth_atom_id" => indices.auth_atom_id = Some(i),
                "label_seq_id" => indices.label_seq_id = Some(i),
                "auth_seq_id" => indices.auth_seq_id = Some(i),
                "Cartn_x" => indices.cartn_x = Some(i),
                "Cartn_y" => indices.cartn_y = Some(i),
                "Cartn_z" => indices.cartn_z = Some(i),
                "occupancy" => indices.occupancy = Some(i),
                _ => {}
            }
        }
        indices
    }

    fn resolve(&self, line: usize) -> Result<AtomSiteColumns, CifError> {
        let missing = |column| CifError::MissingColumn { line, column };
        let seq = self
            .label_seq_id
            .or(self.auth_seq_id)
            .ok_or_else(|| missing("label_seq_id"))?;
        Ok(AtomSiteColumns {
            column_count: self.column_count,
            chain: self
                .label_asym_id
                .or(self.auth_asym_id)
                .ok_or_else(|| missing("label_asym_id"))?,
            atom_name: self
                .label_atom_id
                .or(self.auth_atom_id)
                .ok_or_else(|| missing("label_atom_id"))?,
            seq,
            seq_fallback: self.auth_seq_id.filter(|&i| i != seq),
            x: self.cartn_x.ok_or_else(|| missing("Cartn_x"))?,
            y: self.cartn_y.ok_or_else(|| missing("Cartn_y"))?,
            z: self.cartn_z.ok_or_else(|| missing("Cartn_z"))?,
            occupancy: self.occupancy,
        })
    }
}

enum ParserState {
    Base,
    InLoopHeader,
    InAtomSiteLoop,
    InOtherLoop,
}

fn is_null(value: &str) -> bool {
    value == "." || value == "?"
}

fn parse_float(value: &str, column: &'static str, line: usize) -> Result<f64, CifError> {
    f64::from_str(value).map_err(|_| CifError::Parse {
        line,
        kind: CifParseErrorKind::InvalidFloat {
            column,
            value: value.to_string(),
        },
    })
}

fn parse_residue(
    tokens: &[String],
    columns: &AtomSiteColumns,
    line: usize,
) -> Result<i32, CifError> {
    let primary = tokens[columns.seq].as_str();
    let value = match columns.seq_fallback {
        Some(fallback) if is_null(primary) => tokens[fallback].as_str(),
        _ => primary,
    };
    i32::from_str(value).map_err(|_| CifError::Parse {
        line,
        kind: CifParseErrorKind::InvalidInt {
            column: "label_seq_id",
            value: value.to_string(),
        },
    })
}

fn parse_row(
    tokens: &[String],
    columns: &AtomSiteColumns,
    line: usize,
) -> Result<AtomSiteRecord, CifError> {
    if tokens.len() != columns.column_count {
        return Err(CifError::Parse {
            line,
            kind: CifParseErrorKind::RowLength {
                expected: columns.column_count,
                found: tokens.len(),
            },
        });
    }

    let occupancy = match columns.occupancy.map(|i| tokens[i].as_str()) {
        Some(value) if !is_null(value) => parse_float(value, "occupancy", line)?,
        _ => FULL_OCCUPANCY,
    };

    Ok(AtomSiteRecord {
        chain: tokens[columns.chain].clone(),
        residue: parse_residue(tokens, columns, line)?,
        atom_name: tokens[columns.atom_name].clone(),
        occupancy,
        position: Point3::new(
            parse_float(&tokens[columns.x], "Cartn_x", line)?,
            parse_float(&tokens[columns.y], "Cartn_y", line)?,
            parse_float(&tokens[columns.z], "Cartn_z", line)?,
        ),
    })
}

/// Splits a line into whitespace-separated tokens, honouring single and double quotes.
///
/// A quote only closes a token when followed by whitespace or the end of the line, so
/// values such as `"C4'"` and `'O5''` keep their inner apostrophes.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match in_quote {
            Some(q) => {
                let closes = c == q && chars.peek().is_none_or(|next| next.is_whitespace());
                if closes {
                    tokens.push(std::mem::take(&mut current));
                    in_quote = None;
                } else {
                    current.push(c);
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None if (c == '\'' || c == '"') && current.is_empty() => in_quote = Some(c),
            None => current.push(c),
        }
    }
    if !current.is_empty() || in_quote.is_some() {
        tokens.push(current);
    }
    tokens
}

pub struct CifFile;

impl StructureFile for CifFile {
    type Document = CifDocument;
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let mut document = CifDocument::default();
        let mut state = ParserState::Base;
        let mut headers: Vec<String> = Vec::new();
        let mut header_line = 0;
        let mut columns: Option<AtomSiteColumns> = None;
        let mut block_count = 0usize;
        let mut atom_site_seen = false;
        let mut in_text_field = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.starts_with(';') {
                in_text_field = !in_text_field;
                document.segments.push(Segment::Raw(line));
                continue;
            }
            let trimmed = line.trim();
            if in_text_field || trimmed.is_empty() || trimmed.starts_with('#') {
                document.segments.push(Segment::Raw(line));
                continue;
            }

            let first = trimmed.split_whitespace().next().unwrap_or_default();

            if first.starts_with("data_") {
                block_count += 1;
                state = ParserState::Base;
                document.segments.push(Segment::Raw(line));
                continue;
            }
            if first == "loop_" {
                state = ParserState::InLoopHeader;
                headers.clear();
                header_line = line_num;
                document.segments.push(Segment::Raw(line));
                continue;
            }

            match state {
                ParserState::Base | ParserState::InOtherLoop => {
                    if first.starts_with('_') {
                        state = ParserState::Base;
                    }
                    document.segments.push(Segment::Raw(line));
                }
                ParserState::InLoopHeader if first.starts_with('_') => {
                    headers.push(first.to_string());
                    document.segments.push(Segment::Raw(line));
                }
                ParserState::InLoopHeader => {
                    let is_atom_site = headers.iter().any(|h| h.starts_with(ATOM_SITE_PREFIX));
                    if is_atom_site && block_count <= 1 && !atom_site_seen {
                        atom_site_seen = true;
                        let resolved =
                            AtomSiteIndices::from_headers(&headers).resolve(header_line)?;
                        push_atom_row(&mut document, line, &resolved, line_num)?;
                        columns = Some(resolved);
                        state = ParserState::InAtomSiteLoop;
                    } else {
                        document.segments.push(Segment::Raw(line));
                        state = ParserState::InOtherLoop;
                    }
                }
                ParserState::InAtomSiteLoop => {
                    if first.starts_with('_') {
                        state = ParserState::Base;
                        document.segments.push(Segment::Raw(line));
                    } else if let Some(resolved) = &columns {
                        push_atom_row(&mut document, line, resolved, line_num)?;
                    }
                }
            }
        }

        if !atom_site_seen {
            return Err(CifError::MissingRecord("_atom_site loop".into()));
        }
        Ok(document)
    }

    fn write_selection_to(
        document: &Self::Document,
        chains: &BTreeSet<String>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for segment in &document.segments {
            match segment {
                Segment::Raw(line) => writeln!(writer, "{}", line)?,
                Segment::AtomRow { line, record } => {
                    let keep = document
                        .records
                        .get(*record)
                        .is_some_and(|r| chains.contains(&r.chain));
                    if keep {
                        writeln!(writer, "{}", line)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn push_atom_row(
    document: &mut CifDocument,
    line: String,
    columns: &AtomSiteColumns,
    line_num: usize,
) -> Result<(), CifError> {
    let record = parse_row(&tokenize(&line), columns, line_num)?;
    document.records.push(record);
    document.segments.push(Segment::AtomRow {
        line,
        record: document.records.len() - 1,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
data_TEST
#
_entry.id TEST
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
ATOM 1 P    G A 1 1 0.000 0.000 0.000 1.00
ATOM 2 \"C4'\" G A 1 1 1.000 0.000 0.000 1.00
ATOM 3 P    C B 1 1 0.500 0.000 0.000 0.50
ATOM 4 P    C C 1 1 0.900 0.000 0.000 0.50
HETATM 5 O  HOH D . 101 9.000 9.000 9.000 .
#
loop_
_struct_asym.id
_struct_asym.entity_id
A 1
B 1
C 1
D 2
#
";

    fn read_sample() -> CifDocument {
        CifFile::read_from(&mut Cursor::new(SAMPLE)).expect("sample should parse")
    }

    #[test]
    fn read_from_parses_atom_site_records() {
        let document = read_sample();
        let records = document.records();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].chain, "A");
        assert_eq!(records[0].atom_name, "P");
        assert_eq!(records[1].atom_name, "C4'");
        assert_eq!(records[2].occupancy, 0.5);
        assert_eq!(records[3].position, Point3::new(0.9, 0.0, 0.0));
    }

    #[test]
    fn null_sequence_falls_back_to_author_numbering_and_null_occupancy_is_full() {
        let document = read_sample();
        let water = &document.records()[4];
        assert_eq!(water.residue, 101);
        assert_eq!(water.occupancy, FULL_OCCUPANCY);
    }

    #[test]
    fn chain_occupancy_uses_minimum_per_chain() {
        let occupancy = read_sample().chain_occupancy();
        assert_eq!(occupancy.get("A"), Some(1.0));
        assert_eq!(occupancy.get("B"), Some(0.5));
        assert_eq!(
            occupancy.fractional_chains().into_iter().collect::<Vec<_>>(),
            vec!["B".to_string(), "C".to_string()]
        );
    }

    #[test]
    fn write_selection_drops_only_unselected_atom_rows() {
        let document = read_sample();
        let keep: BTreeSet<String> = ["A", "B", "D"].iter().map(|s| s.to_string()).collect();

        let mut out = Vec::new();
        CifFile::write_selection_to(&document, &keep, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("ATOM 3 P    C B"));
        assert!(!text.contains("ATOM 4 P    C C"));
        assert!(text.contains("_entry.id TEST"));
        assert!(text.contains("C 1"), "other categories must be copied verbatim");
        assert_eq!(text.lines().count(), SAMPLE.lines().count() - 1);
    }

    #[test]
    fn written_selection_reads_back_with_selected_chains() {
        let document = read_sample();
        let keep: BTreeSet<String> = ["A", "C"].iter().map(|s| s.to_string()).collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cif");
        CifFile::write_selection_to_path(&document, &keep, &path).unwrap();
        let reread = CifFile::read_from_path(&path).unwrap();

        assert_eq!(reread.chains(), keep);
        assert_eq!(reread.records().len(), 3);
    }

    #[test]
    fn missing_atom_site_loop_is_reported() {
        let text = "data_X\n_entry.id X\n";
        let err = CifFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(err, CifError::MissingRecord(_)));
    }

    #[test]
    fn missing_coordinate_column_is_reported() {
        let text = "\
data_X
loop_
_atom_site.label_atom_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
P A 1 0.0 0.0
";
        let err = CifFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            CifError::MissingColumn {
                line: 2,
                column: "Cartn_z"
            }
        ));
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let text = "\
data_X
loop_
_atom_site.label_atom_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
P A 1 0.0 0.0
";
        let err = CifFile::read_from(&mut Cursor::new(text)).unwrap_err();
        match err {
            CifError::Parse { line, kind } => {
                assert_eq!(line, 9);
                assert_eq!(
                    kind,
                    CifParseErrorKind::RowLength {
                        expected: 6,
                        found: 5
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_coordinate_is_a_parse_error() {
        let text = "\
data_X
loop_
_atom_site.label_atom_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
P A 1 abc 0.0 0.0
";
        let err = CifFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            CifError::Parse {
                line: 9,
                kind: CifParseErrorKind::InvalidFloat {
                    column: "Cartn_x",
                    ..
                }
            }
        ));
    }

    #[test]
    fn semicolon_text_fields_are_copied_and_not_tokenized() {
        let text = "\
data_X
_struct.title
;
loop_ _atom_site.fake 'unbalanced
;
loop_
_atom_site.label_atom_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
P A 1 0.0 0.0 0.0
";
        let document = CifFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(document.records().len(), 1);

        let mut out = Vec::new();
        CifFile::write_selection_to(&document, &document.chains(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    #[test]
    fn tokenize_respects_quotes() {
        assert_eq!(tokenize("ATOM 'O5'' \"C4'\" x"), vec!["ATOM", "O5'", "C4'", "x"]);
        assert_eq!(tokenize("  a   b  "), vec!["a", "b"]);
        assert_eq!(tokenize("a ''"), vec!["a", ""]);
    }
}
