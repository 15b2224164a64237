use std::collections::BTreeSet;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading structure files and writing chain-filtered copies.
///
/// A structure file is read once into an in-memory document. Solutions are written back as
/// copies of that document that keep only the atoms of the selected chains, so everything the
/// reader did not interpret survives unchanged.
pub trait StructureFile {
    /// The in-memory representation of a parsed file.
    type Document;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed document.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error>;

    /// Writes a copy of `document` that keeps only atoms belonging to `chains`.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to copy.
    /// * `chains` - The chain ids whose atoms are retained.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_selection_to(
        document: &Self::Document,
        chains: &BTreeSet<String>,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a chain-filtered copy of `document` to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_selection_to_path<P: AsRef<Path>>(
        document: &Self::Document,
        chains: &BTreeSet<String>,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_selection_to(document, chains, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
