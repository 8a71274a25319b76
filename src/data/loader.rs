use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{RawMovie, Table};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened at all. Nothing can run without it.
    #[error("dataset not found: {}", path.display())]
    SourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Columns every dataset must provide.
pub const COLUMNS: [&str; 10] = [
    "title",
    "genre",
    "rating",
    "release_year",
    "votes",
    "budget",
    "revenue",
    "director",
    "language",
    "country",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the movie dataset from a CSV file with a header row.
///
/// Only the ten movie columns are kept; any other column is ignored.
/// A header missing one of the ten columns is rejected up front.
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceMissing {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Parse CSV text from any reader into a [`Table`]. Short rows are
/// padded with missing cells.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    if let Some(missing) = COLUMNS.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(LoadError::MissingColumn(*missing));
    }
    let rows = reader
        .deserialize::<RawMovie>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Table::new(rows))
}
