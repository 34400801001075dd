//! Loading named patterns from a CSV source.
//!
//! Each record is `name,pattern[,ignored...]`. There is no header row.
//! Fields follow RFC 4180 quoting, so a pattern containing commas or quotes
//! must be wrapped in double quotes with inner quotes doubled.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::registry::{PatternRegistry, RegistryError};

/// One `(name, pattern source)` pair read from a pattern source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub name: String,
    pub source: String,
}

/// Errors raised while loading the startup pattern set. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open pattern file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed pattern record: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing the name / pattern on line {line}: have {record:?}")]
    MissingField { line: u64, record: Vec<String> },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Reads every record from `reader` in order.
///
/// Blank lines are skipped. Records may have differing field counts; only
/// the first two fields are used.
///
/// # Errors
///
/// Returns [`SourceError::MissingField`] for a record with fewer than two
/// fields, or [`SourceError::Csv`] if the input is not valid CSV.
pub fn load_entries<R: Read>(reader: R) -> Result<Vec<PatternEntry>, SourceError> {
    let mut records = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in records.records() {
        let record = record?;
        let (Some(name), Some(source)) = (record.get(0), record.get(1)) else {
            return Err(SourceError::MissingField {
                line: record.position().map_or(0, csv::Position::line),
                record: record.iter().map(str::to_owned).collect(),
            });
        };
        entries.push(PatternEntry {
            name: name.to_owned(),
            source: source.to_owned(),
        });
    }

    Ok(entries)
}

/// Reads pattern entries from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be opened, otherwise any
/// error from [`load_entries`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<PatternEntry>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = load_entries(file)?;
    info!(path = %path.display(), records = entries.len(), "loaded pattern file");
    Ok(entries)
}

/// Loads the CSV file at `path` and compiles it into a registry.
///
/// # Errors
///
/// Fails on any load error or on the first pattern that does not compile.
pub fn load_registry(path: impl AsRef<Path>) -> Result<PatternRegistry, SourceError> {
    let entries = load_file(path)?;
    Ok(PatternRegistry::from_entries(entries)?)
}
