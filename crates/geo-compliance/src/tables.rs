//! Shared plumbing for the flat CSV tables the snapshot is loaded from.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
    MissingColumn { table: &'static str, column: &'static str },
    InvalidDate { value: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::MissingColumn { table, column } => {
                write!(f, "{} table is missing the '{}' column", table, column)
            }
            ImportError::InvalidDate { value } => {
                write!(f, "'{}' is not a YYYY-MM-DD date", value)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Csv(err) => Some(err),
            ImportError::MissingColumn { .. } | ImportError::InvalidDate { .. } => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn open(path: &std::path::Path) -> Result<std::fs::File, ImportError> {
    std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Upstream exports write missing values as blanks, `n/a`, `None` or `nan`.
pub(crate) fn is_absent(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nan")
}

pub(crate) fn absent_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !is_absent(raw)))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ImportError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ImportError::InvalidDate {
        value: raw.trim().to_string(),
    })
}

pub(crate) fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ImportError> {
    raw.map(parse_date).transpose()
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}
