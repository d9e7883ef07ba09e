//! Catalog administrations resolved to the ITU symbols they may invoke.

mod mapping;

use crate::tables::{self, ImportError};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// Many-to-many mapping from catalog owner codes to ITU administration symbols.
#[derive(Debug, Clone, Default)]
pub struct AdministrationRegistry {
    entries: HashMap<String, BTreeSet<String>>,
}

impl AdministrationRegistry {
    pub fn standard() -> Self {
        let entries = mapping::standard_symbols()
            .iter()
            .map(|(code, symbols)| {
                (
                    (*code).to_string(),
                    symbols.iter().map(|symbol| (*symbol).to_string()).collect(),
                )
            })
            .collect();

        Self { entries }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = tables::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// First column is the catalog code; every later non-empty column is a symbol.
    /// A row without symbols records an explicit "no mapping".
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = tables::reader(reader);
        let mut entries: HashMap<String, BTreeSet<String>> = HashMap::new();

        for record in csv_reader.records() {
            let record = record?;
            let mut fields = record.iter();
            let Some(code) = fields.next().map(normalize_code) else {
                continue;
            };
            if code.is_empty() {
                continue;
            }

            let symbols = entries.entry(code).or_default();
            symbols.extend(
                fields
                    .filter(|symbol| !tables::is_absent(symbol))
                    .map(normalize_code),
            );
        }

        Ok(Self { entries })
    }

    /// Unknown administrations resolve to the empty set.
    pub fn administrations_for(&self, catalog_administration: &str) -> BTreeSet<String> {
        self.entries
            .get(&normalize_code(catalog_administration))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_known(&self, catalog_administration: &str) -> bool {
        self.entries
            .contains_key(&normalize_code(catalog_administration))
    }
}

/// ITU symbol to administration name, used for display only.
#[derive(Debug, Clone, Default)]
pub struct AdministrationNames {
    names: HashMap<String, String>,
}

impl AdministrationNames {
    pub fn standard() -> Self {
        let names = mapping::standard_names()
            .iter()
            .map(|(symbol, name)| ((*symbol).to_string(), (*name).to_string()))
            .collect();
        Self { names }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = tables::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Two columns, symbol then name, no header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut names = HashMap::new();

        for record in csv_reader.records() {
            let record = record?;
            if let (Some(symbol), Some(name)) = (record.get(0), record.get(1)) {
                if !symbol.is_empty() {
                    names.insert(normalize_code(symbol), name.to_string());
                }
            }
        }

        Ok(Self { names })
    }

    pub fn display_name(&self, symbol: &str) -> String {
        self.names
            .get(&normalize_code(symbol))
            .cloned()
            .unwrap_or_else(|| symbol.trim().to_string())
    }
}

fn normalize_code(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}
