mod suspensions;

pub use suspensions::SuspensionParseError;

use super::domain::{Filing, FilingCategory};
use super::proximity::normalize_longitude;
use super::FilingTable;
use crate::tables::{self, absent_as_none, ImportError};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Why a single filing row was left out of scoring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilingRecordError {
    #[error("missing network name")]
    MissingName,
    #[error("longitude '{0}' is not a number of degrees")]
    Longitude(String),
    #[error("missing ITU administration")]
    MissingAdministration,
    #[error("unknown network category '{0}'")]
    Category(String),
    #[error("{column} '{value}' is not a YYYY-MM-DD date")]
    Date { column: &'static str, value: String },
    #[error("suspensions '{value}' could not be read: {source}")]
    Suspensions {
        value: String,
        source: SuspensionParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedFiling {
    pub row: usize,
    pub network: String,
    pub reason: String,
}

/// Filing table plus the rows that could not be admitted.
#[derive(Debug, Clone, Default)]
pub struct FilingSnapshot {
    pub table: FilingTable,
    pub rejected: Vec<RejectedFiling>,
}

pub struct FilingImporter;

impl FilingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FilingSnapshot, ImportError> {
        let file = tables::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FilingSnapshot, ImportError> {
        let mut csv_reader = tables::reader(reader);
        let mut filings = Vec::new();
        let mut rejected = Vec::new();

        for (index, record) in csv_reader.deserialize::<FilingRow>().enumerate() {
            let row: FilingRow = record?;
            let row_number = index + 2;

            match row.clone().into_filing() {
                Ok(filing) => filings.push(filing),
                Err(reason) => {
                    warn!(row = row_number, network = %row.name, %reason, "filing excluded from scoring");
                    rejected.push(RejectedFiling {
                        row: row_number,
                        network: row.name,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        let table = FilingTable::new(filings);
        info!(
            filings = table.len(),
            rejected = rejected.len(),
            "filing snapshot loaded"
        );

        Ok(FilingSnapshot { table, rejected })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FilingRow {
    #[serde(rename = "Network Name", default)]
    name: String,
    #[serde(rename = "Previous Name", default, deserialize_with = "absent_as_none")]
    previous_name: Option<String>,
    #[serde(rename = "Longitude", default)]
    longitude: String,
    #[serde(rename = "ITU Administration", default)]
    administration: String,
    #[serde(rename = "Planned or Non-Planned", default)]
    category: String,
    #[serde(
        rename = "Early-Stage Filing Date",
        default,
        deserialize_with = "absent_as_none"
    )]
    early_stage_date: Option<String>,
    #[serde(
        rename = "Late-Stage Filing Date",
        default,
        deserialize_with = "absent_as_none"
    )]
    late_stage_date: Option<String>,
    #[serde(
        rename = "Brought-into-Use Date",
        default,
        deserialize_with = "absent_as_none"
    )]
    brought_into_use_date: Option<String>,
    #[serde(rename = "Suspensions", default, deserialize_with = "absent_as_none")]
    suspensions: Option<String>,
    #[serde(rename = "Link", default)]
    link: String,
}

impl FilingRow {
    fn into_filing(self) -> Result<Filing, FilingRecordError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(FilingRecordError::MissingName);
        }

        let longitude = self
            .longitude
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(normalize_longitude)
            .ok_or_else(|| FilingRecordError::Longitude(self.longitude.clone()))?;

        let administration = self.administration.trim().to_ascii_uppercase();
        if administration.is_empty() {
            return Err(FilingRecordError::MissingAdministration);
        }

        let category = FilingCategory::parse(&self.category)
            .ok_or_else(|| FilingRecordError::Category(self.category.clone()))?;

        let early_stage_date = date_column("Early-Stage Filing Date", self.early_stage_date)?;
        let late_stage_date = date_column("Late-Stage Filing Date", self.late_stage_date)?;
        let brought_into_use_date =
            date_column("Brought-into-Use Date", self.brought_into_use_date)?;

        let suspensions = match self.suspensions {
            Some(value) => suspensions::parse_suspensions(&value)
                .map_err(|source| FilingRecordError::Suspensions { value, source })?,
            None => Vec::new(),
        };

        Ok(Filing {
            name,
            previous_name: self.previous_name.map(|previous| previous.trim().to_string()),
            longitude,
            administration,
            category,
            early_stage_date,
            late_stage_date,
            brought_into_use_date,
            suspensions,
            link: self.link.trim().to_string(),
        })
    }
}

fn date_column(
    column: &'static str,
    value: Option<String>,
) -> Result<Option<chrono::NaiveDate>, FilingRecordError> {
    tables::parse_optional_date(value.as_deref())
        .map_err(|_| FilingRecordError::Date {
            column,
            value: value.unwrap_or_default(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filings::domain::SuspensionKind;
    use chrono::NaiveDate;

    const HEADER: &str = "Network Name,Longitude,ITU Administration,Planned or Non-Planned,Early-Stage Filing Date,Late-Stage Filing Date,Brought-into-Use Date,Suspensions,Link\n";

    #[test]
    fn imports_rows_and_parses_structured_fields() {
        let csv = format!(
            "{HEADER}ALPHA-1,75.05,USA,Planned,2015-01-01,2018-01-01,2019-02-01,\"[('T', '2020-01-01', '2021-01-01')]\",https://example.org/a\n\
BETA,-30.0,F,Non-Planned,n/a,,,,https://example.org/b\n"
        );

        let snapshot = FilingImporter::from_reader(csv.as_bytes()).expect("import succeeds");

        assert!(snapshot.rejected.is_empty());
        assert_eq!(snapshot.table.len(), 2);

        let alpha = snapshot.table.get("ALPHA-1").expect("alpha loaded");
        assert_eq!(alpha.category, FilingCategory::Planned);
        assert_eq!(alpha.brought_into_use_date, NaiveDate::from_ymd_opt(2019, 2, 1));
        assert_eq!(alpha.suspensions.len(), 1);
        assert_eq!(alpha.suspensions[0].kind, SuspensionKind::Total);

        let beta = snapshot.table.get("BETA").expect("beta loaded");
        assert_eq!(beta.category, FilingCategory::NonPlanned);
        assert!(beta.early_stage_date.is_none());
        assert!(beta.suspensions.is_empty());
    }

    #[test]
    fn malformed_rows_are_rejected_without_aborting_the_table() {
        let csv = format!(
            "{HEADER}GOOD,10.0,G,Planned,2010-01-01,,,,\n\
BAD-DATE,10.1,G,Planned,01/02/2010,,,,\n\
BAD-SUSP,10.2,G,Planned,,,,\"[('Q', '2010-01-01', 'n/a')]\",\n\
BAD-LON,east,G,Planned,,,,,\n"
        );

        let snapshot = FilingImporter::from_reader(csv.as_bytes()).expect("import succeeds");

        assert_eq!(snapshot.table.len(), 1);
        assert_eq!(snapshot.rejected.len(), 3);
        let networks: Vec<&str> = snapshot
            .rejected
            .iter()
            .map(|rejected| rejected.network.as_str())
            .collect();
        assert_eq!(networks, vec!["BAD-DATE", "BAD-SUSP", "BAD-LON"]);
        assert_eq!(snapshot.rejected[0].row, 3);
        assert!(snapshot.rejected[0].reason.contains("Early-Stage Filing Date"));
    }

    #[test]
    fn longitudes_are_normalized_on_import() {
        let csv = format!("{HEADER}WRAP,190.0,USA,Planned,,,,,\n");
        let snapshot = FilingImporter::from_reader(csv.as_bytes()).expect("import succeeds");
        let filing = snapshot.table.get("WRAP").expect("loaded");
        assert!((filing.longitude + 170.0).abs() < 1e-9);
    }

    #[test]
    fn previous_name_column_triggers_history_merge() {
        let csv = "Network Name,Previous Name,Longitude,ITU Administration,Planned or Non-Planned,Brought-into-Use Date\n\
OLD-NET,,20.0,D,Non-Planned,1999-01-01\n\
NEW-NET,OLD-NET,20.0,D,Non-Planned,\n";

        let snapshot = FilingImporter::from_reader(csv.as_bytes()).expect("import succeeds");
        assert_eq!(snapshot.table.len(), 1);
        let merged = snapshot.table.get("NEW-NET").expect("successor kept");
        assert_eq!(merged.brought_into_use_date, NaiveDate::from_ymd_opt(1999, 1, 1));
    }
}
