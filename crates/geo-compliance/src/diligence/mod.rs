//! Due-diligence evidence linking a satellite to the filings near it.

use crate::filings::FilingMaturity;
use crate::tables::{self, ImportError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub const DEFAULT_LAUNCH_TOLERANCE_DAYS: i64 = 365;

/// One row of per-satellite evidence against a candidate filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDiligenceRecord {
    pub filing_name: String,
    pub country_match: bool,
    /// Days between the filing date and launch; blank or unreadable is no match.
    pub launch_offset_days: Option<i64>,
    pub spaceport_match: bool,
    pub vehicle_match: bool,
    pub manufacturer_match: bool,
}

/// Ordered so that `max` picks the strongest evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corroboration {
    NotApplicable,
    None,
    Partial,
    Full,
}

impl Corroboration {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotApplicable => "n/a",
            Self::None => "None",
            Self::Partial => "Partial",
            Self::Full => "Full",
        }
    }
}

/// Late-stage filings start from a non-match; earlier ones are not scored
/// unless evidence turns up.
pub fn corroboration(
    filing_name: &str,
    maturity: FilingMaturity,
    records: &[DueDiligenceRecord],
    launch_tolerance_days: i64,
) -> Corroboration {
    let baseline = match maturity {
        FilingMaturity::LateStage => Corroboration::None,
        FilingMaturity::EarlyStage => Corroboration::NotApplicable,
    };

    records
        .iter()
        .filter(|record| record.filing_name == filing_name && record.country_match)
        .map(|record| match record.match_count(launch_tolerance_days) {
            4 => Corroboration::Full,
            1..=3 => Corroboration::Partial,
            _ => baseline,
        })
        .fold(baseline, Corroboration::max)
}

impl DueDiligenceRecord {
    fn match_count(&self, launch_tolerance_days: i64) -> u8 {
        let launch_date_match = self
            .launch_offset_days
            .is_some_and(|offset| offset <= launch_tolerance_days);
        [
            launch_date_match,
            self.spaceport_match,
            self.vehicle_match,
            self.manufacturer_match,
        ]
        .into_iter()
        .filter(|matched| *matched)
        .count() as u8
    }
}

/// Evidence rows for every satellite in the run, keyed by catalog id.
#[derive(Debug, Clone, Default)]
pub struct DueDiligenceBook {
    records: HashMap<String, Vec<DueDiligenceRecord>>,
}

impl DueDiligenceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, catalog_id: impl Into<String>, records: Vec<DueDiligenceRecord>) {
        self.records.insert(catalog_id.into(), records);
    }

    /// Satellites without evidence get an empty slice.
    pub fn records_for(&self, catalog_id: &str) -> &[DueDiligenceRecord] {
        self.records
            .get(catalog_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Read `<dir>/<catalog id>.csv` for each id. Missing or unreadable files
    /// leave that satellite without evidence.
    pub fn from_dir<'a, I>(dir: &Path, catalog_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut book = Self::new();
        for catalog_id in catalog_ids {
            let path = dir.join(format!("{catalog_id}.csv"));
            if !path.is_file() {
                debug!(catalog_id, path = %path.display(), "no due-diligence evidence on file");
                continue;
            }

            match tables::open(&path).and_then(parse_records) {
                Ok(records) => book.insert(catalog_id, records),
                Err(err) => {
                    warn!(catalog_id, %err, "due-diligence evidence unreadable, treating as empty")
                }
            }
        }
        book
    }

    /// Parse one satellite's table; on failure the satellite simply has no evidence.
    pub fn insert_csv<R: Read>(&mut self, catalog_id: &str, reader: R) {
        match parse_records(reader) {
            Ok(records) => self.insert(catalog_id, records),
            Err(err) => {
                warn!(catalog_id, %err, "due-diligence evidence unreadable, treating as empty")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DueDiligenceRow {
    #[serde(rename = "Satellite Name")]
    filing_name: String,
    #[serde(rename = "Launch Country Match", default)]
    country_match: String,
    #[serde(rename = "Launch Offset (days)", default)]
    launch_offset_days: String,
    #[serde(rename = "Launch Spaceport Match", default)]
    spaceport_match: String,
    #[serde(rename = "Launch Vehicle Match", default)]
    vehicle_match: String,
    #[serde(rename = "Satellite Manufacturer Match", default)]
    manufacturer_match: String,
}

pub fn parse_records<R: Read>(reader: R) -> Result<Vec<DueDiligenceRecord>, ImportError> {
    let mut csv_reader = tables::reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<DueDiligenceRow>() {
        let row = row?;
        let launch_offset_days = parse_offset(&row.launch_offset_days);
        if launch_offset_days.is_none() {
            debug!(filing = %row.filing_name, "due-diligence row has no usable launch offset");
        }

        records.push(DueDiligenceRecord {
            filing_name: row.filing_name.trim().to_string(),
            country_match: flag(&row.country_match),
            launch_offset_days,
            spaceport_match: flag(&row.spaceport_match),
            vehicle_match: flag(&row.vehicle_match),
            manufacturer_match: flag(&row.manufacturer_match),
        });
    }

    Ok(records)
}

fn parse_offset(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value.round() as i64)
        })
}

fn flag(raw: &str) -> bool {
    tables::parse_flag(raw).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, offset: i64, flags: [bool; 4]) -> DueDiligenceRecord {
        let [country, spaceport, vehicle, manufacturer] = flags;
        DueDiligenceRecord {
            filing_name: name.to_string(),
            country_match: country,
            launch_offset_days: Some(offset),
            spaceport_match: spaceport,
            vehicle_match: vehicle,
            manufacturer_match: manufacturer,
        }
    }

    #[test]
    fn full_match_requires_all_four_characteristics() {
        let records = vec![record("ALPHA-1", 120, [true, true, true, true])];
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::LateStage, &records, 365),
            Corroboration::Full
        );
    }

    #[test]
    fn late_launch_alone_downgrades_to_partial() {
        let records = vec![record("ALPHA-1", 400, [true, true, true, true])];
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::LateStage, &records, 365),
            Corroboration::Partial
        );
    }

    #[test]
    fn country_mismatch_never_corroborates() {
        let records = vec![record("ALPHA-1", 10, [false, true, true, true])];
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::LateStage, &records, 365),
            Corroboration::None
        );
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::EarlyStage, &records, 365),
            Corroboration::NotApplicable
        );
    }

    #[test]
    fn zero_matches_keep_the_baseline() {
        let records = vec![record("ALPHA-1", 900, [true, false, false, false])];
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::LateStage, &records, 365),
            Corroboration::None
        );
    }

    #[test]
    fn strongest_record_wins_regardless_of_order() {
        let records = vec![
            record("ALPHA-1", 10, [true, true, true, true]),
            record("ALPHA-1", 900, [true, true, false, false]),
            record("OTHER", 10, [true, true, true, true]),
        ];
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::EarlyStage, &records, 365),
            Corroboration::Full
        );
        assert_eq!(
            corroboration("BETA", FilingMaturity::EarlyStage, &records, 365),
            Corroboration::NotApplicable
        );
    }

    #[test]
    fn parses_evidence_table_with_numeric_flags() {
        let csv = "Satellite Name,Launch Country Match,Launch Offset (days),Launch Spaceport Match,Launch Vehicle Match,Satellite Manufacturer Match\n\
ALPHA-1,1,42,1,0,1\n\
BETA,0,12.0,True,False,no\n\
GAMMA,1,,1,1,1\n";

        let records = parse_records(csv.as_bytes()).expect("table parses");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], record("ALPHA-1", 42, [true, true, false, true]));
        assert_eq!(records[1], record("BETA", 12, [false, true, false, false]));
        assert_eq!(records[2].filing_name, "GAMMA");
        assert_eq!(records[2].launch_offset_days, None);
    }

    #[test]
    fn blank_launch_offset_still_counts_the_other_matches() {
        let csv = "Satellite Name,Launch Country Match,Launch Offset (days),Launch Spaceport Match,Launch Vehicle Match,Satellite Manufacturer Match\n\
ALPHA-1,1,,1,1,1\n\
ALPHA-1,1,soon,0,0,0\n";

        let records = parse_records(csv.as_bytes()).expect("table parses");

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.launch_offset_days.is_none()));
        assert_eq!(
            corroboration("ALPHA-1", FilingMaturity::LateStage, &records, 365),
            Corroboration::Partial
        );
    }

    #[test]
    fn book_returns_empty_slice_for_unknown_satellites() {
        let mut book = DueDiligenceBook::new();
        book.insert_csv("12345", "not,a,valid\nheader,row,here\n".as_bytes());
        assert!(book.records_for("12345").is_empty());
        assert!(book.records_for("99999").is_empty());
    }
}
