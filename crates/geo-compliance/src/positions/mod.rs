//! Evaluation subjects: the satellite catalog and per-date longitudes.

use crate::filings::normalize_longitude;
use crate::tables::{self, ImportError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Satellite {
    pub catalog_id: String,
    pub name: Option<String>,
    /// Launch-registry owner code, resolved through the administration registry.
    pub administration: String,
}

#[derive(Debug, Clone, Default)]
pub struct SatelliteCatalog {
    satellites: HashMap<String, Satellite>,
}

impl SatelliteCatalog {
    pub fn new<I: IntoIterator<Item = Satellite>>(satellites: I) -> Self {
        Self {
            satellites: satellites
                .into_iter()
                .map(|satellite| (satellite.catalog_id.clone(), satellite))
                .collect(),
        }
    }

    pub fn get(&self, catalog_id: &str) -> Option<&Satellite> {
        self.satellites.get(catalog_id.trim())
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = tables::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let mut csv_reader = tables::reader(reader);
        let mut satellites = Vec::new();

        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            let catalog_id = row.catalog_id.trim().to_string();
            if catalog_id.is_empty() {
                continue;
            }
            satellites.push(Satellite {
                catalog_id,
                name: row.name.map(|name| name.trim().to_string()),
                administration: row.administration.trim().to_string(),
            });
        }

        Ok(Self::new(satellites))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "NORAD ID")]
    catalog_id: String,
    #[serde(rename = "Satellite Name", default, deserialize_with = "tables::absent_as_none")]
    name: Option<String>,
    #[serde(rename = "Administration", default)]
    administration: String,
}

/// Longitudes per evaluation date; `None` marks an unavailable position.
#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    satellites: Vec<String>,
    dates: Vec<NaiveDate>,
    longitudes: HashMap<(NaiveDate, String), Option<f64>>,
}

/// One (satellite, date) pair to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample<'a> {
    pub catalog_id: &'a str,
    pub date: NaiveDate,
    pub longitude: Option<f64>,
}

impl PositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, catalog_id: &str, date: NaiveDate, longitude: Option<f64>) {
        let catalog_id = catalog_id.trim().to_string();
        if !self.satellites.contains(&catalog_id) {
            self.satellites.push(catalog_id.clone());
        }
        if let Err(position) = self.dates.binary_search(&date) {
            self.dates.insert(position, date);
        }
        self.longitudes
            .insert((date, catalog_id), longitude.and_then(normalize_longitude));
    }

    pub fn satellites(&self) -> &[String] {
        &self.satellites
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn longitude(&self, catalog_id: &str, date: NaiveDate) -> Option<f64> {
        self.longitudes
            .get(&(date, catalog_id.to_string()))
            .copied()
            .flatten()
    }

    /// Every (satellite, date) pair, dates ascending then satellites in input order.
    pub fn samples(&self) -> Vec<PositionSample<'_>> {
        self.dates
            .iter()
            .flat_map(|date| {
                self.satellites.iter().map(move |catalog_id| PositionSample {
                    catalog_id: catalog_id.as_str(),
                    date: *date,
                    longitude: self.longitude(catalog_id, *date),
                })
            })
            .collect()
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        default_date: NaiveDate,
    ) -> Result<Self, ImportError> {
        let file = tables::open(path.as_ref())?;
        Self::from_reader(file, default_date)
    }

    /// Accepts the daily layout (`NORAD ID`, `Longitude`, evaluated on
    /// `default_date`) or the historical layout (`Date` followed by one column
    /// per catalog id).
    pub fn from_reader<R: Read>(reader: R, default_date: NaiveDate) -> Result<Self, ImportError> {
        let mut csv_reader = tables::reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut table = Self::new();

        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        };

        if let Some(date_column) = column("Date") {
            for record in csv_reader.records() {
                let record = record?;
                let Some(raw_date) = record.get(date_column) else {
                    continue;
                };
                let date = match tables::parse_date(raw_date) {
                    Ok(date) => date,
                    Err(err) => {
                        warn!(%err, "position row with unreadable date skipped");
                        continue;
                    }
                };
                for (index, catalog_id) in headers.iter().enumerate() {
                    if index == date_column {
                        continue;
                    }
                    let longitude = parse_longitude(catalog_id, record.get(index).unwrap_or(""));
                    table.record(catalog_id, date, longitude);
                }
            }
            return Ok(table);
        }

        let id_column = column("NORAD ID").ok_or(ImportError::MissingColumn {
            table: "positions",
            column: "NORAD ID",
        })?;
        let longitude_column = column("Longitude").ok_or(ImportError::MissingColumn {
            table: "positions",
            column: "Longitude",
        })?;

        for record in csv_reader.records() {
            let record = record?;
            let catalog_id = record.get(id_column).unwrap_or("").trim();
            if catalog_id.is_empty() {
                continue;
            }
            let longitude = parse_longitude(catalog_id, record.get(longitude_column).unwrap_or(""));
            table.record(catalog_id, default_date, longitude);
        }

        Ok(table)
    }
}

fn parse_longitude(catalog_id: &str, raw: &str) -> Option<f64> {
    if tables::is_absent(raw) {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(catalog_id, value = raw, "unreadable longitude treated as unavailable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn daily_layout_uses_the_supplied_date() {
        let csv = "NORAD ID,Longitude\n28868,75.0\n40258,n/a\n41036,-0.5\n";
        let table = PositionTable::from_reader(csv.as_bytes(), date(2023, 8, 8)).expect("parses");

        assert_eq!(table.dates(), &[date(2023, 8, 8)]);
        assert_eq!(table.satellites().len(), 3);
        assert_eq!(table.longitude("28868", date(2023, 8, 8)), Some(75.0));
        assert_eq!(table.longitude("40258", date(2023, 8, 8)), None);
        assert_eq!(table.samples().len(), 3);
    }

    #[test]
    fn historical_layout_spreads_columns_into_samples() {
        let csv = "Date,28868,40258\n2021-01-02,75.0,\n2021-01-01,75.1,nan\n";
        let table = PositionTable::from_reader(csv.as_bytes(), date(2000, 1, 1)).expect("parses");

        assert_eq!(table.dates(), &[date(2021, 1, 1), date(2021, 1, 2)]);
        let samples = table.samples();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].catalog_id, "28868");
        assert_eq!(samples[0].date, date(2021, 1, 1));
        assert_eq!(samples[0].longitude, Some(75.1));
        assert_eq!(samples[1].longitude, None);
    }

    #[test]
    fn historical_rows_with_unreadable_dates_are_skipped() {
        let csv = "Date,28868\n2021-01-01,75.0\nyesterday,75.1\n2021-01-03,75.2\n";
        let table = PositionTable::from_reader(csv.as_bytes(), date(2000, 1, 1)).expect("parses");

        assert_eq!(table.dates(), &[date(2021, 1, 1), date(2021, 1, 3)]);
        assert_eq!(table.longitude("28868", date(2021, 1, 3)), Some(75.2));
        assert_eq!(table.samples().len(), 2);
    }

    #[test]
    fn unreadable_longitude_becomes_unavailable() {
        let csv = "NORAD ID,Longitude\n28868,east\n";
        let table = PositionTable::from_reader(csv.as_bytes(), date(2023, 8, 8)).expect("parses");
        assert_eq!(table.longitude("28868", date(2023, 8, 8)), None);
        assert_eq!(table.samples().len(), 1);
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = PositionTable::from_reader("Satellite,Lon\n1,2\n".as_bytes(), date(2023, 8, 8))
            .expect_err("layout rejected");
        assert!(matches!(err, ImportError::MissingColumn { column: "NORAD ID", .. }));
    }

    #[test]
    fn catalog_reads_owner_codes() {
        let csv = "NORAD ID,Satellite Name,Administration\n28868,ANIK F1R,CA\n40258,,US\n";
        let catalog = SatelliteCatalog::from_reader(csv.as_bytes()).expect("parses");

        assert_eq!(catalog.len(), 2);
        let anik = catalog.get("28868").expect("present");
        assert_eq!(anik.administration, "CA");
        assert_eq!(anik.name.as_deref(), Some("ANIK F1R"));
        assert!(catalog.get("40258").expect("present").name.is_none());
    }
}
