use chrono::NaiveDate;

use crate::assessment::{AssessmentConfig, AssessmentSnapshot, ComplianceAssessor};
use crate::diligence::{DueDiligenceBook, DueDiligenceRecord};
use crate::filings::{Filing, FilingCategory, FilingTable, SuspensionInterval, SuspensionKind};
use crate::positions::{Satellite, SatelliteCatalog};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn assessment_date() -> NaiveDate {
    date(2023, 8, 8)
}

/// Early-stage filing with no later milestones.
pub(super) fn filing(
    name: &str,
    longitude: f64,
    administration: &str,
    category: FilingCategory,
) -> Filing {
    Filing {
        name: name.to_string(),
        previous_name: None,
        longitude,
        administration: administration.to_string(),
        category,
        early_stage_date: Some(date(2015, 3, 1)),
        late_stage_date: None,
        brought_into_use_date: None,
        suspensions: Vec::new(),
        link: format!("https://www.itu.int/ITU-R/space/snl/{name}"),
    }
}

pub(super) fn late_stage(mut filing: Filing, on: NaiveDate) -> Filing {
    filing.late_stage_date = Some(on);
    filing
}

pub(super) fn in_use(mut filing: Filing, on: NaiveDate) -> Filing {
    if filing.late_stage_date.is_none() {
        filing.late_stage_date = Some(on);
    }
    filing.brought_into_use_date = Some(on);
    filing
}

pub(super) fn suspended(
    mut filing: Filing,
    kind: SuspensionKind,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Filing {
    filing.suspensions.push(SuspensionInterval { kind, start, end });
    filing
}

pub(super) fn satellite(catalog_id: &str, administration: &str) -> Satellite {
    Satellite {
        catalog_id: catalog_id.to_string(),
        name: None,
        administration: administration.to_string(),
    }
}

pub(super) fn evidence(name: &str, offset: i64, flags: [bool; 4]) -> DueDiligenceRecord {
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

pub(super) fn snapshot(filings: Vec<Filing>, satellites: Vec<Satellite>) -> AssessmentSnapshot {
    AssessmentSnapshot::new(FilingTable::new(filings)).with_catalog(SatelliteCatalog::new(satellites))
}

pub(super) fn snapshot_with_evidence(
    filings: Vec<Filing>,
    satellites: Vec<Satellite>,
    catalog_id: &str,
    records: Vec<DueDiligenceRecord>,
) -> AssessmentSnapshot {
    let mut book = DueDiligenceBook::new();
    book.insert(catalog_id, records);
    snapshot(filings, satellites).with_evidence(book)
}

pub(super) fn assessor(snapshot: &AssessmentSnapshot) -> ComplianceAssessor<'_> {
    ComplianceAssessor::new(AssessmentConfig::default(), snapshot)
}
