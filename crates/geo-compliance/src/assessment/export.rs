use super::views::{AssessmentRecord, ShortlistEntry};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct AssessmentRow<'a> {
    #[serde(rename = "NORAD ID")]
    catalog_id: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Compliance Assessment")]
    verdict: &'static str,
    #[serde(rename = "Note")]
    note: &'a str,
}

#[derive(Serialize)]
struct ShortlistRow<'a> {
    #[serde(rename = "Network Name")]
    network: &'a str,
    #[serde(rename = "Longitude")]
    longitude: &'a str,
    #[serde(rename = "ITU Administration")]
    administration: &'a str,
    #[serde(rename = "Planned or Non-Planned")]
    category: &'a str,
    #[serde(rename = "Filing Stage")]
    filing_stage: &'a str,
    #[serde(rename = "Brought into Use")]
    brought_into_use: &'static str,
    #[serde(rename = "Suspended")]
    suspended: &'a str,
    #[serde(rename = "Due Diligence")]
    due_diligence: &'a str,
    #[serde(rename = "Distance")]
    distance: &'a str,
    #[serde(rename = "Link")]
    link: &'a str,
    #[serde(rename = "Eligible")]
    eligible: &'static str,
}

pub fn write_assessments<'a, I, W>(records: I, writer: W) -> Result<(), csv::Error>
where
    I: IntoIterator<Item = &'a AssessmentRecord>,
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(AssessmentRow {
            catalog_id: &record.catalog_id,
            date: record.date.format("%Y-%m-%d").to_string(),
            longitude: record
                .longitude
                .map(|longitude| longitude.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
            verdict: record.verdict.label(),
            note: &record.explanation,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_shortlist<W: Write>(entries: &[ShortlistEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(ShortlistRow {
            network: &entry.network,
            longitude: &entry.longitude,
            administration: &entry.administration,
            category: &entry.category,
            filing_stage: &entry.filing_stage,
            brought_into_use: yes_no(entry.brought_into_use),
            suspended: &entry.suspended,
            due_diligence: &entry.due_diligence,
            distance: &entry.distance,
            link: &entry.link,
            eligible: yes_no(entry.eligible),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// `nearbyshortlist_<NORAD>_<YYYYMMDD>.csv`
pub fn shortlist_file_name(record: &AssessmentRecord) -> String {
    format!(
        "nearbyshortlist_{}_{}.csv",
        record.catalog_id,
        record.date.format("%Y%m%d")
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
