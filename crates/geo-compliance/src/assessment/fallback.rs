use super::policy::{neighbor_ambiguity, Verdict, VerdictBasis};
use super::views::AssessmentRecord;
use crate::filings::longitudinal_distance;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Relax "no qualifying filing" verdicts to `Maybe` when no other satellite
/// on the same date sits within `window_deg` with a `Yes` verdict.
///
/// Neighbour verdicts are read from the input, so a record relaxed here never
/// influences another.
pub fn refine(records: &[AssessmentRecord], window_deg: f64) -> Vec<AssessmentRecord> {
    let mut compliant_by_date: HashMap<NaiveDate, Vec<(&str, f64)>> = HashMap::new();
    for record in records {
        if record.verdict != Verdict::Yes {
            continue;
        }
        if let Some(longitude) = record.longitude {
            compliant_by_date
                .entry(record.date)
                .or_default()
                .push((record.catalog_id.as_str(), longitude));
        }
    }

    records
        .iter()
        .map(|record| {
            let Some(longitude) = record.longitude else {
                return record.clone();
            };
            if record.basis != VerdictBasis::NoQualifyingFiling {
                return record.clone();
            }

            let has_compliant_neighbor = compliant_by_date
                .get(&record.date)
                .map(|neighbors| {
                    neighbors.iter().any(|(catalog_id, neighbor)| {
                        *catalog_id != record.catalog_id
                            && longitudinal_distance(longitude, *neighbor) <= window_deg
                    })
                })
                .unwrap_or(false);

            if has_compliant_neighbor {
                return record.clone();
            }

            debug!(
                catalog_id = %record.catalog_id,
                date = %record.date,
                "no compliant neighbour, verdict relaxed"
            );
            AssessmentRecord {
                verdict: Verdict::Maybe,
                basis: VerdictBasis::NeighborAmbiguity,
                explanation: neighbor_ambiguity(window_deg),
                ..record.clone()
            }
        })
        .collect()
}
