use super::policy::{EligibilityResult, ProtectionBasis, Verdict, VerdictBasis};
use super::rules::CandidateScore;
use crate::identity::AdministrationNames;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Final verdict for one satellite on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub catalog_id: String,
    pub date: NaiveDate,
    pub longitude: Option<f64>,
    pub verdict: Verdict,
    pub basis: VerdictBasis,
    pub protection: Option<ProtectionBasis>,
    pub matched_filing: Option<String>,
    pub score: f64,
    pub explanation: String,
}

impl AssessmentRecord {
    pub fn new(
        catalog_id: impl Into<String>,
        date: NaiveDate,
        longitude: Option<f64>,
        result: EligibilityResult,
    ) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            date,
            longitude,
            verdict: result.verdict,
            basis: result.basis,
            protection: result.protection,
            matched_filing: result.matched_filing,
            score: result.score,
            explanation: result.explanation,
        }
    }
}

/// One nearby filing as presented to analysts. Raw symbols and scores stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub network: String,
    pub longitude: String,
    pub administration: String,
    pub category: String,
    pub filing_stage: String,
    pub brought_into_use: bool,
    pub suspended: String,
    pub due_diligence: String,
    pub distance: String,
    pub link: String,
    pub eligible: bool,
}

impl ShortlistEntry {
    pub fn from_candidate(candidate: &CandidateScore<'_>, names: &AdministrationNames) -> Self {
        let filing = candidate.filing;
        Self {
            network: filing.name.clone(),
            longitude: format_longitude(filing.longitude),
            administration: names.display_name(&filing.administration),
            category: filing.category.label().to_string(),
            filing_stage: candidate.status.maturity.label().to_string(),
            brought_into_use: candidate.status.brought_into_use,
            suspended: candidate.status.suspension.label().to_string(),
            due_diligence: candidate.corroboration.label().to_string(),
            distance: format_distance(candidate.distance),
            link: filing.link.clone(),
            eligible: candidate.is_eligible(),
        }
    }
}

/// Verdict plus the candidates that were weighed to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub record: AssessmentRecord,
    pub shortlist: Vec<ShortlistEntry>,
}

/// Every assessment in a run, after neighbour refinement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub assessments: Vec<Assessment>,
}

impl BatchReport {
    pub fn records(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.assessments.iter().map(|assessment| &assessment.record)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.records()
            .filter(|record| record.verdict == verdict)
            .count()
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

pub fn format_distance(distance: f64) -> String {
    format!("{distance:.2}°")
}

/// `75.2°E`, `12.5°W`; zero is reported as east.
pub fn format_longitude(longitude: f64) -> String {
    let hemisphere = if longitude < 0.0 { 'W' } else { 'E' };
    format!("{}°{hemisphere}", longitude.abs())
}
