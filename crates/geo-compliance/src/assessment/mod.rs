//! Article 22 eligibility scoring and verdicts for GEO satellites.

mod config;
mod export;
mod fallback;
mod policy;
mod rules;
mod views;

#[cfg(test)]
mod tests;

pub use config::AssessmentConfig;
pub use export::{shortlist_file_name, write_assessments, write_shortlist};
pub use fallback::refine;
pub use policy::{EligibilityResult, ProtectionBasis, Verdict, VerdictBasis};
pub use rules::{CandidateScore, ScoreComponent, ScoreFactor};
pub use views::{
    format_distance, format_longitude, Assessment, AssessmentRecord, BatchReport, ShortlistEntry,
};

use crate::diligence::{DueDiligenceBook, DueDiligenceRecord};
use crate::filings::{normalize_longitude, FilingTable};
use crate::identity::{AdministrationNames, AdministrationRegistry};
use crate::positions::{PositionTable, SatelliteCatalog};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Read-only inputs shared by every evaluation in a run.
#[derive(Debug, Clone, Default)]
pub struct AssessmentSnapshot {
    pub filings: FilingTable,
    pub registry: AdministrationRegistry,
    pub names: AdministrationNames,
    pub catalog: SatelliteCatalog,
    pub evidence: DueDiligenceBook,
}

impl AssessmentSnapshot {
    /// Standard administration tables, no satellites, no evidence.
    pub fn new(filings: FilingTable) -> Self {
        Self {
            filings,
            registry: AdministrationRegistry::standard(),
            names: AdministrationNames::standard(),
            catalog: SatelliteCatalog::default(),
            evidence: DueDiligenceBook::default(),
        }
    }

    pub fn with_registry(mut self, registry: AdministrationRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_names(mut self, names: AdministrationNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_catalog(mut self, catalog: SatelliteCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_evidence(mut self, evidence: DueDiligenceBook) -> Self {
        self.evidence = evidence;
        self
    }
}

/// Outcome of one pure evaluation, with the scored candidates behind it.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    pub result: EligibilityResult,
    pub candidates: Vec<CandidateScore<'a>>,
}

/// Score every filing within the candidate window of `longitude` and reach a verdict.
pub fn evaluate<'a>(
    filings: &'a FilingTable,
    symbols: &BTreeSet<String>,
    records: &[DueDiligenceRecord],
    longitude: f64,
    date: NaiveDate,
    config: &AssessmentConfig,
) -> Evaluation<'a> {
    let nearby = filings.nearby(longitude, config.candidate_window_deg);
    let candidates = rules::score_candidates(&nearby, date, symbols, records, config);

    let best = rules::select_best(&candidates);
    if let Some(best) = best {
        debug!(
            filing = %best.filing.name,
            score = best.score,
            components = ?best.components,
            "candidate selected"
        );
    }
    let result = policy::decide_verdict(best, config);

    Evaluation { result, candidates }
}

/// Stateless evaluator over one snapshot.
pub struct ComplianceAssessor<'a> {
    config: AssessmentConfig,
    snapshot: &'a AssessmentSnapshot,
}

impl<'a> ComplianceAssessor<'a> {
    pub fn new(config: AssessmentConfig, snapshot: &'a AssessmentSnapshot) -> Self {
        Self { config, snapshot }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Evaluate one satellite on one date. No neighbour refinement is applied.
    pub fn assess(&self, catalog_id: &str, date: NaiveDate, longitude: Option<f64>) -> Assessment {
        let Some(longitude) = longitude.and_then(normalize_longitude) else {
            return Assessment {
                record: AssessmentRecord::new(catalog_id, date, None, policy::position_unavailable()),
                shortlist: Vec::new(),
            };
        };

        let symbols = self.symbols_for(catalog_id);
        let records = self.snapshot.evidence.records_for(catalog_id);
        let evaluation = evaluate(
            &self.snapshot.filings,
            &symbols,
            records,
            longitude,
            date,
            &self.config,
        );

        let shortlist = evaluation
            .candidates
            .iter()
            .map(|candidate| ShortlistEntry::from_candidate(candidate, &self.snapshot.names))
            .collect();

        Assessment {
            record: AssessmentRecord::new(catalog_id, date, Some(longitude), evaluation.result),
            shortlist,
        }
    }

    /// Evaluate every (satellite, date) pair, then relax isolated no-filing verdicts per date.
    pub fn assess_batch(&self, positions: &PositionTable) -> BatchReport {
        let assessments: Vec<Assessment> = positions
            .samples()
            .into_iter()
            .map(|sample| self.assess(sample.catalog_id, sample.date, sample.longitude))
            .collect();

        let records: Vec<AssessmentRecord> = assessments
            .iter()
            .map(|assessment| assessment.record.clone())
            .collect();
        let refined = refine(&records, self.config.neighbor_window_deg);

        let report = BatchReport {
            assessments: assessments
                .into_iter()
                .zip(refined)
                .map(|(assessment, record)| Assessment {
                    record,
                    shortlist: assessment.shortlist,
                })
                .collect(),
        };

        info!(
            assessments = report.len(),
            dates = positions.dates().len(),
            yes = report.count(Verdict::Yes),
            no = report.count(Verdict::No),
            maybe = report.count(Verdict::Maybe),
            unavailable = report.count(Verdict::NotAvailable),
            "batch assessment complete"
        );

        report
    }

    fn symbols_for(&self, catalog_id: &str) -> BTreeSet<String> {
        let Some(satellite) = self.snapshot.catalog.get(catalog_id) else {
            warn!(catalog_id, "satellite missing from catalog, no administration to match");
            return BTreeSet::new();
        };

        if !self.snapshot.registry.is_known(&satellite.administration) {
            warn!(
                catalog_id,
                administration = %satellite.administration,
                "administration has no ITU mapping"
            );
        }
        self.snapshot
            .registry
            .administrations_for(&satellite.administration)
    }
}
