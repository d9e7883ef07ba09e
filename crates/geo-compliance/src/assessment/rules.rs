use super::config::AssessmentConfig;
use crate::diligence::{corroboration, Corroboration, DueDiligenceRecord};
use crate::filings::{
    is_grandfathered, status_at, Filing, FilingCategory, FilingMaturity, FilingStatus,
    NearbyFiling, SuspensionState,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    AdministrationMatch,
    Proximity,
    LateStage,
    BroughtIntoUse,
    DueDiligence,
    TotalSuspension,
}

/// Discrete contribution to a candidate's score, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// A nearby filing with everything the scorer derived about it.
#[derive(Debug, Clone)]
pub struct CandidateScore<'a> {
    pub filing: &'a Filing,
    pub distance: f64,
    pub status: FilingStatus,
    pub grandfathered: bool,
    pub corroboration: Corroboration,
    pub within_threshold: bool,
    pub administration_match: bool,
    /// Score before the total-suspension veto.
    pub provisional_score: f64,
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

impl CandidateScore<'_> {
    pub fn is_eligible(&self) -> bool {
        self.score > 0.0
    }
}

pub(crate) fn score_candidates<'a>(
    nearby: &[NearbyFiling<'a>],
    date: NaiveDate,
    symbols: &BTreeSet<String>,
    records: &[DueDiligenceRecord],
    config: &AssessmentConfig,
) -> Vec<CandidateScore<'a>> {
    nearby
        .iter()
        .map(|candidate| score_candidate(candidate, date, symbols, records, config))
        .collect()
}

fn score_candidate<'a>(
    candidate: &NearbyFiling<'a>,
    date: NaiveDate,
    symbols: &BTreeSet<String>,
    records: &[DueDiligenceRecord],
    config: &AssessmentConfig,
) -> CandidateScore<'a> {
    let filing = candidate.filing;
    let distance = candidate.distance;
    let status = status_at(filing, date);
    let grandfathered = is_grandfathered(filing);
    let corroboration = corroboration(
        &filing.name,
        status.maturity,
        records,
        config.launch_tolerance_days,
    );

    let within_threshold = within_threshold(filing.category, grandfathered, distance, config);
    let administration_match = symbols.contains(filing.administration.trim());

    let mut components = Vec::new();
    let mut score = 0.0;

    if within_threshold && administration_match {
        components.push(ScoreComponent {
            factor: ScoreFactor::AdministrationMatch,
            points: 1.0,
            notes: format!(
                "held by {} within station-keeping tolerance",
                filing.administration
            ),
        });
        components.push(ScoreComponent {
            factor: ScoreFactor::Proximity,
            points: distance,
            notes: format!("separation {distance:.3} deg"),
        });
        score += 1.0 + distance;

        if status.maturity == FilingMaturity::LateStage {
            components.push(ScoreComponent {
                factor: ScoreFactor::LateStage,
                points: 1.0,
                notes: "late-stage filing on record".to_string(),
            });
            score += 1.0;
        }

        if status.brought_into_use {
            components.push(ScoreComponent {
                factor: ScoreFactor::BroughtIntoUse,
                points: 1.0,
                notes: "brought into use".to_string(),
            });
            score += 1.0;

            let bonus = match corroboration {
                Corroboration::Full => 2.0,
                Corroboration::Partial => 1.0,
                Corroboration::None | Corroboration::NotApplicable => 0.0,
            };
            if bonus > 0.0 {
                components.push(ScoreComponent {
                    factor: ScoreFactor::DueDiligence,
                    points: bonus,
                    notes: format!("{} due-diligence match", corroboration.label()),
                });
                score += bonus;
            }
        }
    }

    let provisional_score = score;
    if status.suspension == SuspensionState::Total {
        if provisional_score > 0.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::TotalSuspension,
                points: -provisional_score,
                notes: "totally suspended on the evaluation date".to_string(),
            });
        }
        score = 0.0;
    }

    CandidateScore {
        filing,
        distance,
        status,
        grandfathered,
        corroboration,
        within_threshold,
        administration_match,
        provisional_score,
        score,
        components,
    }
}

fn within_threshold(
    category: FilingCategory,
    grandfathered: bool,
    distance: f64,
    config: &AssessmentConfig,
) -> bool {
    let category_threshold = match category {
        FilingCategory::Planned => config.planned_threshold_deg,
        FilingCategory::NonPlanned => config.non_planned_threshold_deg,
    };

    distance <= category_threshold
        || (grandfathered && distance <= config.grandfathered_threshold_deg)
}

/// Highest score wins; ties go to the earliest candidate, which is the
/// closest (then alphabetical) filing. Nothing is selected at zero.
pub(crate) fn select_best<'s, 'a>(
    candidates: &'s [CandidateScore<'a>],
) -> Option<&'s CandidateScore<'a>> {
    let mut best: Option<&CandidateScore<'a>> = None;
    for candidate in candidates {
        if candidate.score <= 0.0 {
            continue;
        }
        match best {
            Some(current) if current.score >= candidate.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}
