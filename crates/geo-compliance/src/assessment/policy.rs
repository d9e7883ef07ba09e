use super::config::AssessmentConfig;
use super::rules::CandidateScore;
use crate::filings::{FilingCategory, FilingMaturity, SuspensionState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance verdict for one satellite on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    No,
    Maybe,
    #[serde(rename = "n/a")]
    NotAvailable,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Yes => "Yes",
            Verdict::No => "No",
            Verdict::Maybe => "Maybe",
            Verdict::NotAvailable => "n/a",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which branch of the decision produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictBasis {
    Protected,
    AwaitingBringingIntoUse,
    EarlyStageFilings,
    NoQualifyingFiling,
    NeighborAmbiguity,
    PositionUnavailable,
}

/// Article 22 protection regime a filing falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionBasis {
    Planned,
    NonPlanned,
    Grandfathered,
}

impl ProtectionBasis {
    /// Grandfathering takes precedence over the filing's own category once the
    /// network is in use; before that the category regime applies.
    pub fn for_filing(
        category: FilingCategory,
        grandfathered: bool,
        brought_into_use: bool,
    ) -> Self {
        if grandfathered && brought_into_use {
            return ProtectionBasis::Grandfathered;
        }
        match category {
            FilingCategory::Planned => ProtectionBasis::Planned,
            FilingCategory::NonPlanned => ProtectionBasis::NonPlanned,
        }
    }

    pub fn threshold_deg(self, config: &AssessmentConfig) -> f64 {
        match self {
            ProtectionBasis::Planned => config.planned_threshold_deg,
            ProtectionBasis::NonPlanned => config.non_planned_threshold_deg,
            ProtectionBasis::Grandfathered => config.grandfathered_threshold_deg,
        }
    }

    pub const fn clauses(self) -> &'static str {
        match self {
            ProtectionBasis::Planned => "22.6 to 22.8",
            ProtectionBasis::NonPlanned => "22.11 to 22.13",
            ProtectionBasis::Grandfathered => "22.15 to 22.17",
        }
    }

    fn subject(self, config: &AssessmentConfig) -> String {
        let threshold = self.threshold_deg(config);
        match self {
            ProtectionBasis::Planned => format!(
                "planned space network with a nominal orbital position within {threshold:.1} degrees"
            ),
            ProtectionBasis::NonPlanned => format!(
                "non-planned space network with a nominal orbital position within {threshold:.1} degrees"
            ),
            ProtectionBasis::Grandfathered => format!(
                "space network with a nominal orbital position within {threshold:.1} degrees that was \
                 brought into use before January 1, 1987, with the advance publication information \
                 received before January 1, 1982,"
            ),
        }
    }
}

/// Decision reached for one (satellite, date) pair before neighbour refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub verdict: Verdict,
    pub basis: VerdictBasis,
    pub protection: Option<ProtectionBasis>,
    pub matched_filing: Option<String>,
    pub score: f64,
    pub explanation: String,
}

pub(crate) const POSITION_UNAVAILABLE: &str = "No longitudinal position available for this date.";

const NO_QUALIFYING_FILING: &str = "There are no space networks within station-keeping \
requirements for which any filings have been submitted by a corresponding ITU administration.";

pub(crate) fn position_unavailable() -> EligibilityResult {
    EligibilityResult {
        verdict: Verdict::NotAvailable,
        basis: VerdictBasis::PositionUnavailable,
        protection: None,
        matched_filing: None,
        score: 0.0,
        explanation: POSITION_UNAVAILABLE.to_string(),
    }
}

/// Map the selected candidate (or its absence) to a verdict and explanation.
/// A totally suspended filing scores zero and is never selected, so it falls
/// through to the no-filing verdict.
pub(crate) fn decide_verdict(
    best: Option<&CandidateScore<'_>>,
    config: &AssessmentConfig,
) -> EligibilityResult {
    let Some(best) = best else {
        return EligibilityResult {
            verdict: Verdict::No,
            basis: VerdictBasis::NoQualifyingFiling,
            protection: None,
            matched_filing: None,
            score: 0.0,
            explanation: NO_QUALIFYING_FILING.to_string(),
        };
    };

    let protection = ProtectionBasis::for_filing(
        best.filing.category,
        best.grandfathered,
        best.status.brought_into_use,
    );
    let subject = protection.subject(config);
    let citation = format!(
        "ITU Radio Regulations Article 22, Section III ({})",
        protection.clauses()
    );

    let (verdict, basis, explanation) = if best.status.brought_into_use {
        let mut explanation = format!(
            "There exists a {subject} that was brought into use before the date of assessment, \
             complying with {citation}."
        );
        match best.status.suspension {
            SuspensionState::Partial => explanation.push_str(
                " As of the date of assessment, the identified network is partially suspended.",
            ),
            SuspensionState::None if best.status.previously_suspended => explanation.push_str(
                " The identified network was previously suspended, but has since resumed operation.",
            ),
            _ => {}
        }
        (Verdict::Yes, VerdictBasis::Protected, explanation)
    } else if best.status.maturity == FilingMaturity::LateStage {
        (
            Verdict::No,
            VerdictBasis::AwaitingBringingIntoUse,
            format!(
                "There exists a {subject} held by a corresponding ITU administration that is \
                 eligible for bringing into use, but the corresponding ITU administration has not \
                 yet done so. Protection would follow {citation}."
            ),
        )
    } else {
        (
            Verdict::No,
            VerdictBasis::EarlyStageFilings,
            format!(
                "There exists a {subject} held by a corresponding ITU administration, but its \
                 filings are in their early stages: this satellite is not protected from harmful \
                 interference. Protection would follow {citation}."
            ),
        )
    };

    EligibilityResult {
        verdict,
        basis,
        protection: Some(protection),
        matched_filing: Some(best.filing.name.clone()),
        score: best.score,
        explanation,
    }
}

/// Note attached when a no-filing verdict is relaxed because no neighbour is compliant.
pub(crate) fn neighbor_ambiguity(window_deg: f64) -> String {
    format!(
        "Although there are no space networks within station-keeping requirements for which any \
         filings have been submitted by a corresponding ITU administration, there are also no other \
         compliant satellites within {window_deg:.1} degrees, meaning this satellite could be in \
         compliance with ITU Radio Regulations Article 22, Section III: 22.10 or 22.14."
    )
}
