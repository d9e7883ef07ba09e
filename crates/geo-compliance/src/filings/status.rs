use super::domain::{Filing, SuspensionKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingMaturity {
    EarlyStage,
    LateStage,
}

impl FilingMaturity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlyStage => "Early-Stage",
            Self::LateStage => "Late-Stage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionState {
    None,
    Partial,
    Total,
}

impl SuspensionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No",
            Self::Partial => "Partial",
            Self::Total => "Total",
        }
    }
}

impl From<SuspensionKind> for SuspensionState {
    fn from(kind: SuspensionKind) -> Self {
        match kind {
            SuspensionKind::Partial => Self::Partial,
            SuspensionKind::Total => Self::Total,
        }
    }
}

/// Point-in-time view of a filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatus {
    pub maturity: FilingMaturity,
    pub brought_into_use: bool,
    pub suspension: SuspensionState,
    /// A suspension interval started and ended on or before the date.
    pub previously_suspended: bool,
}

pub fn status_at(filing: &Filing, date: NaiveDate) -> FilingStatus {
    let maturity = match filing.late_stage_date {
        Some(late) if late <= date => FilingMaturity::LateStage,
        _ => FilingMaturity::EarlyStage,
    };

    let brought_into_use = filing
        .brought_into_use_date
        .is_some_and(|biu| biu <= date);

    // Newest interval wins even when the input overlaps.
    let suspension = filing
        .suspensions
        .iter()
        .rev()
        .find(|interval| interval.covers(date))
        .map(|interval| SuspensionState::from(interval.kind))
        .unwrap_or(SuspensionState::None);

    let previously_suspended = filing
        .suspensions
        .iter()
        .any(|interval| interval.ended_by(date));

    FilingStatus {
        maturity,
        brought_into_use,
        suspension,
        previously_suspended,
    }
}

/// Networks brought into use before 1982, or before 1987 with advance
/// publication before 1982, keep the legacy 1.0 degree tolerance.
pub fn is_grandfathered(filing: &Filing) -> bool {
    let Some(biu) = filing.brought_into_use_date else {
        return false;
    };

    if biu < cutoff(1982) {
        return true;
    }

    biu < cutoff(1987)
        && filing
            .early_stage_date
            .is_some_and(|early| early < cutoff(1982))
}

fn cutoff(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}
