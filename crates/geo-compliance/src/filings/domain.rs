use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Regulatory regime the network was filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingCategory {
    Planned,
    NonPlanned,
}

impl FilingCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::NonPlanned => "Non-Planned",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" | "p" => Some(Self::Planned),
            "non-planned" | "nonplanned" | "non planned" | "unplanned" => Some(Self::NonPlanned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuspensionKind {
    Partial,
    Total,
}

/// A lapse in the filing's active status. `end` absent means still suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionInterval {
    pub kind: SuspensionKind,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl SuspensionInterval {
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date < end)
    }

    pub fn ended_by(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.is_some_and(|end| end <= date)
    }
}

/// One network entry from the ITU space network list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    pub name: String,
    pub previous_name: Option<String>,
    /// Nominal orbital position in degrees, normalized into (-180, 180].
    pub longitude: f64,
    pub administration: String,
    pub category: FilingCategory,
    pub early_stage_date: Option<NaiveDate>,
    pub late_stage_date: Option<NaiveDate>,
    pub brought_into_use_date: Option<NaiveDate>,
    /// Oldest first; the status resolver walks them newest first.
    pub suspensions: Vec<SuspensionInterval>,
    pub link: String,
}
