use crate::diligence::DEFAULT_LAUNCH_TOLERANCE_DAYS;
use serde::{Deserialize, Serialize};

/// Station-keeping thresholds and search windows, in degrees of longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub candidate_window_deg: f64,
    pub planned_threshold_deg: f64,
    pub non_planned_threshold_deg: f64,
    pub grandfathered_threshold_deg: f64,
    pub neighbor_window_deg: f64,
    pub launch_tolerance_days: i64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            candidate_window_deg: 1.0,
            planned_threshold_deg: 0.1,
            non_planned_threshold_deg: 0.5,
            grandfathered_threshold_deg: 1.0,
            neighbor_window_deg: 0.5,
            launch_tolerance_days: DEFAULT_LAUNCH_TOLERANCE_DAYS,
        }
    }
}
