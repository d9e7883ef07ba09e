use chrono::NaiveDate;
use geo_compliance::assessment::AssessmentConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) assessment: Arc<AssessmentConfig>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Counts per verdict, in the order analysts read them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub(crate) struct VerdictTally {
    pub(crate) yes: usize,
    pub(crate) no: usize,
    pub(crate) maybe: usize,
    pub(crate) unavailable: usize,
}

impl VerdictTally {
    pub(crate) fn from_report(report: &geo_compliance::BatchReport) -> Self {
        use geo_compliance::Verdict;

        Self {
            yes: report.count(Verdict::Yes),
            no: report.count(Verdict::No),
            maybe: report.count(Verdict::Maybe),
            unavailable: report.count(Verdict::NotAvailable),
        }
    }
}
