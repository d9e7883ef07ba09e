use crate::infra::{deserialize_optional_date, AppState, VerdictTally};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use geo_compliance::assessment::{
    AssessmentRecord, AssessmentSnapshot, ComplianceAssessor, ShortlistEntry,
};
use geo_compliance::diligence::DueDiligenceBook;
use geo_compliance::error::AppError;
use geo_compliance::filings::{FilingImporter, RejectedFiling};
use geo_compliance::identity::{AdministrationNames, AdministrationRegistry};
use geo_compliance::positions::{PositionTable, SatelliteCatalog};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::Cursor;

/// Inline CSV tables for one assessment run.
#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    pub(crate) filings_csv: String,
    pub(crate) satellites_csv: String,
    pub(crate) positions_csv: String,
    #[serde(default)]
    pub(crate) administrations_csv: Option<String>,
    #[serde(default)]
    pub(crate) administration_names_csv: Option<String>,
    /// NORAD ID to due-diligence CSV text.
    #[serde(default)]
    pub(crate) due_diligence: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) include_shortlists: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessResponse {
    pub(crate) date: NaiveDate,
    pub(crate) tally: VerdictTally,
    pub(crate) records: Vec<AssessmentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) shortlists: Option<Vec<ShortlistView>>,
    pub(crate) rejected_filings: Vec<RejectedFiling>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortlistView {
    pub(crate) catalog_id: String,
    pub(crate) date: NaiveDate,
    pub(crate) entries: Vec<ShortlistEntry>,
}

pub(crate) fn compliance_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/compliance/assess",
            axum::routing::post(assess_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, AppError> {
    let AssessRequest {
        filings_csv,
        satellites_csv,
        positions_csv,
        administrations_csv,
        administration_names_csv,
        due_diligence,
        date,
        include_shortlists,
    } = payload;

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let filings = FilingImporter::from_reader(Cursor::new(filings_csv.into_bytes()))?;
    let catalog = SatelliteCatalog::from_reader(Cursor::new(satellites_csv.into_bytes()))?;
    let positions = PositionTable::from_reader(Cursor::new(positions_csv.into_bytes()), date)?;

    let registry = match administrations_csv {
        Some(csv) => AdministrationRegistry::from_reader(Cursor::new(csv.into_bytes()))?,
        None => AdministrationRegistry::standard(),
    };
    let names = match administration_names_csv {
        Some(csv) => AdministrationNames::from_reader(Cursor::new(csv.into_bytes()))?,
        None => AdministrationNames::standard(),
    };
    let mut evidence = DueDiligenceBook::new();
    for (catalog_id, csv) in &due_diligence {
        evidence.insert_csv(catalog_id.trim(), csv.as_bytes());
    }

    let snapshot = AssessmentSnapshot::new(filings.table)
        .with_registry(registry)
        .with_names(names)
        .with_catalog(catalog)
        .with_evidence(evidence);
    let report =
        ComplianceAssessor::new(state.assessment.as_ref().clone(), &snapshot).assess_batch(&positions);

    let tally = VerdictTally::from_report(&report);
    let mut records = Vec::with_capacity(report.len());
    let mut shortlists = Vec::new();
    for assessment in report.assessments {
        if include_shortlists {
            shortlists.push(ShortlistView {
                catalog_id: assessment.record.catalog_id.clone(),
                date: assessment.record.date,
                entries: assessment.shortlist,
            });
        }
        records.push(assessment.record);
    }

    Ok(Json(AssessResponse {
        date,
        tally,
        records,
        shortlists: include_shortlists.then_some(shortlists),
        rejected_filings: filings.rejected,
    }))
}
