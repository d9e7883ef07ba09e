use std::path::PathBuf;

use geo_compliance::diligence::{DueDiligenceBook, Corroboration};
use geo_compliance::filings::{FilingImporter, FilingMaturity};
use geo_compliance::identity::AdministrationRegistry;
use geo_compliance::positions::SatelliteCatalog;
use geo_compliance::tables::ImportError;
use chrono::NaiveDate;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[test]
fn importer_merges_renamed_networks_and_reports_rejects() {
    let snapshot = FilingImporter::from_path(fixture("filings.csv")).expect("filings import");

    assert_eq!(snapshot.table.len(), 4);
    assert!(snapshot.table.get("TIANLU-2A").is_none());

    let tianlu = snapshot.table.get("TIANLU-2").expect("successor kept");
    assert_eq!(tianlu.early_stage_date, NaiveDate::from_ymd_opt(2009, 3, 1));
    assert_eq!(tianlu.late_stage_date, NaiveDate::from_ymd_opt(2019, 1, 1));

    let marianne = snapshot.table.get("MARIANNE-3").expect("present");
    assert_eq!(marianne.suspensions.len(), 1);
    assert!(marianne.suspensions[0].end.is_none());

    assert_eq!(snapshot.rejected.len(), 1);
    assert_eq!(snapshot.rejected[0].network, "DRIFTER");
    assert_eq!(snapshot.rejected[0].row, 7);
}

#[test]
fn missing_filing_table_is_an_io_error() {
    let err = FilingImporter::from_path(fixture("does-not-exist.csv")).expect_err("missing file");
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn catalog_and_registry_resolve_owner_codes() {
    let catalog = SatelliteCatalog::from_path(fixture("satellites.csv")).expect("catalog loads");
    let registry = AdministrationRegistry::standard();

    let veteran = catalog.get("43611").expect("present");
    assert!(registry.administrations_for(&veteran.administration).contains("RUS"));

    let unregistered = catalog.get("99001").expect("present");
    assert!(registry.administrations_for(&unregistered.administration).is_empty());
}

#[test]
fn due_diligence_directory_is_read_per_satellite() {
    let book = DueDiligenceBook::from_dir(&fixture("due_diligence"), ["28868", "40258"]);

    let records = book.records_for("28868");
    assert_eq!(records.len(), 2);
    assert_eq!(
        geo_compliance::diligence::corroboration("EAGLE-1", FilingMaturity::LateStage, records, 365),
        Corroboration::Full
    );
    assert_eq!(
        geo_compliance::diligence::corroboration(
            "MARIANNE-3",
            FilingMaturity::LateStage,
            records,
            365
        ),
        Corroboration::None
    );
    assert!(book.records_for("40258").is_empty());
}
