use super::common::*;
use crate::assessment::{refine, Verdict, VerdictBasis};
use crate::filings::{FilingCategory, SuspensionKind};
use crate::positions::PositionTable;

fn positions(entries: &[(&str, Option<f64>)]) -> PositionTable {
    let mut table = PositionTable::new();
    for (catalog_id, longitude) in entries {
        table.record(catalog_id, assessment_date(), *longitude);
    }
    table
}

fn compliant_snapshot() -> crate::assessment::AssessmentSnapshot {
    snapshot(
        vec![in_use(
            filing("EAGLE-1", 75.0, "USA", FilingCategory::Planned),
            date(2005, 1, 1),
        )],
        vec![
            satellite("10001", "US"),
            satellite("10002", "PRC"),
            satellite("10003", "PRC"),
        ],
    )
}

#[test]
fn isolated_satellite_without_filings_becomes_maybe() {
    let snapshot = compliant_snapshot();
    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10001", Some(75.0)),
        ("10003", Some(-20.0)),
    ]));

    let isolated = &report.assessments[1].record;
    assert_eq!(isolated.catalog_id, "10003");
    assert_eq!(isolated.verdict, Verdict::Maybe);
    assert_eq!(isolated.basis, VerdictBasis::NeighborAmbiguity);
    assert!(isolated.explanation.contains("22.10 or 22.14"));
    assert!(isolated.explanation.contains("within 0.5 degrees"));
}

#[test]
fn compliant_neighbor_keeps_the_no_verdict() {
    let snapshot = compliant_snapshot();
    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10001", Some(75.0)),
        ("10002", Some(75.3)),
    ]));

    assert_eq!(report.assessments[0].record.verdict, Verdict::Yes);
    let crowded = &report.assessments[1].record;
    assert_eq!(crowded.verdict, Verdict::No);
    assert_eq!(crowded.basis, VerdictBasis::NoQualifyingFiling);
}

#[test]
fn neighbor_distance_wraps_across_the_antimeridian() {
    let snapshot = snapshot(
        vec![in_use(
            filing("DATELINE", 179.9, "USA", FilingCategory::Planned),
            date(2005, 1, 1),
        )],
        vec![satellite("10001", "US"), satellite("10002", "PRC")],
    );

    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10001", Some(179.9)),
        ("10002", Some(-179.8)),
    ]));

    assert_eq!(report.assessments[0].record.verdict, Verdict::Yes);
    assert_eq!(report.assessments[1].record.verdict, Verdict::No);
}

#[test]
fn fallback_relaxes_only_unmatched_records() {
    let snapshot = snapshot(
        vec![
            filing("EARLY", -20.0, "CHN", FilingCategory::NonPlanned),
            suspended(
                in_use(filing("DARK", 40.0, "CHN", FilingCategory::Planned), date(2001, 1, 1)),
                SuspensionKind::Total,
                date(2020, 1, 1),
                None,
            ),
        ],
        vec![satellite("10002", "PRC"), satellite("10003", "PRC")],
    );

    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10002", Some(-20.0)),
        ("10003", Some(40.0)),
        ("10004", None),
    ]));

    let verdicts: Vec<_> = report
        .records()
        .map(|record| (record.verdict, record.basis))
        .collect();
    assert_eq!(
        verdicts,
        vec![
            (Verdict::No, VerdictBasis::EarlyStageFilings),
            (Verdict::Maybe, VerdictBasis::NeighborAmbiguity),
            (Verdict::NotAvailable, VerdictBasis::PositionUnavailable),
        ]
    );
}

#[test]
fn isolated_totally_suspended_network_becomes_maybe() {
    let snapshot = snapshot(
        vec![suspended(
            in_use(
                filing("ALPHA-1", 75.05, "USA", FilingCategory::Planned),
                date(2012, 1, 1),
            ),
            SuspensionKind::Total,
            date(2022, 1, 1),
            None,
        )],
        vec![satellite("28868", "US")],
    );

    let report = assessor(&snapshot).assess_batch(&positions(&[("28868", Some(75.0))]));

    let record = &report.assessments[0].record;
    assert_eq!(record.verdict, Verdict::Maybe);
    assert_eq!(record.basis, VerdictBasis::NeighborAmbiguity);
    assert!(record.explanation.contains("22.10 or 22.14"));
}

#[test]
fn totally_suspended_network_next_to_a_compliant_one_stays_no() {
    let snapshot = snapshot(
        vec![
            in_use(
                filing("EAGLE-1", 75.0, "USA", FilingCategory::Planned),
                date(2005, 1, 1),
            ),
            suspended(
                in_use(
                    filing("DARK", 75.3, "CHN", FilingCategory::Planned),
                    date(2001, 1, 1),
                ),
                SuspensionKind::Total,
                date(2020, 1, 1),
                None,
            ),
        ],
        vec![satellite("10001", "US"), satellite("10002", "PRC")],
    );

    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10001", Some(75.0)),
        ("10002", Some(75.3)),
    ]));

    assert_eq!(report.assessments[0].record.verdict, Verdict::Yes);
    let dark = &report.assessments[1].record;
    assert_eq!(dark.verdict, Verdict::No);
    assert_eq!(dark.basis, VerdictBasis::NoQualifyingFiling);
}

#[test]
fn relaxed_records_do_not_count_as_compliant_neighbors() {
    let snapshot = compliant_snapshot();
    let report = assessor(&snapshot).assess_batch(&positions(&[
        ("10002", Some(10.0)),
        ("10003", Some(10.2)),
    ]));

    assert!(report
        .records()
        .all(|record| record.verdict == Verdict::Maybe));
    assert_eq!(report.count(Verdict::Maybe), 2);
}

#[test]
fn refinement_is_grouped_by_date() {
    let snapshot = compliant_snapshot();
    let assessor = assessor(&snapshot);
    let other_day = date(2023, 8, 9);

    let compliant = assessor.assess("10001", assessment_date(), Some(75.0)).record;
    let lonely = assessor.assess("10002", other_day, Some(75.2)).record;

    let refined = refine(&[compliant, lonely], 0.5);

    assert_eq!(refined[0].verdict, Verdict::Yes);
    assert_eq!(refined[1].verdict, Verdict::Maybe);
}

#[test]
fn batch_emits_one_record_per_pair_in_date_order() {
    let snapshot = compliant_snapshot();
    let mut table = PositionTable::new();
    table.record("10001", date(2023, 8, 9), Some(75.0));
    table.record("10002", date(2023, 8, 9), Some(75.3));
    table.record("10001", date(2023, 8, 8), Some(75.0));
    table.record("10002", date(2023, 8, 8), None);

    let report = assessor(&snapshot).assess_batch(&table);

    let keys: Vec<_> = report
        .records()
        .map(|record| (record.date, record.catalog_id.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (date(2023, 8, 8), "10001"),
            (date(2023, 8, 8), "10002"),
            (date(2023, 8, 9), "10001"),
            (date(2023, 8, 9), "10002"),
        ]
    );
    assert_eq!(report.count(Verdict::NotAvailable), 1);
}
