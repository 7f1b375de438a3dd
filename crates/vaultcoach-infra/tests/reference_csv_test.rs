//! Loader tests against scratch reference directories

use std::fs;

use tempfile::tempdir;
use vaultcoach_domain::repository::ReferenceDataRepository;
use vaultcoach_infra::{CsvReferenceRepository, MID_MARK_CHART_FILE, POLE_RESISTANCE_FILE};
use vaultcoach_types::Error;

#[test]
fn test_loads_both_tables_in_file_order() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(POLE_RESISTANCE_FILE),
        "Length_ft,Weight_lbs,ResistanceIndex\n14,150,150\n13, 160 ,140\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(MID_MARK_CHART_FILE),
        "Grip_cm,Takeoff_cm,Mid_mark_m\n400,330,12.3\n400,340,12.4\n",
    )
    .unwrap();

    let repo = CsvReferenceRepository::new(dir.path());
    let tables = repo.load_tables().unwrap();

    assert_eq!(tables.poles.len(), 2);
    assert_eq!(tables.poles[1].length_ft, 13.0);
    assert_eq!(tables.poles[1].weight_lbs, 160.0);
    assert_eq!(tables.mid_marks.len(), 2);
    assert!((tables.mid_marks[0].mid_mark_m - 12.3).abs() < 1e-9);
}

#[test]
fn test_non_numeric_rows_are_dropped() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(POLE_RESISTANCE_FILE),
        "Length_ft,Weight_lbs,ResistanceIndex\n14,150,150\n14,?,\n,,\nfifteen,150,170\n15,150,170\n",
    )
    .unwrap();

    let poles = CsvReferenceRepository::new(dir.path())
        .load_pole_resistance()
        .unwrap();

    assert_eq!(poles.len(), 2);
    assert_eq!(poles[1].resistance_index, 170.0);
}

#[test]
fn test_missing_file_is_unavailable() {
    let dir = tempdir().unwrap();
    let err = CsvReferenceRepository::new(dir.path())
        .load_mid_mark_chart()
        .unwrap_err();

    match err {
        Error::ReferenceDataUnavailable { resource, .. } => assert_eq!(resource, MID_MARK_CHART_FILE),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_column_is_unavailable() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(MID_MARK_CHART_FILE),
        "Grip_cm,Mid_mark_m\n400,12.3\n",
    )
    .unwrap();

    let err = CsvReferenceRepository::new(dir.path())
        .load_mid_mark_chart()
        .unwrap_err();

    assert!(err.to_string().contains("Takeoff_cm"));
}

#[test]
fn test_shift_jis_file_with_japanese_columns() {
    let dir = tempdir().unwrap();
    let (bytes, _, _) = encoding_rs::SHIFT_JIS
        .encode("Grip_cm,Takeoff_cm,Mid_mark_m,備考\n400,330,12.3,基準\n");
    fs::write(dir.path().join(MID_MARK_CHART_FILE), bytes.as_ref()).unwrap();

    let rows = CsvReferenceRepository::new(dir.path())
        .load_mid_mark_chart()
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].takeoff_cm, 330.0);
}
