use tracient::screening::income::{HistoryImportError, IncomeHistoryImporter};

#[test]
fn importer_sorts_rows_into_chronological_order() {
    let csv = "Month,Income\n\
2025-03,18000\n\
2025-01,12000\n\
2025-02,15000\n";

    let series = IncomeHistoryImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(series.amounts(), &[12_000.0, 15_000.0, 18_000.0]);
}

#[test]
fn importer_accepts_full_dates_and_trims_whitespace() {
    let csv = "Month,Income\n\
 2025-01-01 , 12000 \n\
 2025-02-01 , 15000 \n";

    let series = IncomeHistoryImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(series.months(), 2);
    assert_eq!(series.amounts(), &[12_000.0, 15_000.0]);
}

#[test]
fn importer_clamps_negative_amounts() {
    let csv = "Month,Income\n\
2025-01,-500\n\
2025-02,9000\n";

    let series = IncomeHistoryImporter::from_reader(csv.as_bytes()).expect("import succeeds");

    assert_eq!(series.amounts(), &[0.0, 9_000.0]);
}

#[test]
fn importer_rejects_duplicate_months() {
    let csv = "Month,Income\n\
2025-01,12000\n\
2025-01,13000\n";

    match IncomeHistoryImporter::from_reader(csv.as_bytes()) {
        Err(HistoryImportError::DuplicateMonth { .. }) => {}
        other => panic!("expected duplicate month error, got {other:?}"),
    }
}

#[test]
fn importer_rejects_unparseable_months() {
    let csv = "Month,Income\n\
January 2025,12000\n";

    match IncomeHistoryImporter::from_reader(csv.as_bytes()) {
        Err(HistoryImportError::InvalidMonth { value }) => {
            assert_eq!(value, "January 2025");
        }
        other => panic!("expected invalid month error, got {other:?}"),
    }
}

#[test]
fn importer_rejects_exports_without_rows() {
    let csv = "Month,Income\n";

    match IncomeHistoryImporter::from_reader(csv.as_bytes()) {
        Err(HistoryImportError::Empty) => {}
        other => panic!("expected empty export error, got {other:?}"),
    }
}
