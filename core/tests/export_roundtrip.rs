use annotate_core::dataset::model::{Category, RowKey};
use annotate_core::dataset::parser::{load_dataset_csv, parse_dataset_csv};
use annotate_core::dataset::store::set_validated;
use annotate_core::export::receipt::{sha256_hex, write_export};
use annotate_core::export::table::serialize;

const INPUT: &str = "\
Unnamed: 0,sent,original_cont_label,original_det_label,annotated_cont_labels,annotated_det_labels
0,\"Smoking, drinking\",habits,lifestyle,habit,life
1,Income is low,economy,income,econ,income
2,No data,none,none,none,none
";

#[test]
fn export_reloads_with_validation_state() {
    let mut ds = parse_dataset_csv(INPUT.as_bytes()).unwrap();
    set_validated(&mut ds, RowKey::new(0), Category::Content, "habits").unwrap();
    set_validated(&mut ds, RowKey::new(2), Category::Determinant, "other").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exports").join("validated.csv");
    let receipt = write_export(&ds, &out).unwrap();
    assert_eq!(receipt.rows, 3);

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(receipt.bytes, bytes.len() as u64);
    assert_eq!(receipt.sha256, sha256_hex(&bytes));

    let reloaded = load_dataset_csv(&out).unwrap();
    assert_eq!(reloaded, ds);
    assert_eq!(reloaded.headers()[0], "Unnamed: 0");
    assert_eq!(reloaded.rows()[0].sentence(), "Smoking, drinking");
}

#[test]
fn reexport_is_byte_stable() {
    let ds = parse_dataset_csv(INPUT.as_bytes()).unwrap();
    let first = serialize(&ds).unwrap();
    let second = serialize(&parse_dataset_csv(first.as_slice()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reloading_an_export_does_not_reset_validated_rows() {
    let mut ds = parse_dataset_csv(INPUT.as_bytes()).unwrap();
    set_validated(&mut ds, RowKey::new(1), Category::Content, "economy").unwrap();
    let reloaded = parse_dataset_csv(serialize(&ds).unwrap().as_slice()).unwrap();
    let row = &reloaded.rows()[1];
    assert!(row.is_validated(Category::Content));
    assert_eq!(row.validation(Category::Content).label.as_deref(), Some("economy"));
    assert!(!row.is_validated(Category::Determinant));
}
