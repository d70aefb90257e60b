use annotate_core::config::GuidelineKeys;
use annotate_core::dataset::model::Category;
use annotate_core::error::CoreError;
use annotate_core::guidelines::index::{explain, load_guidelines_json};

#[test]
fn guideline_file_explains_each_category() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guidelines.json");
    std::fs::write(
        &path,
        r#"{
            "conts": {"habits": "Personal behaviour", "economy": "Money matters"},
            "dets": {"income": "Earnings of the household"}
        }"#,
    )
    .unwrap();

    let set = load_guidelines_json(&path, &GuidelineKeys::default()).unwrap();
    assert_eq!(
        explain(&set, Category::Content),
        "habits: Personal behaviour\n\neconomy: Money matters\n\n"
    );
    assert_eq!(
        explain(&set, Category::Determinant),
        "income: Earnings of the household\n\n"
    );
}

#[test]
fn missing_guideline_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_guidelines_json(dir.path().join("nope.json"), &GuidelineKeys::default())
        .unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}
