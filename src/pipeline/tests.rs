use serde_json::{Value, json};

use super::*;

fn run(raw: Value) -> ValidationOutcome {
    validate_and_clean(&raw, "doc123.pdf", &PipelineConfig::default())
}

#[test]
fn doc_id_is_path_independent() {
    assert_eq!(
        generate_doc_id("/srv/raw/doc123.pdf"),
        generate_doc_id("archive/2021/doc123.pdf")
    );
    assert_eq!(generate_doc_id("doc123.pdf"), generate_doc_id(r"C:\in\doc123.pdf"));
}

#[test]
fn doc_id_differs_for_different_base_names() {
    assert_ne!(generate_doc_id("doc123.pdf"), generate_doc_id("doc124.pdf"));
    assert_ne!(generate_doc_id("a/doc.pdf"), generate_doc_id("a/doc.json"));
}

#[test]
fn doc_id_is_lowercase_sha256_hex() {
    assert_eq!(
        generate_doc_id("doc123.pdf"),
        "7fb2bc1adde529352c29866b7d9b45ce4fee1967fc1d73aa3595a9706410563f"
    );
    assert_eq!(
        generate_doc_id(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn doc_id_overwrites_existing_value() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{"heading": "Intro"}],
        "doc_id": "stale"
    }));

    assert_eq!(
        outcome.record()["doc_id"],
        json!(generate_doc_id("doc123.pdf"))
    );
}

#[test]
fn cleaner_trims_nested_strings_and_keeps_scalars() {
    let cleaned = clean::trim_all_strings(json!({
        "title": "  Title\t",
        "meta": {"authors": ["  Ann ", " Bo  b "], "pages": 12, "draft": false, "note": null},
        "rows": [[" a ", 1.5], {"cell": "\n x \n"}]
    }));

    assert_eq!(
        cleaned,
        json!({
            "title": "Title",
            "meta": {"authors": ["Ann", "Bo  b"], "pages": 12, "draft": false, "note": null},
            "rows": [["a", 1.5], {"cell": "x"}]
        })
    );
}

#[test]
fn cleaner_is_idempotent() {
    let once = clean::trim_all_strings(json!({
        "title": "  Report  ",
        "sections": [{"heading": " Intro ", "body": [" x ", {"y": " z "}]}]
    }));
    let twice = clean::trim_all_strings(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn cleaner_preserves_key_order() {
    let cleaned = clean::trim_all_strings(json!({"zeta": " 1 ", "alpha": " 2 ", "mid": " 3 "}));
    let keys = cleaned
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect::<Vec<String>>();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn raw_record_is_not_mutated() {
    let raw = json!({"title": "  Report  ", "sections": [], "pbac_meeting_date": "March 3, 2021"});
    let snapshot = raw.clone();

    let _ = validate_and_clean(&raw, "doc123.pdf", &PipelineConfig::default());

    assert_eq!(raw, snapshot);
}

#[test]
fn end_to_end_clean_record_succeeds() {
    let outcome = run(json!({
        "title": "  Report A  ",
        "sections": [{"heading": " Intro "}],
        "source": "doc123.pdf"
    }));

    assert!(matches!(outcome, ValidationOutcome::Done { .. }));
    assert!(outcome.is_persistable());
    assert_eq!(
        outcome.record(),
        &json!({
            "title": "Report A",
            "sections": [{"heading": "Intro"}],
            "source": "doc123.pdf",
            "doc_id": "7fb2bc1adde529352c29866b7d9b45ce4fee1967fc1d73aa3595a9706410563f"
        })
    );
    assert_eq!(
        outcome.report(),
        &ValidationReport {
            status: ValidationStatus::Success,
            warnings: vec![],
            errors: vec![],
        }
    );
}

#[test]
fn missing_title_fails_fast() {
    let outcome = run(json!({"sections": [{"heading": "Intro"}], "pbac_meeting_date": "nope"}));

    assert!(matches!(outcome, ValidationOutcome::Failed { .. }));
    let report = outcome.report();
    assert_eq!(report.status, ValidationStatus::Error);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("title"), "unexpected: {:?}", report.errors);
    assert!(report.warnings.is_empty());
    assert_eq!(outcome.record()["pbac_meeting_date"], json!("nope"));
}

#[test]
fn whitespace_only_title_counts_as_empty() {
    let outcome = run(json!({"title": "   ", "sections": [{"heading": "Intro"}]}));

    assert_eq!(outcome.report().status, ValidationStatus::Error);
    assert_eq!(
        outcome.report().errors,
        vec!["Missing or empty required field: 'title'".to_string()]
    );
    assert_eq!(outcome.record()["title"], json!(""));
    assert!(outcome.record()["doc_id"].is_string());
}

#[test]
fn blank_sections_fail_before_shape_check() {
    for sections in [json!(null), json!({}), json!("   ")] {
        let outcome = run(json!({"title": "Report", "sections": sections}));
        assert!(matches!(outcome, ValidationOutcome::Failed { .. }));
        assert_eq!(
            outcome.report().errors,
            vec!["Missing or empty required field: 'sections'".to_string()]
        );
    }

    let outcome = run(json!({"title": "Report", "sections": []}));
    assert!(matches!(outcome, ValidationOutcome::Done { .. }));
    assert!(outcome.report().errors.is_empty());
}

#[test]
fn empty_list_only_passes_the_gate_for_the_sections_field() {
    let config = PipelineConfig {
        required_fields: vec!["title".to_string(), "tags".to_string(), "sections".to_string()],
        ..PipelineConfig::default()
    };
    let raw = json!({"title": "Report", "tags": [], "sections": []});

    let outcome = validate_and_clean(&raw, "doc123.pdf", &config);

    assert!(matches!(outcome, ValidationOutcome::Failed { .. }));
    assert_eq!(
        outcome.report().errors,
        vec!["Missing or empty required field: 'tags'".to_string()]
    );
}

#[test]
fn non_object_root_is_reported_as_missing_title() {
    let outcome = run(json!(["title", "sections"]));

    assert!(matches!(outcome, ValidationOutcome::Failed { .. }));
    assert!(!outcome.is_persistable());
    assert!(outcome.report().errors[0].contains("'title'"));
    assert!(outcome.report().errors[0].contains("an array"));
    assert_eq!(outcome.record(), &json!(["title", "sections"]));
}

#[test]
fn textual_meeting_date_is_normalized() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{"heading": "Intro"}],
        "pbac_meeting_date": "March 3, 2021"
    }));

    assert_eq!(outcome.record()["pbac_meeting_date"], json!("2021-03-03"));
    assert_eq!(outcome.report().status, ValidationStatus::Success);
}

#[test]
fn unparseable_meeting_date_becomes_null_with_warning() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{"heading": "Intro"}],
        "pbac_meeting_date": "  not a date "
    }));

    assert_eq!(outcome.record()["pbac_meeting_date"], Value::Null);
    assert_eq!(outcome.report().status, ValidationStatus::SuccessWithWarnings);
    assert_eq!(
        outcome.report().warnings,
        vec!["Could not parse date: 'not a date'. Setting to null.".to_string()]
    );
}

#[test]
fn non_string_meeting_date_is_a_soft_failure() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{"heading": "Intro"}],
        "pbac_meeting_date": 20210303
    }));

    assert_eq!(outcome.record()["pbac_meeting_date"], Value::Null);
    assert_eq!(outcome.report().status, ValidationStatus::SuccessWithWarnings);
    assert!(outcome.report().warnings[0].contains("20210303"));
}

#[test]
fn null_or_empty_meeting_date_needs_no_warning() {
    for date in [json!(null), json!("   ")] {
        let outcome = run(json!({
            "title": "Report",
            "sections": [{"heading": "Intro"}],
            "pbac_meeting_date": date
        }));
        assert_eq!(outcome.record()["pbac_meeting_date"], Value::Null);
        assert_eq!(outcome.report().status, ValidationStatus::Success);
    }
}

#[test]
fn absent_meeting_date_stays_absent() {
    let outcome = run(json!({"title": "Report", "sections": [{"heading": "Intro"}]}));
    assert!(outcome.record().get("pbac_meeting_date").is_none());
}

#[test]
fn empty_sections_is_a_warning() {
    let outcome = run(json!({"title": "Report", "sections": []}));

    assert!(matches!(outcome, ValidationOutcome::Done { .. }));
    assert_eq!(outcome.report().status, ValidationStatus::SuccessWithWarnings);
    assert_eq!(
        outcome.report().warnings,
        vec!["'sections' array is empty.".to_string()]
    );
}

#[test]
fn sections_that_are_not_a_list_are_an_error() {
    let outcome = run(json!({
        "title": "Report",
        "sections": "not a list",
        "pbac_meeting_date": "2021-03-03"
    }));

    assert!(matches!(outcome, ValidationOutcome::Done { .. }));
    assert!(!outcome.is_persistable());
    assert_eq!(outcome.report().status, ValidationStatus::Error);
    assert_eq!(
        outcome.report().errors,
        vec!["'sections' field is not a list.".to_string()]
    );
    assert_eq!(outcome.record()["pbac_meeting_date"], json!("2021-03-03"));
}

#[test]
fn malformed_section_entries_only_warn() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{"heading": "Intro"}, {}, "loose text", {"heading": "  "}, {"heading": "Outro"}]
    }));

    assert_eq!(outcome.report().status, ValidationStatus::SuccessWithWarnings);
    assert!(outcome.report().errors.is_empty());
    assert_eq!(
        outcome.report().warnings,
        vec![
            "Section at index 1 is missing a 'heading'.".to_string(),
            "Item at index 2 in 'sections' is not a valid object.".to_string(),
            "Section at index 3 is missing a 'heading'.".to_string(),
        ]
    );
}

#[test]
fn warnings_accumulate_in_stage_order() {
    let outcome = run(json!({
        "title": "Report",
        "sections": [{}],
        "pbac_meeting_date": "someday"
    }));

    assert_eq!(
        outcome.report().warnings,
        vec![
            "Could not parse date: 'someday'. Setting to null.".to_string(),
            "Section at index 0 is missing a 'heading'.".to_string(),
        ]
    );
}

#[test]
fn custom_field_names_are_honored() {
    let config = PipelineConfig {
        required_fields: vec!["name".to_string(), "chapters".to_string()],
        date_field: "held_on".to_string(),
        sections_field: "chapters".to_string(),
        heading_field: "label".to_string(),
    };
    let raw = json!({
        "name": "Minutes",
        "chapters": [{"label": "One"}, {"heading": "Two"}],
        "held_on": "4 July 2019"
    });

    let outcome = validate_and_clean(&raw, "minutes.json", &config);

    assert_eq!(outcome.record()["held_on"], json!("2019-07-04"));
    assert_eq!(
        outcome.report().warnings,
        vec!["Section at index 1 is missing a 'label'.".to_string()]
    );
}

#[test]
fn status_follows_findings_and_finalize_is_idempotent() {
    let mut report = ValidationReport::default();
    report.finalize();
    assert_eq!(report.status, ValidationStatus::Success);

    report.warnings.push("w".to_string());
    report.finalize();
    assert_eq!(report.status, ValidationStatus::SuccessWithWarnings);

    report.errors.push("e".to_string());
    report.finalize();
    report.finalize();
    assert_eq!(report.status, ValidationStatus::Error);
}

#[test]
fn report_serializes_with_snake_case_status() {
    let report = ValidationReport {
        status: ValidationStatus::SuccessWithWarnings,
        warnings: vec!["'sections' array is empty.".to_string()],
        errors: vec![],
    };

    let value = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(
        value,
        json!({
            "status": "success_with_warnings",
            "warnings": ["'sections' array is empty."],
            "errors": []
        })
    );
    assert_eq!(ValidationStatus::SuccessWithWarnings.as_str(), "success_with_warnings");
}
