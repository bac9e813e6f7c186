use super::*;
use duck_common::diagnostics::diagnostic_codes as codes;
use duck_enums::EnumValue;
use duck_solver::CompatOptions;

fn sample_report() -> CheckReport {
    let mismatch = Diagnostic::from_code(codes::TYPE_NOT_ASSIGNABLE, &["Point", "Point3"])
        .with_related(
            codes::PROPERTY_MISSING_BUT_REQUIRED,
            "Property 'z' is missing in type 'Point' but required in type 'Point3'.",
        );
    CheckReport {
        options: CompatOptions::default(),
        declaration_errors: Vec::new(),
        results: vec![
            QueryResult {
                kind: "assignable",
                subject: "Point3 -> Point".to_string(),
                outcome: QueryOutcome::Assignable {
                    result: true,
                    expect: Some(true),
                    diagnostic: None,
                },
            },
            QueryResult {
                kind: "assignable",
                subject: "Point -> Point3".to_string(),
                outcome: QueryOutcome::Assignable {
                    result: false,
                    expect: Some(true),
                    diagnostic: Some(mismatch),
                },
            },
            QueryResult {
                kind: "enumValue",
                subject: "Direction.Up".to_string(),
                outcome: QueryOutcome::EnumValue(EnumValue::Number(1.0)),
            },
            QueryResult {
                kind: "enumName",
                subject: "Label[0]".to_string(),
                outcome: QueryOutcome::Error(Diagnostic::error(
                    "'Label' has string members and no reverse mapping",
                    0,
                )),
            },
        ],
    }
}

#[test]
fn test_render_plain_text() {
    let output = Reporter::new(false).render(&sample_report());
    let expected = "\
[1] ok assignable Point3 -> Point: assignable
[2] FAIL assignable Point -> Point3: not assignable (expected assignable)
  error TS2322: Type 'Point' is not assignable to type 'Point3'.
    Property 'z' is missing in type 'Point' but required in type 'Point3'.
[3] ok enumValue Direction.Up = 1
[4] FAIL enumName Label[0]
  error: 'Label' has string members and no reverse mapping
4 queries, 2 failed
";
    assert_eq!(output, expected);
}

#[test]
fn test_render_declaration_errors_first() {
    let mut report = sample_report();
    report.results.truncate(1);
    report.declaration_errors.push(Diagnostic::from_code(
        codes::DUPLICATE_IDENTIFIER,
        &["Up"],
    ));

    let output = Reporter::new(false).render(&report);
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("error TS2300: Duplicate identifier 'Up'."));
    assert_eq!(
        lines.next(),
        Some("[1] ok assignable Point3 -> Point: assignable")
    );
    assert_eq!(
        lines.next(),
        Some("1 queries, 0 failed, 1 declaration errors")
    );
}

#[test]
fn test_nested_elaboration_indents() {
    let diag = Diagnostic::from_code(codes::TYPE_NOT_ASSIGNABLE, &["A", "B"])
        .with_related(codes::TYPES_OF_PROPERTY_INCOMPATIBLE, "Types of property 'x' are incompatible.")
        .with_related(codes::TYPE_NOT_ASSIGNABLE, "Type 'string' is not assignable to type 'number'.");
    let text = Reporter::new(false).format_diagnostic(&diag, 0);
    assert_eq!(
        text,
        "error TS2322: Type 'A' is not assignable to type 'B'.\n  Types of property 'x' are incompatible.\n    Type 'string' is not assignable to type 'number'."
    );
}

#[test]
fn test_colored_output_keeps_text() {
    colored::control::set_override(true);
    let output = Reporter::new(true).render(&sample_report());
    colored::control::unset_override();

    assert!(output.contains("\u{1b}["));
    assert!(output.contains("Point3 -> Point"));
    assert!(output.contains("TS2322"));
}

#[test]
fn test_render_json() {
    let value = render_json(&sample_report());

    assert_eq!(value["failed"], 2);
    assert_eq!(value["exitCode"], 1);
    assert_eq!(value["compilerOptions"]["strictNullChecks"], true);
    assert_eq!(value["declarationErrors"].as_array().unwrap().len(), 0);

    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["query"], "assignable");
    assert_eq!(results[0]["result"], true);
    assert!(results[0].get("diagnostic").is_none());

    assert_eq!(results[1]["passed"], false);
    assert_eq!(results[1]["expect"], true);
    assert_eq!(results[1]["diagnostic"]["code"], 2322);
    assert_eq!(results[1]["diagnostic"]["related"][0]["code"], 2741);

    assert_eq!(results[2]["value"], 1.0);
    assert_eq!(results[3]["error"]["category"], "error");
    assert_eq!(results[3]["error"]["code"], 0);
}
