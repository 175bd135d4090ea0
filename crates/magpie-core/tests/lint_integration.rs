//! End-to-end lint tests through the public API.

use magpie_core::linter::{LintConfig, Linter, Severity};

fn lint(source: &str) -> magpie_core::LintResult {
    Linter::new().lint_source(source, "test.js")
}

#[test]
fn test_clean_file_has_no_diagnostics() {
    let result = lint(
        r#"
        const xs = [1, 2, 3];
        const found = xs.indexOf(2) !== -1;
        const trimmed = " pad ".trim();
        new Date().toUTCString();
    "#,
    );
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}

#[test]
fn test_multiple_rules_fire_in_one_file() {
    let result = lint(
        r#"
        [1, 2].includes(1);
        " x ".trimStart();
        new Date().toGMTString();
    "#,
    );
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["M1001", "M1006", "M1009"]);
    assert_eq!(result.fixable_count, 2);
}

#[test]
fn test_operator_typed_receiver() {
    // String concatenation pins the receiver type even though one
    // operand is unknown.
    let result = lint("(\"id-\" + n).at(0);");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1004");
    assert!(result.diagnostics[0].message.contains("String.prototype.at"));
}

#[test]
fn test_reassigned_binding_is_not_classified() {
    let result = lint(
        r#"
        let xs = [1, 2];
        xs = load();
        xs.includes(1);
    "#,
    );
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}

#[test]
fn test_cyclic_bindings_terminate() {
    let result = lint(
        r#"
        const a = b, b = a;
        a.includes(1);
    "#,
    );
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}

#[test]
fn test_lint_is_idempotent() {
    let source = "[1].flat(); \" \".trimEnd();";
    let linter = Linter::new();
    let first = linter.lint_source(source, "test.js");
    let second = linter.lint_source(source, "test.js");
    assert_eq!(first.diagnostics.len(), second.diagnostics.len());
    for (a, b) in first.diagnostics.iter().zip(&second.diagnostics) {
        assert_eq!(a.code, b.code);
        assert_eq!(a.span, b.span);
        assert_eq!(a.message, b.message);
    }
}

#[test]
fn test_diagnostic_span_points_at_access() {
    let source = "[1, 2].includes(1);";
    let result = lint(source);
    let span = result.diagnostics[0].span;
    assert_eq!(&source[span.start..span.end], "[1, 2].includes");
}

#[test]
fn test_severity_override_and_disable() {
    let mut config = LintConfig::new();
    config.set_severity("no-array-prototype-includes", Severity::Error);
    config.set_severity("no-string-prototype-trimstart-trimend", Severity::Off);

    let result = Linter::with_config(config).lint_source(
        "[1].includes(1); \" \".trimStart();",
        "test.js",
    );
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1001");
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_aggressive_mode_reports_unknown_receivers_with_suggestions() {
    let mut config = LintConfig::new();
    config.set_aggressive(true);

    let result =
        Linter::with_config(config).lint_source("payload.trimStart();", "test.js");
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.code, "M1006");
    // Assumed receivers never get automatic fixes.
    assert!(diag.fix.is_none());
    assert_eq!(diag.suggestions.len(), 1);
    assert!(!diag.notes.is_empty());
    assert_eq!(result.fixable_count, 0);
}

#[test]
fn test_aggressive_mode_does_not_touch_known_receivers() {
    let mut config = LintConfig::new();
    config.set_aggressive(true);

    // A receiver that is known NOT to be a string stays unflagged even
    // in aggressive mode.
    let result =
        Linter::with_config(config).lint_source("(1 + 2).trimStart();", "test.js");
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}

#[test]
fn test_parse_error_becomes_diagnostic() {
    let result = lint("const = ;");
    assert!(!result.diagnostics.is_empty());
    assert_eq!(result.diagnostics[0].code, "M0001");
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
}

#[test]
fn test_optional_chain_receiver_is_classified() {
    let result = lint("const xs = [1, 2]; xs?.includes(1);");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "M1001");
}

#[test]
fn test_shadowed_global_is_respected() {
    let result = lint(
        r#"
        const Date = makeClock();
        new Date().toGMTString();
    "#,
    );
    assert!(result.diagnostics.is_empty(), "got: {:?}", result.diagnostics);
}
