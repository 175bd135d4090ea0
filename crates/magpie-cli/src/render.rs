//! Diagnostic rendering: pretty terminal output and machine-readable JSON.

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity as CsSeverity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream};

use magpie_core::linter::{LintDiagnostic, LintFix, Severity};

use crate::FileLintResult;

// ── Pretty output (codespan) ───────────────────────────────────────────────

/// Render diagnostics with source context to stderr.
pub fn emit_pretty(results: &[FileLintResult], color: ColorChoice) {
    let mut writer = StandardStream::stderr(color);
    let config = term::Config::default();

    for file_result in results {
        let mut files = SimpleFiles::new();
        let file_id = files.add(
            file_result.path.display().to_string(),
            file_result.source.clone(),
        );

        for lint_diag in &file_result.diagnostics {
            let severity = match lint_diag.severity {
                Severity::Error => CsSeverity::Error,
                Severity::Warn => CsSeverity::Warning,
                Severity::Off => continue,
            };

            let label = Label::primary(file_id, lint_diag.span.start..lint_diag.span.end)
                .with_message(lint_diag.rule);

            let mut notes = lint_diag.notes.clone();
            if let Some(fix) = &lint_diag.fix {
                notes.push(format!("help: replace with '{}'", fix.replacement));
            }
            for suggestion in &lint_diag.suggestions {
                notes.push(format!("help: {}", suggestion.message));
            }

            let diag = Diagnostic::new(severity)
                .with_message(lint_diag.message.clone())
                .with_code(lint_diag.code)
                .with_labels(vec![label])
                .with_notes(notes);

            let _ = term::emit(&mut writer, &config, &files, &diag);
        }
    }
}

// ── JSON output ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonFile<'a> {
    file: String,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'a str,
    rule: &'a str,
    severity: &'a str,
    message: &'a str,
    span: JsonSpan,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<JsonFix<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<JsonSuggestion<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    notes: &'a [String],
}

#[derive(Serialize)]
struct JsonSpan {
    start: usize,
    end: usize,
    line: u32,
    column: u32,
}

#[derive(Serialize)]
struct JsonFix<'a> {
    start: usize,
    end: usize,
    replacement: &'a str,
}

#[derive(Serialize)]
struct JsonSuggestion<'a> {
    message: &'a str,
    fix: JsonFix<'a>,
}

fn json_fix(fix: &LintFix) -> JsonFix<'_> {
    JsonFix {
        start: fix.span.start,
        end: fix.span.end,
        replacement: &fix.replacement,
    }
}

fn json_diagnostic(d: &LintDiagnostic) -> JsonDiagnostic<'_> {
    let severity = match d.severity {
        Severity::Error => "error",
        Severity::Warn => "warn",
        Severity::Off => "off",
    };
    JsonDiagnostic {
        code: d.code,
        rule: d.rule,
        severity,
        message: &d.message,
        span: JsonSpan {
            start: d.span.start,
            end: d.span.end,
            line: d.span.line,
            column: d.span.column,
        },
        fix: d.fix.as_ref().map(json_fix),
        suggestions: d
            .suggestions
            .iter()
            .map(|s| JsonSuggestion {
                message: &s.message,
                fix: json_fix(&s.fix),
            })
            .collect(),
        notes: &d.notes,
    }
}

/// Print all diagnostics as a single JSON array on stdout.
pub fn emit_json(results: &[FileLintResult]) -> anyhow::Result<()> {
    let payload: Vec<JsonFile<'_>> = results
        .iter()
        .map(|file_result| JsonFile {
            file: file_result.path.display().to_string(),
            diagnostics: file_result.diagnostics.iter().map(json_diagnostic).collect(),
        })
        .collect();
    println!("{}", serde_json::to_string(&payload)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use magpie_core::linter::Linter;
    use std::path::PathBuf;

    #[test]
    fn json_payload_shape() {
        let source = "\" x \".trimStart();";
        let result = Linter::new().lint_source(source, "fix.js");
        let file_result = FileLintResult {
            path: PathBuf::from("fix.js"),
            source: source.to_string(),
            diagnostics: result.diagnostics,
        };

        let payload: Vec<JsonFile<'_>> = vec![JsonFile {
            file: file_result.path.display().to_string(),
            diagnostics: file_result.diagnostics.iter().map(json_diagnostic).collect(),
        }];
        let text = serde_json::to_string(&payload).unwrap();
        assert!(text.contains("\"code\":\"M1006\""));
        assert!(text.contains("\"replacement\":\"trimLeft\""));
        assert!(text.contains("\"file\":\"fix.js\""));
    }
}
