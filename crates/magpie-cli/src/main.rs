//! `magpie` — lint JavaScript for uses of newer built-in prototype methods.
//!
//! Walks the given paths, lints every `.js`/`.mjs`/`.cjs` file against the
//! bundled rule set, and reports which newer `prototype` methods the code
//! relies on. Safe fixes (legacy spellings such as `trimLeft`) can be
//! applied in place with `--fix`.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use magpie_core::linter::{LintDiagnostic, Linter, Severity};

use crate::output::{resolve_color_choice, StyledOutput};

mod config;
mod files;
mod fixes;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "magpie")]
#[command(about = "Lint JavaScript for newer built-in prototype methods", long_about = None)]
#[command(version)]
struct Cli {
    /// Files, directories, or glob patterns to lint
    #[arg(default_value = ".")]
    paths: Vec<String>,

    /// Apply safe fixes in place
    #[arg(long)]
    fix: bool,

    /// Output format: pretty or json
    #[arg(long, default_value = "pretty")]
    format: String,

    /// Path to a magpie.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Flag calls whose receiver type cannot be determined
    #[arg(long)]
    aggressive: bool,

    /// Color output: auto, always, or never
    #[arg(long)]
    color: Option<String>,
}

/// Diagnostics for one linted file, kept with its source for rendering
/// and fix application.
struct FileLintResult {
    path: PathBuf,
    source: String,
    diagnostics: Vec<LintDiagnostic>,
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `MAGPIE_LOG` nor `RUST_LOG` is set, keeping
/// startup cost at zero for normal usage. Output goes to stderr so it never
/// interferes with JSON on stdout.
fn init_tracing() {
    let has_magpie_log = std::env::var("MAGPIE_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_magpie_log && !has_rust_log {
        return;
    }

    // MAGPIE_LOG takes precedence when both are set.
    let filter = if let Ok(val) = std::env::var("MAGPIE_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // 1. Load lint config from magpie.toml (if present)
    let mut lint_config = config::load_lint_config(cli.config.as_deref())?;
    if cli.aggressive {
        lint_config.set_aggressive(true);
    }
    let linter = Linter::with_config(lint_config);

    // 2. Collect source files
    let source_files = files::collect_source_files(&cli.paths)?;
    if source_files.is_empty() {
        eprintln!("No JavaScript files found.");
        std::process::exit(1);
    }

    // 3. Lint each file
    let mut total_errors = 0usize;
    let mut total_warnings = 0usize;
    let mut total_fixable = 0usize;
    let mut all_file_results: Vec<FileLintResult> = Vec::new();

    for path in &source_files {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                total_errors += 1;
                continue;
            }
        };
        let path_str = path.display().to_string();

        let result = linter.lint_source(&source, &path_str);

        let errors = result
            .diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
            .count();
        let warnings = result
            .diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warn))
            .count();

        total_errors += errors;
        total_warnings += warnings;
        total_fixable += result.fixable_count;

        if !result.diagnostics.is_empty() {
            all_file_results.push(FileLintResult {
                path: path.clone(),
                source,
                diagnostics: result.diagnostics,
            });
        }
    }

    // 4. Output diagnostics
    let color_choice = resolve_color_choice(cli.color.as_deref());
    match cli.format.as_str() {
        "json" => render::emit_json(&all_file_results)?,
        _ => render::emit_pretty(&all_file_results, color_choice),
    }

    // 5. Apply fixes
    let mut out = StyledOutput::new(color_choice);

    if cli.fix && total_fixable > 0 {
        let (fixed_issues, fixed_files) = fixes::apply_fixes(&all_file_results)?;
        out.newline();
        out.success(&format!(
            "Fixed {} issue(s) in {} file(s).",
            fixed_issues, fixed_files
        ));
        out.newline();
    } else if total_fixable > 0 {
        out.newline();
        out.info(&format!(
            "{} issue(s) are auto-fixable. Run `magpie --fix` to apply.",
            total_fixable
        ));
        out.newline();
    }

    // 6. Summary
    if cli.format != "json" {
        print_summary(
            &mut out,
            source_files.len(),
            total_errors,
            total_warnings,
        );
    }

    // 7. Exit code
    if total_errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(out: &mut StyledOutput, file_count: usize, errors: usize, warnings: usize) {
    out.newline();
    if errors == 0 && warnings == 0 {
        out.plain(&format!(
            "Linted {} file{}: ",
            file_count,
            if file_count == 1 { "" } else { "s" }
        ));
        out.success("no issues found.");
        out.newline();
        return;
    }

    out.plain(&format!(
        "Linted {} file{}: ",
        file_count,
        if file_count == 1 { "" } else { "s" }
    ));
    if errors > 0 {
        out.error(&format!(
            "{} error{}",
            errors,
            if errors == 1 { "" } else { "s" }
        ));
    }
    if errors > 0 && warnings > 0 {
        out.plain(", ");
    }
    if warnings > 0 {
        out.warning(&format!(
            "{} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" }
        ));
    }
    out.plain(".");
    out.newline();
}
