//! In-place application of auto-fixes.

use crate::FileLintResult;

/// Apply every safe fix in `results` to the files on disk.
///
/// Returns `(fixed_issues, fixed_files)`. Suggestions are never applied
/// here; they require review.
pub fn apply_fixes(results: &[FileLintResult]) -> anyhow::Result<(usize, usize)> {
    let mut total_fixed = 0usize;
    let mut files_fixed = 0usize;

    for file_result in results {
        let fixes: Vec<_> = file_result
            .diagnostics
            .iter()
            .filter_map(|d| d.fix.as_ref())
            .collect();

        if fixes.is_empty() {
            continue;
        }

        let mut source = file_result.source.clone();

        // Sort fixes by span start descending (apply from end to start
        // so earlier offsets aren't invalidated).
        let mut sorted_fixes = fixes.clone();
        sorted_fixes.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        // Check for overlapping fixes and skip overlaps.
        let mut last_start = usize::MAX;
        let mut applied = 0;
        for fix in &sorted_fixes {
            let start = fix.span.start;
            let end = fix.span.end;

            // Skip if this fix overlaps with a previously applied one.
            if end > last_start {
                continue;
            }

            source.replace_range(start..end, &fix.replacement);
            last_start = start;
            applied += 1;
        }

        if applied > 0 {
            std::fs::write(&file_result.path, &source)?;
            total_fixed += applied;
            files_fixed += 1;
        }
    }

    Ok((total_fixed, files_fixed))
}
