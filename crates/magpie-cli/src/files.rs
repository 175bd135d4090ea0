//! Source file collection.

use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// Collect all lintable source files from the given paths. Each entry
/// may be a file, a directory (walked recursively) or a glob pattern.
pub fn collect_source_files(paths: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);
        if path.is_file() {
            if is_lintable(path) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            collect_in_dir(path, &mut files)?;
        } else if path_str.contains(['*', '?', '[']) {
            for entry in (glob::glob(path_str)?).flatten() {
                if entry.is_file() && is_lintable(&entry) {
                    files.push(entry);
                }
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively collect source files in a directory.
fn collect_in_dir(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden dirs and common build/dependency output.
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.')
                || name_str == "node_modules"
                || name_str == "dist"
                || name_str == "target"
            {
                continue;
            }
            collect_in_dir(&path, files)?;
        } else if is_lintable(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "1;").unwrap();
        std::fs::write(dir.path().join("b.mjs"), "1;").unwrap();
        std::fs::write(dir.path().join("c.txt"), "no").unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::write(dir.path().join("node_modules/dep.js"), "1;").unwrap();

        let files =
            collect_source_files(&[dir.path().to_string_lossy().into_owned()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.js", "b.mjs"]);
    }

    #[test]
    fn explicit_file_must_match_extension() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "no").unwrap();

        let files =
            collect_source_files(&[txt.to_string_lossy().into_owned()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn glob_pattern_expands() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.js"), "1;").unwrap();
        std::fs::write(dir.path().join("two.js"), "1;").unwrap();

        let pattern = dir.path().join("*.js").to_string_lossy().into_owned();
        let files = collect_source_files(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }
}
