//! Hygiene: scans `src/` for constructs that crash or silently drop errors.
//!
//! Budgets are zero. Test files (`*_test.rs`) are exempt.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn assert_absent(pattern: &str) {
    let hits: Vec<String> = source_files()
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(idx, _)| format!("  {}:{}", file.path, idx + 1))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(hits.is_empty(), "`{pattern}` is not allowed in production code:\n{}", hits.join("\n"));
}

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()");
}

#[test]
fn no_expect() {
    assert_absent(".expect(");
}

#[test]
fn no_panics() {
    assert_absent("panic!(");
    assert_absent("unreachable!(");
    assert_absent("todo!(");
    assert_absent("unimplemented!(");
}

#[test]
fn no_silent_discard() {
    assert_absent("let _ =");
    assert_absent(".ok()");
}
