//! Integration tests for the debug-statement scanner.
//!
//! These tests run the scanner against the fixtures in testdata/project.

use std::path::PathBuf;

use ecc_hooks::report;
use ecc_hooks::scan::{scan, scan_file, scan_paths, Dialect};

fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("project")
}

fn lines_in(file: &str) -> Vec<usize> {
    let path = project_path().join(file);
    let dialect = Dialect::from_path(&path).expect("fixture should have a known dialect");
    scan_file(&path, dialect).iter().map(|m| m.line).collect()
}

#[test]
fn test_javascript_fixture_skips_comments() {
    assert_eq!(lines_in("debug.js"), vec![7, 10]);
}

#[test]
fn test_php_fixture_reports_commented_calls() {
    assert_eq!(lines_in("debug.php"), vec![10, 11, 12]);
}

#[test]
fn test_python_fixture_tracks_aliases() {
    assert_eq!(lines_in("debug.py"), vec![2, 3, 10, 11, 12]);
}

#[test]
fn test_clean_fixtures_have_no_matches() {
    assert!(lines_in("clean.ts").is_empty());
    assert!(lines_in("clean.py").is_empty());
}

#[test]
fn test_matches_carry_raw_line_text() {
    let path = project_path().join("debug.js");
    let content = std::fs::read_to_string(&path).expect("should read fixture");
    let lines: Vec<&str> = content.split('\n').collect();

    for m in scan(&content, Dialect::JavaScript) {
        assert_eq!(m.text, lines[m.line - 1]);
    }
}

#[test]
fn test_scanning_is_repeatable() {
    let path = project_path().join("debug.py");
    let content = std::fs::read_to_string(&path).expect("should read fixture");
    assert_eq!(scan(&content, Dialect::Python), scan(&content, Dialect::Python));
}

#[test]
fn test_scan_paths_over_project() {
    let files: Vec<PathBuf> = std::fs::read_dir(project_path())
        .expect("should read project dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    let results = scan_paths(&files);
    assert_eq!(results.len(), 5);
    assert_eq!(report::total_matches(&results), 10);

    let flagged: Vec<String> = results
        .iter()
        .filter(|r| r.has_matches())
        .map(|r| r.file.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(flagged, vec!["debug.js", "debug.php", "debug.py"]);
}

#[test]
fn test_json_report_over_project() {
    let files: Vec<PathBuf> = ["debug.php", "clean.py"]
        .iter()
        .map(|f| project_path().join(f))
        .collect();
    let results = scan_paths(&files);

    let json = serde_json::to_value(report::json_report("testdata/project", &results))
        .expect("report should serialize");
    assert_eq!(json["path"], "testdata/project");
    assert_eq!(json["files_scanned"], 2);
    assert_eq!(json["total_matches"], 3);
    assert_eq!(json["files"][0]["dialect"], "php");
    assert_eq!(json["files"][0]["matches"][0]["line"], 10);
    assert_eq!(json["files"][0]["matches"][0]["text"], "        var_dump($user);");
}
