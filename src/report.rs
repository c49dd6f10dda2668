//! Output formatting.
//!
//! Advisory builders return plain lines for the hook's error stream. The
//! `scan` command renders its results either as colored text or JSON.

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scan::{Dialect, FileScan, Match};

// =============================================================================
// Hook advisories
// =============================================================================

/// Line printed after a formatter rewrote a file.
pub fn formatted(formatter: &str, file: &Path) -> String {
    format!("[Hook] Formatted with {}: {}", formatter, file.display())
}

/// Reminder printed after a per-file debug-code warning.
fn removal_reminder(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::JavaScript => "[Hook] Remove before committing",
        Dialect::Php => "[Hook] Remove var_dump/print_r/dd/dump/ray before committing",
        Dialect::Python => "[Hook] Remove print/breakpoint/pdb/ic before committing",
    }
}

fn warning_header(dialect: Dialect, file: &Path) -> String {
    match dialect {
        Dialect::JavaScript => format!("[Hook] WARNING: console.log found in {}", file.display()),
        _ => format!("[Hook] WARNING: Debug code found in {}", file.display()),
    }
}

/// Warning for debug statements in a single edited file.
///
/// Lists at most `max_lines` matches. Empty when there are no matches.
pub fn debug_warning(file: &Path, dialect: Dialect, matches: &[Match], max_lines: usize) -> Vec<String> {
    if matches.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(matches.len().min(max_lines) + 2);
    lines.push(warning_header(dialect, file));
    lines.extend(
        matches
            .iter()
            .take(max_lines)
            .map(|m| format!("  L{}: {}", m.line, m.text.trim())),
    );
    lines.push(removal_reminder(dialect).to_string());
    lines
}

/// One line per file in the end-of-session check.
pub fn modified_file_warning(file: &Path, dialect: Dialect) -> String {
    match dialect {
        Dialect::JavaScript => format!("[Hook] WARNING: console.log found in {}", file.display()),
        _ => format!(
            "[Hook] WARNING: Debug code ({}) found in {}",
            dialect.signature_summary(),
            file.display()
        ),
    }
}

/// Closing line of the end-of-session check.
pub fn debug_files_summary(count: usize) -> String {
    format!("[Hook] {} file(s) contain a debug statement", count)
}

/// Type-checker output for one file: a header plus up to `max_lines` lines.
pub fn tool_errors(checker: &str, file: &Path, output: &[String], max_lines: usize) -> Vec<String> {
    if output.is_empty() {
        return Vec::new();
    }

    std::iter::once(format!("[Hook] {} errors in {}:", checker, file.display()))
        .chain(output.iter().take(max_lines).map(|line| format!("  {}", line)))
        .collect()
}

/// Line numbers joined for session messages, e.g. `3, 7, 12`.
pub fn join_line_numbers(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Scan report: JSON
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub total_matches: usize,
    pub files: Vec<JsonFile>,
}

/// A file with at least one match.
#[derive(Serialize, Deserialize)]
pub struct JsonFile {
    pub file: String,
    pub dialect: Dialect,
    pub matches: Vec<Match>,
}

/// Build the JSON report. Files without matches only count as scanned.
pub fn json_report(path: &str, results: &[FileScan]) -> JsonReport {
    let files: Vec<JsonFile> = results
        .iter()
        .filter(|r| r.has_matches())
        .map(|r| JsonFile {
            file: r.file.to_string_lossy().replace('\\', "/"),
            dialect: r.dialect,
            matches: r.matches.clone(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: results.len(),
        total_matches: total_matches(results),
        files,
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, results: &[FileScan]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(path, results))?;
    println!("{}", json);
    Ok(())
}

pub fn total_matches(results: &[FileScan]) -> usize {
    results.iter().map(|r| r.matches.len()).sum()
}

// =============================================================================
// Scan report: pretty
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, results: &[FileScan]) {
    println!();
    print!("  ");
    print!("{}", "ecc-hooks".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    let flagged: Vec<&FileScan> = results.iter().filter(|r| r.has_matches()).collect();
    if !flagged.is_empty() {
        write_files(&flagged);
    }

    write_summary(results.len(), flagged.len(), total_matches(results));
    println!();
}

fn write_files(flagged: &[&FileScan]) {
    println!("  {} ({}):", "Debug statements".bold(), flagged.len());
    println!();

    for result in flagged {
        print!("    {}", result.file.display().to_string().blue());
        println!("  {}", result.dialect.signature_summary().dimmed());
        for m in &result.matches {
            print!("      {}", format!("L{:<5}", m.line).dimmed());
            println!("{}", m.text.trim());
        }
        println!();
    }
}

fn write_summary(scanned: usize, flagged: usize, matches: usize) {
    if flagged == 0 {
        print!("  {}", "✓ CLEAN".green());
    } else {
        print!("  {}", "✗ FOUND".red());
    }
    println!(
        "  {} file(s) scanned, {} with debug statements, {} match(es)",
        scanned, flagged, matches
    );
}
