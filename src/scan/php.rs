//! Dump/debug helper detection for PHP.
//!
//! No comment exclusion is performed here: a `dd($x)` inside a `/* */`
//! block is still reported.

use lazy_static::lazy_static;
use regex::Regex;

use super::Match;

lazy_static! {
    static ref PHP_DEBUG_CALL: Regex =
        Regex::new(r"\b(var_dump|print_r|dd|dump|error_log|ray)\s*\(").unwrap();
}

pub(super) fn scan_php(content: &str) -> Vec<Match> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| PHP_DEBUG_CALL.is_match(line))
        .map(|(idx, line)| Match::new(idx + 1, line))
        .collect()
}
