//! Debug-statement scanning.
//!
//! `scan` is a pure function over text: it performs no I/O and keeps no
//! state between calls. The file helpers below read content and treat any
//! read failure as "nothing found".

mod comments;
mod javascript;
mod php;
mod python;
mod types;

pub use comments::{starts_with_marker, BlockComments};
pub use python::AliasRegistry;
pub use types::{Dialect, Match, ScanTarget};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scan `content` for debug statements of the given dialect.
///
/// Matches are returned in ascending line order with 1-based line numbers
/// that correspond to splitting `content` on `\n`.
pub fn scan(content: &str, dialect: Dialect) -> Vec<Match> {
    match dialect {
        Dialect::JavaScript => javascript::scan_javascript(content),
        Dialect::Php => php::scan_php(content),
        Dialect::Python => python::scan_python(content),
    }
}

/// Scan a file on disk. Unreadable files produce no matches.
pub fn scan_file<P: AsRef<Path>>(path: P, dialect: Dialect) -> Vec<Match> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => scan(&content, dialect),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            Vec::new()
        }
    }
}

/// Scan results for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileScan {
    pub file: PathBuf,
    pub dialect: Dialect,
    pub matches: Vec<Match>,
}

impl FileScan {
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Scan many files, picking each file's dialect from its extension.
///
/// Files are independent, so they are processed in parallel. Files with an
/// unknown extension are skipped. Results are sorted by path.
pub fn scan_paths<P: AsRef<Path> + Sync>(files: &[P]) -> Vec<FileScan> {
    let mut results: Vec<FileScan> = files
        .par_iter()
        .filter_map(|file| {
            let path = file.as_ref();
            let dialect = Dialect::from_path(path)?;
            Some(FileScan {
                file: path.to_path_buf(),
                dialect,
                matches: scan_file(path, dialect),
            })
        })
        .collect();

    results.sort_by(|a, b| a.file.cmp(&b.file));
    results
}
