//! Core types for debug-statement scanning.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source dialects the scanner distinguishes.
///
/// Each variant carries its own debug-signature vocabulary and its own
/// comment-exclusion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// JavaScript/TypeScript: `console.log(...)`, block and line comments excluded.
    JavaScript,
    /// PHP: `var_dump`, `print_r`, `dd`, `dump`, `error_log`, `ray`. No comment exclusion.
    Php,
    /// Python: `print`, `breakpoint`, `pdb.`, `ic`, plus imported debug aliases.
    Python,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::JavaScript => "javascript",
            Dialect::Php => "php",
            Dialect::Python => "python",
        }
    }

    /// File extensions handled by this dialect.
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            Dialect::JavaScript => &["js", "jsx", "ts", "tsx"],
            Dialect::Php => &["php"],
            Dialect::Python => &["py"],
        }
    }

    /// Determine the dialect from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" | "ts" | "tsx" => Some(Dialect::JavaScript),
            "php" => Some(Dialect::Php),
            "py" => Some(Dialect::Python),
            _ => None,
        }
    }

    /// Determine the dialect of a file from its path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension().and_then(|e| e.to_str())?;
        Self::from_extension(ext)
    }

    /// Short list of the debug calls this dialect looks for, used in advisories.
    pub fn signature_summary(&self) -> &'static str {
        match self {
            Dialect::JavaScript => "console.log",
            Dialect::Php => "var_dump/dd/dump/ray",
            Dialect::Python => "print/breakpoint/pdb/ic",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" | "typescript" | "ts" => Ok(Dialect::JavaScript),
            "php" => Ok(Dialect::Php),
            "python" | "py" => Ok(Dialect::Python),
            _ => Err(format!("unknown dialect: {}", s)),
        }
    }
}

/// A detected debug statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// 1-based line number.
    pub line: usize,
    /// The line exactly as it appears in the input.
    pub text: String,
}

impl Match {
    pub fn new(line: usize, text: &str) -> Self {
        Self {
            line,
            text: text.to_string(),
        }
    }
}

/// Content paired with the dialect it should be scanned as.
#[derive(Debug, Clone, Copy)]
pub struct ScanTarget<'a> {
    pub content: &'a str,
    pub dialect: Dialect,
}

impl<'a> ScanTarget<'a> {
    pub fn new(content: &'a str, dialect: Dialect) -> Self {
        Self { content, dialect }
    }

    /// Scan this target for debug statements.
    pub fn scan(&self) -> Vec<Match> {
        super::scan(self.content, self.dialect)
    }
}
