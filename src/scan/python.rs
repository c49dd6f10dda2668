//! Debug-statement detection for Python.
//!
//! Beyond the fixed call signatures, names imported from debug tooling
//! modules (`from pdb import set_trace as brk`) are remembered and their
//! later calls reported too. Only whole-line `#` comments are skipped.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;
use std::collections::HashSet;

use super::comments::starts_with_marker;
use super::Match;

/// Which names a debug module import registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportScope {
    /// Every imported name is a debug helper.
    All,
    /// Only `print` is a debug helper (e.g. `rich`).
    PrintOnly,
}

/// Modules whose imports are treated as debug tooling.
static DEBUG_MODULES: phf::Map<&'static str, ImportScope> = phf_map! {
    "pdb" => ImportScope::All,
    "ipdb" => ImportScope::All,
    "pudb" => ImportScope::All,
    "icecream" => ImportScope::All,
    "pprint" => ImportScope::All,
    "rich" => ImportScope::PrintOnly,
};

lazy_static! {
    static ref DEBUG_CALL: Regex = Regex::new(r"\b(print|pprint|breakpoint|ic)\s*\(").unwrap();
    static ref DEBUGGER_ATTR: Regex = Regex::new(r"\b(pdb|ipdb|pudb)\.").unwrap();
    static ref FROM_IMPORT: Regex =
        Regex::new(r"\bfrom\s+([A-Za-z_][A-Za-z0-9_]*)\s+import\s+(.+)").unwrap();
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
    static ref AS_SEPARATOR: Regex = Regex::new(r"\s+as\s+").unwrap();
}

/// Local names bound to debug helpers during a single scan.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    names: HashSet<String>,
    calls: Vec<Regex>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a local name. Returns false if it was already known or is
    /// not a valid identifier.
    pub fn register(&mut self, name: &str) -> bool {
        if !IDENTIFIER.is_match(name) || self.names.contains(name) {
            return false;
        }
        let call = format!(r"\b{}\s*\(", regex::escape(name));
        match Regex::new(&call) {
            Ok(re) => {
                self.names.insert(name.to_string());
                self.calls.push(re);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the line calls any registered alias.
    pub fn is_called_in(&self, line: &str) -> bool {
        self.calls.iter().any(|re| re.is_match(line))
    }
}

/// One imported name, before and after an optional `as` rename.
#[derive(Debug, PartialEq, Eq)]
struct ImportedName<'a> {
    original: &'a str,
    local: &'a str,
}

/// Split the name list of a `from x import ...` statement.
fn parse_imported_names(list: &str) -> Vec<ImportedName<'_>> {
    let list = list.split('#').next().unwrap_or("");

    list.split(',')
        .filter_map(|item| {
            let item = item.trim().trim_matches(|c| c == '(' || c == ')').trim();
            if item.is_empty() {
                return None;
            }
            let mut parts = AS_SEPARATOR.split(item);
            let original = parts.next()?.trim();
            let local = parts.last().map(str::trim).unwrap_or(original);
            Some(ImportedName { original, local })
        })
        .collect()
}

/// If the line imports from a debug module, register its names and return true.
fn register_debug_import(line: &str, aliases: &mut AliasRegistry) -> bool {
    let Some(caps) = FROM_IMPORT.captures(line) else {
        return false;
    };
    let module = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let Some(scope) = DEBUG_MODULES.get(module) else {
        return false;
    };
    let names = parse_imported_names(caps.get(2).map(|m| m.as_str()).unwrap_or(""));

    match scope {
        ImportScope::All => {
            for name in &names {
                aliases.register(name.local);
            }
            true
        }
        ImportScope::PrintOnly => {
            let mut found = false;
            for name in names.iter().filter(|n| n.original == "print") {
                aliases.register(name.local);
                found = true;
            }
            found
        }
    }
}

pub(super) fn scan_python(content: &str) -> Vec<Match> {
    let mut aliases = AliasRegistry::new();
    let mut matches = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        if starts_with_marker(line, "#") {
            continue;
        }

        // Checked before the import so a line can't match its own alias.
        let is_debug_call = DEBUG_CALL.is_match(line)
            || DEBUGGER_ATTR.is_match(line)
            || aliases.is_called_in(line);
        let is_debug_import = register_debug_import(line, &mut aliases);

        if is_debug_call || is_debug_import {
            matches.push(Match::new(idx + 1, line));
        }
    }

    matches
}
