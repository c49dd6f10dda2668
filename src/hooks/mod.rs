//! Hook implementations.
//!
//! Every hook is fail-open: a missing tool, an unreadable file or a bad
//! payload produces no output rather than an error.

mod bash;
mod debug;
mod dispatcher;
mod format;
mod typecheck;
mod types;

pub use bash::{bash_advisories, pr_created_advisories};
pub use debug::{check_modified_files, warn_debug_code};
pub use dispatcher::{chain_for_file, dispatch, run_file_chain};
pub use format::{format_js, format_php, format_python};
pub use typecheck::{check_mypy, check_phpstan, check_typescript};
pub use types::{HookEvent, HookInput, HookOutcome};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::process::CommandRunner;
use crate::scan::Dialect;

/// Every hook the binary can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    FormatJs,
    WarnConsoleLog,
    CheckTypescript,
    FormatPhp,
    CheckPhpstan,
    WarnPhpDebug,
    FormatPython,
    CheckMypy,
    WarnPythonDebug,
    CheckDebugCode,
    PreBash,
    PrUrl,
}

impl HookKind {
    pub const ALL: [HookKind; 12] = [
        HookKind::FormatJs,
        HookKind::WarnConsoleLog,
        HookKind::CheckTypescript,
        HookKind::FormatPhp,
        HookKind::CheckPhpstan,
        HookKind::WarnPhpDebug,
        HookKind::FormatPython,
        HookKind::CheckMypy,
        HookKind::WarnPythonDebug,
        HookKind::CheckDebugCode,
        HookKind::PreBash,
        HookKind::PrUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::FormatJs => "format-js",
            HookKind::WarnConsoleLog => "warn-console-log",
            HookKind::CheckTypescript => "check-typescript",
            HookKind::FormatPhp => "format-php",
            HookKind::CheckPhpstan => "check-phpstan",
            HookKind::WarnPhpDebug => "warn-php-debug",
            HookKind::FormatPython => "format-python",
            HookKind::CheckMypy => "check-mypy",
            HookKind::WarnPythonDebug => "warn-python-debug",
            HookKind::CheckDebugCode => "check-debug-code",
            HookKind::PreBash => "pre-bash",
            HookKind::PrUrl => "pr-url",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// The dialect of files this hook works on, for per-file hooks.
    pub fn dialect(&self) -> Option<Dialect> {
        match self {
            HookKind::FormatJs | HookKind::WarnConsoleLog | HookKind::CheckTypescript => {
                Some(Dialect::JavaScript)
            }
            HookKind::FormatPhp | HookKind::CheckPhpstan | HookKind::WarnPhpDebug => {
                Some(Dialect::Php)
            }
            HookKind::FormatPython | HookKind::CheckMypy | HookKind::WarnPythonDebug => {
                Some(Dialect::Python)
            }
            HookKind::CheckDebugCode | HookKind::PreBash | HookKind::PrUrl => None,
        }
    }

    /// Whether a per-file hook should run for `path`.
    pub fn applies_to(&self, path: &Path) -> bool {
        match self {
            HookKind::CheckTypescript => is_typescript(path),
            _ => match self.dialect() {
                Some(dialect) => Dialect::from_path(path) == Some(dialect),
                None => false,
            },
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `.ts` and `.tsx` files, the only ones the TypeScript check looks at.
pub fn is_typescript(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("ts") | Some("tsx")
    )
}

/// Everything a hook needs besides its payload.
pub struct HookContext<'a> {
    pub config: &'a Config,
    pub runner: &'a dyn CommandRunner,
    /// Directory relative paths are resolved against.
    pub cwd: PathBuf,
}

impl<'a> HookContext<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner, cwd: PathBuf) -> Self {
        Self {
            config,
            runner,
            cwd,
        }
    }

    /// Make a payload path absolute.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Resolve the payload's file path, unless it is excluded by config.
    fn target_file(&self, input: &HookInput) -> Option<PathBuf> {
        let file = self.resolve(input.file_path()?);
        if self.config.is_path_excluded(&file) {
            tracing::debug!(file = %file.display(), "file excluded by config");
            return None;
        }
        Some(file)
    }
}

/// Run a single hook against a payload.
pub fn run_hook(kind: HookKind, input: &HookInput, ctx: &HookContext<'_>) -> HookOutcome {
    if !ctx.config.is_enabled(kind) {
        tracing::debug!(hook = %kind, "hook disabled by config");
        return HookOutcome::empty();
    }

    match kind {
        HookKind::CheckDebugCode => {
            return HookOutcome::advise(check_modified_files(ctx));
        }
        HookKind::PreBash => {
            return match input.command() {
                Some(command) if input.is_bash() || input.tool_name().is_none() => {
                    bash_advisories(command)
                }
                _ => HookOutcome::empty(),
            };
        }
        HookKind::PrUrl => {
            let command = input.command().unwrap_or("");
            let output = input.tool_output().unwrap_or_default();
            return HookOutcome::advise(pr_created_advisories(command, &output));
        }
        _ => {}
    }

    let Some(file) = ctx.target_file(input) else {
        return HookOutcome::empty();
    };
    if !kind.applies_to(&file) {
        return HookOutcome::empty();
    }
    run_file_hook(kind, &file, ctx)
}

/// Run a per-file hook. The caller has already checked `applies_to`.
pub(crate) fn run_file_hook(kind: HookKind, file: &Path, ctx: &HookContext<'_>) -> HookOutcome {
    let messages = match kind {
        HookKind::FormatJs => format_js(file, ctx).into_iter().collect(),
        HookKind::FormatPhp => format_php(file, ctx).into_iter().collect(),
        HookKind::FormatPython => format_python(file, ctx).into_iter().collect(),
        HookKind::CheckTypescript => check_typescript(file, ctx),
        HookKind::CheckPhpstan => check_phpstan(file, ctx),
        HookKind::CheckMypy => check_mypy(file, ctx),
        HookKind::WarnConsoleLog => warn_debug_code(file, Dialect::JavaScript, ctx),
        HookKind::WarnPhpDebug => warn_debug_code(file, Dialect::Php, ctx),
        HookKind::WarnPythonDebug => warn_debug_code(file, Dialect::Python, ctx),
        HookKind::CheckDebugCode | HookKind::PreBash | HookKind::PrUrl => Vec::new(),
    };
    HookOutcome::advise(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_names_round_trip() {
        for kind in HookKind::ALL {
            assert_eq!(HookKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(HookKind::parse("format-rust"), None);
    }

    #[test]
    fn test_applies_to() {
        assert!(HookKind::FormatJs.applies_to(Path::new("a.jsx")));
        assert!(HookKind::WarnConsoleLog.applies_to(Path::new("a.ts")));
        assert!(HookKind::CheckTypescript.applies_to(Path::new("a.tsx")));
        assert!(!HookKind::CheckTypescript.applies_to(Path::new("a.js")));
        assert!(HookKind::CheckPhpstan.applies_to(Path::new("User.php")));
        assert!(!HookKind::CheckMypy.applies_to(Path::new("User.php")));
        assert!(!HookKind::PreBash.applies_to(Path::new("a.py")));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let config = Config::default();
        let runner = crate::process::SystemRunner::new();
        let ctx = HookContext::new(&config, &runner, PathBuf::from("/work"));
        assert_eq!(ctx.resolve("src/a.ts"), PathBuf::from("/work/src/a.ts"));
        assert_eq!(ctx.resolve("/abs/b.py"), PathBuf::from("/abs/b.py"));
    }
}
