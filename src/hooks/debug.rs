//! Debug-statement warnings for edited and modified files.

use std::path::Path;

use super::HookContext;
use crate::git::{is_git_repo, modified_files};
use crate::report::{debug_files_summary, debug_warning, modified_file_warning};
use crate::scan::{scan_file, Dialect};

/// Warn about debug statements left in an edited file.
pub fn warn_debug_code(file: &Path, dialect: Dialect, ctx: &HookContext<'_>) -> Vec<String> {
    let matches = scan_file(file, dialect);
    debug_warning(file, dialect, &matches, ctx.config.max_display_lines())
}

/// Scan every file modified since HEAD and list those with debug statements.
///
/// Outside a git repository this reports nothing.
pub fn check_modified_files(ctx: &HookContext<'_>) -> Vec<String> {
    let timeout = ctx.config.git_timeout();
    if !is_git_repo(ctx.runner, &ctx.cwd, timeout) {
        tracing::debug!(cwd = %ctx.cwd.display(), "not a git repository");
        return Vec::new();
    }

    let mut warnings: Vec<String> = modified_files(ctx.runner, &ctx.cwd, timeout)
        .into_iter()
        .filter(|file| !ctx.config.is_path_excluded(file))
        .filter_map(|file| {
            let dialect = Dialect::from_path(&file)?;
            if scan_file(ctx.cwd.join(&file), dialect).is_empty() {
                None
            } else {
                Some(modified_file_warning(&file, dialect))
            }
        })
        .collect();

    if !warnings.is_empty() {
        warnings.push(debug_files_summary(warnings.len()));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::process::{CommandOutput, CommandRunner, CommandSpec, ProcessError};
    use tempfile::TempDir;

    /// Answers git queries with a fixed list of modified files.
    struct FakeGit {
        in_repo: bool,
        modified: &'static str,
    }

    impl CommandRunner for FakeGit {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
            let success = self.in_repo;
            let stdout = if spec.args.first().map(String::as_str) == Some("diff") {
                self.modified.to_string()
            } else {
                ".git\n".to_string()
            };
            Ok(CommandOutput {
                success,
                code: Some(if success { 0 } else { 128 }),
                stdout,
                stderr: String::new(),
            })
        }
    }

    fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::write(root.join("app.js"), "/*\nconsole.log('hidden');\n*/\nconsole.log(1);\n").unwrap();
        std::fs::write(root.join("clean.ts"), "export const a = 1;\n").unwrap();
        std::fs::write(root.join("User.php"), "<?php\ndd($user);\n").unwrap();
        std::fs::write(root.join("tool.py"), "import pdb\npdb.set_trace()\n").unwrap();
        std::fs::write(root.join("README.md"), "console.log(1)\n").unwrap();
        temp
    }

    #[test]
    fn test_warn_debug_code_for_edited_file() {
        let temp = workspace();
        let config = Config::default();
        let git = FakeGit { in_repo: false, modified: "" };
        let ctx = HookContext::new(&config, &git, temp.path().to_path_buf());

        let file = temp.path().join("app.js");
        let lines = warn_debug_code(&file, Dialect::JavaScript, &ctx);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "  L4: console.log(1);");

        assert!(warn_debug_code(&temp.path().join("clean.ts"), Dialect::JavaScript, &ctx).is_empty());
    }

    #[test]
    fn test_check_modified_files() {
        let temp = workspace();
        let config = Config::default();
        let git = FakeGit {
            in_repo: true,
            modified: "app.js\nclean.ts\nUser.php\ntool.py\nREADME.md\ngone.js\n",
        };
        let ctx = HookContext::new(&config, &git, temp.path().to_path_buf());

        let lines = check_modified_files(&ctx);
        assert_eq!(
            lines,
            vec![
                "[Hook] WARNING: console.log found in app.js",
                "[Hook] WARNING: Debug code (var_dump/dd/dump/ray) found in User.php",
                "[Hook] WARNING: Debug code (print/breakpoint/pdb/ic) found in tool.py",
                "[Hook] 3 file(s) contain a debug statement",
            ]
        );
    }

    #[test]
    fn test_check_modified_files_respects_exclusions() {
        let temp = workspace();
        let config = Config {
            excluded_paths: vec!["*.php".to_string(), "*.py".to_string()],
            ..Default::default()
        };
        let git = FakeGit {
            in_repo: true,
            modified: "User.php\ntool.py\n",
        };
        let ctx = HookContext::new(&config, &git, temp.path().to_path_buf());
        assert!(check_modified_files(&ctx).is_empty());
    }

    #[test]
    fn test_check_modified_files_outside_repo() {
        let temp = workspace();
        let config = Config::default();
        let git = FakeGit {
            in_repo: false,
            modified: "app.js\n",
        };
        let ctx = HookContext::new(&config, &git, temp.path().to_path_buf());
        assert!(check_modified_files(&ctx).is_empty());
    }

    #[test]
    fn test_git_queries_use_configured_timeout() {
        struct Recording(std::cell::RefCell<Vec<std::time::Duration>>);

        impl CommandRunner for Recording {
            fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
                self.0.borrow_mut().push(spec.timeout);
                Ok(CommandOutput {
                    success: true,
                    code: Some(0),
                    stdout: String::new(),
                    stderr: String::new(),
                })
            }
        }

        let temp = workspace();
        let config = Config::parse_str("git_timeout_secs: 9\n").unwrap();
        let git = Recording(std::cell::RefCell::new(Vec::new()));
        let ctx = HookContext::new(&config, &git, temp.path().to_path_buf());

        assert!(check_modified_files(&ctx).is_empty());
        let nine = std::time::Duration::from_secs(9);
        assert_eq!(*git.0.borrow(), vec![nine, nine]);
    }
}
