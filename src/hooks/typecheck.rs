//! Type checking after edits.
//!
//! Checkers report findings through a failing exit, so output is only
//! inspected when the command ran and did not succeed.

use std::path::Path;

use super::HookContext;
use crate::process::{CommandOutput, CommandSpec};
use crate::project::find_ancestor_with;
use crate::report::tool_errors;

/// Run a checker and return its output if it reported problems.
fn run_checker(spec: CommandSpec, ctx: &HookContext<'_>) -> Option<CommandOutput> {
    let spec = spec.timeout(ctx.config.tool_timeout());
    match ctx.runner.run(&spec) {
        Ok(output) if output.success => None,
        Ok(output) => Some(output),
        Err(e) => {
            tracing::debug!(command = %spec.display(), error = %e, "type checker did not run");
            None
        }
    }
}

/// Keep the lines `keep` accepts, up to the configured limit.
fn select_lines<F>(text: &str, limit: usize, keep: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    text.lines()
        .filter(|&line| keep(line))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// `tsc --noEmit` in the nearest directory with a `tsconfig.json`.
pub fn check_typescript(file: &Path, ctx: &HookContext<'_>) -> Vec<String> {
    let Some(project) = find_ancestor_with(file, &["tsconfig.json"]) else {
        return Vec::new();
    };
    let spec = CommandSpec::new("npx").args(["tsc", "--noEmit"]).cwd(&project);
    let Some(output) = run_checker(spec, ctx) else {
        return Vec::new();
    };

    let base_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let limit = ctx.config.max_tool_errors();
    let errors = select_lines(&output.combined(), limit, |line| line.contains(&base_name));
    tool_errors("TypeScript", file, &errors, limit)
}

/// PHPStan analysis of a single file.
pub fn check_phpstan(file: &Path, ctx: &HookContext<'_>) -> Vec<String> {
    let Some(project) = find_ancestor_with(file, &["vendor/bin/phpstan"]) else {
        return Vec::new();
    };
    let phpstan = project.join("vendor/bin/phpstan");
    let spec = CommandSpec::new(phpstan.to_string_lossy())
        .args(["analyse", "--error-format=raw"])
        .arg(file.to_string_lossy())
        .cwd(&project);
    let Some(output) = run_checker(spec, ctx) else {
        return Vec::new();
    };

    let limit = ctx.config.max_tool_errors();
    let errors = select_lines(&output.stdout, limit, |line| !line.trim().is_empty());
    tool_errors("PHPStan", file, &errors, limit)
}

/// mypy in the nearest directory with a `pyproject.toml` or `mypy.ini`.
pub fn check_mypy(file: &Path, ctx: &HookContext<'_>) -> Vec<String> {
    let Some(project) = find_ancestor_with(file, &["pyproject.toml", "mypy.ini"]) else {
        return Vec::new();
    };
    let spec = CommandSpec::new("mypy")
        .arg("--no-error-summary")
        .arg(file.to_string_lossy())
        .cwd(&project);
    let Some(output) = run_checker(spec, ctx) else {
        return Vec::new();
    };

    let limit = ctx.config.max_tool_errors();
    let errors = select_lines(&output.combined(), limit, |line| line.contains(": error:"));
    tool_errors("mypy", file, &errors, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::process::{CommandRunner, ProcessError};
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Returns a canned result for every command.
    struct CannedRunner {
        output: Option<CommandOutput>,
        calls: RefCell<Vec<CommandSpec>>,
    }

    impl CannedRunner {
        fn failing(stdout: &str) -> Self {
            Self {
                output: Some(CommandOutput {
                    success: false,
                    code: Some(1),
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn passing() -> Self {
            Self {
                output: Some(CommandOutput {
                    success: true,
                    code: Some(0),
                    ..Default::default()
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn missing() -> Self {
            Self {
                output: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for CannedRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
            self.calls.borrow_mut().push(spec.clone());
            self.output
                .clone()
                .ok_or_else(|| ProcessError::NotFound(spec.program.clone()))
        }
    }

    fn project_with(marker: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join(marker);
        std::fs::create_dir_all(marker.parent().unwrap()).unwrap();
        std::fs::write(marker, "").unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        temp
    }

    #[test]
    fn test_typescript_errors_filtered_by_file() {
        let temp = project_with("tsconfig.json");
        let file = temp.path().join("src/app.ts");
        let runner = CannedRunner::failing(
            "src/app.ts(3,7): error TS2322: Type 'string' is not assignable.\n\
             src/other.ts(1,1): error TS1005: ';' expected.\n",
        );
        let config = Config::default();
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());

        let lines = check_typescript(&file, &ctx);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[Hook] TypeScript errors in {}:", file.display()));
        assert!(lines[1].starts_with("  src/app.ts(3,7)"));

        let calls = runner.calls.borrow();
        assert_eq!(calls[0].display(), "npx tsc --noEmit");
        assert_eq!(calls[0].cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_typescript_without_tsconfig_runs_nothing() {
        let temp = TempDir::new().unwrap();
        let runner = CannedRunner::failing("app.ts: error");
        let config = Config::default();
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());

        assert!(check_typescript(&temp.path().join("app.ts"), &ctx).is_empty());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_passing_checker_is_quiet() {
        let temp = project_with("pyproject.toml");
        let runner = CannedRunner::passing();
        let config = Config::default();
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());
        assert!(check_mypy(&temp.path().join("src/app.py"), &ctx).is_empty());
    }

    #[test]
    fn test_missing_checker_is_quiet() {
        let temp = project_with("mypy.ini");
        let runner = CannedRunner::missing();
        let config = Config::default();
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());
        assert!(check_mypy(&temp.path().join("src/app.py"), &ctx).is_empty());
    }

    #[test]
    fn test_mypy_keeps_error_lines_only() {
        let temp = project_with("pyproject.toml");
        let file = temp.path().join("src/app.py");
        let runner = CannedRunner::failing(
            "src/app.py:4: error: Incompatible types\n\
             src/app.py:4: note: See docs\n\
             src/app.py:9: error: Name \"x\" is not defined\n",
        );
        let config = Config::default();
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());

        let lines = check_mypy(&file, &ctx);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("[Hook] mypy errors in {}:", file.display()));
        assert!(lines.iter().skip(1).all(|l| l.contains(": error:")));
    }

    #[test]
    fn test_phpstan_output_is_capped() {
        let temp = project_with("vendor/bin/phpstan");
        let file = temp.path().join("src/User.php");
        let stdout: String = (1..=15)
            .map(|n| format!("{}:{}:Undefined variable\n\n", file.display(), n))
            .collect();
        let runner = CannedRunner::failing(&stdout);
        let config = Config {
            max_tool_errors: Some(4),
            ..Default::default()
        };
        let ctx = HookContext::new(&config, &runner, temp.path().to_path_buf());

        let lines = check_phpstan(&file, &ctx);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], format!("[Hook] PHPStan errors in {}:", file.display()));
        assert_eq!(runner.calls.borrow()[0].args[0], "analyse");
    }
}
