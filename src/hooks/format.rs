//! Auto-formatting after edits.
//!
//! Each formatter returns the advisory line to print on success, or `None`
//! when no formatter ran.

use std::path::Path;

use super::HookContext;
use crate::process::{run_quiet, CommandSpec};
use crate::project::find_ancestor_with;
use crate::report::formatted;

/// Markers identifying a PHP project with a formatter installed.
const PHP_FORMATTER_MARKERS: &[&str] = &[
    "vendor/bin/pint",
    ".php-cs-fixer.php",
    ".php-cs-fixer.dist.php",
];

/// Format a JS/TS file with Prettier.
pub fn format_js(file: &Path, ctx: &HookContext<'_>) -> Option<String> {
    let spec = CommandSpec::new("npx")
        .args(["prettier", "--write"])
        .arg(file.to_string_lossy())
        .cwd(&ctx.cwd)
        .timeout(ctx.config.tool_timeout());
    run_quiet(ctx.runner, &spec).map(|_| formatted("Prettier", file))
}

/// Format a PHP file with Pint, falling back to PHP-CS-Fixer.
pub fn format_php(file: &Path, ctx: &HookContext<'_>) -> Option<String> {
    let root = find_ancestor_with(file, PHP_FORMATTER_MARKERS)?;
    let pint = root.join("vendor/bin/pint");
    let fixer = root.join("vendor/bin/php-cs-fixer");
    let file_arg = file.to_string_lossy();

    let (name, spec) = if pint.exists() {
        let spec = CommandSpec::new(pint.to_string_lossy()).arg(file_arg);
        ("Pint", spec)
    } else if fixer.exists() {
        let spec = CommandSpec::new(fixer.to_string_lossy())
            .arg("fix")
            .arg(file_arg);
        ("PHP-CS-Fixer", spec)
    } else {
        return None;
    };

    let spec = spec.cwd(&root).timeout(ctx.config.tool_timeout());
    run_quiet(ctx.runner, &spec).map(|_| formatted(name, file))
}

/// Format a Python file with Ruff, falling back to Black.
pub fn format_python(file: &Path, ctx: &HookContext<'_>) -> Option<String> {
    let file_arg = file.to_string_lossy();
    let candidates = [
        ("Ruff", CommandSpec::new("ruff").arg("format").arg(file_arg.clone())),
        ("Black", CommandSpec::new("black").arg(file_arg)),
    ];

    candidates.into_iter().find_map(|(name, spec)| {
        let spec = spec.cwd(&ctx.cwd).timeout(ctx.config.tool_timeout());
        run_quiet(ctx.runner, &spec).map(|_| formatted(name, file))
    })
}
