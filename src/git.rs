//! Git queries used by the session-end debug check.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::process::{run_quiet, CommandRunner, CommandSpec};

/// Whether `cwd` is inside a git work tree.
pub fn is_git_repo(runner: &dyn CommandRunner, cwd: &Path, timeout: Duration) -> bool {
    let spec = CommandSpec::new("git")
        .args(["rev-parse", "--git-dir"])
        .cwd(cwd)
        .timeout(timeout);
    run_quiet(runner, &spec).is_some()
}

/// Files changed relative to HEAD that still exist on disk.
///
/// Paths are returned relative to `cwd` as git prints them. Any git failure
/// yields an empty list.
pub fn modified_files(runner: &dyn CommandRunner, cwd: &Path, timeout: Duration) -> Vec<PathBuf> {
    let spec = CommandSpec::new("git")
        .args(["diff", "--name-only", "HEAD"])
        .cwd(cwd)
        .timeout(timeout);

    let Some(output) = run_quiet(runner, &spec) else {
        return Vec::new();
    };

    output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(PathBuf::from)
        .filter(|path| cwd.join(path).exists())
        .collect()
}
