//! Configuration for ecc-hooks.
//!
//! Every field is optional; a missing file means defaults.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use crate::hooks::HookKind;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["ecc-hooks.yaml", ".ecc-hooks.yaml"];

/// Default number of matched lines shown per file.
pub const DEFAULT_MAX_DISPLAY_LINES: usize = 5;
/// Default number of type-checker lines shown per file.
pub const DEFAULT_MAX_TOOL_ERRORS: usize = 10;
/// Default timeout for formatters and type checkers.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 60;
/// Default timeout for git queries.
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 5;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum matched lines listed in a debug-code warning.
    #[serde(default)]
    pub max_display_lines: Option<usize>,
    /// Maximum type-checker output lines listed per file.
    #[serde(default)]
    pub max_tool_errors: Option<usize>,
    /// Timeout in seconds for formatters and type checkers.
    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,
    /// Timeout in seconds for git queries.
    #[serde(default)]
    pub git_timeout_secs: Option<u64>,
    /// Hooks that never run (e.g. `check-typescript`).
    #[serde(default)]
    pub disabled_hooks: Vec<String>,
    /// Glob patterns for files hooks should leave alone (e.g. `**/generated/**`).
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// `excluded_paths` compiled on first use.
    #[serde(skip)]
    pub(crate) exclusions: OnceLock<GlobSet>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn max_display_lines(&self) -> usize {
        self.max_display_lines.unwrap_or(DEFAULT_MAX_DISPLAY_LINES)
    }

    pub fn max_tool_errors(&self) -> usize {
        self.max_tool_errors.unwrap_or(DEFAULT_MAX_TOOL_ERRORS)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs.unwrap_or(DEFAULT_TOOL_TIMEOUT_SECS))
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs.unwrap_or(DEFAULT_GIT_TIMEOUT_SECS))
    }

    /// Whether the given hook is enabled.
    pub fn is_enabled(&self, hook: HookKind) -> bool {
        !self.disabled_hooks.iter().any(|h| h == hook.as_str())
    }

    /// Check if a path should be excluded based on `excluded_paths` patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }
        self.exclusions
            .get_or_init(|| build_glob_set(&self.excluded_paths))
            .is_match(path)
    }
}

/// Compile patterns into one matcher. Invalid patterns are skipped.
fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => tracing::debug!(pattern = %pattern, error = %e, "skipping exclusion"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "failed to build exclusions");
        GlobSet::empty()
    })
}

/// Per-user config file in the platform config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "ecc-hooks").map(|d| d.config_dir().join("config.yaml"))
}

/// Find a config file: working directory first, then the user config dir.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .chain(user_config_path())
        .find(|path| path.is_file())
}

/// Load and validate the config for `cwd`, or defaults if none exists.
pub fn load(cwd: &Path) -> anyhow::Result<Config> {
    match discover(cwd) {
        Some(path) => {
            let config = Config::parse_file(&path)
                .map_err(|e| anyhow::anyhow!("parsing {}: {}", path.display(), e))?;
            validate(&config)?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Load the config, falling back to defaults on any error.
///
/// Hooks must never fail because of a broken config file.
pub fn load_or_default(cwd: &Path) -> Config {
    load(cwd).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid config");
        Config::default()
    })
}

/// Validate a config for semantic errors.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for name in &config.disabled_hooks {
        if HookKind::parse(name).is_none() {
            anyhow::bail!("unknown hook {:?} in disabled_hooks", name);
        }
    }

    for pattern in &config.excluded_paths {
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    if config.max_display_lines == Some(0) {
        anyhow::bail!("max_display_lines must be at least 1");
    }
    if config.max_tool_errors == Some(0) {
        anyhow::bail!("max_tool_errors must be at least 1");
    }
    if config.tool_timeout_secs == Some(0) || config.git_timeout_secs == Some(0) {
        anyhow::bail!("timeouts must be at least 1 second");
    }

    Ok(())
}
