//! External command execution for formatters, type checkers and git.
//!
//! Hooks go through the [`CommandRunner`] trait so tests can substitute a
//! recording fake. A non-zero exit status is not an error here: linters
//! report their findings through failing exits, so callers inspect
//! [`CommandOutput::success`] themselves.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for tool invocations without an explicit one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that can occur while running an external command.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("runtime error: {0}")]
    Runtime(#[from] io::Error),
}

/// A command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program and arguments joined for display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }
}

/// Runs external commands.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError>;
}

/// Runs commands on the host system, enforcing each spec's timeout.
///
/// The child is killed if the timeout elapses. Stdin is closed so tools
/// that prompt never wait on the hook's own input.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()?;

        runtime.block_on(async {
            let mut command = tokio::process::Command::new(&spec.program);
            command
                .args(&spec.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);
            if let Some(dir) = &spec.cwd {
                command.current_dir(dir);
            }

            let child = command.spawn().map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    ProcessError::NotFound(spec.program.clone())
                } else {
                    ProcessError::Spawn {
                        program: spec.program.clone(),
                        source: e,
                    }
                }
            })?;

            let output = tokio::time::timeout(spec.timeout, child.wait_with_output())
                .await
                .map_err(|_| ProcessError::Timeout(spec.display(), spec.timeout))??;

            Ok::<_, ProcessError>(CommandOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        })
    }
}

/// Run a command and keep its output only if it exited successfully.
///
/// Any failure is logged at debug level and mapped to `None`.
pub fn run_quiet(runner: &dyn CommandRunner, spec: &CommandSpec) -> Option<CommandOutput> {
    match runner.run(spec) {
        Ok(output) if output.success => Some(output),
        Ok(output) => {
            tracing::debug!(command = %spec.display(), code = ?output.code, "command failed");
            None
        }
        Err(e) => {
            tracing::debug!(command = %spec.display(), error = %e, "command did not run");
            None
        }
    }
}

/// Whether a tool is on PATH.
pub fn is_available(runner: &dyn CommandRunner, tool: &str) -> bool {
    let spec = CommandSpec::new("which")
        .arg(tool)
        .timeout(Duration::from_secs(5));
    run_quiet(runner, &spec).is_some()
}
