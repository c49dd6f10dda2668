//! Command-line interface for ecc-hooks.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, Config};
use crate::hooks::{self, HookContext, HookEvent, HookInput, HookKind, HookOutcome};
use crate::process::SystemRunner;
use crate::report;
use crate::scan::{self, Dialect};
use crate::session::{SessionContext, SessionEvent};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config template written by `init`.
const CONFIG_TEMPLATE: &str = include_str!("templates/ecc-hooks.yaml");

/// Lifecycle hooks for AI coding agents.
///
/// Formats edited files, runs type checkers and warns about debug
/// statements left in JavaScript/TypeScript, PHP and Python code.
#[derive(Parser)]
#[command(name = "ecc-hooks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single hook with the payload on stdin
    Run(RunArgs),
    /// Route a host event to the hooks that handle it
    Dispatch(DispatchArgs),
    /// Process a stream of session events, one JSON object per line
    Session,
    /// Scan files for debug statements
    Scan(ScanArgs),
    /// Write a default config file
    Init(InitArgs),
    /// Validate a config file
    CheckConfig(CheckConfigArgs),
}

/// Arguments for the run command.
#[derive(Parser)]
pub struct RunArgs {
    /// Hook to run
    #[arg(value_enum)]
    pub hook: HookKind,
}

/// Arguments for the dispatch command.
#[derive(Parser)]
pub struct DispatchArgs {
    /// Host event name (e.g. PostToolUse, pre-tool-use, stop)
    pub event: String,
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "ecc-hooks.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the check-config command.
#[derive(Parser)]
pub struct CheckConfigArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// =============================================================================
// Hook protocol
// =============================================================================

/// Read all of stdin as raw bytes. A read error keeps whatever arrived.
fn read_stdin() -> Vec<u8> {
    let mut raw = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut raw) {
        tracing::debug!(error = %e, "failed to read stdin");
    }
    raw
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Build a hook context for the payload's working directory and run `f`.
fn with_context<R>(input: Option<&HookInput>, f: impl FnOnce(&HookContext<'_>) -> R) -> R {
    let cwd = input
        .and_then(HookInput::cwd)
        .map(PathBuf::from)
        .unwrap_or_else(current_dir);
    let config = config::load_or_default(&cwd);
    let runner = SystemRunner::new();
    let ctx = HookContext::new(&config, &runner, cwd);
    f(&ctx)
}

/// Run `handle` on a raw payload. Anything that is not a JSON object runs
/// nothing.
pub fn process_payload<F>(raw: &str, handle: F) -> HookOutcome
where
    F: FnOnce(&HookInput) -> HookOutcome,
{
    match HookInput::parse(raw) {
        Some(input) => handle(&input),
        None => HookOutcome::empty(),
    }
}

/// Advisories to stderr, the untouched payload bytes to stdout.
fn emit(raw: &[u8], outcome: &HookOutcome) -> i32 {
    for message in &outcome.messages {
        eprintln!("{}", message);
    }
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(raw)
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        tracing::debug!(error = %e, "failed to echo payload");
    }
    outcome.exit_code()
}

/// Run the run command.
pub fn run_hook(args: &RunArgs) -> anyhow::Result<i32> {
    let raw = read_stdin();
    let outcome = process_payload(&String::from_utf8_lossy(&raw), |input| {
        with_context(Some(input), |ctx| hooks::run_hook(args.hook, input, ctx))
    });
    Ok(emit(&raw, &outcome))
}

/// Run the dispatch command.
pub fn run_dispatch(args: &DispatchArgs) -> anyhow::Result<i32> {
    let raw = read_stdin();
    let outcome = match HookEvent::from_arg(&args.event) {
        Some(event) => process_payload(&String::from_utf8_lossy(&raw), |input| {
            with_context(Some(input), |ctx| hooks::dispatch(event, input, ctx))
        }),
        None => {
            tracing::debug!(event = %args.event, "unknown event");
            HookOutcome::empty()
        }
    };
    Ok(emit(&raw, &outcome))
}

/// Feed each line of `reader` to the session and pass its messages to `out`.
///
/// Lines are decoded lossily; a line that is not an event is skipped. A read
/// error ends the stream.
pub fn process_session<R: BufRead>(
    mut reader: R,
    ctx: &HookContext<'_>,
    mut out: impl FnMut(&str),
) {
    let mut session = SessionContext::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "failed to read session stream");
                break;
            }
        }
        let Some(event) = SessionEvent::parse(&String::from_utf8_lossy(&buf)) else {
            continue;
        };
        for message in session.handle(event, ctx) {
            out(&message);
        }
    }
}

/// Run the session command until stdin closes.
pub fn run_session() -> anyhow::Result<i32> {
    let stdin = io::stdin();
    with_context(None, |ctx| {
        process_session(stdin.lock(), ctx, |message| eprintln!("{}", message));
    });
    Ok(EXIT_SUCCESS)
}

// =============================================================================
// Scan
// =============================================================================

/// Collect files with a known dialect under `root`.
pub fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and dependency directories
            !(name.starts_with('.') || name == "node_modules" || name == "vendor")
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() && Dialect::from_path(entry.path()).is_some() {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Load the config named on the command line, or discover one.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => {
            let config = Config::parse_file(path)
                .map_err(|e| anyhow::anyhow!("parsing {}: {}", path.display(), e))?;
            config::validate(&config)?;
            Ok(config)
        }
        None => config::load(&current_dir()),
    }
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files: Vec<PathBuf> = if metadata.is_dir() {
        collect_files(&args.path)?
    } else {
        vec![args.path.clone()]
    };
    let files: Vec<PathBuf> = files
        .into_iter()
        .filter(|f| !config.is_path_excluded(f))
        .collect();

    let results = scan::scan_paths(&files);
    let path_str = args.path.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &results)?,
        _ => report::write_pretty(&path_str, &results),
    }

    if report::total_matches(&results) > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

// =============================================================================
// Config commands
// =============================================================================

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to pick another path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: ecc-hooks check-config --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// Run the check-config command.
pub fn run_check_config(args: &CheckConfigArgs) -> anyhow::Result<i32> {
    let path = match args.config.clone().or_else(|| config::discover(&current_dir())) {
        Some(p) => p,
        None => {
            println!("No config file found, using defaults");
            return Ok(EXIT_SUCCESS);
        }
    };

    match load_config(Some(&path)) {
        Ok(config) => {
            println!("{} is valid", path.display());
            if !config.disabled_hooks.is_empty() {
                println!("  disabled hooks: {}", config.disabled_hooks.join(", "));
            }
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_ERROR)
        }
    }
}
