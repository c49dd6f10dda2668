//! ecc-hooks - lifecycle hooks for AI coding agents.
//!
//! The hooks run after a coding agent edits files or runs shell commands.
//! They format edited files, run the project's type checker and warn about
//! debug statements left behind.
//!
//! # Architecture
//!
//! - `scan`: Pure debug-statement scanner for JavaScript/TypeScript, PHP and Python
//! - `hooks`: Individual hooks, payload types and the event dispatcher
//! - `session`: Aggregated state for hosts that stream session events
//! - `process`: External command runner (formatters, type checkers, git)
//! - `config`: YAML configuration
//! - `report`: Advisory lines and scan reports
//!
//! Hooks never fail the host. Missing tools, unreadable files and malformed
//! payloads all produce no output.

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;
pub mod logging;
pub mod process;
pub mod project;
pub mod report;
pub mod scan;
pub mod session;

pub use config::Config;
pub use hooks::{dispatch, run_hook, HookContext, HookEvent, HookInput, HookKind, HookOutcome};
pub use process::{CommandRunner, SystemRunner};
pub use scan::{scan, Dialect, Match};
pub use session::{SessionContext, SessionEvent};
