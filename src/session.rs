//! Long-lived session state for hosts that stream events.
//!
//! A [`SessionContext`] is owned by whoever reads the event stream and is
//! passed explicitly to every handler. Nothing here is global, so two
//! sessions in one process never see each other's edits.

use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::SystemTime;

use crate::hooks::{
    dispatch, is_typescript, run_hook, HookContext, HookEvent, HookInput, HookKind,
};
use crate::process::{is_available, run_quiet, CommandSpec};
use crate::report::join_line_numbers;
use crate::scan::{scan_file, Dialect};

/// One event from the host, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    #[serde(rename = "session.created")]
    SessionCreated,
    #[serde(rename = "file.edited")]
    FileEdited { path: String },
    #[serde(rename = "file.watcher.updated")]
    FileWatcherUpdated { path: String },
    #[serde(rename = "permission.asked")]
    PermissionAsked { tool: String },
    #[serde(rename = "todo.updated")]
    TodoUpdated { todos: Vec<Todo> },
    #[serde(rename = "tool.execute.before")]
    ToolExecuteBefore {
        tool: String,
        #[serde(default)]
        args: Value,
    },
    #[serde(rename = "tool.execute.after")]
    ToolExecuteAfter {
        tool: String,
        #[serde(default)]
        args: Value,
        #[serde(default)]
        output: Value,
    },
    #[serde(rename = "session.idle")]
    SessionIdle,
    #[serde(rename = "session.deleted")]
    SessionDeleted,
}

impl SessionEvent {
    /// Parse one line of the event stream. Blank or malformed lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring session event");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub done: bool,
}

/// A permission request seen during the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    pub tool: String,
    pub at: SystemTime,
}

/// Aggregated state for one host session.
#[derive(Debug, Default)]
pub struct SessionContext {
    edited_files: BTreeSet<String>,
    console_logs: BTreeMap<String, Vec<usize>>,
    permissions: Vec<PermissionRequest>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edited_files(&self) -> impl Iterator<Item = &str> {
        self.edited_files.iter().map(String::as_str)
    }

    /// Line numbers of `console.log` calls recorded for `file`.
    pub fn console_log_lines(&self, file: &str) -> Option<&[usize]> {
        self.console_logs.get(file).map(Vec::as_slice)
    }

    pub fn permissions(&self) -> &[PermissionRequest] {
        &self.permissions
    }

    pub fn clear(&mut self) {
        self.edited_files.clear();
        self.console_logs.clear();
        self.permissions.clear();
    }

    /// Handle one event and return the advisory lines it produced.
    pub fn handle(&mut self, event: SessionEvent, ctx: &HookContext<'_>) -> Vec<String> {
        match event {
            SessionEvent::SessionCreated => {
                self.clear();
                Vec::new()
            }
            SessionEvent::FileEdited { path } => self.file_edited(path, ctx),
            SessionEvent::FileWatcherUpdated { path } => self.file_changed_externally(path),
            SessionEvent::PermissionAsked { tool } => {
                self.permissions.push(PermissionRequest {
                    tool,
                    at: SystemTime::now(),
                });
                Vec::new()
            }
            SessionEvent::TodoUpdated { todos } => task_progress(&todos).into_iter().collect(),
            SessionEvent::ToolExecuteBefore { tool, args } => {
                let input = HookInput::new(json!({ "tool": tool, "args": args }));
                let outcome = dispatch(HookEvent::PreToolUse, &input, ctx);
                if outcome.block {
                    tracing::debug!(tool = %tool, "session events cannot block a tool call");
                }
                outcome.messages
            }
            SessionEvent::ToolExecuteAfter { tool, args, output } => {
                let input = HookInput::new(json!({ "tool": tool, "args": args, "output": output }));
                dispatch(HookEvent::PostToolUse, &input, ctx).messages
            }
            SessionEvent::SessionIdle => {
                let lines = self.idle_summary();
                self.clear();
                lines
            }
            SessionEvent::SessionDeleted => {
                let lines = run_hook(HookKind::CheckDebugCode, &HookInput::new(json!({})), ctx).messages;
                self.clear();
                lines
            }
        }
    }

    fn file_edited(&mut self, path: String, ctx: &HookContext<'_>) -> Vec<String> {
        if path.is_empty() {
            return Vec::new();
        }
        self.edited_files.insert(path.clone());

        let file = ctx.resolve(&path);
        if Dialect::from_path(&file) != Some(Dialect::JavaScript) || ctx.config.is_path_excluded(&file) {
            return Vec::new();
        }

        if ctx.config.is_enabled(HookKind::FormatJs) && is_available(ctx.runner, "prettier") {
            let spec = CommandSpec::new("prettier")
                .arg("--write")
                .arg(file.to_string_lossy())
                .cwd(&ctx.cwd)
                .timeout(ctx.config.tool_timeout());
            run_quiet(ctx.runner, &spec);
        }

        if !ctx.config.is_enabled(HookKind::WarnConsoleLog) {
            return Vec::new();
        }
        let lines: Vec<usize> = scan_file(&file, Dialect::JavaScript)
            .into_iter()
            .map(|m| m.line)
            .collect();
        if lines.is_empty() {
            self.console_logs.remove(&path);
            return Vec::new();
        }

        let message = format!(
            "[Hook] ⚠ console.log detected in {} at line(s): {}",
            path,
            join_line_numbers(&lines)
        );
        self.console_logs.insert(path, lines);
        vec![message]
    }

    fn file_changed_externally(&mut self, path: String) -> Vec<String> {
        if !is_typescript(Path::new(&path)) {
            return Vec::new();
        }
        let message = format!(
            "[Hook] External change detected: {} was modified outside this session",
            path
        );
        self.edited_files.insert(path);
        vec![message]
    }

    fn idle_summary(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.console_logs.is_empty() {
            lines.push("[Hook] === Session Console.log Audit ===".to_string());
            for (file, numbers) in &self.console_logs {
                lines.push(format!("[Hook]   {}: line(s) {}", file, join_line_numbers(numbers)));
            }
            lines.push(format!(
                "[Hook] Total: {} file(s) with console.log",
                self.console_logs.len()
            ));
            lines.push("[Hook] ================================".to_string());
        }

        if !self.edited_files.is_empty() {
            lines.push(format!(
                "[Hook] Session summary: {} file(s) edited",
                self.edited_files.len()
            ));
        }

        if !self.permissions.is_empty() {
            lines.push(format!(
                "[Hook] Permission requests: {}",
                self.permissions.len()
            ));
        }

        lines
    }
}

/// `[Hook] Task progress: 2/3 completed (67%)`, or nothing for an empty list.
fn task_progress(todos: &[Todo]) -> Option<String> {
    let total = todos.len();
    if total == 0 {
        return None;
    }
    let completed = todos.iter().filter(|t| t.done).count();
    let percent = (completed as f64 / total as f64 * 100.0).round() as u32;
    Some(format!(
        "[Hook] Task progress: {}/{} completed ({}%)",
        completed, total, percent
    ))
}
