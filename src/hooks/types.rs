//! Hook payloads, events and outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host lifecycle events a hook can be dispatched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum HookEvent {
    SessionStart,
    PreToolUse,
    PostToolUse,
    PreCompact,
    Stop,
    SessionEnd,
    Notification,
    UserPromptSubmit,
}

impl HookEvent {
    /// Parse an event name from a CLI argument (case-insensitive).
    pub fn from_arg(s: &str) -> Option<HookEvent> {
        match s.to_lowercase().as_str() {
            "sessionstart" | "session-start" | "session_start" => Some(HookEvent::SessionStart),
            "pretooluse" | "pre-tool-use" | "pre_tool_use" => Some(HookEvent::PreToolUse),
            "posttooluse" | "post-tool-use" | "post_tool_use" => Some(HookEvent::PostToolUse),
            "precompact" | "pre-compact" | "pre_compact" => Some(HookEvent::PreCompact),
            "stop" => Some(HookEvent::Stop),
            "sessionend" | "session-end" | "session_end" => Some(HookEvent::SessionEnd),
            "notification" => Some(HookEvent::Notification),
            "userpromptsubmit" | "user-prompt-submit" | "user_prompt_submit" => {
                Some(HookEvent::UserPromptSubmit)
            }
            _ => None,
        }
    }
}

/// Raw JSON payload read from the host.
///
/// Kept as a `Value` because each host and tool shapes it differently;
/// accessors below pull out the fields hooks need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(flatten)]
    pub data: Value,
}

impl HookInput {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Parse a payload. Anything but a JSON object is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(data @ Value::Object(_)) => Some(Self { data }),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "hook payload is not JSON");
                None
            }
        }
    }

    /// Tool arguments: `tool_input` (Claude Code) or `args` (OpenCode).
    fn tool_args(&self) -> Option<&Value> {
        self.data.get("tool_input").or_else(|| self.data.get("args"))
    }

    /// Path of the file the tool touched.
    pub fn file_path(&self) -> Option<&str> {
        let from_args = self.tool_args().and_then(|args| {
            args.get("file_path")
                .or_else(|| args.get("filePath"))
                .and_then(Value::as_str)
        });
        from_args
            .or_else(|| self.data.get("path").and_then(Value::as_str))
            .filter(|p| !p.is_empty())
    }

    /// Name of the tool being invoked.
    pub fn tool_name(&self) -> Option<&str> {
        self.data
            .get("tool_name")
            .or_else(|| self.data.get("tool"))
            .and_then(Value::as_str)
    }

    /// Shell command for Bash tool invocations.
    pub fn command(&self) -> Option<&str> {
        self.tool_args()
            .and_then(|args| args.get("command"))
            .and_then(Value::as_str)
    }

    /// Tool output rendered as text.
    pub fn tool_output(&self) -> Option<String> {
        let value = self
            .data
            .get("tool_response")
            .or_else(|| self.data.get("output"))?;

        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => match map.get("stdout").and_then(Value::as_str) {
                Some(stdout) => Some(stdout.to_string()),
                None => Some(value.to_string()),
            },
            other => Some(other.to_string()),
        }
    }

    /// Working directory reported by the host, if any.
    pub fn cwd(&self) -> Option<&str> {
        self.data.get("cwd").and_then(Value::as_str)
    }

    pub fn is_bash(&self) -> bool {
        self.tool_name()
            .map(|t| t.eq_ignore_ascii_case("bash"))
            .unwrap_or(false)
    }

    /// Whether the tool writes files (`Edit`, `Write`, `MultiEdit`).
    pub fn is_file_edit(&self) -> bool {
        self.tool_name()
            .map(|t| {
                let t = t.to_lowercase();
                t == "edit" || t == "write" || t == "multiedit"
            })
            .unwrap_or(false)
    }
}

/// Result of running one or more hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOutcome {
    /// Advisory lines for the error stream.
    pub messages: Vec<String>,
    /// Whether the host should refuse the tool call.
    pub block: bool,
}

impl HookOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn advise(messages: Vec<String>) -> Self {
        Self {
            messages,
            block: false,
        }
    }

    pub fn block(messages: Vec<String>) -> Self {
        Self {
            messages,
            block: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && !self.block
    }

    /// Append another outcome. A block is sticky.
    pub fn merge(&mut self, other: HookOutcome) {
        self.messages.extend(other.messages);
        self.block |= other.block;
    }

    /// Process exit code: 0 to continue, 2 to block.
    pub fn exit_code(&self) -> i32 {
        if self.block {
            2
        } else {
            0
        }
    }
}
