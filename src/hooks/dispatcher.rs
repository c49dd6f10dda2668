//! Routes host events to hooks.

use std::path::Path;

use super::{is_typescript, run_file_hook, run_hook, HookContext, HookEvent, HookInput, HookKind, HookOutcome};
use crate::scan::Dialect;

/// Hooks run, in order, after a file of this kind is written.
pub fn chain_for_file(path: &Path) -> Vec<HookKind> {
    match Dialect::from_path(path) {
        Some(Dialect::JavaScript) => {
            let mut chain = vec![HookKind::FormatJs, HookKind::WarnConsoleLog];
            if is_typescript(path) {
                chain.push(HookKind::CheckTypescript);
            }
            chain
        }
        Some(Dialect::Php) => vec![
            HookKind::FormatPhp,
            HookKind::CheckPhpstan,
            HookKind::WarnPhpDebug,
        ],
        Some(Dialect::Python) => vec![
            HookKind::FormatPython,
            HookKind::CheckMypy,
            HookKind::WarnPythonDebug,
        ],
        None => Vec::new(),
    }
}

/// Run the full chain for one edited file. Disabled hooks are skipped and a
/// blocking hook ends the chain.
pub fn run_file_chain(file: &Path, ctx: &HookContext<'_>) -> HookOutcome {
    let mut outcome = HookOutcome::empty();
    if ctx.config.is_path_excluded(file) {
        return outcome;
    }

    for kind in chain_for_file(file) {
        if !ctx.config.is_enabled(kind) {
            tracing::debug!(hook = %kind, "hook disabled by config");
            continue;
        }
        outcome.merge(run_file_hook(kind, file, ctx));
        if outcome.block {
            break;
        }
    }
    outcome
}

/// Route one host event to the hooks that handle it.
pub fn dispatch(event: HookEvent, input: &HookInput, ctx: &HookContext<'_>) -> HookOutcome {
    tracing::debug!(?event, tool = ?input.tool_name(), "dispatching");

    match event {
        HookEvent::PreToolUse if input.is_bash() => run_hook(HookKind::PreBash, input, ctx),
        HookEvent::PostToolUse if input.is_bash() => run_hook(HookKind::PrUrl, input, ctx),
        HookEvent::PostToolUse if input.is_file_edit() => match input.file_path() {
            Some(path) => run_file_chain(&ctx.resolve(path), ctx),
            None => HookOutcome::empty(),
        },
        HookEvent::Stop | HookEvent::SessionEnd => run_hook(HookKind::CheckDebugCode, input, ctx),
        _ => HookOutcome::empty(),
    }
}
