//! Advisories for shell commands.

use lazy_static::lazy_static;
use regex::Regex;

use super::HookOutcome;

lazy_static! {
    static ref DEV_SERVER: Regex =
        Regex::new(r"npm run dev|pnpm( run)? dev|yarn dev|bun run dev").unwrap();
    static ref LONG_RUNNING: Regex = Regex::new(
        r"npm (install|test)|pnpm (install|test)|yarn (install|test)?|bun (install|test)|cargo build|make|docker|pytest|vitest|playwright"
    )
    .unwrap();
    static ref PR_URL: Regex =
        Regex::new(r"https://github\.com/([^/\s]+)/([^/\s]+)/pull/(\d+)").unwrap();
}

/// Advisories before a shell command runs.
///
/// Dev servers outside tmux are blocked; the remaining checks only advise.
pub fn bash_advisories(command: &str) -> HookOutcome {
    if DEV_SERVER.is_match(command) {
        return HookOutcome::block(vec![
            "[Hook] BLOCKED: Dev server must run in tmux for log access".to_string(),
            "[Hook] Use: tmux new-session -d -s dev \"npm run dev\"".to_string(),
            "[Hook] Then: tmux attach -t dev".to_string(),
        ]);
    }

    let mut messages = Vec::new();
    if LONG_RUNNING.is_match(command) {
        messages.push("[Hook] Consider running in tmux for session persistence".to_string());
        messages.push("[Hook] tmux new -s dev  |  tmux attach -t dev".to_string());
    }
    if command.contains("git push") {
        messages.push("[Hook] Review changes before push...".to_string());
    }
    HookOutcome::advise(messages)
}

/// Point at the pull request `gh pr create` just opened.
pub fn pr_created_advisories(command: &str, output: &str) -> Vec<String> {
    if !command.contains("gh pr create") {
        return Vec::new();
    }
    let Some(caps) = PR_URL.captures(output) else {
        return Vec::new();
    };

    vec![
        format!("[Hook] PR created: {}", &caps[0]),
        format!(
            "[Hook] To review: gh pr review {} --repo {}/{}",
            &caps[3], &caps[1], &caps[2]
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_server_is_blocked() {
        for command in ["npm run dev", "pnpm dev", "pnpm run dev", "yarn dev", "bun run dev"] {
            let outcome = bash_advisories(command);
            assert!(outcome.block, "{} should block", command);
            assert_eq!(outcome.messages.len(), 3);
            assert_eq!(outcome.exit_code(), 2);
        }
    }

    #[test]
    fn test_long_running_reminder() {
        for command in ["npm install", "cargo build --release", "pytest -x", "yarn add react", "docker compose up"] {
            let outcome = bash_advisories(command);
            assert!(!outcome.block);
            assert_eq!(
                outcome.messages[0],
                "[Hook] Consider running in tmux for session persistence",
                "{}",
                command
            );
        }
    }

    #[test]
    fn test_git_push_reminder() {
        let outcome = bash_advisories("git push origin main");
        assert_eq!(outcome.messages, vec!["[Hook] Review changes before push..."]);
    }

    #[test]
    fn test_plain_command_is_quiet() {
        assert!(bash_advisories("ls -la").is_empty());
        assert!(bash_advisories("git status").is_empty());
    }

    #[test]
    fn test_pr_url_detected() {
        let lines = pr_created_advisories(
            "gh pr create --fill",
            "Creating pull request\nhttps://github.com/acme/web-app/pull/42\n",
        );
        assert_eq!(
            lines,
            vec![
                "[Hook] PR created: https://github.com/acme/web-app/pull/42",
                "[Hook] To review: gh pr review 42 --repo acme/web-app",
            ]
        );
    }

    #[test]
    fn test_pr_url_requires_create_command() {
        let output = "https://github.com/acme/web-app/pull/42";
        assert!(pr_created_advisories("gh pr view 42", output).is_empty());
        assert!(pr_created_advisories("gh pr create", "no url here").is_empty());
    }
}
