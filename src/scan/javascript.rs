//! `console.log` detection for JavaScript and TypeScript.

use lazy_static::lazy_static;
use regex::Regex;

use super::comments::BlockComments;
use super::Match;

lazy_static! {
    static ref CONSOLE_LOG: Regex = Regex::new(r"console\.log\s*\(").unwrap();
}

/// Report every line with a `console.log(` call outside of comments.
pub(super) fn scan_javascript(content: &str) -> Vec<Match> {
    let mut comments = BlockComments::new();

    content
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let code = comments.live_code(line)?;
            CONSOLE_LOG
                .is_match(&code)
                .then(|| Match::new(idx + 1, line))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str) -> Vec<usize> {
        scan_javascript(content).iter().map(|m| m.line).collect()
    }

    #[test]
    fn test_detects_console_log() {
        let content = "const a = 1;\nconsole.log(a);\n  console.log ('spaced');\n";
        assert_eq!(lines(content), vec![2, 3]);
    }

    #[test]
    fn test_requires_call_parenthesis() {
        assert!(lines("const log = console.log;").is_empty());
        assert!(lines("console.error('x');").is_empty());
    }

    #[test]
    fn test_skips_line_comments() {
        let content = "// console.log('a');\n    // console.log('b');\nfoo(); // console.log('c');\n";
        // Trailing comments after code are not stripped for this dialect's
        // line-comment rule, only leading ones.
        assert_eq!(lines(content), vec![3]);
    }

    #[test]
    fn test_skips_multiline_block_comment() {
        let content = "/*\n console.log('hidden');\n*/\nconsole.log('shown');";
        assert_eq!(lines(content), vec![4]);
    }

    #[test]
    fn test_reports_code_after_block_terminator() {
        let content = "/* start\nstill comment */ console.log('after');\n";
        assert_eq!(lines(content), vec![2]);
    }

    #[test]
    fn test_code_before_block_opener() {
        let content = "console.log('before'); /* opens\nconsole.log('inside');\n*/";
        assert_eq!(lines(content), vec![1]);
    }

    #[test]
    fn test_inline_block_comment_only() {
        assert!(lines("/* console.log('x') */").is_empty());
        assert_eq!(lines("/* note */ console.log('x');"), vec![1]);
    }

    #[test]
    fn test_raw_line_preserved() {
        let matches = scan_javascript("\tconsole.log('tab');  ");
        assert_eq!(matches[0].text, "\tconsole.log('tab');  ");
    }
}
