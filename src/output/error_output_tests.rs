use std::path::PathBuf;

use super::*;

fn render(error: &NorminoError, colors: bool) -> String {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(colors).write_error(&mut buf, error);
    String::from_utf8(buf).unwrap()
}

#[test]
fn error_without_colors_basic() {
    let out = render(&NorminoError::Git("push rejected".to_string()), false);
    assert_eq!(out, "✖ Git: Git error: push rejected\n");
}

#[test]
fn error_with_suggestion() {
    let out = render(&NorminoError::NotGitRepository(PathBuf::from("/tmp/x")), false);
    assert!(out.starts_with("✖ Git: Not a git repository: /tmp/x\n"));
    assert!(out.contains("  help: run the push from the root of a git repository\n"));
}

#[test]
fn aborted_prints_bare_message() {
    let out = render(&NorminoError::Aborted("Push aborted!".to_string()), false);
    assert_eq!(out, "Push aborted!\n");
}

#[test]
fn colored_error_is_bold_red() {
    let out = render(&NorminoError::Config("bad".to_string()), true);
    assert!(out.starts_with("\x1b[1m\x1b[38;2;255;76;76m✖ Config:"));
}
