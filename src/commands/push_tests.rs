use std::cell::RefCell;
use std::collections::VecDeque;

use super::*;

#[derive(Default)]
struct FakeGit {
    status: String,
    fail_commit: bool,
    fail_branch: bool,
    fail_push: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeGit {
    fn dirty() -> Self {
        Self {
            status: " M main.c\n".to_string(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GitOps for FakeGit {
    fn status_porcelain(&self) -> Result<String> {
        self.calls.borrow_mut().push("status".to_string());
        Ok(self.status.clone())
    }

    fn add_all(&self) -> Result<()> {
        self.calls.borrow_mut().push("add".to_string());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("commit {message}"));
        if self.fail_commit {
            return Err(NorminoError::Git("Git commit failed: nothing added".into()));
        }
        Ok(())
    }

    fn current_branch(&self) -> Result<String> {
        if self.fail_branch {
            return Err(NorminoError::Git("detached".into()));
        }
        Ok("main".to_string())
    }

    fn push(&self, branch: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("push {branch}"));
        if self.fail_push {
            return Err(NorminoError::Git("Git push failed: rejected".into()));
        }
        Ok(())
    }
}

struct ScriptedPrompt {
    answers: VecDeque<&'static str>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[&'static str]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            questions: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .map(ToString::to_string)
            .ok_or_else(|| NorminoError::Aborted(PUSH_ABORTED.to_string()))
    }
}

fn aborted_message(result: Result<()>) -> String {
    match result {
        Err(NorminoError::Aborted(message)) => message,
        other => panic!("expected abort, got {other:?}"),
    }
}

fn counts(entries: &[(&str, usize)]) -> BTreeMap<PathBuf, usize> {
    entries
        .iter()
        .map(|(dir, n)| (PathBuf::from(dir), *n))
        .collect()
}

#[test]
fn confirm_repeats_until_valid_answer() {
    let git = FakeGit::default();
    let mut prompt = ScriptedPrompt::new(&["maybe", "", " Y "]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    assert!(session.confirm("Sure? (y/n): ").unwrap());

    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches("Invalid input. Please enter 'y' or 'n'.").count(), 2);
    assert_eq!(prompt.questions.len(), 3);
}

#[test]
fn no_norm_errors_asks_nothing() {
    let git = FakeGit::default();
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    session.gate_norm_errors(&BTreeMap::new()).unwrap();
    session.gate_unwanted(&[]).unwrap();

    assert!(out.is_empty());
    assert!(prompt.questions.is_empty());
}

#[test]
fn norm_errors_are_listed_and_can_be_accepted() {
    let git = FakeGit::default();
    let mut prompt = ScriptedPrompt::new(&["y"]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    session
        .gate_norm_errors(&counts(&[("/repo/src", 2), ("/repo/inc", 1)]))
        .unwrap();

    let out = String::from_utf8(out).unwrap();
    let inc = out.find(" - /repo/inc: 1 error(s)").unwrap();
    let src = out.find(" - /repo/src: 2 error(s)").unwrap();
    assert!(inc < src);
    assert!(out.starts_with("Norm errors found in the following directories:"));
    assert!(out.contains("Proceeding with push despite norm errors."));
    assert_eq!(
        prompt.questions,
        vec!["There are norm errors! Are you sure you want to push? (y/n): "]
    );
}

#[test]
fn declining_norm_errors_aborts() {
    let git = FakeGit::dirty();
    let mut prompt = ScriptedPrompt::new(&["n"]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    let result = session.gate_norm_errors(&counts(&[("/repo", 1)]));

    assert_eq!(aborted_message(result), "Push aborted!");
    assert!(git.calls().is_empty());
}

#[test]
fn unwanted_files_are_listed_and_can_be_declined() {
    let git = FakeGit::default();
    let mut prompt = ScriptedPrompt::new(&["x", "n"]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    let result = session.gate_unwanted(&[PathBuf::from("/repo/a.out")]);

    assert_eq!(aborted_message(result), "Push aborted!");
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Potential unwanted files detected:"));
    assert!(out.contains(" - /repo/a.out"));
}

#[test]
fn clean_tree_skips_commit() {
    let git = FakeGit::default();
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    session.commit_and_push("msg").unwrap();

    assert_eq!(git.calls(), vec!["status"]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Nothing to commit, working tree clean.\n"
    );
}

#[test]
fn dirty_tree_is_committed_and_pushed() {
    let git = FakeGit::dirty();
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    session.commit_and_push("fix norm").unwrap();

    assert_eq!(
        git.calls(),
        vec!["status", "add", "commit fix norm", "push main"]
    );
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Committed changes with message: 'fix norm'"));
    assert!(out.ends_with("Push successful.\n"));
}

#[test]
fn commit_failure_is_reported_verbatim() {
    let git = FakeGit {
        fail_commit: true,
        ..FakeGit::dirty()
    };
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    let result = session.commit_and_push("m");

    assert_eq!(aborted_message(result), "Git commit failed: nothing added");
    assert!(!git.calls().iter().any(|c| c.starts_with("push")));
}

#[test]
fn branch_failure_stops_before_push() {
    let git = FakeGit {
        fail_branch: true,
        ..FakeGit::dirty()
    };
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    let result = session.commit_and_push("m");

    assert_eq!(aborted_message(result), "Failed to retrieve current branch.");
}

#[test]
fn push_failure_is_reported_verbatim() {
    let git = FakeGit {
        fail_push: true,
        ..FakeGit::dirty()
    };
    let mut prompt = ScriptedPrompt::new(&[]);
    let mut out = Vec::new();
    let mut session = PushSession::new(&git, &mut prompt, &mut out, Palette::new(false));

    let result = session.commit_and_push("m");

    assert_eq!(aborted_message(result), "Git push failed: rejected");
}

#[test]
fn given_message_is_used_without_asking() {
    let mut prompt = ScriptedPrompt::new(&[]);
    let message = resolve_message(&mut prompt, Some("init"), Palette::new(false)).unwrap();
    assert_eq!(message, "init");
    assert!(prompt.questions.is_empty());
}

#[test]
fn missing_message_is_asked_for() {
    let mut prompt = ScriptedPrompt::new(&["  add parser  "]);
    let message = resolve_message(&mut prompt, None, Palette::new(false)).unwrap();
    assert_eq!(message, "add parser");
    assert_eq!(prompt.questions, vec!["Enter commit message: "]);
}

#[test]
fn empty_message_aborts() {
    let mut prompt = ScriptedPrompt::new(&["   "]);
    let result = resolve_message(&mut prompt, None, Palette::new(false));
    assert!(
        matches!(result, Err(NorminoError::Aborted(m)) if m == "Commit message cannot be empty.")
    );
}
