use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = NorminoError::Config("jobs must be at least 1".to_string());
    assert_eq!(err.to_string(), "Configuration error: jobs must be at least 1");
}

#[test]
fn error_display_file_read() {
    let err = NorminoError::FileRead {
        path: PathBuf::from(".normino.toml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains(".normino.toml"));
}

#[test]
fn error_display_not_git_repository() {
    let err = NorminoError::NotGitRepository(PathBuf::from("/tmp/project"));
    assert_eq!(err.to_string(), "Not a git repository: /tmp/project");
}

#[test]
fn error_display_http() {
    let err = NorminoError::Http {
        url: "https://example.com/available.txt".to_string(),
        message: "HTTP 404 Not Found".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Request to https://example.com/available.txt failed: HTTP 404 Not Found"
    );
}

#[test]
fn error_display_aborted_is_bare_message() {
    let err = NorminoError::Aborted("Push aborted!".to_string());
    assert_eq!(err.to_string(), "Push aborted!");
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(NorminoError::Config("x".to_string()).error_type(), "Config");
    assert_eq!(NorminoError::Git("x".to_string()).error_type(), "Git");
    assert_eq!(
        NorminoError::NotGitRepository(PathBuf::from(".")).error_type(),
        "Git"
    );
    assert_eq!(
        NorminoError::Io(std::io::Error::other("x")).error_type(),
        "IO"
    );
    assert_eq!(
        NorminoError::ManifestNotFound(PathBuf::from("downloaded.tests")).error_type(),
        "Manifest"
    );
}

#[test]
fn exit_code_separates_blocking_conditions_from_config_errors() {
    assert_eq!(
        NorminoError::Aborted("no".to_string()).exit_code(),
        crate::EXIT_FAILURE
    );
    assert_eq!(
        NorminoError::Git("push failed".to_string()).exit_code(),
        crate::EXIT_FAILURE
    );
    assert_eq!(
        NorminoError::Config("bad".to_string()).exit_code(),
        crate::EXIT_CONFIG_ERROR
    );
    assert_eq!(
        NorminoError::ThreadPool("bad".to_string()).exit_code(),
        crate::EXIT_CONFIG_ERROR
    );
}
