#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the normino binary, colors off.
#[macro_export]
macro_rules! normino {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("normino"));
        cmd.env_remove("NORMINO_LOG").arg("--color").arg("never");
        cmd
    }};
}

/// Stand-in for norminette, keyed on the file name:
/// `bad*` reports a style error, `global*` a notice, `hang*` never answers,
/// `garbage*` prints nothing useful, anything else passes.
pub const FAKE_CHECKER: &str = r#"#!/bin/sh
file="$1"
case "$(basename "$file")" in
  bad*)
    echo "$file: Error!"
    echo "Error: SPACE_BEFORE_FUNC    (line:   3, col:   1):	space before function name"
    echo "Error: TOO_MANY_FUNCS       (line:  40, col:   1):	Too many functions in file"
    exit 1
    ;;
  global*)
    echo "$file: OK!"
    echo "Notice: GLOBAL_VAR_DETECTED  (line:   1, col:   1):	Global variable present in file. Make sure it is a reasonable choice."
    ;;
  hang*)
    sleep 5
    ;;
  garbage*)
    echo "segfault in tokenizer" >&2
    ;;
  *)
    echo "$file: OK!"
    ;;
esac
"#;

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates an empty C source file.
    pub fn create_source(&self, relative_path: &str) {
        self.create_file(relative_path, "int\tmain(void)\n{\n\treturn (0);\n}\n");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_config(&self, content: &str) {
        self.create_file(".normino.toml", content);
    }

    /// Install the fake checker outside the scanned tree and point the config at it.
    #[cfg(unix)]
    pub fn with_fake_checker(&self, timeout_secs: u64) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path().join(".fake-norminette");
        fs::write(&script, FAKE_CHECKER).expect("Failed to write fake checker");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake checker executable");

        self.create_config(&format!(
            "[checker]\ncommand = \"{}\"\ntimeout_secs = {timeout_secs}\njobs = 4\n",
            script.display()
        ));
        script
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
