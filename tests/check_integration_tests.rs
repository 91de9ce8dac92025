//! End-to-end runs of the check flow against a fake checker script.
#![cfg(unix)]

mod common;

use common::TestFixture;
use predicates::prelude::*;

const PASS: &str = "══════════════[ PASS ]══════════════════";
const WARN: &str = "══════════════[ WARN ]══════════════════";
const FAIL: &str = "══════════════[ FAIL ]══════════════════";
const FAILED: &str = "══════════════[ FAILED ]════════════════";
const DIVIDER: &str = "════════════════════════════════════════";

#[test]
fn clean_tree_lists_passing_files() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("b.c");
    fixture.create_source("a.c");
    fixture.create_file("notes.txt", "not C");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(PASS))
        .stdout(predicate::str::contains("a.c, b.c"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains(DIVIDER).not())
        .stdout(predicate::str::contains("Execution time: "));
}

#[test]
fn style_errors_are_reported_but_exit_zero() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("good.c");
    fixture.create_source("src/bad_utils.c");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(FAIL))
        .stdout(predicate::str::contains("Line  Col Error Description"))
        .stdout(predicate::str::contains("src/bad_utils.c"))
        .stdout(predicate::str::contains("SPACE_BEFORE_FUNC"))
        .stdout(predicate::str::contains("TOO_MANY_FUNCS"))
        .stdout(predicate::str::contains("Correct files: 1"))
        .stdout(predicate::str::contains("Files with errors: 1"));
}

#[test]
fn detailed_mode_includes_descriptions() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("bad.c");

    normino!()
        .current_dir(fixture.path())
        .arg("--detailed")
        .assert()
        .success()
        .stdout(predicate::str::contains("space before function name"));
}

#[test]
fn error_only_hides_pass_section() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("good.c");
    fixture.create_source("bad.c");

    normino!()
        .current_dir(fixture.path())
        .arg("-e")
        .assert()
        .success()
        .stdout(predicate::str::contains(PASS).not())
        .stdout(predicate::str::contains(FAIL));
}

#[test]
fn summary_only_prints_counts() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("good.c");
    fixture.create_source("bad.c");

    normino!()
        .current_dir(fixture.path())
        .arg("--summary_only")
        .assert()
        .success()
        .stdout(predicate::str::contains(FAIL).not())
        .stdout(predicate::str::contains(DIVIDER))
        .stdout(predicate::str::contains("Correct files: 1"))
        .stdout(predicate::str::contains("Files with errors: 1"));
}

#[test]
fn notices_are_warnings_with_advice() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("globals.c");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(WARN))
        .stdout(predicate::str::contains("globals.c:"))
        .stdout(predicate::str::contains(
            "Make sure your global is const or static!",
        ));
}

#[test]
fn slow_checker_times_out() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(1);
    fixture.create_source("hang.c");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(FAILED))
        .stdout(predicate::str::contains("Checking timed out for"))
        .stdout(predicate::str::contains("Files that crashed norminette: 1"));
}

#[test]
fn unrecognized_output_is_a_failure() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("garbage.c");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(FAILED))
        .stdout(predicate::str::contains("segfault in tokenizer"));
}

#[test]
fn missing_checker_fails_every_file() {
    let fixture = TestFixture::new();
    fixture.create_config("[checker]\ncommand = \"normino-no-such-checker\"\n");
    fixture.create_source("a.c");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(FAILED))
        .stdout(predicate::str::contains("Files that crashed norminette: 1"));
}

#[test]
fn exclusions_skip_paths_and_patterns() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("main.c");
    fixture.create_source("tests/bad_test.c");
    fixture.create_source("bonus/bad_bonus.c");

    normino!()
        .current_dir(fixture.path())
        .args(["-x", "tests", "bonus/*"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FAIL).not())
        .stdout(predicate::str::contains("main.c"));
}

#[test]
fn downloaded_fixtures_are_not_checked() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);
    fixture.create_source("main.c");
    fixture.create_source("gnl_tests/bad_main.c");
    fixture.create_file("downloaded.tests", "downloaded.tests\ngnl_tests\n");

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("bad_main.c").not());
}

#[test]
fn list_files_prints_sorted_paths() {
    let fixture = TestFixture::new();
    fixture.create_source("src/b.c");
    fixture.create_source("inc/a.h");
    fixture.create_source("src/a.c");
    fixture.create_file("README.md", "# hi");

    normino!()
        .current_dir(fixture.path())
        .arg("-l")
        .assert()
        .success()
        .stdout("inc/a.h\nsrc/a.c\nsrc/b.c\n");
}

#[test]
fn pattern_roots_are_expanded() {
    let fixture = TestFixture::new();
    fixture.create_source("ft_putchar.c");
    fixture.create_source("ft_putstr.c");
    fixture.create_source("main.c");

    normino!()
        .current_dir(fixture.path())
        .args(["-l", "ft_*.c"])
        .assert()
        .success()
        .stdout("ft_putchar.c\nft_putstr.c\n");
}

#[test]
fn empty_tree_still_reports_time() {
    let fixture = TestFixture::new();
    fixture.with_fake_checker(5);

    normino!()
        .current_dir(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Execution time: "));
}
