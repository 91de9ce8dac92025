use super::*;
use crate::checker::Location;

#[test]
fn ok_marker_alone_is_ok() {
    assert_eq!(classify_output("main.c: OK!\n", false), Classification::Ok);
}

#[test]
fn ok_marker_with_notice_is_warning() {
    let out = "main.c: OK!\nNotice: GLOBAL_VAR_DETECTED  (line:   3, col:   1):\tGlobal variable present\n";
    assert_eq!(classify_output(out, false), Classification::Warning);
}

#[test]
fn notice_without_ok_is_not_a_warning() {
    let out = "main.c: Error!\nNotice: GLOBAL_VAR_DETECTED (line: 3, col: 1)\nError: TOO_MANY_LINES (line: 40, col: 1)\n";
    let Classification::Error(diags) = classify_output(out, false) else {
        panic!("expected error classification");
    };
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "TOO_MANY_LINES");
}

#[test]
fn diagnostics_keep_output_order() {
    let out = "\
main.c: Error!
Error: SPACE_REPLACE_TAB    (line:  17, col:  11):\tFound space when expecting tab
Error: INVALID_HEADER       (line:   1, col:   1):\tMissing or invalid 42 header
Error: TOO_MANY_FUNCS       (line:  90, col:   1):\tToo many functions in file
";
    let Classification::Error(diags) = classify_output(out, false) else {
        panic!("expected error classification");
    };

    let locations: Vec<_> = diags.iter().filter_map(|d| d.location).collect();
    assert_eq!(
        locations,
        vec![
            Location::new(17, 11),
            Location::new(1, 1),
            Location::new(90, 1)
        ]
    );
}

#[test]
fn file_level_header_dropped_when_located_diagnostics_exist() {
    let out = "main.c: Error!\nError: INVALID_HEADER (line: 1, col: 1): Missing header\n";
    let Classification::Error(diags) = classify_output(out, false) else {
        panic!("expected error classification");
    };
    assert!(diags.iter().all(|d| d.kind != DiagnosticKind::FileLevel));
}

#[test]
fn file_level_error_alone_is_kept() {
    let Classification::Error(diags) = classify_output("broken.c: Error!\n", false) else {
        panic!("expected error classification");
    };
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::FileLevel);
    assert_eq!(diags[0].rule, "broken.c");
}

#[test]
fn unexpected_eof_is_kept_next_to_file_level_header() {
    let out = "broken.c: Error!\nError: Unexpected EOF\n";
    let Classification::Error(diags) = classify_output(out, false) else {
        panic!("expected error classification");
    };
    let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::FileLevel, DiagnosticKind::EndOfFile]
    );
}

#[test]
fn malformed_lines_are_skipped() {
    let out = "main.c: Error!\nError: BROKEN(line: x, col: 1)\nError: GOOD (line: 2, col: 3)\n";
    let Classification::Error(diags) = classify_output(out, false) else {
        panic!("expected error classification");
    };
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "GOOD");
}

#[test]
fn empty_output_is_unrecognized() {
    assert_eq!(classify_output("", false), Classification::Unrecognized);
    assert_eq!(
        classify_output("Traceback (most recent call last):\n", false),
        Classification::Unrecognized
    );
}
