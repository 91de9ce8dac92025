use super::*;
use crate::checker::DiagnosticKind;

#[test]
fn parses_rule_line_without_detail() {
    let diag = parse_line("Error: RULENAME(line: 12, col: 4) some detail", false).unwrap();

    assert_eq!(diag.kind, DiagnosticKind::Rule);
    assert_eq!(diag.location, Some(Location::new(12, 4)));
    assert_eq!(diag.rule, "RULENAME");
    assert_eq!(diag.detail, None);
}

#[test]
fn parses_rule_line_with_detail_when_requested() {
    let diag = parse_line("Error: RULENAME(line: 12, col: 4) some detail", true).unwrap();

    assert_eq!(diag.detail.as_deref(), Some("some detail"));
}

#[test]
fn parses_padded_norminette_format() {
    let line = "Error: SPACE_REPLACE_TAB    (line:  17, col:  11):\tFound space when expecting tab";
    let diag = parse_line(line, true).unwrap();

    assert_eq!(diag.rule, "SPACE_REPLACE_TAB");
    assert_eq!(diag.location, Some(Location::new(17, 11)));
    assert_eq!(
        diag.detail.as_deref(),
        Some("Found space when expecting tab")
    );
}

#[test]
fn empty_detail_is_none_even_in_detailed_mode() {
    let diag = parse_line("Error: TOO_MANY_LINES (line: 40, col: 1)", true).unwrap();
    assert_eq!(diag.detail, None);
}

#[test]
fn unexpected_eof_line_is_kept_verbatim() {
    let diag = parse_line("  Error: Unexpected EOF  ", false).unwrap();

    assert_eq!(diag.kind, DiagnosticKind::EndOfFile);
    assert_eq!(diag.location, None);
    assert_eq!(diag.rule, "Error: Unexpected EOF");
}

#[test]
fn file_level_error_carries_path_only() {
    let diag = parse_line("src/main.c: Error!", false).unwrap();

    assert_eq!(diag.kind, DiagnosticKind::FileLevel);
    assert_eq!(diag.location, None);
    assert_eq!(diag.rule, "src/main.c");
}

#[test]
fn file_level_error_without_path_is_ignored() {
    assert!(parse_line(": Error!", false).is_none());
}

#[test]
fn success_line_is_not_a_diagnostic() {
    assert!(parse_line("src/main.c: OK!", false).is_none());
}

#[test]
fn notice_line_is_not_a_diagnostic() {
    let line = "Notice: GLOBAL_VAR_DETECTED  (line:   3, col:   1):\tGlobal variable present";
    assert!(parse_line(line, true).is_none());
}

#[test]
fn unrelated_line_is_ignored() {
    assert!(parse_line("Norme: ./ft_split.c", false).is_none());
    assert!(parse_line("", false).is_none());
}

#[test]
fn missing_parenthesis_fails_closed() {
    assert!(parse_line("Error: RULENAME line: 12, col: 4 detail", false).is_none());
    assert!(parse_line("Error: RULENAME(line: 12, col: 4 detail", false).is_none());
}

#[test]
fn non_numeric_location_fails_closed() {
    assert!(parse_line("Error: RULENAME(line: x, col: 4) detail", false).is_none());
    assert!(parse_line("Error: RULENAME(line: 3, col: ?) detail", false).is_none());
    assert!(parse_line("Error: RULENAME(line: 3) detail", false).is_none());
}

#[test]
fn missing_rule_name_fails_closed() {
    assert!(parse_line("Error: (line: 1, col: 1) detail", false).is_none());
}

#[test]
fn swapped_keys_fail_closed() {
    assert!(parse_line("Error: RULE(col: 1, line: 1) detail", false).is_none());
}
