use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::checker::{CheckOutcome, Diagnostic};
use crate::report::RunReport;

use super::color::{Color, Palette};
use super::path::display_path;

pub const PASS_HEADER: &str = "══════════════[ PASS ]══════════════════";
pub const WARN_HEADER: &str = "══════════════[ WARN ]══════════════════";
pub const FAIL_HEADER: &str = "══════════════[ FAIL ]══════════════════";
pub const FAILED_HEADER: &str = "══════════════[ FAILED ]════════════════";
pub const DIVIDER: &str = "════════════════════════════════════════";

pub const WARNING_ADVICE: &str = "Make sure your global is const or static!";

const COLUMN_PADDING: usize = 2;

/// Which sections of the interactive report are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReportOptions {
    /// Suppress the PASS section.
    pub error_only: bool,
    /// Print only the closing counts.
    pub summary_only: bool,
    /// One diagnostic per line, with its description.
    pub detailed: bool,
}

/// Renders a [`RunReport`] as the sectioned, colorized terminal report.
pub struct TextReporter {
    palette: Palette,
    width: usize,
    options: ReportOptions,
    root: Option<PathBuf>,
}

impl TextReporter {
    #[must_use]
    pub const fn new(palette: Palette, width: usize, options: ReportOptions) -> Self {
        Self {
            palette,
            width,
            options,
            root: None,
        }
    }

    /// Display paths relative to `root` when they live under it.
    #[must_use]
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = Some(root.to_path_buf());
        self
    }

    fn show(&self, path: &Path) -> String {
        display_path(path, self.root.as_deref())
    }

    #[must_use]
    pub fn render(&self, report: &RunReport) -> String {
        let mut out = String::new();

        if !self.options.summary_only {
            if !report.ok.is_empty() && !self.options.error_only {
                self.write_pass(&mut out, &report.ok);
                if !report.errors.is_empty() {
                    out.push('\n');
                }
            }
            if !report.warnings.is_empty() {
                self.write_warnings(&mut out, &report.warnings);
            }
            if !report.errors.is_empty() {
                self.write_errors(&mut out, &report.errors);
            }
            if !report.failed.is_empty() {
                self.write_failed(&mut out, &report.failed);
            }
        }

        if self.options.summary_only || !report.errors.is_empty() || !report.failed.is_empty() {
            self.write_summary(&mut out, report);
        }

        out
    }

    fn write_pass(&self, out: &mut String, ok: &[CheckOutcome]) {
        let p = self.palette;
        writeln!(out, "{}", p.paint(PASS_HEADER, Color::Green)).ok();
        let joined = ok
            .iter()
            .map(|o| self.show(o.path()))
            .collect::<Vec<_>>()
            .join(", ");
        for line in wrap(&joined, self.width) {
            writeln!(out, "{}", p.paint(&line, Color::Green)).ok();
        }
    }

    fn write_warnings(&self, out: &mut String, warnings: &[CheckOutcome]) {
        let p = self.palette;
        writeln!(out, "{}", p.paint(WARN_HEADER, Color::Yellow)).ok();
        for outcome in warnings {
            let path = format!("{}:", self.show(outcome.path()));
            writeln!(out, "{}", p.paint(&path, Color::Cyan)).ok();
            writeln!(out, "   {}", p.paint(WARNING_ADVICE, Color::Yellow)).ok();
        }
    }

    fn write_errors(&self, out: &mut String, errors: &[CheckOutcome]) {
        let p = self.palette;
        writeln!(out, "{}", p.paint(FAIL_HEADER, Color::Red)).ok();
        let header = format!("{:>4} {:>4} Error Description", "Line", "Col");
        writeln!(out, "{}", p.paint(&header, Color::Yellow)).ok();

        for outcome in errors {
            let diagnostics = outcome.diagnostics();
            if diagnostics.is_empty() {
                continue;
            }
            writeln!(out, "{}", p.paint(&self.show(outcome.path()), Color::Cyan)).ok();

            let cells: Vec<Cell> = diagnostics.iter().map(|d| self.cell(d)).collect();
            if self.options.detailed {
                for cell in &cells {
                    writeln!(out, "{}", cell.painted).ok();
                }
            } else {
                for row in layout_columns(&cells, self.width) {
                    writeln!(out, "{row}").ok();
                }
            }
        }
    }

    fn write_failed(&self, out: &mut String, failed: &[CheckOutcome]) {
        writeln!(out, "{FAILED_HEADER}").ok();
        for outcome in failed {
            let detail = outcome.failure_detail().unwrap_or_default();
            let message = format!("{}: {detail}", self.show(outcome.path()));
            for line in wrap(&message, self.width) {
                writeln!(out, "{}", self.palette.paint(&line, Color::Yellow)).ok();
            }
        }
    }

    fn write_summary(&self, out: &mut String, report: &RunReport) {
        let p = self.palette;
        let summary = report.summary();
        writeln!(out, "{DIVIDER}").ok();
        let ok = format!("Correct files: {}", summary.ok_count);
        writeln!(out, "{}", p.paint(&ok, Color::Green)).ok();
        let errors = format!("Files with errors: {}", summary.error_file_count);
        writeln!(out, "{}", p.paint(&errors, Color::Red)).ok();
        if summary.failed_count > 0 {
            let failed = format!("Files that crashed norminette: {}", summary.failed_count);
            writeln!(out, "{}", p.paint(&failed, Color::Red)).ok();
        }
    }

    fn cell(&self, diagnostic: &Diagnostic) -> Cell {
        let plain = diagnostic.to_string();
        let p = self.palette;
        let painted = match diagnostic.location {
            Some(loc) => {
                let mut s = format!(
                    "{} {} {}",
                    p.paint(&format!("{:>4}", loc.line), Color::Yellow),
                    p.paint(&format!("{:>4}", loc.column), Color::Yellow),
                    p.paint(&diagnostic.rule, Color::Red),
                );
                if let Some(detail) = &diagnostic.detail {
                    s.push(' ');
                    s.push_str(detail);
                }
                s
            }
            None => plain.clone(),
        };
        Cell { plain, painted }
    }

    /// Directory-to-count listing shown before the push confirmation.
    #[must_use]
    pub fn render_directory_summary(&self, counts: &BTreeMap<PathBuf, usize>) -> String {
        let p = self.palette;
        let mut out = String::new();
        writeln!(
            out,
            "{}",
            p.bold("Norm errors found in the following directories:", Color::Red)
        )
        .ok();
        for (dir, count) in counts {
            let line = format!(" - {}: {count} error(s)", dir.display());
            writeln!(out, "{}", p.paint(&line, Color::Yellow)).ok();
        }
        out
    }
}

struct Cell {
    plain: String,
    painted: String,
}

/// Lay cells out column-major in as many columns as fit in `width`.
///
/// Every column is as wide as the longest cell plus padding. Widths are
/// measured on the uncolored text so escape codes never skew alignment.
fn layout_columns(cells: &[Cell], width: usize) -> Vec<String> {
    let Some(max_len) = cells.iter().map(|c| c.plain.chars().count()).max() else {
        return Vec::new();
    };
    let column_width = max_len + COLUMN_PADDING;
    let num_cols = (width / column_width).max(1);

    if num_cols == 1 {
        return cells.iter().map(|c| c.painted.clone()).collect();
    }

    let num_rows = cells.len().div_ceil(num_cols);
    (0..num_rows)
        .map(|row| {
            let mut line = String::new();
            for col in 0..num_cols {
                let Some(cell) = cells.get(col * num_rows + row) else {
                    break;
                };
                line.push_str(&cell.painted);
                let pad = column_width - cell.plain.chars().count();
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Greedy word wrap on whitespace. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
