pub const DEFAULT_WIDTH: usize = 80;

/// Width of the attached terminal in columns.
///
/// `COLUMNS` wins when set to a positive number, then the size reported by
/// the terminal on stdout, then [`DEFAULT_WIDTH`].
#[must_use]
pub fn terminal_width() -> usize {
    width_from_env(std::env::var("COLUMNS").ok().as_deref())
        .or_else(tty_width)
        .unwrap_or(DEFAULT_WIDTH)
}

fn width_from_env(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
}

fn tty_width() -> Option<usize> {
    console::Term::stdout()
        .size_checked()
        .map(|(_rows, cols)| usize::from(cols))
        .filter(|&w| w > 0)
}
