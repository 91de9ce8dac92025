use std::io::IsTerminal;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if the stream is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Orange,
    White,
}

impl Color {
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 76, 76),
            Self::Green => (158, 214, 115),
            Self::Blue => (25, 72, 133),
            Self::Yellow => (240, 226, 111),
            Self::Cyan => (6, 146, 213),
            Self::Magenta => (255, 182, 193),
            Self::Orange => (241, 143, 51),
            Self::White => (245, 245, 245),
        }
    }
}

/// ANSI escape sequences
mod ansi {
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Stateless text decorator. Holds only whether color is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Palette for stdout, resolving `Auto` against the terminal and `NO_COLOR`.
    #[must_use]
    pub fn stdout(mode: ColorMode) -> Self {
        Self::new(resolve(mode, std::io::stdout().is_terminal()))
    }

    /// Palette for stderr, resolving `Auto` against the terminal and `NO_COLOR`.
    #[must_use]
    pub fn stderr(mode: ColorMode) -> Self {
        Self::new(resolve(mode, std::io::stderr().is_terminal()))
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn paint(self, text: &str, color: Color) -> String {
        self.decorate(text, color, false)
    }

    #[must_use]
    pub fn bold(self, text: &str, color: Color) -> String {
        self.decorate(text, color, true)
    }

    fn decorate(self, text: &str, color: Color, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let (r, g, b) = color.rgb();
        let weight = if bold { ansi::BOLD } else { "" };
        format!("{weight}\x1b[38;2;{r};{g};{b}m{text}{}", ansi::RESET)
    }
}

fn resolve(mode: ColorMode, is_tty: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        // Per <https://no-color.org>: presence of the variable (any value) disables color.
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && is_tty,
    }
}
