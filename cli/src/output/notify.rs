use linknova::LinkNovaError;
use owo_colors::OwoColorize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    fn glyph(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✗",
            Level::Warning => "⚠",
            Level::Info => "ℹ",
        }
    }
}

/// Status lines on stderr, so stdout stays clean for `--format` output
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    color: bool,
}

impl Notifier {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn format(&self, level: Level, message: &str) -> String {
        let glyph = level.glyph();
        if !self.color {
            return format!("{} {}", glyph, message);
        }
        let glyph = match level {
            Level::Success => glyph.green().bold().to_string(),
            Level::Error => glyph.red().bold().to_string(),
            Level::Warning => glyph.yellow().bold().to_string(),
            Level::Info => glyph.blue().bold().to_string(),
        };
        format!("{} {}", glyph, message)
    }

    pub fn notify(&self, level: Level, message: impl Display) {
        eprintln!("{}", self.format(level, &message.to_string()));
    }

    pub fn success(&self, message: impl Display) {
        self.notify(Level::Success, message);
    }

    pub fn warning(&self, message: impl Display) {
        self.notify(Level::Warning, message);
    }

    pub fn info(&self, message: impl Display) {
        self.notify(Level::Info, message);
    }

    pub fn error(&self, err: &LinkNovaError) {
        self.notify(Level::Error, error_text(err));
    }
}

/// `category: message`, without the status suffix of the Display impl
pub fn error_text(err: &LinkNovaError) -> String {
    let message = match err {
        LinkNovaError::Api { message, .. }
        | LinkNovaError::InvalidInput(message)
        | LinkNovaError::Config(message) => message.clone(),
        other => other.to_string(),
    };
    format!("{}: {}", err.category(), message)
}
