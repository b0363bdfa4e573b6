use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Warning,
    Error,
}

fn build_label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
    }
}

/// Formats a message; colour is applied unless disabled through `colored`'s override.
pub fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    let base = format!("{}: {}", build_label(kind), message);
    match kind {
        MessageKind::Warning => base.yellow().to_string(),
        MessageKind::Error => base.red().bold().to_string(),
    }
}

pub fn warning(message: impl fmt::Display) {
    eprintln!("{}", format_message(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{}", format_message(MessageKind::Error, message));
}

/// Disables ANSI colour codes, e.g. when `NO_COLOR` is set or output is piped.
pub fn disable_colors() {
    colored::control::set_override(false);
}
