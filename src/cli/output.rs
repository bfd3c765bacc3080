use colored::Colorize;
use std::fmt;

use rust_decimal::Decimal;

use crate::summary::Band;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").bright_red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Band label colored by severity.
pub fn band_label(band: Band) -> String {
    match band {
        Band::Critical => band.label().bright_red().bold().to_string(),
        Band::Warning => band.label().bright_yellow().to_string(),
        Band::Healthy => band.label().bright_green().to_string(),
    }
}

/// Day count rounded to `scale` places and zero-padded to the same width.
pub fn days(value: Decimal, scale: u32) -> String {
    format!("{:.*}", scale as usize, value.round_dp(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn days_pads_to_scale() {
        assert_eq!(days(dec!(3.25), 2), "3.25");
        assert_eq!(days(dec!(10), 2), "10.00");
        assert_eq!(days(dec!(-0.756), 2), "-0.76");
    }
}
