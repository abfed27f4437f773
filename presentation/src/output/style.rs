//! Label styling for console output

use colored::{Color, ColoredString, Colorize};
use threadsense_domain::ModerationLabel;

/// How a label is drawn on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub icon: &'static str,
    pub color: Color,
    pub title: &'static str,
}

const VIOLATION: LabelStyle = LabelStyle {
    icon: "✖",
    color: Color::Red,
    title: "Violation",
};

const NEEDS_WARNING: LabelStyle = LabelStyle {
    icon: "!",
    color: Color::Yellow,
    title: "Needs warning",
};

const FINE: LabelStyle = LabelStyle {
    icon: "✔",
    color: Color::Green,
    title: "Fine",
};

const ERROR: LabelStyle = LabelStyle {
    icon: "?",
    color: Color::BrightBlack,
    title: "Inconclusive",
};

impl LabelStyle {
    pub const fn of(label: ModerationLabel) -> Self {
        match label {
            ModerationLabel::Violation => VIOLATION,
            ModerationLabel::NeedsWarning => NEEDS_WARNING,
            ModerationLabel::Fine => FINE,
            ModerationLabel::Error => ERROR,
        }
    }

    /// `"<icon> LABEL"` in the label's color
    pub fn badge(&self, label: ModerationLabel) -> ColoredString {
        format!("{} {}", self.icon, label.as_str())
            .color(self.color)
            .bold()
    }
}
