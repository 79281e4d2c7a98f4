//! Named color tags and the print-time paint decorator.

use crossterm::style::{Color, Stylize};

/// Display colors used by the timer screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Red,
    Green,
    Blue,
    Magenta,
    Cyan,
}

impl ColorTag {
    pub fn color(self) -> Color {
        match self {
            ColorTag::Red => Color::Red,
            ColorTag::Green => Color::Green,
            ColorTag::Blue => Color::Blue,
            ColorTag::Magenta => Color::Magenta,
            ColorTag::Cyan => Color::Cyan,
        }
    }
}

/// Wrap `text` with a start marker for `tag` and a trailing reset
pub fn paint(text: &str, tag: ColorTag) -> String {
    text.with(tag.color()).to_string()
}

/// Paint each line separately so a reset ends every terminal row
pub fn paint_lines<'a>(lines: impl IntoIterator<Item = &'a str>, tag: ColorTag) -> String {
    lines
        .into_iter()
        .map(|line| paint(line, tag))
        .collect::<Vec<_>>()
        .join("\n")
}
