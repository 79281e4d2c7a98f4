//! Composition of glyphs into multi-line banners.
//!
//! Rendering is pure: a [`Banner`] is plain text. Colors are applied only
//! when a banner is painted for printing.

use thiserror::Error;

use crate::glyphs::{GLYPH_HEIGHT, GlyphTable};
use crate::style::{ColorTag, paint_lines};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no glyph for character {0:?}")]
    UnknownGlyph(char),
}

/// Seven display lines composed from a sequence of glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    lines: Vec<String>,
}

impl Banner {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Banner text with every line wrapped in `tag`'s color
    pub fn painted(&self, tag: ColorTag) -> String {
        paint_lines(self.lines.iter().map(String::as_str), tag)
    }
}

/// Compose `text` glyph by glyph, line by line.
///
/// Fails on the first character the table has no glyph for.
pub fn render_time(table: &GlyphTable, text: &str) -> Result<Banner, RenderError> {
    let glyphs = text
        .chars()
        .map(|ch| table.get(ch).ok_or(RenderError::UnknownGlyph(ch)))
        .collect::<Result<Vec<_>, _>>()?;

    let lines = (0..GLYPH_HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|glyph| glyph.lines()[row].as_str())
                .collect::<String>()
        })
        .collect();

    Ok(Banner { lines })
}

/// "pomodoro cli" splash shown above the main menu
pub fn title_screen() -> String {
    paint_lines(TITLE_ART.iter().copied(), ColorTag::Red)
}

/// "time finished!" banner shown when a countdown reaches zero
pub fn time_finished() -> String {
    paint_lines(FINISHED_ART.iter().copied(), ColorTag::Green)
}

const TITLE_ART: &[&str] = &[
    r#"                                       __                                   ___"#,
    r#"                                      /\ \                                 /\_ \    __"#,
    r#" _____     ___     ___ ___     ___    \_\ \    ___   _ __   ___         ___\//\ \  /\_\"#,
    r#"/\ '__`\  / __`\ \/' __` __`\ / __`\  /'_` \  / __`\/\`'__\/ __`\      /'___\\ \ \ \/\ \"#,
    r#"\ \ \L\ \/\ \L\ \/\ \/\ \/\ \/\ \L\ \/\ \L\ \/\ \L\ \ \ \//\ \L\ \    /\ \__/ \_\ \_\ \ \"#,
    r#" \ \ ,__/\ \____/\ \_\ \_\ \_\ \____/\ \___,_\ \____/\ \_\\ \____/    \ \____\/\____\\ \_\"#,
    r#"  \ \ \/  \/___/  \/_/\/_/\/_/\/___/  \/__,_ /\/___/  \/_/ \/___/      \/____/\/____/ \/_/"#,
    r#"   \ \_\"#,
    r#"    \/_/"#,
];

const FINISHED_ART: &[&str] = &[
    r#" __                                   ___                          __                 __  __"#,
    r#"/\ \__  __                          /'___\ __          __         /\ \               /\ \/\ \"#,
    r#"\ \ ,_\/\_\    ___ ___      __     /\ \__//\_\    ___ /\_\    ____\ \ \___      __   \_\ \ \ \"#,
    r#" \ \ \/\/\ \ /' __` __`\  /'__`\   \ \ ,__\/\ \ /' _ `\/\ \  /',__\\ \  _ `\  /'__`\/\'_` \ \ \"#,
    r#"  \ \ \_\ \ \/\ \/\ \/\ \/\  __/    \ \ \_/\ \ \/\ \/\ \ \ \/\__, `\\ \ \ \ \/\  __//\ \L\ \ \_\"#,
    r#"   \ \__\\ \_\ \_\ \_\ \_\ \____\    \ \_\  \ \_\ \_\ \_\ \_\/\____/ \ \_\ \_\ \____\ \___,_\/\_\"#,
    r#"    \/__/ \/_/\/_/\/_/\/_/\/____/     \/_/   \/_/\/_/\/_/\/_/\/___/   \/_/\/_/\/____/ \/__,_ /\/_/"#,
];
