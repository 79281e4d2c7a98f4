//! Glyph table for the large countdown digits.
//!
//! Each glyph is seven lines of hand-drawn ASCII art. The raw art has
//! ragged widths, so the table normalizes every line to the widest line
//! found across all glyphs; composing glyphs side by side then keeps the
//! columns aligned.

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Number of lines in every glyph
pub const GLYPH_HEIGHT: usize = 7;

/// Characters the time banner needs
pub const REQUIRED_CHARS: &str = "0123456789:";

/// Raw glyph art, before width normalization
const RAW_GLYPHS: &[(char, [&str; GLYPH_HEIGHT])] = &[
    (
        '0',
        [
            r#"   __"#,
            r#" /'__`\ "#,
            r#"/\ \/\ \ "#,
            r#"\ \ \ \ \ "#,
            r#" \ \ \_\ \ "#,
            r#"  \ \____/"#,
            r#"   \/___/"#,
        ],
    ),
    (
        '1',
        [
            r#"   _"#,
            r#" /' \"#,
            r#"/\_, \"#,
            r#"\/_/\ \"#,
            r#"   \ \ \"#,
            r#"    \ \_\"#,
            r#"     \/_/"#,
        ],
    ),
    (
        '2',
        [
            r#"  ___"#,
            r#"/'___`\"#,
            r#"/\_\ /\ \"#,
            r#"\/_/// /__"#,
            r#"   // /_\ \"#,
            r#"   /\______/"#,
            r#"   \/_____/"#,
        ],
    ),
    (
        '3',
        [
            r#"   __"#,
            r#" /'__`\"#,
            r#"/\_\\L\ \"#,
            r#"\/_/_\_<_"#,
            r#"  /\ \L\ \"#,
            r#"  \ \____/"#,
            r#"   \/___/"#,
        ],
    ),
    (
        '4',
        [
            r#" __ __"#,
            r#"/\ \\ \"#,
            r#"\ \ \\ \"#,
            r#" \ \ \\ \_"#,
            r#"  \ \__ ,__\"#,
            r#"   \/_/\_\_/"#,
            r#"        \/_/"#,
        ],
    ),
    (
        '5',
        [
            r#" ______"#,
            r#"/\  ___\"#,
            r#"\ \ \__/"#,
            r#" \ \___``\"#,
            r#"  \/\ \L\ \"#,
            r#"   \ \____/"#,
            r#"    \/___/"#,
        ],
    ),
    (
        '6',
        [
            r#"  ____"#,
            r#" /'___\"#,
            r#"/\ \__/"#,
            r#"\ \  _``\"#,
            r#" \ \ \L\ \"#,
            r#"  \ \____/"#,
            r#"   \/___/"#,
        ],
    ),
    (
        '7',
        [
            r#" ________ "#,
            r#"/\_____  \"#,
            r#"\/___//'/'"#,
            r#"    /' /'"#,
            r#"   /' /'"#,
            r#"  /\_/"#,
            r#"  \//"#,
        ],
    ),
    (
        '8',
        [
            r#"   __"#,
            r#" /'_ `\"#,
            r#"/\ \L\ \"#,
            r#"\/_> _ <_"#,
            r#" /\ \L\ \"#,
            r#" \ \____/"#,
            r#"   \/___/"#,
        ],
    ),
    (
        '9',
        [
            r#"   __"#,
            r#" /'_ `\"#,
            r#"/\ \L\ \"#,
            r#"\ \___, \"#,
            r#"\ /__,/\ \"#,
            r#"      \ \_\"#,
            r#"       \/_/"#,
        ],
    ),
    (
        ':',
        [
            r#"   __"#,
            r#"  /\_\"#,
            r#"  \/_/_"#,
            r#"    /\_\"#,
            r#"    \/_/"#,
            r#"       "#,
            r#"       "#,
        ],
    ),
];

/// One character rendered as fixed-width multi-line art
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    lines: [String; GLYPH_HEIGHT],
}

impl Glyph {
    /// All lines, top to bottom
    pub fn lines(&self) -> &[String; GLYPH_HEIGHT] {
        &self.lines
    }

    /// Line at `index`, or `None` past the glyph height
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }
}

/// Normalized glyphs keyed by the character they draw.
///
/// Every glyph has [`GLYPH_HEIGHT`] lines of exactly [`GlyphTable::width`]
/// characters.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    width: usize,
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphTable {
    /// Build the table from the raw art.
    ///
    /// Panics if a character in [`REQUIRED_CHARS`] has no art; the art is
    /// static, so that can only be an editing mistake.
    pub fn build() -> Self {
        let width = max_width(RAW_GLYPHS);

        let glyphs: BTreeMap<char, Glyph> = RAW_GLYPHS
            .iter()
            .map(|(ch, raw)| {
                let lines = raw.map(|line| fit_to_width(line, width));
                (*ch, Glyph { lines })
            })
            .collect();

        for ch in REQUIRED_CHARS.chars() {
            assert!(glyphs.contains_key(&ch), "glyph table is missing {ch:?}");
        }

        Self { width, glyphs }
    }

    /// Process-wide table, built on first use
    pub fn shared() -> &'static GlyphTable {
        static TABLE: OnceLock<GlyphTable> = OnceLock::new();
        TABLE.get_or_init(GlyphTable::build)
    }

    /// Width of every glyph line, in characters
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Iterate over `(char, glyph)` pairs in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.glyphs.iter().map(|(ch, glyph)| (*ch, glyph))
    }
}

fn max_width(raw: &[(char, [&str; GLYPH_HEIGHT])]) -> usize {
    raw.iter()
        .flat_map(|(_, lines)| lines.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Right-pad with spaces or right-truncate `line` to exactly `width` chars
fn fit_to_width(line: &str, width: usize) -> String {
    let mut fitted: String = line.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.extend(std::iter::repeat_n(' ', width - len));
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_required_char_present() {
        let table = GlyphTable::build();
        for ch in REQUIRED_CHARS.chars() {
            assert!(table.contains(ch), "missing {ch:?}");
        }
        assert_eq!(table.iter().count(), REQUIRED_CHARS.chars().count());
    }

    #[test]
    fn test_glyphs_are_uniform() {
        let table = GlyphTable::build();
        for (ch, glyph) in table.iter() {
            assert_eq!(glyph.lines().len(), GLYPH_HEIGHT);
            for line in glyph.lines() {
                assert_eq!(line.chars().count(), table.width(), "glyph {ch:?} line {line:?}");
            }
        }
    }

    #[test]
    fn test_width_is_widest_raw_line() {
        let widest = RAW_GLYPHS
            .iter()
            .flat_map(|(_, lines)| lines.iter())
            .map(|l| l.len())
            .max()
            .unwrap();
        assert_eq!(GlyphTable::build().width(), widest);
    }

    #[test]
    fn test_padding_keeps_art_prefix() {
        let table = GlyphTable::build();
        let one = table.get('1').unwrap();
        assert!(one.line(0).unwrap().starts_with("   _"));
        assert!(one.line(0).unwrap()[4..].chars().all(|c| c == ' '));
        assert!(one.line(GLYPH_HEIGHT).is_none());
    }

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
        assert_eq!(fit_to_width("abcd", 4), "abcd");
        assert_eq!(fit_to_width("", 2), "  ");
    }

    #[test]
    fn test_shared_table_is_memoized() {
        let a = GlyphTable::shared() as *const GlyphTable;
        let b = GlyphTable::shared() as *const GlyphTable;
        assert_eq!(a, b);
    }
}
