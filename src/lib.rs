//! pomo-cli - a terminal Pomodoro timer drawn in large ASCII-art digits
//!
//! The main menu offers three presets (Pomodoro, Short Break, Long Break).
//! A countdown repaints the remaining time once per second; Ctrl-C pauses it
//! and opens a menu to resume, return to the main menu, or leave.

pub mod config;
pub mod console;
pub mod glyphs;
pub mod render;
pub mod session;
pub mod sound;
pub mod style;
pub mod timer;

pub use config::Config;
pub use console::{Console, Input, Terminal, Tick};
pub use glyphs::GlyphTable;
pub use session::{SessionOutcome, run_menu};
pub use timer::Countdown;
