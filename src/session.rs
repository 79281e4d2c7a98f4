//! Main menu and the per-preset flow: ask duration, confirm, count down.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::config::PresetMinutes;
use crate::console::{Console, Input};
use crate::glyphs::GlyphTable;
use crate::render;
use crate::style::{ColorTag, paint};
use crate::timer::run_countdown;

/// What the caller should do after a flow returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Menu,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Preset {
    pub fn label(self) -> &'static str {
        match self {
            Preset::Pomodoro => "Pomodoro",
            Preset::ShortBreak => "Short Break",
            Preset::LongBreak => "Long Break",
        }
    }

    pub fn color(self) -> ColorTag {
        match self {
            Preset::Pomodoro => ColorTag::Magenta,
            Preset::ShortBreak => ColorTag::Cyan,
            Preset::LongBreak => ColorTag::Blue,
        }
    }

    pub fn default_minutes(self, presets: &PresetMinutes) -> u32 {
        match self {
            Preset::Pomodoro => presets.pomodoro,
            Preset::ShortBreak => presets.short_break,
            Preset::LongBreak => presets.long_break,
        }
    }
}

/// Main menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start(Preset),
    Leave,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuCommand::Start(Preset::Pomodoro)),
            "2" => Some(MenuCommand::Start(Preset::ShortBreak)),
            "3" => Some(MenuCommand::Start(Preset::LongBreak)),
            "4" => Some(MenuCommand::Leave),
            _ => None,
        }
    }
}

/// Answer to a prompt, or a request to quit instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompted<T> {
    Value(T),
    Leave,
}

const INVALID_MENU_LINGER: Duration = Duration::from_millis(2500);
const LEAVING_LINGER: Duration = Duration::from_secs(1);

/// Show the main menu until the user leaves
pub fn run_menu<C: Console + ?Sized>(
    console: &mut C,
    presets: &PresetMinutes,
    glyphs: &GlyphTable,
) -> Result<()> {
    loop {
        console.clear_screen();
        console.print_line(&render::title_screen())?;
        console.print_line(&format!(
            "[{}] Pomodoro\n[{}] Short Break\n[{}] Long Break\n[{}] Leave",
            paint("1", ColorTag::Green),
            paint("2", ColorTag::Green),
            paint("3", ColorTag::Green),
            paint("4", ColorTag::Red),
        ))?;

        let command = match console.read_input("\nSelect the option (1, 2, 3 or 4): ")? {
            Input::Line(line) => match MenuCommand::parse(&line) {
                Some(command) => command,
                None => {
                    console.print_line("Invalid option. Please, enter a number between 1 and 4.")?;
                    console.linger(INVALID_MENU_LINGER);
                    continue;
                }
            },
            Input::Interrupt | Input::Closed => return leave(console, "\nLeaving..."),
        };

        match command {
            MenuCommand::Start(preset) => {
                info!("selected {}", preset.label());
                console.clear_screen();
                let outcome = run_preset(
                    console,
                    glyphs,
                    preset.default_minutes(presets),
                    preset.label(),
                    preset.color(),
                )?;
                if outcome == SessionOutcome::Exit {
                    return leave(console, "\nLeaving...");
                }
            }
            MenuCommand::Leave => return leave(console, "Leaving..."),
        }
    }
}

fn leave<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<()> {
    info!("leaving");
    console.print_line(message)?;
    console.linger(LEAVING_LINGER);
    Ok(())
}

/// Ask for a duration, confirm, and run one countdown
pub fn run_preset<C: Console + ?Sized>(
    console: &mut C,
    glyphs: &GlyphTable,
    default_minutes: u32,
    label: &str,
    color: ColorTag,
) -> Result<SessionOutcome> {
    let minutes = match ask_for_duration(console, default_minutes, label)? {
        Prompted::Value(minutes) => minutes,
        Prompted::Leave => return Ok(SessionOutcome::Exit),
    };

    match ask_to_start(console)? {
        Prompted::Value(true) => run_countdown(console, glyphs, minutes, color),
        Prompted::Value(false) => Ok(SessionOutcome::Menu),
        Prompted::Leave => Ok(SessionOutcome::Exit),
    }
}

/// Offer to override `default`; an override must be a whole number above zero
pub fn ask_for_duration<C: Console + ?Sized>(
    console: &mut C,
    default: u32,
    label: &str,
) -> Result<Prompted<u32>> {
    let change = match console.read_input(&format!("Change {} time (minutes)? [y/N]: ", label))? {
        Input::Line(line) => line.trim().to_lowercase(),
        Input::Interrupt | Input::Closed => return Ok(Prompted::Leave),
    };
    if change.is_empty() || change == "n" {
        return Ok(Prompted::Value(default));
    }

    loop {
        let answer = match console.read_input("Set time (minutes) [ENTER to cancel]: ")? {
            Input::Line(line) => line,
            Input::Interrupt | Input::Closed => return Ok(Prompted::Leave),
        };

        match parse_minutes(&answer) {
            Ok(None) => return Ok(Prompted::Value(default)),
            Ok(Some(minutes)) => return Ok(Prompted::Value(minutes)),
            Err(message) => console.print_line(&format!("{}\n", message))?,
        }
    }
}

/// `Ok(None)` for an empty answer, otherwise a positive minute count
fn parse_minutes(answer: &str) -> Result<Option<u32>, &'static str> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let value: i64 = answer.parse().map_err(|_| "Enter a valid number.")?;
    if value <= 0 {
        return Err("Enter a number greater than zero.");
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| "Enter a valid number.")
}

/// `Value(true)` to start, `Value(false)` to go back to the menu
pub fn ask_to_start<C: Console + ?Sized>(console: &mut C) -> Result<Prompted<bool>> {
    loop {
        let answer = match console.read_input("Start? [Y/n]")? {
            Input::Line(line) => line,
            Input::Interrupt | Input::Closed => return Ok(Prompted::Leave),
        };

        match answer.trim() {
            "" | "Y" | "y" => return Ok(Prompted::Value(true)),
            "N" | "n" => return Ok(Prompted::Value(false)),
            _ => console.print_line("Invalid option. Try again.\n")?,
        }
    }
}
