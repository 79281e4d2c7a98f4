//! Countdown state machine.
//!
//! A running countdown draws one banner frame per second. An interrupt
//! during the wait between frames freezes the state and opens the pause
//! menu; resuming redraws the exact frozen time.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::console::{Console, Input, Tick};
use crate::glyphs::GlyphTable;
use crate::render::{self, render_time};
use crate::session::SessionOutcome;
use crate::style::{ColorTag, paint};

/// Wall-clock time between frames
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Remaining time. Ordering is by minutes, then seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Countdown {
    minutes: u32,
    seconds: u8,
}

impl Countdown {
    pub fn start(total_minutes: u32) -> Self {
        Self {
            minutes: total_minutes,
            seconds: 0,
        }
    }

    /// State at an arbitrary point; `seconds` above 59 is clamped
    pub fn at(minutes: u32, seconds: u8) -> Self {
        Self {
            minutes,
            seconds: seconds.min(59),
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn is_finished(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// Advance one second. A finished countdown stays finished.
    pub fn tick(self) -> Self {
        if self.seconds > 0 {
            Self {
                seconds: self.seconds - 1,
                ..self
            }
        } else if self.minutes > 0 {
            Self {
                minutes: self.minutes - 1,
                seconds: 59,
            }
        } else {
            self
        }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Pause menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    ReturnToMenu,
    Leave,
}

impl PauseChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(PauseChoice::Resume),
            "2" => Some(PauseChoice::ReturnToMenu),
            "3" => Some(PauseChoice::Leave),
            _ => None,
        }
    }
}

/// How a countdown stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Finished,
    Cancelled(SessionOutcome),
}

/// Screen text for one frame
pub fn frame(glyphs: &GlyphTable, state: Countdown, color: ColorTag) -> Result<String> {
    Ok(render_time(glyphs, &state.to_string())?.painted(color))
}

/// Count down from `total_minutes`, then run the completion step.
pub fn run_countdown<C: Console + ?Sized>(
    console: &mut C,
    glyphs: &GlyphTable,
    total_minutes: u32,
    color: ColorTag,
) -> Result<SessionOutcome> {
    info!("countdown started: {} minutes", total_minutes);
    match count_down(console, glyphs, Countdown::start(total_minutes), color)? {
        Termination::Finished => {
            info!("countdown finished");
            acknowledge_finish(console)
        }
        Termination::Cancelled(outcome) => {
            info!("countdown cancelled: {:?}", outcome);
            Ok(outcome)
        }
    }
}

/// Run the frame loop from `state` until it finishes or is cancelled
pub fn count_down<C: Console + ?Sized>(
    console: &mut C,
    glyphs: &GlyphTable,
    mut state: Countdown,
    color: ColorTag,
) -> Result<Termination> {
    loop {
        console.clear_screen();
        console.print_line(&frame(glyphs, state, color)?)?;

        match console.wait_tick(TICK_PERIOD) {
            Tick::Interrupted => {
                info!("paused at {}", state);
                match pause_menu(console)? {
                    PauseChoice::Resume => info!("resumed at {}", state),
                    PauseChoice::ReturnToMenu => {
                        return Ok(Termination::Cancelled(SessionOutcome::Menu));
                    }
                    PauseChoice::Leave => {
                        return Ok(Termination::Cancelled(SessionOutcome::Exit));
                    }
                }
            }
            Tick::Elapsed if state.is_finished() => return Ok(Termination::Finished),
            Tick::Elapsed => state = state.tick(),
        }
    }
}

/// Block on the pause menu until a valid choice is made.
///
/// Another interrupt while paused is ignored. Closed input leaves.
fn pause_menu<C: Console + ?Sized>(console: &mut C) -> Result<PauseChoice> {
    console.clear_screen();
    loop {
        console.print_line("\n\nTimer paused!")?;
        console.print_line(&format!(
            "[{}] Resume Timer\n[{}] Return to menu\n[{}] Leave",
            paint("1", ColorTag::Green),
            paint("2", ColorTag::Green),
            paint("3", ColorTag::Red),
        ))?;

        match console.read_input("\nChoose: ")? {
            Input::Line(line) => match PauseChoice::parse(&line) {
                Some(choice) => return Ok(choice),
                None => console
                    .print_line("\nInvalid option. Please, enter a number between 1 and 3.\n")?,
            },
            Input::Interrupt => console.print_line("\nThe timer is already paused.\n")?,
            Input::Closed => return Ok(PauseChoice::Leave),
        }
    }
}

/// Completion screen, sound, then wait for the user to come back
fn acknowledge_finish<C: Console + ?Sized>(console: &mut C) -> Result<SessionOutcome> {
    console.clear_screen();
    console.print_line(&render::time_finished())?;

    if let Err(e) = console.play_completion_sound() {
        warn!("completion sound failed: {}", e);
        console.print_line(&format!("[Sound unavailable: {}]\x07", e))?;
    }

    // any answer, interrupt or end of input counts as the acknowledgment
    let _ = console.read_input("Press ENTER to return to the menu...")?;
    Ok(SessionOutcome::Menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{Scripted, ScriptedConsole};

    fn screens_showing(console: &ScriptedConsole, state: Countdown) -> Vec<usize> {
        let expected = frame(GlyphTable::shared(), state, ColorTag::Magenta).unwrap();
        console
            .screens
            .iter()
            .enumerate()
            .filter(|(_, screen)| screen.starts_with(&expected))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_start_state() {
        let state = Countdown::start(25);
        assert_eq!((state.minutes(), state.seconds()), (25, 0));
        assert_eq!(state.to_string(), "25:00");
        assert_eq!(state.remaining(), Duration::from_secs(1500));
    }

    #[test]
    fn test_tick_last_second() {
        let state = Countdown::at(0, 1).tick();
        assert_eq!(state, Countdown::at(0, 0));
        assert!(state.is_finished());
        assert_eq!(state.tick(), state);
    }

    #[test]
    fn test_tick_borrows_minute() {
        assert_eq!(Countdown::at(3, 0).tick(), Countdown::at(2, 59));
    }

    #[test]
    fn test_zero_minutes_is_finished() {
        assert!(Countdown::start(0).is_finished());
        assert!(!Countdown::start(1).is_finished());
    }

    #[test]
    fn test_ticks_strictly_decrease() {
        let mut state = Countdown::start(2);
        let mut ticks = 0;
        while !state.is_finished() {
            let next = state.tick();
            assert!(next < state);
            assert!(next.seconds() <= 59);
            state = next;
            ticks += 1;
        }
        assert_eq!(ticks, 120);
    }

    #[test]
    fn test_at_clamps_seconds() {
        assert_eq!(Countdown::at(1, 75).seconds(), 59);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(Countdown::at(5, 7).to_string(), "05:07");
        assert_eq!(Countdown::at(120, 0).to_string(), "120:00");
    }

    #[test]
    fn test_pause_choice_parse() {
        assert_eq!(PauseChoice::parse("1"), Some(PauseChoice::Resume));
        assert_eq!(PauseChoice::parse(" 2 "), Some(PauseChoice::ReturnToMenu));
        assert_eq!(PauseChoice::parse("3"), Some(PauseChoice::Leave));
        assert_eq!(PauseChoice::parse("4"), None);
        assert_eq!(PauseChoice::parse(""), None);
    }

    #[test]
    fn test_count_down_to_finish() {
        let mut console = ScriptedConsole::new([]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::at(0, 3),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Finished);
        // 00:03, 00:02, 00:01, 00:00
        assert_eq!(console.screens.len(), 5);
        assert_eq!(screens_showing(&console, Countdown::at(0, 0)), vec![4]);
    }

    #[test]
    fn test_zero_minutes_shows_single_frame() {
        let mut console = ScriptedConsole::new([]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::start(0),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Finished);
        assert_eq!(console.screens.len(), 2);
    }

    #[test]
    fn test_pause_then_resume_keeps_state() {
        let mut console = ScriptedConsole::new([
            Scripted::Elapse(30),
            Scripted::Interrupt,
            Scripted::Line("1".into()),
            Scripted::Interrupt,
            Scripted::Line("2".into()),
        ]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::start(11),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Cancelled(SessionOutcome::Menu));

        let frozen = screens_showing(&console, Countdown::at(10, 30));
        // the frame before the first pause, then the same frame after resuming
        assert_eq!(frozen.len(), 2);
        let pause_screen = frozen[0] + 1;
        assert!(console.screens[pause_screen].contains("Timer paused!"));
        assert_eq!(frozen[1], pause_screen + 1);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn test_pause_then_leave() {
        let mut console = ScriptedConsole::new([
            Scripted::Elapse(2),
            Scripted::Interrupt,
            Scripted::Line("3".into()),
        ]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::start(5),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Cancelled(SessionOutcome::Exit));
        assert_eq!(screens_showing(&console, Countdown::at(4, 58)).len(), 1);
    }

    #[test]
    fn test_pause_menu_reprompts() {
        let mut console = ScriptedConsole::new([
            Scripted::Interrupt,
            Scripted::Line("9".into()),
            Scripted::Interrupt,
            Scripted::Line("".into()),
            Scripted::Line("3".into()),
        ]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::start(1),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Cancelled(SessionOutcome::Exit));
        assert_eq!(console.prompts.len(), 4);
        let transcript = console.transcript();
        assert_eq!(
            transcript
                .matches("Invalid option. Please, enter a number between 1 and 3.")
                .count(),
            2
        );
        assert!(transcript.contains("already paused"));
    }

    #[test]
    fn test_pause_menu_closed_input_leaves() {
        let mut console = ScriptedConsole::new([Scripted::Interrupt]);
        let end = count_down(
            &mut console,
            GlyphTable::shared(),
            Countdown::start(1),
            ColorTag::Magenta,
        )
        .unwrap();
        assert_eq!(end, Termination::Cancelled(SessionOutcome::Exit));
    }

    #[test]
    fn test_finish_plays_sound_and_returns_to_menu() {
        let mut console = ScriptedConsole::new([Scripted::Line("".into())]);
        let outcome =
            run_countdown(&mut console, GlyphTable::shared(), 0, ColorTag::Cyan).unwrap();
        assert_eq!(outcome, SessionOutcome::Menu);
        assert_eq!(console.sounds_played, 1);
        assert!(console.screens.last().unwrap().contains("Press ENTER"));
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn test_sound_failure_is_not_fatal() {
        let mut console = ScriptedConsole::new([]);
        console.sound_fails = true;
        let outcome =
            run_countdown(&mut console, GlyphTable::shared(), 0, ColorTag::Cyan).unwrap();
        assert_eq!(outcome, SessionOutcome::Menu);
        assert!(console.transcript().contains("[Sound unavailable:"));
    }
}
