//! Terminal collaborators used by the timer flows.
//!
//! All user input, interrupts included, arrives through one ordered stream
//! of [`Input`] events. The real [`Terminal`] feeds it from a stdin reader
//! thread and a Ctrl-C handler; the countdown's one-second wait listens on
//! the same stream, so an interrupt cuts the wait short instead of killing
//! the process.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, warn};

use crate::sound::{self, SoundError};

/// One event from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without the trailing newline
    Line(String),
    /// Ctrl-C or the platform equivalent
    Interrupt,
    /// Input stream ended
    Closed,
}

/// How a countdown wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Elapsed,
    Interrupted,
}

pub trait Console {
    /// Wipe the screen before a new frame. Never fails.
    fn clear_screen(&mut self);

    /// Print `text` followed by a newline
    fn print_line(&mut self, text: &str) -> io::Result<()>;

    /// Show `prompt` and block for the next input event
    fn read_input(&mut self, prompt: &str) -> io::Result<Input>;

    /// Block for `period` unless an interrupt arrives first
    fn wait_tick(&mut self, period: Duration) -> Tick;

    /// Keep a message on screen for a moment
    fn linger(&mut self, period: Duration);

    /// Play the completion cue, blocking until it ends
    fn play_completion_sound(&mut self) -> Result<(), SoundError>;
}

/// The interactive terminal on stdin/stdout
pub struct Terminal {
    events: Receiver<Input>,
    closed: bool,
}

impl Terminal {
    /// Install the Ctrl-C handler and start the stdin reader.
    ///
    /// The handler is process-wide, so only one terminal may exist.
    pub fn new() -> Result<Self, ctrlc::Error> {
        let (tx, rx) = mpsc::channel();

        let interrupts = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupts.send(Input::Interrupt);
        })?;

        spawn_stdin_reader(tx);

        Ok(Self {
            events: rx,
            closed: false,
        })
    }

    fn next_event(&mut self) -> Input {
        if self.closed {
            return Input::Closed;
        }
        match self.events.recv() {
            Ok(Input::Closed) | Err(_) => {
                self.closed = true;
                Input::Closed
            }
            Ok(event) => event,
        }
    }
}

fn spawn_stdin_reader(tx: Sender<Input>) {
    thread::spawn(move || {
        forward_lines(io::stdin().lock(), &tx);
        debug!("stdin closed");
        let _ = tx.send(Input::Closed);
    });
}

/// Send each line of `reader` as [`Input::Line`] until end of input.
///
/// Bytes that are not UTF-8 are replaced, so a garbled line is just an
/// invalid answer.
fn forward_lines(mut reader: impl BufRead, tx: &Sender<Input>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(Input::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("stdin read failed: {}", e);
                return;
            }
        }
    }
}

impl Console for Terminal {
    fn clear_screen(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
            debug!("clear screen failed: {}", e);
        }
    }

    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn read_input(&mut self, prompt: &str) -> io::Result<Input> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        drop(stdout);

        let event = self.next_event();
        if event == Input::Interrupt {
            // keep the next prompt off the line holding "^C"
            self.print_line("")?;
        }
        Ok(event)
    }

    fn wait_tick(&mut self, period: Duration) -> Tick {
        let deadline = Instant::now() + period;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Tick::Elapsed;
            }
            // Ctrl-C still pauses after stdin has closed
            match self.events.recv_timeout(remaining) {
                Ok(Input::Interrupt) => return Tick::Interrupted,
                // typing during a countdown does nothing
                Ok(Input::Line(_)) => continue,
                Ok(Input::Closed) => self.closed = true,
                Err(RecvTimeoutError::Timeout) => return Tick::Elapsed,
                Err(RecvTimeoutError::Disconnected) => {
                    self.closed = true;
                    thread::sleep(remaining);
                    return Tick::Elapsed;
                }
            }
        }
    }

    fn linger(&mut self, period: Duration) {
        thread::sleep(period);
    }

    fn play_completion_sound(&mut self) -> Result<(), SoundError> {
        sound::play_completion_sound()
    }
}

#[cfg(test)]
pub use scripted::{Scripted, ScriptedConsole};
